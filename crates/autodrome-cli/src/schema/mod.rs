pub mod track_file;
pub mod trained_run;
