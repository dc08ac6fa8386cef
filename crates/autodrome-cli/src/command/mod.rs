use clap::{Parser, Subcommand};

use self::{track_info::TrackInfoArg, train::TrainArg};

mod track_info;
mod train;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Evolve a driving policy for a drawn track
    Train(#[clap(flatten)] TrainArg),
    /// Print geometry details of a track file
    TrackInfo(#[clap(flatten)] TrackInfoArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Train(arg) => train::run(&arg)?,
        Mode::TrackInfo(arg) => track_info::run(&arg)?,
    }
    Ok(())
}
