use std::path::PathBuf;

use anyhow::Context as _;
use autodrome_engine::Track;

use crate::{schema::track_file::TrackFile, util};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct TrackInfoArg {
    /// Track JSON file drawn in the curve editor
    #[arg(long)]
    track: PathBuf,
    /// Corridor half-width
    #[arg(long, default_value_t = 10.0)]
    width: f32,
    /// Minimum distance between checkpoint gates
    #[arg(long, default_value_t = 10.0)]
    gate_spacing: f32,
    /// Gates per checkpoint window
    #[arg(long, default_value_t = 3)]
    step_width: usize,
}

pub(crate) fn run(arg: &TrackInfoArg) -> anyhow::Result<()> {
    let track_file: TrackFile = util::read_json_file("track", &arg.track)?;
    let track = Track::new(
        &track_file.centerline(),
        arg.width,
        arg.gate_spacing,
        arg.step_width,
    )
    .with_context(|| format!("track file {} is not buildable", arg.track.display()))?;

    let centers = track.gate_centers();
    let course_length: f32 = centers.windows(2).map(|w| w[0].distance(w[1])).sum();

    println!("track: {}", arg.track.display());
    println!("  drawn:           {}", track_file.date);
    println!("  centerline:      {} points", track_file.points.len());
    println!("  corridor width:  {}", track.width() * 2.0);
    println!("  boundary:        {} points", track.boundary().len());
    println!("  gates:           {}", track.gate_count());
    println!("  course length:   {course_length:.1}");
    println!(
        "  windows:         {}",
        track.gate_count() - arg.step_width - 1
    );

    Ok(())
}
