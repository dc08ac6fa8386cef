use std::path::PathBuf;

use anyhow::Context as _;
use autodrome_engine::Track;
use autodrome_evolve::{EvolveConfig, GenerationPlan, PopulationManager};
use chrono::Utc;

use crate::{
    schema::{track_file::TrackFile, trained_run::TrainedRun},
    util::{self, Output},
};

/// Generations a window must be evolved before it may be left.
const MIN_ITERATIONS: usize = 50;
/// Stale generations (no new best fitness) before a solved window is
/// considered converged.
const MIN_STALE_ITERATIONS: usize = 10;
/// Generations without any successful episode before the window's
/// population is thrown away and restarted.
const MAX_UNSOLVED_ITERATIONS: usize = (MIN_ITERATIONS + MIN_STALE_ITERATIONS) * 2;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct TrainArg {
    /// Track JSON file drawn in the curve editor
    #[arg(long)]
    track: PathBuf,
    /// RNG seed; equal seeds reproduce the run exactly
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Corridor half-width
    #[arg(long, default_value_t = 10.0)]
    width: f32,
    /// Minimum distance between checkpoint gates
    #[arg(long, default_value_t = 10.0)]
    gate_spacing: f32,
    /// Population size in groups of 10 genomes
    #[arg(long, default_value_t = 20)]
    groups: usize,
    /// Stop after this many generations even if the track is unsolved
    #[arg(long)]
    max_generations: Option<usize>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &TrainArg) -> anyhow::Result<()> {
    let track_file: TrackFile = util::read_json_file("track", &arg.track)?;
    let config = EvolveConfig {
        population_groups: arg.groups,
        ..EvolveConfig::default()
    };
    config.validate()?;

    let track = Track::new(
        &track_file.centerline(),
        arg.width,
        arg.gate_spacing,
        config.step_width,
    )
    .with_context(|| format!("track file {} is not buildable", arg.track.display()))?;

    let mut manager = PopulationManager::new(track, config.clone(), arg.seed)?;
    let windows = manager.total_steps() - config.step_width - 1;
    log::info!(
        "track built: {} gates, {} checkpoint windows, population {}",
        manager.total_steps(),
        windows,
        config.population_size(),
    );

    manager.run_generation();
    manager.rank_generation();

    let mut best_fitness = manager.population()[0].fitness();
    let mut iteration = 0usize;
    let mut stale = 0usize;
    let mut unsolved = 0usize;
    let mut window = 0usize;
    let mut plan = GenerationPlan::Continue;

    while manager.prepare_next_generation(plan) {
        plan = GenerationPlan::Continue;
        manager.run_generation();
        manager.rank_generation();

        let best = &manager.population()[0];
        if best.fitness() > best_fitness && iteration >= MIN_ITERATIONS {
            best_fitness = best.fitness();
            stale = 0;
        } else if iteration >= MIN_ITERATIONS {
            stale += 1;
        }

        if best.is_success() {
            unsolved = 0;
        } else {
            unsolved += 1;
            if unsolved >= MAX_UNSOLVED_ITERATIONS {
                log::warn!(
                    "window {window} unsolved after {unsolved} generations, restarting it"
                );
                manager.prepare_next_generation(GenerationPlan::Reset);
                manager.run_generation();
                manager.rank_generation();
                iteration = 0;
                stale = 0;
                unsolved = 0;
            }
        }

        iteration += 1;

        if let Some(limit) = arg.max_generations
            && manager.generation() >= limit
        {
            log::warn!("generation limit {limit} reached, stopping early");
            break;
        }

        if iteration < MIN_ITERATIONS
            || stale < MIN_STALE_ITERATIONS
            || !manager.population()[0].is_success()
        {
            continue;
        }

        iteration = 0;
        stale = 0;
        window += 1;
        eprintln!("window {window}/{windows} solved");
        if let Some(report) = manager.report() {
            eprintln!("{report}");
        }
        let best = manager.population()[0].telemetry();
        eprintln!(
            "  window best: fitness {:.3}, {:.0} ticks, avg speed {:.1}",
            best[0], best[3], best[4],
        );
        plan = GenerationPlan::Advance;
    }

    #[expect(clippy::cast_precision_loss)]
    let episode_seconds = manager.best_genes().len() as f32 / config.tick_rate;
    eprintln!(
        "training finished after {} generations: {} actions harvested ({episode_seconds:.1}s of driving)",
        manager.generation(),
        manager.best_genes().len(),
    );

    let run = TrainedRun {
        track: arg.track.display().to_string(),
        trained_at: Utc::now(),
        seed: arg.seed,
        final_fitness: manager.population()[0].fitness(),
        tick_rate: config.tick_rate,
        episode_seconds,
        actions: manager.best_genes().to_vec(),
    };
    Output::save_json(&run, arg.output.clone())?;
    if let Some(path) = &arg.output {
        eprintln!("run saved to {}", path.display());
    }

    Ok(())
}
