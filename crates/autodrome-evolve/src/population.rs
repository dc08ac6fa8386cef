//! Population lifecycle: parallel evaluation, ranking, and synthesis of
//! the next generation.
//!
//! A generation lives in a fixed-size `Vec<Genome>`. Evaluation fans the
//! genomes out over a thread pool capped at the configured parallelism;
//! each genome owns its car and gate cursor, so the only shared state is
//! the immutable track. Synthesis then partitions the array into
//! contiguous slices, one per genetic operator, with slice sizes derived
//! from the configured rates. Rounding leftovers always land in the
//! trailing all-random slice, so the population size never drifts.

use std::fmt;

use autodrome_engine::{Car, Track, math::rand_table::{RandomTable, TableStream}};
use autodrome_stats::Summary;
use glam::Vec2;
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg64;
use rayon::prelude::*;

use crate::{
    action::{self, ACTION_COUNT},
    config::{ConfigError, EvolveConfig},
    genome::{Genome, Origin},
};

/// Entries pre-generated per random lookup table.
const RAND_TABLE_LEN: usize = 4096;

/// What to do with the population before synthesizing the next
/// generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationPlan {
    /// Keep evolving the current checkpoint window.
    Continue,
    /// Harvest the best genome's snapshot and move the window one gate
    /// down the track.
    Advance,
    /// Discard the population and start the current window over.
    Reset,
}

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum PopulationError {
    #[display("invalid configuration: {_0}")]
    Config(ConfigError),
    #[display("failed to build evaluation pool: {_0}")]
    ThreadPool(rayon::ThreadPoolBuildError),
}

pub struct PopulationManager {
    config: EvolveConfig,
    track: Track,
    population: Vec<Genome>,
    progenitor_car: Car,
    evolution_step: usize,
    generation: usize,
    best_genes: Vec<u8>,
    rng: Pcg64,
    action_table: RandomTable<u8>,
    double_table: RandomTable<f64>,
    pool: rayon::ThreadPool,
}

impl PopulationManager {
    /// Builds a manager with a fully random starting population placed
    /// at the track's progenitor pose.
    pub fn new(track: Track, config: EvolveConfig, seed: u64) -> Result<Self, PopulationError> {
        config.validate()?;
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.max_parallelism)
            .build()?;

        let mut rng = Pcg64::seed_from_u64(seed);
        let action_table =
            RandomTable::generate(RAND_TABLE_LEN, &mut rng, |r| r.random_range(0..ACTION_COUNT));
        let double_table = RandomTable::generate(RAND_TABLE_LEN, &mut rng, |r| r.random::<f64>());

        let mut progenitor_car = Car::new(Vec2::ZERO, 0.0);
        progenitor_car.reset_on(&track);

        let mut manager = Self {
            population: Vec::with_capacity(config.population_size()),
            config,
            track,
            progenitor_car,
            evolution_step: 0,
            generation: 0,
            best_genes: Vec::new(),
            rng,
            action_table,
            double_table,
            pool,
        };
        manager.refill_random();
        Ok(manager)
    }

    #[must_use]
    pub fn population(&self) -> &[Genome] {
        &self.population
    }

    #[must_use]
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Index of the gate the current checkpoint window starts at.
    #[must_use]
    pub fn evolution_step(&self) -> usize {
        self.evolution_step
    }

    /// Total number of gates on the track.
    #[must_use]
    pub fn total_steps(&self) -> usize {
        self.track.gate_count()
    }

    #[must_use]
    pub fn track(&self) -> &Track {
        &self.track
    }

    /// Action codes harvested from solved windows, in track order.
    #[must_use]
    pub fn best_genes(&self) -> &[u8] {
        &self.best_genes
    }

    /// Runs every live genome to termination, in parallel.
    ///
    /// Genomes kept from the previous generation are already terminated
    /// and retain their fitness.
    pub fn run_generation(&mut self) {
        let Self {
            pool,
            track,
            population,
            ..
        } = self;
        let track: &Track = track;
        pool.install(|| {
            population
                .par_iter_mut()
                .for_each(|genome| genome.run(track));
        });
    }

    /// Sorts the population by fitness, best first. Stable, so equal
    /// fitness preserves slice order.
    pub fn rank_generation(&mut self) {
        self.population
            .sort_by(|a, b| b.fitness.total_cmp(&a.fitness));
    }

    /// Summarizes the ranked population; `None` only for an empty one.
    ///
    /// Origin counts cover the best slice, which is meaningful only
    /// after [`PopulationManager::rank_generation`].
    #[must_use]
    pub fn report(&self) -> Option<GenerationReport> {
        let telemetry: Vec<[f32; 5]> = self.population.iter().map(Genome::telemetry).collect();
        let channel = |i: usize| Summary::new(telemetry.iter().map(move |row| row[i]));

        let mut origins = [0usize; Origin::COUNT];
        for genome in &self.population[..self.best_slice_len()] {
            origins[genome.origin().index()] += 1;
        }

        Some(GenerationReport {
            generation: self.generation,
            fitness: channel(0)?,
            remaining_distance: channel(1)?,
            elapsed_time: channel(2)?,
            ticks: channel(3)?,
            speed: channel(4)?,
            origins,
        })
    }

    fn best_slice_len(&self) -> usize {
        slice_len(self.population.len(), self.config.rates.best)
    }

    /// Executes `plan`, then synthesizes the next generation in place.
    ///
    /// Returns `false` when an advance would push the checkpoint window
    /// past the last gate; the population is left untouched in that case
    /// and training is over.
    pub fn prepare_next_generation(&mut self, plan: GenerationPlan) -> bool {
        match plan {
            GenerationPlan::Continue => {}
            GenerationPlan::Advance => {
                if let Some(snapshot) = self.population[0].snapshot().copied() {
                    self.best_genes
                        .extend_from_slice(&self.population[0].genes()[..snapshot.tick]);
                    self.progenitor_car.apply_state(&snapshot.car);
                }

                if self.evolution_step + self.track.step_width() + 1 == self.track.gate_count() {
                    return false;
                }

                self.evolution_step += 1;
                self.refill_random();
            }
            GenerationPlan::Reset => self.refill_random(),
        }

        self.synthesize();
        self.generation += 1;
        true
    }

    /// Replaces every genome with a fresh random one for the current
    /// window.
    fn refill_random(&mut self) {
        let size = self.config.population_size();
        let Self {
            config,
            track,
            population,
            progenitor_car,
            rng,
            action_table,
            evolution_step,
            ..
        } = self;
        let mut actions = action_table.stream(rng);

        population.clear();
        for _ in 0..size {
            let mut genome =
                Genome::new(progenitor_car.clone(), track, config.tick_rate, *evolution_step);
            randomize(&mut genome, &mut actions);
            population.push(genome);
        }
    }

    /// Rebuilds the population from contiguous operator slices.
    fn synthesize(&mut self) {
        let Self {
            config,
            track,
            population,
            progenitor_car,
            rng,
            action_table,
            double_table,
            evolution_step,
            generation,
            ..
        } = self;
        let track: &Track = track;
        let progenitor: &Car = progenitor_car;
        let size = population.len();
        let rates = &config.rates;

        let best_len = slice_len(size, rates.best);
        // pair-producing operators need even slices; leftovers join the
        // trailing random slice
        let crossover_len = slice_len(size, rates.crossover) & !1;
        let random_cross_len = slice_len(size, rates.random_crossover) & !1;
        let value_len = slice_len(size, rates.value_crossover);
        let smooth_len = slice_len(size, rates.smooth_crossover);
        let mutated_len = slice_len(size, rates.mutated);
        let parent_span = best_len.max(1);

        let mut actions = action_table.stream(rng);
        let mut doubles = double_table.stream(rng);

        let blank =
            || Genome::new(progenitor.clone(), track, config.tick_rate, *evolution_step);

        let mut next = Vec::with_capacity(size);

        for genome in &population[..best_len] {
            let mut kept = genome.clone();
            kept.origin = Origin::Best;
            for value in &mut kept.values {
                *value = value.saturating_add(1);
            }
            next.push(kept);
        }

        for _ in (0..crossover_len).step_by(2) {
            let parent1 = &population[rng.random_range(0..parent_span)];
            let parent2 = &population[rng.random_range(0..parent_span)];
            let cut = rng.random_range(0..parent1.genes.len());
            let mut child1 = blank();
            let mut child2 = blank();
            cross_over(parent1, parent2, &mut child1, &mut child2, cut);
            next.push(child1);
            next.push(child2);
        }

        for _ in (0..random_cross_len).step_by(2) {
            let parent1 = &population[rng.random_range(0..parent_span)];
            let parent2 = &population[rng.random_range(0..parent_span)];
            let mut child1 = blank();
            let mut child2 = blank();
            random_cross(parent1, parent2, &mut child1, &mut child2, &mut doubles);
            next.push(child1);
            next.push(child2);
        }

        for _ in 0..value_len {
            let parent1 = &population[rng.random_range(0..parent_span)];
            let parent2 = &population[rng.random_range(0..parent_span)];
            let mut child = blank();
            value_cross(parent1, parent2, &mut child);
            next.push(child);
        }

        for _ in 0..smooth_len {
            let parent1 = &population[rng.random_range(0..parent_span)];
            let parent2 = &population[rng.random_range(0..parent_span)];
            let mut child = blank();
            smooth_cross(parent1, parent2, &mut child);
            next.push(child);
        }

        for _ in 0..mutated_len {
            let parent = &population[rng.random_range(0..parent_span)];
            let mut child = blank();
            let copy_len = parent.genes.len().min(child.genes.len());
            child.genes[..copy_len].copy_from_slice(&parent.genes[..copy_len]);
            mutate(
                &mut child,
                config.mutation_rate,
                *generation,
                &mut actions,
                &mut doubles,
                rng,
            );
            next.push(child);
        }

        while next.len() < size {
            let mut child = blank();
            randomize(&mut child, &mut actions);
            next.push(child);
        }

        *population = next;
    }
}

#[expect(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn slice_len(size: usize, rate: f32) -> usize {
    (size as f32 * rate) as usize
}

/// Overwrites every gene with a fresh random action code.
fn randomize(genome: &mut Genome, actions: &mut TableStream<'_, u8>) {
    genome.origin = Origin::Random;
    for (gene, code) in genome.genes.iter_mut().zip(actions) {
        *gene = code;
    }
}

/// Single-cut splice: both children take one parent up to `cut` and the
/// other after it, genes and values alike.
fn cross_over(parent1: &Genome, parent2: &Genome, child1: &mut Genome, child2: &mut Genome, cut: usize) {
    let len = splice_len(parent1, parent2, child1, child2);
    for i in 0..len {
        let (a, b) = if i < cut { (parent1, parent2) } else { (parent2, parent1) };
        child1.genes[i] = a.genes[i];
        child1.values[i] = a.values[i];
        child2.genes[i] = b.genes[i];
        child2.values[i] = b.values[i];
    }
    child1.origin = Origin::Crossover;
    child2.origin = Origin::Crossover;
}

/// Per-position coin flip between the two parents.
fn random_cross(
    parent1: &Genome,
    parent2: &Genome,
    child1: &mut Genome,
    child2: &mut Genome,
    doubles: &mut TableStream<'_, f64>,
) {
    let len = splice_len(parent1, parent2, child1, child2);
    for (i, roll) in (0..len).zip(doubles) {
        let (a, b) = if roll < 0.5 { (parent1, parent2) } else { (parent2, parent1) };
        child1.genes[i] = a.genes[i];
        child1.values[i] = a.values[i];
        child2.genes[i] = b.genes[i];
        child2.values[i] = b.values[i];
    }
    child1.origin = Origin::RandomCrossover;
    child2.origin = Origin::RandomCrossover;
}

/// Per position, the gene whose parent carries the higher value wins.
fn value_cross(parent1: &Genome, parent2: &Genome, child: &mut Genome) {
    let len = parent1
        .genes
        .len()
        .min(parent2.genes.len())
        .min(child.genes.len());
    for i in 0..len {
        let winner = if parent1.values[i] > parent2.values[i] {
            parent1
        } else {
            parent2
        };
        child.genes[i] = winner.genes[i];
        child.values[i] = winner.values[i];
    }
    child.origin = Origin::ValueCrossover;
}

/// Per position, blends the two parent codes through the compromise
/// table.
fn smooth_cross(parent1: &Genome, parent2: &Genome, child: &mut Genome) {
    let len = parent1
        .genes
        .len()
        .min(parent2.genes.len())
        .min(child.genes.len());
    for i in 0..len {
        child.genes[i] = action::blend_actions(parent1.genes[i], parent2.genes[i]);
    }
    child.origin = Origin::SmoothCrossover;
}

/// Rerolls a `mutation_rate` fraction of the genes; refreshed values
/// grow with the generation count so old lineages weigh more in value
/// crossover.
fn mutate(
    genome: &mut Genome,
    mutation_rate: f64,
    generation: usize,
    actions: &mut TableStream<'_, u8>,
    doubles: &mut TableStream<'_, f64>,
    rng: &mut Pcg64,
) {
    #[expect(clippy::cast_possible_truncation)]
    let value_cap = (generation / 2).clamp(2, usize::from(u16::MAX)) as u16;
    for i in 0..genome.genes.len() {
        let roll = doubles.next().expect("table stream is infinite");
        if roll >= mutation_rate {
            continue;
        }
        genome.genes[i] = actions.next().expect("table stream is infinite");
        genome.values[i] = rng.random_range(1..value_cap);
    }
    genome.origin = Origin::Mutate;
}

fn splice_len(parent1: &Genome, parent2: &Genome, child1: &Genome, child2: &Genome) -> usize {
    parent1
        .genes
        .len()
        .min(parent2.genes.len())
        .min(child1.genes.len())
        .min(child2.genes.len())
}

/// Per-metric population summary plus origin counts over the best slice.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub generation: usize,
    pub fitness: Summary,
    pub remaining_distance: Summary,
    pub elapsed_time: Summary,
    pub ticks: Summary,
    pub speed: Summary,
    pub origins: [usize; Origin::COUNT],
}

impl fmt::Display for GenerationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "generation {} report:", self.generation)?;
        for (label, summary) in [
            ("fitness", &self.fitness),
            ("distance", &self.remaining_distance),
            ("time", &self.elapsed_time),
            ("genes", &self.ticks),
            ("speed", &self.speed),
        ] {
            writeln!(
                f,
                "  {label}: {:.3} avg (min {:.3}, max {:.3})",
                summary.mean, summary.min, summary.max
            )?;
        }
        write!(f, "  origins:")?;
        for origin in Origin::ALL {
            write!(f, " {} {}", origin.label(), self.origins[origin.index()])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_track() -> Track {
        let centerline: Vec<Vec2> =
            (0..8u8).map(|i| Vec2::new(f32::from(i) * 60.0, 0.0)).collect();
        Track::new(&centerline, 10.0, 15.0, 3).unwrap()
    }

    fn test_config() -> EvolveConfig {
        EvolveConfig {
            population_groups: 1,
            max_parallelism: 2,
            ..EvolveConfig::default()
        }
    }

    fn test_manager(seed: u64) -> PopulationManager {
        PopulationManager::new(test_track(), test_config(), seed).unwrap()
    }

    mod operators {
        use rand::{Rng as _, SeedableRng as _};

        use super::*;

        fn constant_genome(track: &Track, code: u8, value: u16) -> Genome {
            let mut car = Car::new(Vec2::ZERO, 0.0);
            car.reset_on(track);
            let mut genome = Genome::new(car, track, 30.0, 0);
            genome.genes.fill(code);
            genome.values.fill(value);
            genome
        }

        #[test]
        fn cross_over_splices_at_the_cut() {
            let track = test_track();
            let parent1 = constant_genome(&track, 5, 3);
            let parent2 = constant_genome(&track, 6, 7);
            let mut child1 = constant_genome(&track, 0, 1);
            let mut child2 = constant_genome(&track, 0, 1);

            let cut = 10;
            cross_over(&parent1, &parent2, &mut child1, &mut child2, cut);

            assert!(child1.genes[..cut].iter().all(|&g| g == 5));
            assert!(child1.genes[cut..].iter().all(|&g| g == 6));
            assert!(child2.genes[..cut].iter().all(|&g| g == 6));
            assert!(child2.genes[cut..].iter().all(|&g| g == 5));
            assert!(child1.values[..cut].iter().all(|&v| v == 3));
            assert!(child1.values[cut..].iter().all(|&v| v == 7));
            assert_eq!(child1.origin(), Origin::Crossover);
        }

        #[test]
        fn random_cross_takes_every_position_from_a_parent() {
            let track = test_track();
            let parent1 = constant_genome(&track, 5, 1);
            let parent2 = constant_genome(&track, 6, 1);
            let mut child1 = constant_genome(&track, 0, 1);
            let mut child2 = constant_genome(&track, 0, 1);

            let mut rng = Pcg64::seed_from_u64(3);
            let table = RandomTable::generate(64, &mut rng, |r| r.random::<f64>());
            let mut doubles = table.stream(&mut rng);
            random_cross(&parent1, &parent2, &mut child1, &mut child2, &mut doubles);

            for i in 0..child1.genes.len() {
                assert!(child1.genes[i] == 5 || child1.genes[i] == 6);
                // the two children take opposite parents at each position
                assert_eq!(child1.genes[i] + child2.genes[i], 11);
            }
            assert_eq!(child1.origin(), Origin::RandomCrossover);
        }

        #[test]
        fn value_cross_prefers_the_higher_value() {
            let track = test_track();
            let parent1 = constant_genome(&track, 5, 9);
            let parent2 = constant_genome(&track, 6, 2);
            let mut child = constant_genome(&track, 0, 1);

            value_cross(&parent1, &parent2, &mut child);
            assert!(child.genes.iter().all(|&g| g == 5));
            assert!(child.values.iter().all(|&v| v == 9));
        }

        #[test]
        fn smooth_cross_blends_codes() {
            let track = test_track();
            let parent1 = constant_genome(&track, 5, 1);
            let parent2 = constant_genome(&track, 6, 1);
            let mut child = constant_genome(&track, 0, 1);

            smooth_cross(&parent1, &parent2, &mut child);
            assert!(child.genes.iter().all(|&g| g == 1));
        }

        #[test]
        fn mutate_touches_roughly_the_configured_fraction() {
            let track = test_track();
            let mut genome = constant_genome(&track, 0, 1);
            let len = genome.genes.len();

            let mut rng = Pcg64::seed_from_u64(11);
            let action_table =
                RandomTable::generate(RAND_TABLE_LEN, &mut rng, |r| r.random_range(0..ACTION_COUNT));
            let double_table =
                RandomTable::generate(RAND_TABLE_LEN, &mut rng, |r| r.random::<f64>());
            let mut actions = action_table.stream(&mut rng);
            let mut doubles = double_table.stream(&mut rng);

            mutate(&mut genome, 0.5, 0, &mut actions, &mut doubles, &mut rng);

            let touched = genome.genes.iter().filter(|&&g| g != 0).count();
            // a 0.5 rate rerolls about half the tape; some rerolls land
            // back on 0, so allow a wide band
            assert!(touched > len / 5);
            assert!(touched < len);
            assert!(genome.values.iter().all(|&v| v == 1));
        }
    }

    mod manager {
        use super::*;

        #[test]
        fn starting_population_is_random_and_full() {
            let manager = test_manager(1);
            assert_eq!(manager.population().len(), 10);
            assert!(manager
                .population()
                .iter()
                .all(|g| g.origin() == Origin::Random && g.is_alive()));
        }

        #[test]
        fn generation_survives_a_full_cycle_at_constant_size() {
            let mut manager = test_manager(2);
            manager.run_generation();
            manager.rank_generation();
            assert!(manager.prepare_next_generation(GenerationPlan::Continue));

            assert_eq!(manager.population().len(), 10);
            assert_eq!(manager.generation(), 1);
        }

        #[test]
        fn ranking_orders_by_descending_fitness() {
            let mut manager = test_manager(3);
            manager.run_generation();
            manager.rank_generation();

            let fitness: Vec<f64> = manager.population().iter().map(Genome::fitness).collect();
            assert!(fitness.windows(2).all(|w| w[0] >= w[1]));
        }

        #[test]
        fn synthesis_slices_partition_the_population() {
            let mut manager = test_manager(4);
            manager.run_generation();
            manager.rank_generation();
            manager.prepare_next_generation(GenerationPlan::Continue);

            // groups=1 with default rates: best 3, pairs round to 0,
            // value 1, smooth 1, mutate 2, random absorbs the rest
            let mut counts = [0usize; Origin::COUNT];
            for genome in manager.population() {
                counts[genome.origin().index()] += 1;
            }
            assert_eq!(counts[Origin::Best.index()], 3);
            assert_eq!(counts[Origin::Crossover.index()], 0);
            assert_eq!(counts[Origin::RandomCrossover.index()], 0);
            assert_eq!(counts[Origin::ValueCrossover.index()], 1);
            assert_eq!(counts[Origin::SmoothCrossover.index()], 1);
            assert_eq!(counts[Origin::Mutate.index()], 2);
            assert_eq!(counts[Origin::Random.index()], 3);
        }

        #[test]
        fn best_slice_keeps_fitness_and_ages_values() {
            let mut manager = test_manager(5);
            manager.run_generation();
            manager.rank_generation();
            let top_fitness = manager.population()[0].fitness();
            manager.prepare_next_generation(GenerationPlan::Continue);

            let kept = &manager.population()[0];
            assert_eq!(kept.origin(), Origin::Best);
            assert_eq!(kept.fitness(), top_fitness);
            assert!(!kept.is_alive());
            assert!(kept.values().iter().all(|&v| v >= 2));
        }

        #[test]
        fn advance_stops_before_the_window_leaves_the_track() {
            let mut manager = test_manager(6);
            let gate_count = manager.total_steps();
            let step_width = manager.track().step_width();

            let mut advances = 0;
            while manager.prepare_next_generation(GenerationPlan::Advance) {
                advances += 1;
                assert!(advances < gate_count);
            }

            assert_eq!(advances, gate_count - step_width - 1);
            assert_eq!(manager.evolution_step(), gate_count - step_width - 1);
        }

        #[test]
        fn advance_harvests_the_winning_prefix() {
            let mut manager = test_manager(7);
            manager.run_generation();
            manager.rank_generation();

            // plant a known solution at the top
            let track = test_track();
            let mut car = Car::new(Vec2::ZERO, 0.0);
            car.reset_on(&track);
            let mut winner = Genome::new(car, &track, 30.0, 0);
            winner.genes.fill(1);
            winner.run(&track);
            assert!(winner.is_success());
            let prefix_len = winner.snapshot().unwrap().tick;
            manager.population[0] = winner;

            manager.prepare_next_generation(GenerationPlan::Advance);
            assert_eq!(manager.best_genes().len(), prefix_len);
            assert!(manager.best_genes().iter().all(|&g| g == 1));
            assert_eq!(manager.evolution_step(), 1);
        }

        #[test]
        fn reset_discards_fitness_without_advancing() {
            let mut manager = test_manager(8);
            manager.run_generation();
            manager.rank_generation();
            manager.prepare_next_generation(GenerationPlan::Reset);

            assert_eq!(manager.evolution_step(), 0);
            assert!(manager.best_genes().is_empty());
        }

        #[test]
        fn seeded_runs_are_reproducible() {
            let mut first = test_manager(42);
            let mut second = test_manager(42);
            for manager in [&mut first, &mut second] {
                manager.run_generation();
                manager.rank_generation();
                manager.prepare_next_generation(GenerationPlan::Continue);
                manager.run_generation();
                manager.rank_generation();
            }

            assert_eq!(
                first.population()[0].fitness(),
                second.population()[0].fitness()
            );
            assert_eq!(first.population()[0].genes(), second.population()[0].genes());
        }

        #[test]
        fn report_summarizes_the_ranked_population() {
            let mut manager = test_manager(9);
            manager.run_generation();
            manager.rank_generation();

            let report = manager.report().unwrap();
            assert!(report.fitness.min <= report.fitness.mean);
            assert!(report.fitness.mean <= report.fitness.max);
            let best_len = manager.best_slice_len();
            assert_eq!(report.origins.iter().sum::<usize>(), best_len);

            let rendered = report.to_string();
            assert!(rendered.contains("fitness"));
            assert!(rendered.contains("origins"));
        }
    }
}
