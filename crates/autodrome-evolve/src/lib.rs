//! Generational evolutionary search over driving genomes.
//!
//! A [`Genome`](genome::Genome) is a fixed-length sequence of action
//! codes replayed tick by tick against a checkpoint window of the track.
//! The [`PopulationManager`](population::PopulationManager) evaluates a
//! whole population in parallel, ranks it by fitness, and synthesizes
//! the next generation from a fixed allocation of genetic operators.
//! When a window is solved the manager harvests the winning gene prefix
//! and advances the window one gate down the track.
//!
//! All randomness flows from a single seeded generator, so a run is
//! reproducible from its seed.

pub use self::{action::*, config::*, genome::*, population::*};

pub mod action;
pub mod config;
pub mod genome;
pub mod population;
