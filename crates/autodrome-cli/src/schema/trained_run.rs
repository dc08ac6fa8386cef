//! Export format for a finished training run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The harvested driving policy: one action code per simulation tick,
/// replayable against the same track at the same tick rate.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrainedRun {
    /// Track file the run was trained on.
    pub track: String,
    pub trained_at: DateTime<Utc>,
    pub seed: u64,
    pub final_fitness: f64,
    pub tick_rate: f32,
    /// Simulated driving time of the harvested action tape.
    pub episode_seconds: f32,
    pub actions: Vec<u8>,
}
