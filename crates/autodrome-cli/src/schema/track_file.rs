//! Track files produced by the curve editor.
//!
//! Field names are PascalCase for compatibility with existing files.
//! `date` and `accuracy` (the editor's curve-simplification angle) are
//! opaque metadata; only the ordered points feed the track builder.

use chrono::{DateTime, Utc};
use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TrackFile {
    pub date: DateTime<Utc>,
    pub accuracy: f64,
    pub points: Vec<TrackPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TrackPoint {
    pub x: f32,
    pub y: f32,
}

impl TrackFile {
    pub fn centerline(&self) -> Vec<Vec2> {
        self.points.iter().map(|p| Vec2::new(p.x, p.y)).collect()
    }
}
