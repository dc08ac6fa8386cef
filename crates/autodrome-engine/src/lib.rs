//! Simulation engine for the Autodrome trainer: track geometry, vehicle
//! kinematics, and raycast perception.
//!
//! The engine is split into three modules, leaf first:
//!
//! - [`math`]: the geometry kernel. Angle arithmetic, line intersection,
//!   slope/intercept form, and pseudo-random lookup tables. Degenerate
//!   geometry (parallel lines, vertical segments) is reported through
//!   sentinel values, never through errors.
//! - [`track`]: builds a closed corridor and a sequence of checkpoint
//!   gates from an ordered centerline polyline, and tests gate proximity
//!   against a caller-owned gate cursor.
//! - [`car`]: the kinematic vehicle model. Fixed-timestep control
//!   primitives, an angular-sweep vision pass against the track boundary,
//!   and collision detection against per-ray minimum clearances.

pub use self::{car::*, track::*};

pub mod car;
pub mod math;
pub mod track;

/// Rejected track construction or reconfiguration input.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum TrackError {
    #[display("track width must be positive")]
    NonPositiveWidth,
    #[display("checkpoint spacing must be positive")]
    NonPositiveGateSpacing,
    #[display("at least 3 centerline points are required, found {found}")]
    TooFewPoints { found: usize },
    #[display("step width must be at least 2, found {found}")]
    StepWidthTooSmall { found: usize },
    #[display("centerline has a zero-length segment at index {index}")]
    DegenerateSegment { index: usize },
    #[display("track yields {found} checkpoint gates, at least {needed} are required")]
    NotEnoughGates { found: usize, needed: usize },
}

/// Rejected vision ray count.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("vision ray count must be greater than 0")]
pub struct VisionCountError;
