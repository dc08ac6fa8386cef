//! Statistical summaries for the Autodrome trainer.
//!
//! Generation reports aggregate per-genome telemetry (fitness, remaining
//! distance, elapsed time, ticks used, average speed) into population-wide
//! summaries. This crate provides the summary type those reports are built
//! from.
//!
//! # Examples
//!
//! ```
//! use autodrome_stats::Summary;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let stats = Summary::new(values).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! ```

pub use self::summary::Summary;

pub mod summary;
