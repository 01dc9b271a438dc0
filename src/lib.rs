//! Offline correction of recorded end-effector paths towards moving gates
//!
//! A recorded path of the robot tooltip passes a number of gates (intermediate
//! waypoints). This crate takes such a path after the fact and re-derives it for gates
//! that have moved since recording, keeping the original timing and overall shape of
//! the path while limiting the acceleration of the tooltip.
//!
//! # Features
//!
//! - Segment detection: the path is split at the closest approach of the tooltip to
//!   every gate. Each segment is associated with its gate.
//! - Causal correction: the path is walked once in time order, each step shifted by
//!   how far the gate of the active segment has moved. The acceleration needed for
//!   the shift is limited in magnitude, keeping direction, so the corrected path
//!   stays dynamically plausible and catches up with the gate over several steps.
//! - Gate motion is pluggable through the [`path_traits::GateMotion`] trait. Gates
//!   oscillating along one axis are provided.
//! - Per-step diagnostics (velocity, clamped acceleration, annotations) for every
//!   corrected position.
//! - Time normalization, per-segment rating, trim selection and plain text
//!   storage of sample matrices.
//!
//! # Path layout
//!
//! A path is a dense matrix with one row per sample:
//! `[time, gate_1 .. gate_G (3 columns each), tooltip (3 columns), rating?]`.
//! Column offsets are configured by [`parameters::path_correction::PathLayout`].
//!
//! ```
//! use rs_path_correction::corrector::Corrector;
//! use rs_path_correction::parameters::path_correction::{Parameters, PathLayout};
//! use rs_path_correction::path::Path;
//!
//! let layout = PathLayout::with_gates(1);
//! let rows = vec![
//!     vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
//!     vec![0.5, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0],
//!     vec![1.0, 0.0, 0.0, 0.0, 2.0, 0.0, 0.0],
//! ];
//! let path = Path::from_rows(&rows, layout).unwrap();
//! let parameters = Parameters {
//!     total_duration: 1.0,
//!     max_acceleration: 100.0,
//!     layout,
//!     ..Parameters::static_gates()
//! };
//! let corrected = Corrector::new(&parameters).unwrap().correct(&path).unwrap();
//! assert_eq!(corrected.len(), 2);
//! ```

pub mod correction_error;

pub mod parameters;

#[cfg(feature = "allow_filesystem")]
pub mod parameters_from_file;

#[path = "utils/utils.rs"]
pub mod utils;
pub mod path_traits;

pub mod path;

pub mod annotations;

#[path = "path_plan/segments.rs"]
pub mod segments;

#[path = "path_plan/gate_trajectory.rs"]
pub mod gate_trajectory;

#[path = "path_plan/corrector.rs"]
pub mod corrector;

#[path = "path_plan/rating.rs"]
pub mod rating;

pub mod trimming;

pub mod datastore;

#[cfg(test)]
mod tests;
