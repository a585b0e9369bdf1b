//! Mandate Timeline
//!
//! Execution-timeline estimation for a single policy's rules: infers
//! dependencies from rule text, parses free-text deadlines into day
//! counts, schedules rules by fixed-point propagation, and extracts the
//! critical path.
//!
//! Dependency input is assumed acyclic by construction of the inference
//! heuristics; the scheduler's iteration cap keeps it total on malformed
//! input anyway, recording a warning instead of hanging.

#![warn(missing_docs)]

mod duration;
mod estimator;

pub use duration::parse_deadline;
pub use estimator::{TimelineEntry, TimelineEstimator, TimelineReport};
