//! Mandate Ambiguity Detector
//!
//! Rule-based ambiguity flagging: five fixed triggers evaluated
//! independently against each rule, no model calls, no state beyond the
//! configured trigger-phrase list. The detector runs after validation on
//! rules the validator has not already flagged, and its output feeds the
//! human clarification loop.

#![warn(missing_docs)]

mod detector;

pub use detector::{AmbiguityDetector, AmbiguitySummary};
