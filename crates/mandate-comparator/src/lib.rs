//! Mandate Comparator
//!
//! Cross-policy conflict detection without model calls: rules are
//! compared pairwise by weighted Jaccard similarity over canonicalized
//! token sets and classified as duplicate, contradiction, or overlap.
//!
//! The contradiction class is an explicit heuristic — high beneficiary
//! overlap with distinct actions — not semantic reasoning. The
//! comparator cannot verify logical negation and does not try to.

#![warn(missing_docs)]

mod comparator;
mod config;
mod report;
mod similarity;

pub use comparator::ConflictComparator;
pub use config::{ComparatorConfig, SimilarityWeights};
pub use report::{ConflictRecord, ConflictReport, ConflictType};
