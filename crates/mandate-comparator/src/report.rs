//! Conflict report types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of a detected rule conflict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictType {
    /// The two rules say the same thing
    Duplicate,
    /// Same scope, distinct actions (heuristic, not logical negation)
    Contradiction,
    /// Partial overlap in conditions or scope
    Overlap,
}

impl fmt::Display for ConflictType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConflictType::Duplicate => "duplicate",
            ConflictType::Contradiction => "contradiction",
            ConflictType::Overlap => "overlap",
        };
        write!(f, "{}", s)
    }
}

/// One detected conflict between a new rule and an existing rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictRecord {
    /// Policy the existing rule belongs to
    pub existing_policy_id: String,

    /// Id of the existing rule
    pub existing_rule_id: String,

    /// Id of the new rule
    pub new_rule_id: String,

    /// Classification of the conflict
    pub conflict_type: ConflictType,

    /// Weighted similarity, rounded to two decimals
    pub similarity_score: f64,

    /// Human-readable explanation of the classification
    pub reason: String,
}

/// Result of comparing a new policy against existing ones
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictReport {
    /// Id of the policy that was compared
    pub new_policy_id: String,

    /// Every recorded conflict, in comparison order
    pub conflicts: Vec<ConflictRecord>,

    /// Deduplicated follow-up recommendations (set semantics; sorted for
    /// determinism)
    pub recommendations: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_type_serializes_lowercase() {
        let json = serde_json::to_string(&ConflictType::Contradiction).unwrap();
        assert_eq!(json, "\"contradiction\"");
    }

    #[test]
    fn test_conflict_type_display() {
        assert_eq!(ConflictType::Duplicate.to_string(), "duplicate");
        assert_eq!(ConflictType::Overlap.to_string(), "overlap");
    }
}
