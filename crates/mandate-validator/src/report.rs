//! Validator output types

use mandate_domain::Rule;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A policy after the repair pipeline, with validation metadata attached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepairedPolicy {
    /// Unique identifier for the policy
    pub policy_id: String,

    /// Title of the policy
    pub policy_title: String,

    /// Repaired, deduplicated, renumbered rules
    pub rules: Vec<Rule>,

    /// Metadata recorded by the pipeline
    pub metadata: RepairMetadata,
}

/// Metadata attached to a repaired policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepairMetadata {
    /// Number of rules surviving the pipeline
    pub total_rules: usize,

    /// Always true once the pipeline has run
    pub validated: bool,
}

/// Quality statistics over a validated rule list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    /// Total rules examined
    pub total_rules: usize,

    /// Rules with no ambiguity flag (executable as-is)
    pub executable_rules: usize,

    /// Rules flagged as ambiguous
    pub ambiguous_rules: usize,

    /// Percentage of executable rules, one decimal; 0.0 on empty input
    pub quality_score: f64,

    /// Rule count per responsible role. Keys are the literal
    /// post-normalization role strings, so empty roles count under "".
    pub role_distribution: BTreeMap<String, usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repaired_policy_serializes_to_contract_shape() {
        let repaired = RepairedPolicy {
            policy_id: "P1".to_string(),
            policy_title: "Test".to_string(),
            rules: vec![Rule::new("R1", "Pay the claim")],
            metadata: RepairMetadata {
                total_rules: 1,
                validated: true,
            },
        };

        let json = serde_json::to_value(&repaired).unwrap();
        assert_eq!(json["metadata"]["total_rules"], 1);
        assert_eq!(json["metadata"]["validated"], true);
        assert_eq!(json["rules"][0]["rule_id"], "R1");
    }

    #[test]
    fn test_quality_report_serializes_role_distribution() {
        let report = QualityReport {
            total_rules: 2,
            executable_rules: 1,
            ambiguous_rules: 1,
            quality_score: 50.0,
            role_distribution: [("LIC".to_string(), 2)].into_iter().collect(),
        };

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["quality_score"], 50.0);
        assert_eq!(json["role_distribution"]["LIC"], 2);
    }
}
