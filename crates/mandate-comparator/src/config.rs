//! Comparator configuration

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Per-field weights for the similarity score; must sum to 1.0 for the
/// score to stay in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimilarityWeights {
    /// Weight of the action field
    pub action: f64,
    /// Weight of the joined conditions
    pub conditions: f64,
    /// Weight of the beneficiary field
    pub beneficiary: f64,
    /// Weight of the responsible role
    pub responsible_role: f64,
}

impl Default for SimilarityWeights {
    fn default() -> Self {
        Self {
            action: 0.4,
            conditions: 0.3,
            beneficiary: 0.2,
            responsible_role: 0.1,
        }
    }
}

/// Configuration tables for conflict detection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparatorConfig {
    /// Field weights for the similarity score
    pub weights: SimilarityWeights,

    /// Minimum weighted similarity for a pair to be recorded as a
    /// conflict at all
    pub record_threshold: f64,

    /// Weighted similarity above which a pair is an outright duplicate
    pub duplicate_threshold: f64,

    /// Token synonyms canonicalized before comparison (lowercase)
    pub synonyms: HashMap<String, String>,

    /// Tokens carrying no comparison signal
    pub stop_words: HashSet<String>,
}

impl Default for ComparatorConfig {
    fn default() -> Self {
        let synonyms = [
            ("award", "provide"),
            ("give", "provide"),
            ("disburse", "provide"),
            ("receive", "provide"),
            ("grant", "provide"),
            ("less", "lt"),
            ("below", "lt"),
            ("under", "lt"),
            ("lakh", "l"),
            ("lac", "l"),
            ("certificate", "proof"),
            ("document", "proof"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let stop_words = [
            "a", "an", "the", "and", "or", "but", "if", "then", "else", "when", "at", "by",
            "for", "with", "about", "against", "between", "into", "through", "during",
            "before", "after", "above", "to", "from", "up", "down", "in", "out", "on", "off",
            "over", "again", "further", "once", "must", "shall", "will", "can", "may",
            "should", "of",
        ]
        .into_iter()
        .map(|s| s.to_string())
        .collect();

        Self {
            weights: SimilarityWeights::default(),
            record_threshold: 0.45,
            duplicate_threshold: 0.85,
            synonyms,
            stop_words,
        }
    }
}

impl ComparatorConfig {
    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to a TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
