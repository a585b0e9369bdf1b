//! Validator configuration
//!
//! All lexical tables the pipeline matches against live here, injectable
//! at construction so tests and other policy domains can substitute their
//! own vocabulary without touching the pipeline logic. The defaults are
//! the reference insurance-domain tables.

use crate::error::ValidatorError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration tables for the validation pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Lowercase role synonyms mapped to their canonical form
    pub role_synonyms: HashMap<String, String>,

    /// Canonical role set; anything else is flagged during ambiguity
    /// enforcement
    pub canonical_roles: Vec<String>,

    /// Anchor tokens whose presence in a non-canonical role maps it to
    /// the insurer (substring match, lowercase)
    pub insurer_anchors: Vec<String>,

    /// Canonical name the anchor match normalizes to
    pub insurer_role: String,

    /// Keywords marking a record as a non-rule (definition, header,
    /// reference)
    pub invalid_keywords: Vec<String>,

    /// Verbs an executable action must contain at least one of
    pub action_verbs: Vec<String>,

    /// Heading-only condition texts to drop during normalization
    pub heading_conditions: Vec<String>,

    /// Deadline texts too vague to keep
    pub vague_deadlines: Vec<String>,

    /// Action keywords that imply a deadline must be stated
    pub timing_keywords: Vec<String>,

    /// Terms whose presence makes a rule ambiguous
    pub ambiguity_terms: Vec<String>,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        let role_synonyms = [
            ("corporation", "LIC"),
            ("insurer", "LIC"),
            ("company", "LIC"),
            ("assurer", "LIC"),
            ("lic", "LIC"),
            ("proposer", "Policyholder"),
            ("policyholder", "Policyholder"),
            ("life assured", "Life Assured"),
            ("nominee", "Nominee"),
            ("claimant", "Claimant"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();

        Self {
            role_synonyms,
            canonical_roles: owned(&[
                "LIC",
                "Policyholder",
                "Life Assured",
                "Nominee",
                "Claimant",
            ]),
            insurer_anchors: owned(&["lic", "corporation", "insurer"]),
            insurer_role: "LIC".to_string(),
            invalid_keywords: owned(&[
                "is defined as",
                "means",
                "refers to",
                "definition",
                "section",
                "annexure",
                "table",
                "chart",
                "schedule",
                "grievance redressal",
                "contact details",
                "ombudsman",
                "part b",
                "glossary",
                "heading",
            ]),
            action_verbs: owned(&[
                "pay", "refund", "deduct", "cancel", "revive", "allow", "provide", "grant",
                "issue", "inform", "notify", "submit", "process",
            ]),
            heading_conditions: owned(&["death benefit", "maturity benefit", "surrender"]),
            vague_deadlines: owned(&["as soon as possible", "asap", "immediately", "promptly"]),
            timing_keywords: owned(&[
                "within", "pay", "refund", "notify", "inform", "submit", "process",
            ]),
            ambiguity_terms: owned(&[
                "may",
                "as applicable",
                "subject to",
                "as per",
                "in accordance with",
                "reasonable",
                "appropriate",
                "shall be determined",
                "at discretion",
            ]),
        }
    }
}

impl ValidatorConfig {
    /// Whether a role string is one of the canonical roles (exact match)
    pub fn is_canonical_role(&self, role: &str) -> bool {
        self.canonical_roles.iter().any(|r| r == role)
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ValidatorError> {
        toml::from_str(toml_str).map_err(|e| ValidatorError::Config(e.to_string()))
    }

    /// Serialize configuration to a TOML string
    pub fn to_toml(&self) -> Result<String, ValidatorError> {
        toml::to_string_pretty(self).map_err(|e| ValidatorError::Config(e.to_string()))
    }
}
