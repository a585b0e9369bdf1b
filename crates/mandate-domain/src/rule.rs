//! Rule module - the fundamental unit of the analysis pipeline

use serde::{Deserialize, Serialize};

/// An atomic obligation or permission extracted from policy text
///
/// Rules arrive from the upstream extractor as JSON-compatible records;
/// missing optional fields default so partial extractor output still
/// deserializes. After validation, `action` is guaranteed non-empty and
/// `rule_id` is sequential (`R1`, `R2`, ...) within its policy.
///
/// Ids are reassigned after every filtering/splitting/deduplication pass,
/// so they are not stable across pipeline stages: cross-references
/// (dependency ids, clarification targets) must use the id in effect at
/// the stage where the reference is resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Unique identifier within a policy
    pub rule_id: String,

    /// Conditions that must hold before the action applies.
    /// Order is significant for display, but not for the deduplication
    /// signature, which sorts them first.
    #[serde(default)]
    pub conditions: Vec<String>,

    /// The action to be taken (non-empty after validation)
    pub action: String,

    /// Who executes this rule
    #[serde(default)]
    pub responsible_role: String,

    /// Who benefits from this rule
    #[serde(default)]
    pub beneficiary: String,

    /// Free-text time constraint, or empty when none is stated
    #[serde(default)]
    pub deadline: String,

    /// Whether this rule lacks information needed for execution
    #[serde(default)]
    pub ambiguity_flag: bool,

    /// Explanation of the ambiguity; non-empty iff the flag is set
    #[serde(default)]
    pub ambiguity_reason: String,

    /// Extractor confidence in [0.0, 1.0], when reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_score: Option<f64>,
}

impl Rule {
    /// Create a rule with the given id and action; all other fields empty
    pub fn new(rule_id: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            rule_id: rule_id.into(),
            conditions: Vec::new(),
            action: action.into(),
            responsible_role: String::new(),
            beneficiary: String::new(),
            deadline: String::new(),
            ambiguity_flag: false,
            ambiguity_reason: String::new(),
            confidence_score: None,
        }
    }

    /// The text scanned for trigger phrases: action plus joined conditions
    pub fn searchable_text(&self) -> String {
        format!("{} {}", self.action, self.conditions.join(" "))
    }

    /// Deduplication signature: (sorted conditions, trimmed action, role,
    /// beneficiary)
    ///
    /// Condition order does not affect the signature, so two rules that
    /// list the same conditions in a different order compare equal here.
    pub fn dedup_signature(&self) -> (Vec<String>, String, String, String) {
        let mut conditions = self.conditions.clone();
        conditions.sort();
        (
            conditions,
            self.action.trim().to_string(),
            self.responsible_role.clone(),
            self.beneficiary.clone(),
        )
    }
}
