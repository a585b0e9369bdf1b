//! Clarification module - human corrections for ambiguous rules

use serde::{Deserialize, Serialize};

/// A human-supplied correction resolving one or more ambiguous fields
///
/// Accepted from the review UI as JSON with any subset of the clarified
/// fields present. A clarification is only applicable when `rule_id` is
/// non-empty and at least one clarified field has content — a non-empty
/// list counts, a blank or whitespace-only string does not.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Clarification {
    /// Id of the rule this clarification targets
    pub rule_id: String,

    /// Replacement for `responsible_role`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clarified_responsible_role: Option<String>,

    /// Replacement for `deadline`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clarified_deadline: Option<String>,

    /// Conditions to append (union, never replacement)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clarified_conditions: Option<Vec<String>>,

    /// Replacement for `beneficiary`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clarified_beneficiary: Option<String>,

    /// Replacement for `action`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clarified_action: Option<String>,
}

impl Clarification {
    /// Create a clarification targeting the given rule, with no fields set
    pub fn for_rule(rule_id: impl Into<String>) -> Self {
        Self {
            rule_id: rule_id.into(),
            ..Self::default()
        }
    }

    /// Whether at least one clarified field carries content
    pub fn has_content(&self) -> bool {
        let non_blank = |s: &Option<String>| s.as_deref().is_some_and(|v| !v.trim().is_empty());

        non_blank(&self.clarified_responsible_role)
            || non_blank(&self.clarified_deadline)
            || non_blank(&self.clarified_beneficiary)
            || non_blank(&self.clarified_action)
            || self
                .clarified_conditions
                .as_ref()
                .is_some_and(|c| !c.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_clarification_has_no_content() {
        let clar = Clarification::for_rule("R1");
        assert!(!clar.has_content());
    }

    #[test]
    fn test_blank_string_does_not_count_as_content() {
        let mut clar = Clarification::for_rule("R1");
        clar.clarified_deadline = Some("   ".to_string());
        assert!(!clar.has_content());
    }

    #[test]
    fn test_non_empty_list_counts_as_content() {
        let mut clar = Clarification::for_rule("R1");
        clar.clarified_conditions = Some(vec!["Documents verified".to_string()]);
        assert!(clar.has_content());
    }

    #[test]
    fn test_empty_list_does_not_count_as_content() {
        let mut clar = Clarification::for_rule("R1");
        clar.clarified_conditions = Some(Vec::new());
        assert!(!clar.has_content());
    }

    #[test]
    fn test_deserializes_with_partial_fields() {
        let json = r#"{"rule_id": "R3", "clarified_deadline": "30 days"}"#;
        let clar: Clarification = serde_json::from_str(json).unwrap();
        assert_eq!(clar.rule_id, "R3");
        assert_eq!(clar.clarified_deadline.as_deref(), Some("30 days"));
        assert!(clar.clarified_action.is_none());
        assert!(clar.has_content());
    }
}
