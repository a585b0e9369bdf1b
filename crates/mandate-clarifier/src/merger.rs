//! Clarification merging

use crate::error::ClarifierError;
use mandate_domain::{Clarification, Rule};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Merges human clarifications into ambiguous rules
#[derive(Debug, Clone, Copy, Default)]
pub struct ClarificationMerger;

impl ClarificationMerger {
    /// Create a merger
    pub fn new() -> Self {
        Self
    }

    /// Apply a clarification to a rule, returning the updated copy
    ///
    /// The clarification is validated first: it must carry a non-empty
    /// `rule_id` matching the rule, and at least one clarified field with
    /// content. Any failure returns an error and leaves the caller's rule
    /// untouched — there is no partial application.
    ///
    /// A successful application clears `ambiguity_flag` and
    /// `ambiguity_reason` unconditionally, even when the clarification
    /// addressed only one of several flagged issues.
    pub fn apply_clarification(
        &self,
        rule: &Rule,
        clarification: &Clarification,
    ) -> Result<Rule, ClarifierError> {
        self.validate_clarification(clarification)?;

        if rule.rule_id != clarification.rule_id {
            return Err(ClarifierError::RuleIdMismatch {
                expected: rule.rule_id.clone(),
                actual: clarification.rule_id.clone(),
            });
        }

        let mut updated = self.merge_clarifications(rule, clarification);
        updated.ambiguity_flag = false;
        updated.ambiguity_reason = String::new();

        Ok(updated)
    }

    /// Check that a clarification is applicable at all
    pub fn validate_clarification(
        &self,
        clarification: &Clarification,
    ) -> Result<(), ClarifierError> {
        if clarification.rule_id.is_empty() {
            return Err(ClarifierError::MissingRuleId);
        }
        if !clarification.has_content() {
            return Err(ClarifierError::NoClarifiedFields);
        }
        Ok(())
    }

    /// Merge clarified fields into a copy of the rule
    ///
    /// Scalar fields are replaced wholesale when the clarified value is
    /// present and non-blank. Conditions are appended set-union style:
    /// each clarified condition lands at the end unless an identical
    /// string is already in the list; existing conditions are never
    /// removed or reordered.
    fn merge_clarifications(&self, rule: &Rule, clarification: &Clarification) -> Rule {
        let mut merged = rule.clone();

        let scalar_updates = [
            (&clarification.clarified_responsible_role, &mut merged.responsible_role),
            (&clarification.clarified_deadline, &mut merged.deadline),
            (&clarification.clarified_beneficiary, &mut merged.beneficiary),
            (&clarification.clarified_action, &mut merged.action),
        ];
        for (clarified, field) in scalar_updates {
            if let Some(value) = clarified {
                if !value.trim().is_empty() {
                    *field = value.clone();
                }
            }
        }

        if let Some(new_conditions) = &clarification.clarified_conditions {
            for condition in new_conditions {
                if !condition.is_empty() && !merged.conditions.contains(condition) {
                    merged.conditions.push(condition.clone());
                }
            }
        }

        merged
    }

    /// Apply a batch of clarifications to a rule list
    ///
    /// Clarifications are keyed by rule id (a later entry for the same id
    /// overwrites an earlier one). Rules are processed in their original
    /// order; rules without a matching clarification, and rules whose
    /// clarification fails validation, pass through unchanged. Output
    /// order and length always match the input.
    pub fn process_batch(&self, rules: &[Rule], clarifications: &[Clarification]) -> Vec<Rule> {
        let by_id: HashMap<&str, &Clarification> = clarifications
            .iter()
            .filter(|c| !c.rule_id.is_empty())
            .map(|c| (c.rule_id.as_str(), c))
            .collect();

        rules
            .iter()
            .map(|rule| match by_id.get(rule.rule_id.as_str()) {
                Some(clarification) => {
                    debug!(rule_id = %rule.rule_id, "applying clarification");
                    match self.apply_clarification(rule, clarification) {
                        Ok(updated) => updated,
                        Err(e) => {
                            warn!(rule_id = %rule.rule_id, error = %e, "clarification rejected");
                            rule.clone()
                        }
                    }
                }
                None => rule.clone(),
            })
            .collect()
    }

    /// Which fields of an ambiguous rule still need human input
    ///
    /// Empty role/deadline/beneficiary/conditions are always listed;
    /// `action` is added when the stored ambiguity reason mentions a
    /// vague phrase or the action itself.
    pub fn fields_needing_clarification(&self, rule: &Rule) -> Vec<String> {
        let mut needed = Vec::new();

        if rule.responsible_role.is_empty() {
            needed.push("responsible_role".to_string());
        }
        if rule.deadline.is_empty() {
            needed.push("deadline".to_string());
        }
        if rule.beneficiary.is_empty() {
            needed.push("beneficiary".to_string());
        }
        if rule.conditions.is_empty() {
            needed.push("conditions".to_string());
        }

        let reason = rule.ambiguity_reason.to_lowercase();
        if reason.contains("vague phrase") || reason.contains("action") {
            needed.push("action".to_string());
        }

        needed
    }

    /// Clarification requests for every currently-flagged rule, shaped
    /// for the review UI
    pub fn pending_clarifications(&self, rules: &[Rule]) -> Vec<PendingClarification> {
        rules
            .iter()
            .filter(|r| r.ambiguity_flag)
            .map(|r| PendingClarification {
                rule_id: r.rule_id.clone(),
                current_action: r.action.clone(),
                ambiguity_reason: r.ambiguity_reason.clone(),
                fields_needing_clarification: self.fields_needing_clarification(r),
            })
            .collect()
    }
}

/// A clarification request for one ambiguous rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingClarification {
    /// Id of the flagged rule
    pub rule_id: String,

    /// The rule's current action text
    pub current_action: String,

    /// Why the rule was flagged
    pub ambiguity_reason: String,

    /// Fields the reviewer should fill in
    pub fields_needing_clarification: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flagged_rule() -> Rule {
        let mut rule = Rule::new("R3", "Process application within stipulated time");
        rule.responsible_role = "Block Officer".to_string();
        rule.beneficiary = "EWS students".to_string();
        rule.conditions = vec!["Income < 2 lakh".to_string()];
        rule.ambiguity_flag = true;
        rule.ambiguity_reason =
            "Time constraint mentioned but deadline not specified".to_string();
        rule
    }

    #[test]
    fn test_scalar_clarification_overwrites_and_clears_flag() {
        let merger = ClarificationMerger::new();
        let mut clar = Clarification::for_rule("R3");
        clar.clarified_deadline = Some("30 days".to_string());

        let updated = merger.apply_clarification(&flagged_rule(), &clar).unwrap();
        assert_eq!(updated.deadline, "30 days");
        assert!(!updated.ambiguity_flag);
        assert!(updated.ambiguity_reason.is_empty());
    }

    #[test]
    fn test_flag_cleared_even_when_other_issues_remain() {
        // "Clarification resolves the rule" is deliberate policy: one
        // clarified field clears the flag even if the reason listed more.
        let merger = ClarificationMerger::new();
        let mut rule = flagged_rule();
        rule.ambiguity_reason =
            "Responsible authority not specified + Time constraint mentioned but deadline not specified"
                .to_string();
        let mut clar = Clarification::for_rule("R3");
        clar.clarified_deadline = Some("30 days".to_string());

        let updated = merger.apply_clarification(&rule, &clar).unwrap();
        assert!(!updated.ambiguity_flag);
    }

    #[test]
    fn test_conditions_append_only_union() {
        let merger = ClarificationMerger::new();
        let mut clar = Clarification::for_rule("R3");
        clar.clarified_conditions = Some(vec![
            "Income < 2 lakh".to_string(),
            "Aadhaar linked to bank account".to_string(),
        ]);

        let updated = merger.apply_clarification(&flagged_rule(), &clar).unwrap();
        assert_eq!(
            updated.conditions,
            vec!["Income < 2 lakh", "Aadhaar linked to bank account"]
        );
    }

    #[test]
    fn test_empty_clarified_condition_is_skipped() {
        let merger = ClarificationMerger::new();
        let mut clar = Clarification::for_rule("R3");
        clar.clarified_conditions =
            Some(vec![String::new(), "Documents verified".to_string()]);

        let updated = merger.apply_clarification(&flagged_rule(), &clar).unwrap();
        assert_eq!(
            updated.conditions,
            vec!["Income < 2 lakh", "Documents verified"]
        );
    }

    #[test]
    fn test_blank_scalar_does_not_overwrite() {
        let merger = ClarificationMerger::new();
        let mut clar = Clarification::for_rule("R3");
        clar.clarified_responsible_role = Some("  ".to_string());
        clar.clarified_deadline = Some("30 days".to_string());

        let updated = merger.apply_clarification(&flagged_rule(), &clar).unwrap();
        assert_eq!(updated.responsible_role, "Block Officer");
        assert_eq!(updated.deadline, "30 days");
    }

    #[test]
    fn test_missing_rule_id_rejected() {
        let merger = ClarificationMerger::new();
        let mut clar = Clarification::for_rule("");
        clar.clarified_deadline = Some("30 days".to_string());

        let err = merger.apply_clarification(&flagged_rule(), &clar).unwrap_err();
        assert_eq!(err, ClarifierError::MissingRuleId);
    }

    #[test]
    fn test_contentless_clarification_rejected() {
        let merger = ClarificationMerger::new();
        let mut clar = Clarification::for_rule("R3");
        clar.clarified_action = Some("   ".to_string());
        clar.clarified_conditions = Some(Vec::new());

        let err = merger.apply_clarification(&flagged_rule(), &clar).unwrap_err();
        assert_eq!(err, ClarifierError::NoClarifiedFields);
    }

    #[test]
    fn test_rule_id_mismatch_rejected() {
        let merger = ClarificationMerger::new();
        let mut clar = Clarification::for_rule("R9");
        clar.clarified_deadline = Some("30 days".to_string());

        let err = merger.apply_clarification(&flagged_rule(), &clar).unwrap_err();
        assert_eq!(
            err,
            ClarifierError::RuleIdMismatch {
                expected: "R3".to_string(),
                actual: "R9".to_string(),
            }
        );
    }

    #[test]
    fn test_batch_preserves_order_and_length() {
        let merger = ClarificationMerger::new();
        let mut other = Rule::new("R4", "Cancel the policy");
        other.ambiguity_flag = true;
        other.ambiguity_reason = "Responsible authority not specified".to_string();
        let rules = vec![flagged_rule(), other];

        let mut clar = Clarification::for_rule("R3");
        clar.clarified_deadline = Some("30 days".to_string());

        let updated = merger.process_batch(&rules, &[clar]);
        assert_eq!(updated.len(), 2);
        assert_eq!(updated[0].rule_id, "R3");
        assert!(!updated[0].ambiguity_flag);
        // R4 had no clarification and passes through untouched
        assert!(updated[1].ambiguity_flag);
    }

    #[test]
    fn test_batch_later_duplicate_id_wins() {
        let merger = ClarificationMerger::new();
        let mut first = Clarification::for_rule("R3");
        first.clarified_deadline = Some("10 days".to_string());
        let mut second = Clarification::for_rule("R3");
        second.clarified_deadline = Some("30 days".to_string());

        let updated = merger.process_batch(&[flagged_rule()], &[first, second]);
        assert_eq!(updated[0].deadline, "30 days");
    }

    #[test]
    fn test_batch_keeps_rule_on_invalid_clarification() {
        let merger = ClarificationMerger::new();
        let invalid = Clarification::for_rule("R3");

        let updated = merger.process_batch(&[flagged_rule()], &[invalid]);
        assert!(updated[0].ambiguity_flag);
        assert_eq!(updated[0], flagged_rule());
    }

    #[test]
    fn test_fields_needing_clarification() {
        let merger = ClarificationMerger::new();
        let mut rule = Rule::new("R2", "Provide scholarship as applicable");
        rule.ambiguity_flag = true;
        rule.ambiguity_reason = "Contains vague phrase: 'as applicable'".to_string();

        let needed = merger.fields_needing_clarification(&rule);
        assert_eq!(
            needed,
            vec![
                "responsible_role",
                "deadline",
                "beneficiary",
                "conditions",
                "action"
            ]
        );
    }

    #[test]
    fn test_pending_clarifications_lists_flagged_rules_only() {
        let merger = ClarificationMerger::new();
        let clear = Rule::new("R1", "Cancel the policy");
        let pending = merger.pending_clarifications(&[clear, flagged_rule()]);

        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].rule_id, "R3");
        assert_eq!(
            pending[0].fields_needing_clarification,
            vec!["deadline"]
        );
    }
}
