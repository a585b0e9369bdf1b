//! Pairwise policy comparison

use crate::config::ComparatorConfig;
use crate::report::{ConflictRecord, ConflictReport, ConflictType};
use crate::similarity::jaccard_similarity;
use mandate_domain::{Policy, Rule};
use std::collections::BTreeSet;
use tracing::debug;

// Classification profile: pairwise field thresholds distinguishing
// same-action duplicates from same-scope contradictions.
const FIELD_DUPLICATE_THRESHOLD: f64 = 0.7;
const SCOPE_OVERLAP_THRESHOLD: f64 = 0.8;
const DISTINCT_ACTION_THRESHOLD: f64 = 0.3;

/// Compares policy rules to identify conflicts and overlaps
///
/// Every (new rule, existing rule) pair across all existing policies is
/// examined — O(n·m) by design, acceptable at document scale.
pub struct ConflictComparator {
    config: ComparatorConfig,
}

impl ConflictComparator {
    /// Create a comparator with the given configuration
    pub fn new(config: ComparatorConfig) -> Self {
        Self { config }
    }

    /// Create a comparator with the reference configuration
    pub fn default_config() -> Self {
        Self::new(ComparatorConfig::default())
    }

    /// Compare a new policy against a set of existing policies
    pub fn compare_policies(
        &self,
        new_policy: &Policy,
        existing_policies: &[Policy],
    ) -> ConflictReport {
        let mut conflicts = Vec::new();
        let mut recommendations = BTreeSet::new();

        for new_rule in &new_policy.rules {
            for existing_policy in existing_policies {
                for existing_rule in &existing_policy.rules {
                    let similarity = self.rule_similarity(new_rule, existing_rule);
                    if similarity <= self.config.record_threshold {
                        continue;
                    }

                    let (conflict_type, reason) =
                        self.classify(new_rule, existing_rule, similarity);
                    debug!(
                        new_rule = %new_rule.rule_id,
                        existing_rule = %existing_rule.rule_id,
                        %similarity,
                        ?conflict_type,
                        "conflict recorded"
                    );

                    recommendations.insert(self.recommendation(
                        conflict_type,
                        new_rule,
                        existing_policy,
                        existing_rule,
                    ));
                    conflicts.push(ConflictRecord {
                        existing_policy_id: existing_policy.policy_id.clone(),
                        existing_rule_id: existing_rule.rule_id.clone(),
                        new_rule_id: new_rule.rule_id.clone(),
                        conflict_type,
                        similarity_score: (similarity * 100.0).round() / 100.0,
                        reason: reason.to_string(),
                    });
                }
            }
        }

        ConflictReport {
            new_policy_id: new_policy.policy_id.clone(),
            conflicts,
            recommendations: recommendations.into_iter().collect(),
        }
    }

    /// Weighted similarity score between two rules, in [0.0, 1.0]
    pub fn rule_similarity(&self, rule1: &Rule, rule2: &Rule) -> f64 {
        let weights = &self.config.weights;

        let action = jaccard_similarity(&rule1.action, &rule2.action, &self.config);
        let conditions = jaccard_similarity(
            &rule1.conditions.join(" "),
            &rule2.conditions.join(" "),
            &self.config,
        );
        let beneficiary =
            jaccard_similarity(&rule1.beneficiary, &rule2.beneficiary, &self.config);
        let role = jaccard_similarity(
            &rule1.responsible_role,
            &rule2.responsible_role,
            &self.config,
        );

        action * weights.action
            + conditions * weights.conditions
            + beneficiary * weights.beneficiary
            + role * weights.responsible_role
    }

    /// Determine the conflict class from the similarity profile,
    /// first match wins
    fn classify(
        &self,
        rule1: &Rule,
        rule2: &Rule,
        similarity: f64,
    ) -> (ConflictType, &'static str) {
        let action_sim = jaccard_similarity(&rule1.action, &rule2.action, &self.config);
        let beneficiary_sim =
            jaccard_similarity(&rule1.beneficiary, &rule2.beneficiary, &self.config);

        if similarity > self.config.duplicate_threshold {
            (
                ConflictType::Duplicate,
                "Rules are nearly identical in action and scope.",
            )
        } else if action_sim > FIELD_DUPLICATE_THRESHOLD
            && beneficiary_sim > FIELD_DUPLICATE_THRESHOLD
        {
            (
                ConflictType::Duplicate,
                "Same action for same beneficiaries.",
            )
        } else if beneficiary_sim > SCOPE_OVERLAP_THRESHOLD
            && action_sim < DISTINCT_ACTION_THRESHOLD
        {
            // Lexical stand-in for contradiction: same audience, very
            // different action. True logical negation is out of reach
            // for token overlap.
            (
                ConflictType::Contradiction,
                "High overlap in scope but distinct actions.",
            )
        } else {
            (
                ConflictType::Overlap,
                "Partial overlap in conditions or scope.",
            )
        }
    }

    fn recommendation(
        &self,
        conflict_type: ConflictType,
        new_rule: &Rule,
        existing_policy: &Policy,
        existing_rule: &Rule,
    ) -> String {
        let reference = format!(
            "{}/{}",
            existing_policy.policy_id, existing_rule.rule_id
        );
        match conflict_type {
            ConflictType::Duplicate => format!(
                "Rule {} is a duplicate of {}. Consider removing.",
                new_rule.rule_id, reference
            ),
            ConflictType::Contradiction => format!(
                "Rule {} contradicts {}. Please resolve the contradictory actions.",
                new_rule.rule_id, reference
            ),
            ConflictType::Overlap => format!(
                "Rule {} overlaps with {}. Ensure beneficiary scope is distinct.",
                new_rule.rule_id, reference
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(id: &str, action: &str, beneficiary: &str) -> Rule {
        let mut rule = Rule::new(id, action);
        rule.beneficiary = beneficiary.to_string();
        rule.responsible_role = "LIC".to_string();
        rule
    }

    fn policy(id: &str, rules: Vec<Rule>) -> Policy {
        let mut policy = Policy::new(id, format!("Policy {}", id));
        policy.rules = rules;
        policy
    }

    #[test]
    fn test_near_identical_rules_are_duplicates() {
        let comparator = ConflictComparator::default_config();
        let new_policy = policy(
            "P2",
            vec![rule("R1", "Award ₹10,000 scholarship amount", "SC students")],
        );
        let existing = vec![policy(
            "P1",
            vec![rule("R1", "Provide ₹10,000 scholarship", "SC students")],
        )];

        let report = comparator.compare_policies(&new_policy, &existing);
        assert_eq!(report.conflicts.len(), 1);
        let conflict = &report.conflicts[0];
        assert_eq!(conflict.conflict_type, ConflictType::Duplicate);
        assert!(conflict.similarity_score > 0.85);
        assert_eq!(conflict.reason, "Rules are nearly identical in action and scope.");
    }

    #[test]
    fn test_same_scope_distinct_action_is_contradiction() {
        let comparator = ConflictComparator::default_config();
        // Same beneficiaries and role, lexically unrelated actions:
        // beneficiary_sim = 1.0, action_sim = 0.0, score = 0.3 + 0.2 +
        // 0.1 = 0.6 with both condition lists empty.
        let new_policy = policy(
            "P2",
            vec![rule("R1", "Cancel enrollment", "SC category students")],
        );
        let existing = vec![policy(
            "P1",
            vec![rule("R4", "Provide scholarship money", "SC category students")],
        )];

        let report = comparator.compare_policies(&new_policy, &existing);
        assert_eq!(report.conflicts.len(), 1);
        assert_eq!(
            report.conflicts[0].conflict_type,
            ConflictType::Contradiction
        );
        assert_eq!(
            report.conflicts[0].reason,
            "High overlap in scope but distinct actions."
        );
    }

    #[test]
    fn test_below_threshold_pairs_are_not_recorded() {
        let comparator = ConflictComparator::default_config();
        let mut unrelated = rule("R1", "Cancel enrollment", "Nominee");
        unrelated.responsible_role = "Claimant".to_string();
        let new_policy = policy("P2", vec![unrelated]);
        let existing = vec![policy(
            "P1",
            vec![rule("R1", "Provide scholarship money", "SC category students")],
        )];

        let report = comparator.compare_policies(&new_policy, &existing);
        assert!(report.conflicts.is_empty());
        assert!(report.recommendations.is_empty());
    }

    #[test]
    fn test_every_pair_across_policies_is_examined() {
        let comparator = ConflictComparator::default_config();
        let shared = rule("R1", "Refund the premium", "Policyholder heirs");
        let new_policy = policy("P3", vec![shared.clone()]);
        let existing = vec![
            policy("P1", vec![shared.clone()]),
            policy("P2", vec![shared.clone()]),
        ];

        let report = comparator.compare_policies(&new_policy, &existing);
        assert_eq!(report.conflicts.len(), 2);
        let policies: Vec<&str> = report
            .conflicts
            .iter()
            .map(|c| c.existing_policy_id.as_str())
            .collect();
        assert_eq!(policies, vec!["P1", "P2"]);
    }

    #[test]
    fn test_recommendations_are_deduplicated() {
        let comparator = ConflictComparator::default_config();
        let shared = rule("R1", "Refund the premium", "Policyholder heirs");
        let new_policy = policy("P3", vec![shared.clone()]);
        // The same existing rule appearing twice in one policy produces
        // two conflicts but one recommendation.
        let existing = vec![policy("P1", vec![shared.clone(), shared.clone()])];

        let report = comparator.compare_policies(&new_policy, &existing);
        assert_eq!(report.conflicts.len(), 2);
        assert_eq!(report.recommendations.len(), 1);
        assert!(report.recommendations[0].contains("duplicate of P1/R1"));
    }

    #[test]
    fn test_similarity_score_is_rounded() {
        let comparator = ConflictComparator::default_config();
        let new_policy = policy(
            "P2",
            vec![rule("R1", "Refund premium and bonus", "Policyholder")],
        );
        let existing = vec![policy(
            "P1",
            vec![rule("R1", "Refund premium", "Policyholder")],
        )];

        let report = comparator.compare_policies(&new_policy, &existing);
        assert_eq!(report.conflicts.len(), 1);
        let score = report.conflicts[0].similarity_score;
        assert_eq!((score * 100.0).round() / 100.0, score);
    }

    #[test]
    fn test_empty_inputs_produce_empty_report() {
        let comparator = ConflictComparator::default_config();
        let report = comparator.compare_policies(&policy("P1", Vec::new()), &[]);
        assert_eq!(report.new_policy_id, "P1");
        assert!(report.conflicts.is_empty());
        assert!(report.recommendations.is_empty());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: similarity is symmetric
        #[test]
        fn test_similarity_symmetry(
            action_a: String, action_b: String,
            beneficiary_a: String, beneficiary_b: String,
            conditions_a: Vec<String>, conditions_b: Vec<String>,
        ) {
            let comparator = ConflictComparator::default_config();
            let mut a = Rule::new("A", action_a);
            a.beneficiary = beneficiary_a;
            a.conditions = conditions_a;
            let mut b = Rule::new("B", action_b);
            b.beneficiary = beneficiary_b;
            b.conditions = conditions_b;

            let ab = comparator.rule_similarity(&a, &b);
            let ba = comparator.rule_similarity(&b, &a);
            prop_assert!((ab - ba).abs() < 1e-12);
        }

        /// Property: similarity stays within [0.0, 1.0]
        #[test]
        fn test_similarity_bounded(action_a: String, action_b: String) {
            let comparator = ConflictComparator::default_config();
            let a = Rule::new("A", action_a);
            let b = Rule::new("B", action_b);
            let score = comparator.rule_similarity(&a, &b);
            prop_assert!((0.0..=1.0).contains(&score));
        }
    }
}
