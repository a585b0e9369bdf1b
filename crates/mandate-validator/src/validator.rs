//! Rule validation and repair pipeline

use crate::config::ValidatorConfig;
use crate::report::{QualityReport, RepairMetadata, RepairedPolicy};
use mandate_domain::{Policy, Rule};
use regex::Regex;
use std::collections::{BTreeMap, HashSet};
use std::sync::OnceLock;
use tracing::debug;

fn or_splitter() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\s+or\s+").expect("static pattern compiles"))
}

/// Validates and repairs extracted policy rules for execution readiness
///
/// The pipeline is a pure function over its input: it never mutates the
/// given policy, and two runs over the same input produce the same
/// output. Rule ids are reassigned sequentially at the end, so they are
/// only meaningful relative to the repaired list.
pub struct RuleValidator {
    config: ValidatorConfig,
}

impl RuleValidator {
    /// Create a validator with the given configuration tables
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    /// Create a validator with the reference configuration
    pub fn default_config() -> Self {
        Self::new(ValidatorConfig::default())
    }

    /// Run the full repair pipeline over a policy
    ///
    /// Steps, each a total pass over the rule list:
    /// 1. Filter non-rules (definitions, headers, verb-less actions)
    /// 2. Split two-way " or " compound actions into atomic rules
    /// 3. Normalize responsible roles against the synonym table
    /// 4. Normalize conditions (trim, drop headings and empties)
    /// 5. Clear vague deadlines
    /// 6. Recompute ambiguity flags from scratch
    /// 7. Remove duplicates (first occurrence wins)
    /// 8. Reassign sequential rule ids
    pub fn validate_and_repair(&self, policy: &Policy) -> (RepairedPolicy, QualityReport) {
        let mut rules = policy.rules.clone();
        debug!(initial = rules.len(), "validation pipeline start");

        rules = self.filter_invalid_rules(rules);
        debug!(after_filtering = rules.len());

        rules = self.split_compound_actions(rules);
        debug!(after_atomicity_split = rules.len());

        rules = self.normalize_roles(rules);
        rules = self.normalize_conditions(rules);
        rules = self.validate_deadlines(rules);
        rules = self.enforce_ambiguity_flags(rules);

        rules = self.remove_duplicates(rules);
        debug!(after_deduplication = rules.len());

        for (idx, rule) in rules.iter_mut().enumerate() {
            rule.rule_id = format!("R{}", idx + 1);
        }

        let report = self.quality_report(&rules);
        let repaired = RepairedPolicy {
            policy_id: policy.policy_id.clone(),
            policy_title: policy.policy_title.clone(),
            metadata: RepairMetadata {
                total_rules: rules.len(),
                validated: true,
            },
            rules,
        };

        (repaired, report)
    }

    /// Quality statistics for a rule list
    ///
    /// Empty input yields a zeroed report with `quality_score` 0.0 rather
    /// than a division error.
    pub fn quality_report(&self, rules: &[Rule]) -> QualityReport {
        let total = rules.len();
        let executable = rules.iter().filter(|r| !r.ambiguity_flag).count();
        let ambiguous = total - executable;

        let quality_score = if total > 0 {
            (executable as f64 / total as f64 * 100.0 * 10.0).round() / 10.0
        } else {
            0.0
        };

        let mut role_distribution: BTreeMap<String, usize> = BTreeMap::new();
        for rule in rules {
            *role_distribution
                .entry(rule.responsible_role.clone())
                .or_insert(0) += 1;
        }

        QualityReport {
            total_rules: total,
            executable_rules: executable,
            ambiguous_rules: ambiguous,
            quality_score,
            role_distribution,
        }
    }

    /// Drop records that are definitions, headers, or references, and
    /// records whose action carries no recognizable verb
    fn filter_invalid_rules(&self, rules: Vec<Rule>) -> Vec<Rule> {
        rules
            .into_iter()
            .filter(|rule| {
                let action = rule.action.to_lowercase();
                let conditions = rule.conditions.join(" ").to_lowercase();

                let is_invalid = self
                    .config
                    .invalid_keywords
                    .iter()
                    .any(|kw| action.contains(kw.as_str()) || conditions.contains(kw.as_str()));

                let has_action_verb = self
                    .config
                    .action_verbs
                    .iter()
                    .any(|verb| action.contains(verb.as_str()));

                !is_invalid && has_action_verb
            })
            .collect()
    }

    /// Split rules whose action joins exactly two alternatives with " or "
    ///
    /// Splits yielding anything other than two parts leave the rule
    /// intact; there is no recursive splitting.
    fn split_compound_actions(&self, rules: Vec<Rule>) -> Vec<Rule> {
        let mut atomic = Vec::with_capacity(rules.len());

        for rule in rules {
            let action_lower = rule.action.to_lowercase();
            if action_lower.contains(" or ") && !action_lower.contains("and/or") {
                let parts: Vec<&str> = or_splitter().split(&rule.action).collect();
                if parts.len() == 2 {
                    for part in parts {
                        let mut split_rule = rule.clone();
                        split_rule.action = part.trim().to_string();
                        atomic.push(split_rule);
                    }
                    continue;
                }
            }
            atomic.push(rule);
        }

        atomic
    }

    /// Map role synonyms to their canonical form
    fn normalize_roles(&self, mut rules: Vec<Rule>) -> Vec<Rule> {
        for rule in &mut rules {
            let role = rule.responsible_role.trim().to_string();
            let role_lower = role.to_lowercase();

            if let Some(canonical) = self.config.role_synonyms.get(&role_lower) {
                rule.responsible_role = canonical.clone();
            } else if !role.is_empty() && !self.config.is_canonical_role(&role) {
                // Compound roles like "LIC Claims Department" anchor to
                // the insurer; anything else is left for ambiguity
                // enforcement to flag.
                if self
                    .config
                    .insurer_anchors
                    .iter()
                    .any(|anchor| role_lower.contains(anchor.as_str()))
                {
                    rule.responsible_role = self.config.insurer_role.clone();
                }
            }
        }
        rules
    }

    /// Trim conditions, dropping heading-only entries and empties
    fn normalize_conditions(&self, mut rules: Vec<Rule>) -> Vec<Rule> {
        for rule in &mut rules {
            rule.conditions = rule
                .conditions
                .iter()
                .map(|c| c.trim())
                .filter(|c| !c.is_empty())
                .filter(|c| {
                    !self
                        .config
                        .heading_conditions
                        .iter()
                        .any(|h| h == &c.to_lowercase())
                })
                .map(|c| c.to_string())
                .collect();
        }
        rules
    }

    /// Clear deadlines too vague to schedule against
    fn validate_deadlines(&self, mut rules: Vec<Rule>) -> Vec<Rule> {
        for rule in &mut rules {
            let deadline = rule.deadline.trim().to_lowercase();
            if deadline.is_empty() {
                continue;
            }
            let is_vague = self.config.vague_deadlines.iter().any(|v| v == &deadline);
            if is_vague || deadline.contains("as per") {
                rule.deadline = String::new();
            }
        }
        rules
    }

    /// Recompute ambiguity flags from scratch, overwriting whatever the
    /// extractor reported
    fn enforce_ambiguity_flags(&self, mut rules: Vec<Rule>) -> Vec<Rule> {
        for rule in &mut rules {
            let mut reasons: Vec<String> = Vec::new();

            if rule.responsible_role.trim().is_empty() {
                reasons.push("Responsible authority not specified".to_string());
            } else if !self.config.is_canonical_role(&rule.responsible_role) {
                reasons.push(format!("Role '{}' not normalized", rule.responsible_role));
            }

            let action = rule.action.to_lowercase();
            let requires_deadline = self
                .config
                .timing_keywords
                .iter()
                .any(|word| action.contains(word.as_str()));
            if requires_deadline && rule.deadline.trim().is_empty() {
                reasons.push("Deadline not explicitly stated".to_string());
            }

            let full_text = rule.searchable_text().to_lowercase();
            for term in &self.config.ambiguity_terms {
                if full_text.contains(term.as_str()) {
                    reasons.push(format!("Uses ambiguous term '{}'", term));
                    break;
                }
            }

            rule.ambiguity_flag = !reasons.is_empty();
            rule.ambiguity_reason = reasons.join("; ");
        }
        rules
    }

    /// Keep only the first occurrence of each deduplication signature
    fn remove_duplicates(&self, rules: Vec<Rule>) -> Vec<Rule> {
        let mut seen = HashSet::new();
        rules
            .into_iter()
            .filter(|rule| seen.insert(rule.dedup_signature()))
            .collect()
    }
}
