//! Five-trigger ambiguity detection

use mandate_domain::{Rule, DEFAULT_AMBIGUITY_TRIGGERS};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Roles too vague to execute against; matched exactly, case-insensitive
const VAGUE_ROLES: &[&str] = &["authority", "official", "concerned officer", "department"];

/// Action words implying a time constraint
const TIME_WORDS: &[&str] = &["within", "before", "by", "during", "period"];

/// Detects ambiguous language in policy rules
///
/// Stateless apart from the trigger-phrase list fixed at construction.
/// All five triggers are evaluated for every rule; the accumulated
/// reasons are joined with `" + "`.
pub struct AmbiguityDetector {
    triggers: Vec<String>,
}

impl AmbiguityDetector {
    /// Create a detector with the default trigger phrases
    pub fn new() -> Self {
        Self {
            triggers: DEFAULT_AMBIGUITY_TRIGGERS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    /// Create a detector with the default triggers extended by
    /// caller-supplied phrases
    ///
    /// Custom phrases are scanned after the defaults, in the order given.
    pub fn with_custom_triggers(custom: impl IntoIterator<Item = String>) -> Self {
        let mut detector = Self::new();
        detector.triggers.extend(custom);
        detector
    }

    /// Flag every rule in the list, returning updated copies
    ///
    /// Flags and reasons are recomputed from scratch; whatever the input
    /// carried is overwritten.
    pub fn detect(&self, rules: &[Rule]) -> Vec<Rule> {
        rules
            .iter()
            .map(|rule| {
                let (is_ambiguous, reason) = self.is_ambiguous(rule);
                debug!(
                    rule_id = %rule.rule_id,
                    ambiguous = is_ambiguous,
                    reason = %reason,
                    "checked rule"
                );
                let mut updated = rule.clone();
                updated.ambiguity_flag = is_ambiguous;
                updated.ambiguity_reason = reason;
                updated
            })
            .collect()
    }

    /// Evaluate the five triggers against a single rule
    pub fn is_ambiguous(&self, rule: &Rule) -> (bool, String) {
        let mut reasons: Vec<String> = Vec::new();

        let action_lower = rule.action.to_lowercase();
        let full_text = rule.searchable_text().to_lowercase();

        // Trigger 1: vague phrases in action or conditions
        if let Some(phrase) = self.first_trigger_phrase(&full_text) {
            reasons.push(format!("Contains vague phrase: '{}'", phrase));
        }

        // Trigger 2: missing responsible role
        let role = rule.responsible_role.as_str();
        if role.is_empty() || role.eq_ignore_ascii_case("not specified") {
            reasons.push("Responsible authority not specified".to_string());
        }

        // Trigger 3: eligibility mentioned without conditions
        if (action_lower.contains("eligible") || rule.beneficiary.to_lowercase().contains("eligible"))
            && rule.conditions.is_empty()
        {
            reasons.push("Eligibility criteria not specified".to_string());
        }

        // Trigger 4: time-sensitive action without a deadline
        let has_time_word = TIME_WORDS.iter().any(|w| action_lower.contains(w));
        if has_time_word
            && (rule.deadline.is_empty() || rule.deadline.eq_ignore_ascii_case("not specified"))
        {
            reasons.push("Time constraint mentioned but deadline not specified".to_string());
        }

        // Trigger 5: vague authority reference (exact match, not substring)
        if !role.is_empty() && VAGUE_ROLES.iter().any(|vr| role.eq_ignore_ascii_case(vr)) {
            reasons.push(format!("Authority role is too vague: '{}'", role));
        }

        if reasons.is_empty() {
            (false, String::new())
        } else {
            (true, reasons.join(" + "))
        }
    }

    /// First configured phrase found in the text, scanning the trigger
    /// list in order
    fn first_trigger_phrase(&self, text_lower: &str) -> Option<&str> {
        self.triggers
            .iter()
            .map(|p| p.as_str())
            .find(|phrase| text_lower.contains(&phrase.to_lowercase()))
    }

    /// Aggregate ambiguity statistics for a rule list
    pub fn summary(&self, rules: &[Rule]) -> AmbiguitySummary {
        let total = rules.len();
        let flagged: Vec<&Rule> = rules.iter().filter(|r| r.ambiguity_flag).collect();
        let ambiguous = flagged.len();

        let ambiguity_rate = if total > 0 {
            format!("{:.1}%", ambiguous as f64 / total as f64 * 100.0)
        } else {
            "0%".to_string()
        };

        AmbiguitySummary {
            total_rules: total,
            ambiguous_rules: ambiguous,
            clear_rules: total - ambiguous,
            ambiguity_rate,
            ambiguous_rule_ids: flagged.iter().map(|r| r.rule_id.clone()).collect(),
        }
    }

    /// Only the rules currently carrying an ambiguity flag
    pub fn ambiguous_rules(&self, rules: &[Rule]) -> Vec<Rule> {
        rules.iter().filter(|r| r.ambiguity_flag).cloned().collect()
    }
}

impl Default for AmbiguityDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// Ambiguity statistics over a rule list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmbiguitySummary {
    /// Total rules examined
    pub total_rules: usize,

    /// Rules carrying an ambiguity flag
    pub ambiguous_rules: usize,

    /// Rules with no flag
    pub clear_rules: usize,

    /// Flagged percentage with one decimal, e.g. "66.7%"; "0%" when empty
    pub ambiguity_rate: String,

    /// Ids of flagged rules, in original order
    pub ambiguous_rule_ids: Vec<String>,
}
