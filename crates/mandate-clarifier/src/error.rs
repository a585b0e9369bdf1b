//! Clarifier error types

use thiserror::Error;

/// Errors that can occur when applying a clarification
///
/// On any of these the target rule is returned to the caller unchanged;
/// there is no partial application.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClarifierError {
    /// The clarification carries no rule id
    #[error("Missing required field: rule_id")]
    MissingRuleId,

    /// No clarified field carries content
    #[error("At least one clarified field must be provided and non-empty")]
    NoClarifiedFields,

    /// The clarification targets a different rule
    #[error("Rule ID mismatch. Expected {expected}, got {actual}")]
    RuleIdMismatch {
        /// Id of the rule being clarified
        expected: String,
        /// Id the clarification carried
        actual: String,
    },
}
