//! Mandate Clarifier
//!
//! Applies human-supplied clarifications to ambiguous rules: scalar
//! fields are overwritten wholesale, conditions are an append-only set
//! union, and any successful application clears the rule's ambiguity
//! flag outright — a clarification resolves the rule, it does not
//! partially resolve it.
//!
//! Invalid or mismatched clarifications are reported as error values;
//! the target rule is never partially modified.

#![warn(missing_docs)]

mod error;
mod merger;

pub use error::ClarifierError;
pub use merger::{ClarificationMerger, PendingClarification};
