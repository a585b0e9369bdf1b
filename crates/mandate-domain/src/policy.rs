//! Policy module - an ordered collection of rules

use crate::rule::Rule;
use serde::{Deserialize, Serialize};

/// A policy document's extracted rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    /// Unique identifier for the policy
    pub policy_id: String,

    /// Title of the policy
    pub policy_title: String,

    /// Rules in document order
    #[serde(default)]
    pub rules: Vec<Rule>,
}

impl Policy {
    /// Create an empty policy with the given id and title
    pub fn new(policy_id: impl Into<String>, policy_title: impl Into<String>) -> Self {
        Self {
            policy_id: policy_id.into(),
            policy_title: policy_title.into(),
            rules: Vec::new(),
        }
    }
}
