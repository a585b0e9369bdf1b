//! Validator error types

use thiserror::Error;

/// Errors that can occur around the validation pipeline
///
/// The pipeline itself is total: malformed rules are dropped, empty input
/// yields an empty report. Errors only arise from configuration handling.
#[derive(Error, Debug)]
pub enum ValidatorError {
    /// Configuration could not be parsed
    #[error("Configuration error: {0}")]
    Config(String),
}
