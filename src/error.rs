//! Error types for Workout Report

use thiserror::Error;

/// Errors that can occur while reading a sensor package or computing a report
#[derive(Debug, Error)]
pub enum ComputeError {
    #[error("Unknown activity kind '{code}': expected one of {expected}")]
    InvalidActivityKind { code: String, expected: String },

    #[error("{kind} expects {expected} fields, got {actual}")]
    ArityMismatch {
        kind: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid value {value} for {field}: {reason}")]
    InvalidField {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("Failed to parse sensor package: {0}")]
    ParseError(String),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),
}
