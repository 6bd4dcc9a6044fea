//! Reconciler error types

use thiserror::Error;

/// Errors that can occur while configuring the reconciler
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ReconcilerError {
    /// Fuzzy threshold outside 0..=100
    #[error("Fuzzy threshold {0} is outside [0, 100]")]
    InvalidThreshold(u32),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
