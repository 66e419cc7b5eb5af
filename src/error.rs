//! Typed errors for experiment analysis
//!
//! Every fallible operation in the crate returns [`EngineError`] through
//! the crate-level [`Result`] alias. Errors are synchronous and carry the
//! offending value so callers can report them without re-deriving context.

use thiserror::Error;

/// Errors for experiment analysis operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Input rejected before any statistic was computed
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    /// Probability argument outside the open interval (0, 1)
    #[error("Inverse normal CDF undefined for p = {p}: p must lie in (0, 1)")]
    Domain { p: f64 },
}

pub type Result<T> = std::result::Result<T, EngineError>;
