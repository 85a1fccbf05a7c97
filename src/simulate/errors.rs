//! Errors for Monte-Carlo simulation runs.
//!
//! This module defines [`SimError`] and the [`SimResult`] alias used across
//! the `simulate` subtree. Cooperative cancellation surfaces as
//! [`SimError::Cancelled`]; a cancelled run never returns partial totals.

/// Result alias for simulation operations that may produce [`SimError`].
pub type SimResult<T> = Result<T, SimError>;

/// Unified error type for Monte-Carlo simulation.
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// A run argument (horizon, sample count, worker count) violates its domain.
    InvalidArgument { name: &'static str, value: usize, reason: &'static str },

    /// A model parameter violates its domain (e.g., a non-positive scale).
    InvalidParameter { name: &'static str, value: f64, reason: &'static str },

    /// The run was cancelled via its cancellation flag before completing.
    Cancelled,
}

impl std::error::Error for SimError {}

impl std::fmt::Display for SimError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimError::InvalidArgument { name, value, reason } => {
                write!(f, "Invalid argument {name} = {value}. {reason}")
            }
            SimError::InvalidParameter { name, value, reason } => {
                write!(f, "Invalid parameter {name} = {value}. {reason}")
            }
            SimError::Cancelled => {
                write!(f, "Simulation cancelled before completion; no totals were produced.")
            }
        }
    }
}
