//! Errors for per-segment distribution fitting.
//!
//! This module defines [`FitError`] and the [`FitResult`] alias used across
//! the `fit` subtree. Optimizer failures from the Cauchy tail estimator are
//! wrapped in [`FitError::Optimization`] so callers see one error type per
//! pipeline stage.

use crate::optimization::errors::OptError;

/// Result alias for fitting operations that may produce [`FitError`].
pub type FitResult<T> = Result<T, FitError>;

/// Unified error type for distribution fitting.
#[derive(Debug, Clone, PartialEq)]
pub enum FitError {
    /// A segment has fewer observations than the estimator requires.
    InsufficientData { segment: &'static str, needed: usize, found: usize },

    /// A fitted or supplied parameter violates its domain.
    InvalidParameter { name: &'static str, value: f64, reason: &'static str },

    /// Unknown tail distribution name.
    UnknownDistribution { name: String },

    /// The tail maximum-likelihood fit failed in the optimizer layer.
    Optimization { source: OptError },
}

impl std::error::Error for FitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FitError::Optimization { source } => Some(source),
            _ => None,
        }
    }
}

impl std::fmt::Display for FitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FitError::InsufficientData { segment, needed, found } => {
                write!(
                    f,
                    "Insufficient data in segment {segment}: need at least {needed} \
                     observations, found {found}"
                )
            }
            FitError::InvalidParameter { name, value, reason } => {
                write!(f, "Invalid parameter {name} = {value}. {reason}")
            }
            FitError::UnknownDistribution { name } => {
                write!(
                    f,
                    "Unknown tail distribution '{name}'. Valid options are case insensitive \
                     'Normal' or 'Cauchy'."
                )
            }
            FitError::Optimization { source } => {
                write!(f, "Tail fit failed: {source}")
            }
        }
    }
}

impl From<OptError> for FitError {
    fn from(source: OptError) -> FitError {
        FitError::Optimization { source }
    }
}
