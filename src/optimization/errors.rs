//! Errors for the log-likelihood maximization layer (configuration checks,
//! gradient validation, and backend solver failures).
//!
//! This module defines [`OptError`] and the [`OptResult`] alias used across
//! the optimizer. Backend (`argmin`) errors are normalized into
//! [`OptError::Backend`] with a human-readable message.
//!
//! ## Conventions
//! - Tolerances, when provided, must be **finite and strictly positive**.
//! - Gradients and parameter estimates must be **finite** element-wise.
//! - The optimizer **maximizes** a log-likelihood by minimizing its negation;
//!   "cost" in these messages refers to the negated value.

use argmin::core::Error;

/// Result alias for optimizer operations that may produce [`OptError`].
pub type OptResult<T> = Result<T, OptError>;

/// Unified error type for log-likelihood maximization.
#[derive(Debug, Clone, PartialEq)]
pub enum OptError {
    // ---- Gradient ----
    /// Gradient dimensions do not match parameter dimensions.
    GradientDimMismatch { expected: usize, found: usize },

    /// Gradient elements need to be finite.
    InvalidGradient { index: usize, value: f64, reason: &'static str },

    // ---- Options ----
    /// Gradient tolerance needs to be positive and finite.
    InvalidTolGrad { tol: f64, reason: &'static str },

    /// Cost change tolerance needs to be positive and finite.
    InvalidTolCost { tol: f64, reason: &'static str },

    /// Maximum iterations needs to be positive.
    InvalidMaxIter { max_iter: usize, reason: &'static str },

    /// At least one stopping rule must be provided.
    NoTolerancesProvided,

    /// Invalid line searcher name.
    InvalidLineSearch { name: String, reason: &'static str },

    /// L-BFGS memory needs to be at least 1.
    InvalidLbfgsMem { mem: usize, reason: &'static str },

    // ---- Cost function ----
    /// Cost function returned a non-finite value.
    NonFiniteCost { value: f64 },

    /// Log-likelihood input violated a model precondition.
    InvalidLogLikInput { index: usize, value: f64, reason: &'static str },

    // ---- Optimizer outcome ----
    /// Estimated parameters must be finite.
    InvalidThetaHat { index: usize, value: f64, reason: &'static str },

    /// No best parameter vector was produced by the solver.
    MissingThetaHat,

    // ---- Backend ----
    /// Solver or line-search failure reported by the argmin backend.
    Backend { message: String },
}

impl std::error::Error for OptError {}

impl std::fmt::Display for OptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptError::GradientDimMismatch { expected, found } => {
                write!(f, "Gradient dimension mismatch: expected {expected}, got {found}")
            }
            OptError::InvalidGradient { index, value, reason } => {
                write!(f, "Invalid gradient element at index {index}: {value}. {reason}")
            }
            OptError::InvalidTolGrad { tol, reason } => {
                write!(f, "Invalid gradient tolerance {tol}. {reason}")
            }
            OptError::InvalidTolCost { tol, reason } => {
                write!(f, "Invalid cost tolerance {tol}. {reason}")
            }
            OptError::InvalidMaxIter { max_iter, reason } => {
                write!(f, "Invalid maximum iterations {max_iter}. {reason}")
            }
            OptError::NoTolerancesProvided => {
                write!(f, "At least one of tol_grad, tol_cost, or max_iter must be provided.")
            }
            OptError::InvalidLineSearch { name, reason } => {
                write!(f, "Invalid line search '{name}'. {reason}")
            }
            OptError::InvalidLbfgsMem { mem, reason } => {
                write!(f, "Invalid L-BFGS memory {mem}. {reason}")
            }
            OptError::NonFiniteCost { value } => {
                write!(f, "Objective returned a non-finite value: {value}")
            }
            OptError::InvalidLogLikInput { index, value, reason } => {
                write!(f, "Invalid log-likelihood input at index {index}: {value}. {reason}")
            }
            OptError::InvalidThetaHat { index, value, reason } => {
                write!(f, "Invalid parameter estimate at index {index}: {value}. {reason}")
            }
            OptError::MissingThetaHat => {
                write!(f, "Solver produced no best parameter vector.")
            }
            OptError::Backend { message } => {
                write!(f, "Optimizer backend failed: {message}")
            }
        }
    }
}

/// Normalize any argmin runtime error into [`OptError::Backend`].
impl From<Error> for OptError {
    fn from(err: Error) -> OptError {
        OptError::Backend { message: err.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Display formatting for payload-carrying variants.
    //
    // They intentionally DO NOT cover:
    // - The validation logic producing these errors (covered in `mle`).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that rendered messages embed the offending values, so a failed
    // fit identifies the parameter or tolerance at fault.
    //
    // Given
    // -----
    // - A handful of payload-carrying variants.
    //
    // Expect
    // ------
    // - Each message contains its payload.
    fn display_embeds_payloads() {
        let e = OptError::GradientDimMismatch { expected: 2, found: 3 };
        let msg = e.to_string();
        assert!(msg.contains('2') && msg.contains('3'));

        let e = OptError::NonFiniteCost { value: f64::NAN };
        assert!(e.to_string().contains("NaN"));

        let e = OptError::Backend { message: "line search failed".to_string() };
        assert!(e.to_string().contains("line search failed"));
    }
}
