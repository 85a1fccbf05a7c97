//! Errors for empirical summaries of simulated totals.

/// Result alias for analysis operations that may produce [`AnalysisError`].
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Unified error type for the analysis layer.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// A summary was requested over an empty sample.
    EmptySample,

    /// A sample element is NaN or infinite.
    NonFiniteSample { index: usize, value: f64 },

    /// A histogram was requested with zero bins.
    InvalidBinCount { count: usize, reason: &'static str },

    /// A normal overlay was requested over a constant sample.
    ZeroVariance,
}

impl std::error::Error for AnalysisError {}

impl std::fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisError::EmptySample => {
                write!(f, "Cannot summarize an empty sample.")
            }
            AnalysisError::NonFiniteSample { index, value } => {
                write!(f, "Non-finite sample element at index {index}: {value}")
            }
            AnalysisError::InvalidBinCount { count, reason } => {
                write!(f, "Invalid bin count {count}. {reason}")
            }
            AnalysisError::ZeroVariance => {
                write!(f, "A constant sample admits no normal overlay.")
            }
        }
    }
}
