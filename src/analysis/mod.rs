//! analysis — empirical summaries of simulated totals.
//!
//! Purpose
//! -------
//! Turn a Monte-Carlo sample of N-day totals into the summaries a caller
//! plots or reports: an empirical CDF, an equal-width histogram with a
//! horizon-aware bin heuristic, and a normal overlay for judging
//! closeness to the central-limit approximation.
//!
//! Key behaviors
//! -------------
//! - Everything here is a pure read over an in-memory sample; validation
//!   happens once at construction and queries never fail.
//! - Heavy-tailed (Cauchy) mixtures are first-class: the ECDF and
//!   histogram make no moment assumptions, and the CLT overlay exists
//!   precisely to show where the normal approximation breaks down.
//!
//! Testing notes
//! -------------
//! - Each summary is unit-tested against hand computations next to its
//!   module.

pub mod clt;
pub mod ecdf;
pub mod errors;
pub mod histogram;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::clt::CltOverlay;
pub use self::ecdf::{Ecdf, EcdfPoints};
pub use self::errors::{AnalysisError, AnalysisResult};
pub use self::histogram::{suggested_bin_count, Histogram, MIN_BIN_COUNT};
