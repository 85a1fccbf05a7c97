//! production_mixture — three-regime production modeling and Monte-Carlo
//! simulation.
//!
//! Purpose
//! -------
//! Serve as the crate root for the daily-production pipeline: segment a
//! location's production history into three regimes by two thresholds, fit
//! a mixture model to the segments (point mass at zero, uniform mid
//! regime, normal or Cauchy tail), and simulate distributions of N-day
//! totals from the fitted model.
//!
//! Key behaviors
//! -------------
//! - Re-export the pipeline stages (`segmentation`, `fit`, `simulate`,
//!   `analysis`) plus the supporting `optimization` and `categories`
//!   modules as the public crate surface.
//! - Validate aggressively at stage boundaries so each stage can assume
//!   clean input from the previous one.
//!
//! Invariants & assumptions
//! ------------------------
//! - Production values are finite and non-negative; regime shares sum to
//!   one within floating tolerance.
//! - Simulation is deterministic for a fixed `(seed, workers)` pair.
//! - Errors propagate as per-stage enums (`SegmentError`, `FitError`,
//!   `SimError`, `AnalysisError`, `OptError`); nothing panics on user
//!   input.
//!
//! Conventions
//! -----------
//! - Numeric vectors are `ndarray::Array1<f64>` throughout.
//! - Regime intervals are half-open: `[0, lower)`, `[lower, upper)`,
//!   `[upper, inf)`.
//! - Fitted profiles serialize via `serde` and are the persistence unit
//!   between estimation and simulation runs.
//!
//! Downstream usage
//! ----------------
//! - A typical caller runs `segmentation::segment` over a validated
//!   `ProductionTable`, hands the `SegmentSet` to `fit::fit_profile`, and
//!   simulates with `simulate::simulate_totals` before summarizing via
//!   `analysis`.
//!
//! Testing notes
//! -------------
//! - Core behavior is covered by unit tests in the inner modules; the full
//!   segment-fit-simulate-analyze chain is exercised by the pipeline
//!   integration test under `tests/`.

pub mod analysis;
pub mod categories;
pub mod fit;
pub mod optimization;
pub mod segmentation;
pub mod simulate;

pub use crate::analysis::{CltOverlay, Ecdf, Histogram};
pub use crate::fit::{fit_profile, SegmentProfile, TailDistribution};
pub use crate::segmentation::{segment, ProductionRecord, ProductionTable, SegmentSet, Thresholds};
pub use crate::simulate::{simulate_totals, SimOptions, SimulationResult};
