//! simulate — Monte-Carlo generation of N-day production totals.
//!
//! Purpose
//! -------
//! Turn fitted models into distributions of N-day totals: the three-regime
//! mixture engine for profiles estimated from history, and the
//! zero-censored normal model for planning scenarios specified directly by
//! a daily level and spread.
//!
//! Key behaviors
//! -------------
//! - Batched variate generation with a fixed draw count per sample, so
//!   worker RNG streams stay aligned.
//! - Deterministic results per `(seed, workers)` via per-worker ChaCha
//!   streams over contiguous output chunks.
//! - Cooperative cancellation at sample granularity with an all-or-nothing
//!   result contract.
//!
//! Downstream usage
//! ----------------
//! - Feed [`SimulationResult`](engine::SimulationResult) into the
//!   `analysis` subtree for ECDF, histogram, and CLT-overlay summaries.
//!
//! Testing notes
//! -------------
//! - Distributional properties, determinism, and cancellation are
//!   unit-tested next to each module and exercised end-to-end by the
//!   pipeline integration test.

pub mod censored;
pub mod engine;
pub mod errors;
pub mod options;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::censored::{simulate_censored_totals, zero_probability};
pub use self::engine::{simulate_totals, SimulationResult};
pub use self::errors::{SimError, SimResult};
pub use self::options::{default_sample_count, SimOptions};
