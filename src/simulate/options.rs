//! Validated run configuration for Monte-Carlo simulation.
//!
//! Purpose
//! -------
//! Centralize validation of everything a simulation run needs besides the
//! fitted model: the horizon in days, the Monte-Carlo sample count, the
//! RNG seed, the worker count, and an optional cooperative cancellation
//! flag.
//!
//! Key behaviors
//! -------------
//! - [`SimOptions::new`] enforces a positive horizon and worker count; the
//!   sample count defaults to [`default_sample_count`] when not given.
//! - The default sample count shrinks with the horizon
//!   (`round(10⁶ / √n_days)`), keeping total variate draws roughly
//!   constant across horizons.
//! - Runs are deterministic per `(seed, workers)` pair; each worker draws
//!   from its own counter-based RNG stream.
//!
//! Invariants & assumptions
//! ------------------------
//! - `n_days >= 1`, `sample_count >= 1`, `workers >= 1` for any
//!   constructed options value.
//! - The cancellation flag is observed at sample granularity; setting it
//!   aborts the run with no partial totals.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the default-count formula, its floor at one, and
//!   each rejection branch.

use crate::simulate::errors::{SimError, SimResult};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Baseline total draw budget used by [`default_sample_count`].
pub const DEFAULT_DRAW_BUDGET: f64 = 1_000_000.0;

/// Default Monte-Carlo sample count for an `n_days` horizon:
/// `round(10⁶ / √n_days)`, floored at one.
///
/// Longer horizons draw more variates per sample, so the sample count
/// shrinks to keep the run's total work roughly constant.
pub fn default_sample_count(n_days: usize) -> usize {
    let count = (DEFAULT_DRAW_BUDGET / (n_days as f64).sqrt()).round() as usize;
    count.max(1)
}

/// `SimOptions` — validated configuration for one simulation run.
///
/// Fields
/// ------
/// - `n_days`: horizon length in days; each sample is a sum over this many
///   daily draws.
/// - `sample_count`: number of Monte-Carlo samples (simulated totals).
/// - `seed`: base RNG seed; combined with per-worker stream indices.
/// - `workers`: number of threads; results are deterministic per
///   `(seed, workers)`.
/// - `cancel`: optional cooperative cancellation flag, checked once per
///   completed sample.
#[derive(Debug, Clone)]
pub struct SimOptions {
    pub n_days: usize,
    pub sample_count: usize,
    pub seed: u64,
    pub workers: usize,
    pub cancel: Option<Arc<AtomicBool>>,
}

impl SimOptions {
    /// Construct validated run options.
    ///
    /// Parameters
    /// ----------
    /// - `n_days`: `usize`
    ///   Horizon length; must be at least one.
    /// - `sample_count`: `Option<usize>`
    ///   Monte-Carlo sample count; defaults to
    ///   [`default_sample_count`]`(n_days)` when `None`. Must be at least
    ///   one when given.
    /// - `seed`: `u64`
    /// - `workers`: `usize`
    ///   Must be at least one.
    ///
    /// Errors
    /// ------
    /// - [`SimError::InvalidArgument`] naming the offending field.
    pub fn new(
        n_days: usize, sample_count: Option<usize>, seed: u64, workers: usize,
    ) -> SimResult<Self> {
        if n_days == 0 {
            return Err(SimError::InvalidArgument {
                name: "n_days",
                value: n_days,
                reason: "Horizon must be at least one day.",
            });
        }
        if let Some(count) = sample_count {
            if count == 0 {
                return Err(SimError::InvalidArgument {
                    name: "sample_count",
                    value: count,
                    reason: "Sample count must be at least one.",
                });
            }
        }
        if workers == 0 {
            return Err(SimError::InvalidArgument {
                name: "workers",
                value: workers,
                reason: "Worker count must be at least one.",
            });
        }
        Ok(Self {
            n_days,
            sample_count: sample_count.unwrap_or_else(|| default_sample_count(n_days)),
            seed,
            workers,
            cancel: None,
        })
    }

    /// Attach a cooperative cancellation flag.
    ///
    /// The flag is checked once per completed sample; a set flag aborts
    /// the run with [`SimError::Cancelled`] and no partial totals.
    pub fn with_cancel(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = Some(cancel);
        self
    }
}
