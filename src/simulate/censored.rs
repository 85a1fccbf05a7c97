//! Zero-censored normal production model.
//!
//! Purpose
//! -------
//! Simulate N-day totals for a site modeled directly as a normal daily
//! level with stochastic zero days, without the three-regime machinery.
//! This is the planning-side counterpart of the mixture engine: instead of
//! fitting a history, the caller supplies a target daily `level` and
//! `std`.
//!
//! Key behaviors
//! -------------
//! - Each day is a two-stage draw: sample a level `x ~ Normal(level, std)`,
//!   then zero the day with probability `Φ(0; x, std)` (the closer the
//!   drawn level sits to zero, the likelier the day produces nothing),
//!   otherwise keep `x` as-is.
//! - [`zero_probability`] reports `Φ(0; level, std)`, the zero-day
//!   probability for a day whose drawn level equals the configured one.
//! - [`simulate_censored_totals`] sums the daily draws over the horizon,
//!   reusing the mixture engine's worker/stream/cancellation machinery.
//!
//! Invariants & assumptions
//! ------------------------
//! - A kept level is used unmodified, so a negative drawn level survives
//!   into the total; only the zeroing stage pulls mass toward zero.
//! - Every day consumes exactly two variates (the level and the zeroing
//!   uniform), keeping worker streams aligned.
//!
//! Testing notes
//! -------------
//! - Tests pin `zero_probability` at symmetric and far-from-zero levels,
//!   the two-stage mean at a symmetric level against its closed form,
//!   survival of negative kept levels, and determinism.

use crate::simulate::{
    engine::{run_parallel, DayModel, Scratch, SimulationResult},
    errors::{SimError, SimResult},
    options::SimOptions,
};
use rand::distributions::Distribution;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use statrs::distribution::{ContinuousCDF, Normal};

/// Zero-day probability for a day drawn at the configured level,
/// `Φ(0; level, std)`.
///
/// # Errors
/// - [`SimError::InvalidParameter`] if `std` is not finite and positive or
///   `level` is not finite.
pub fn zero_probability(level: f64, std: f64) -> SimResult<f64> {
    let normal = daily_normal(level, std)?;
    Ok(normal.cdf(0.0))
}

/// Simulate N-day totals under the two-stage zero-censored normal model.
///
/// Parameters
/// ----------
/// - `location`: `&str`
///   Label carried into the result.
/// - `level`: `f64`
///   Daily production level (mean of the level distribution).
/// - `std`: `f64`
///   Daily standard deviation; finite and strictly positive. Used both
///   for the level draw and for the zeroing probability `Φ(0; x, std)`.
/// - `opts`: `&SimOptions`
///   Validated horizon, sample count, seed, workers, and optional
///   cancellation flag.
///
/// Returns
/// -------
/// `SimResult<SimulationResult>`
///   One total per Monte-Carlo sample. Totals can be negative when a
///   below-zero drawn level survives the zeroing stage.
///
/// Errors
/// ------
/// - [`SimError::InvalidParameter`] for an invalid `level`/`std` pair.
/// - [`SimError::Cancelled`] if the cancellation flag was set mid-run.
pub fn simulate_censored_totals(
    location: &str, level: f64, std: f64, opts: &SimOptions,
) -> SimResult<SimulationResult> {
    let model = CensoredNormalModel {
        daily: daily_normal(level, std)?,
        standard: daily_normal(0.0, 1.0)?,
        std,
    };
    run_parallel(&model, opts, location)
}

fn daily_normal(level: f64, std: f64) -> SimResult<Normal> {
    Normal::new(level, std).map_err(|_| SimError::InvalidParameter {
        name: "std",
        value: std,
        reason: "Censored model requires a finite level and positive std.",
    })
}

struct CensoredNormalModel {
    daily: Normal,
    standard: Normal,
    std: f64,
}

impl DayModel for CensoredNormalModel {
    fn total(&self, rng: &mut ChaCha8Rng, scratch: &mut Scratch) -> f64 {
        let mut total = 0.0;
        for _ in 0..scratch.days() {
            let level = self.daily.sample(rng);
            let zero_prob = self.standard.cdf(-level / self.std);
            let u = rng.gen::<f64>();
            if u >= zero_prob {
                total += level;
            }
        }
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - `zero_probability` at symmetric and far-from-zero levels.
    // - The two-stage mean at a symmetric level against its closed form.
    // - Survival of negative kept levels and occurrence of zero days.
    // - Determinism for a fixed (seed, workers) pair.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify the zero-day probability at pinned points.
    //
    // Given
    // -----
    // - Level 0 with any std (symmetric), and level 100 with std 10
    //   (10 sigma above zero).
    //
    // Expect
    // ------
    // - 0.5 exactly for the symmetric case; essentially 0 for the distant
    //   one.
    fn zero_probability_at_pinned_points() {
        assert_relative_eq!(zero_probability(0.0, 5.0).unwrap(), 0.5, epsilon = 1e-12);
        assert!(zero_probability(100.0, 10.0).unwrap() < 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Verify the two-stage daily mean at a symmetric level against its
    // closed form: for level 0, E[Y] = E[X·Φ(X/σ)] = σ / (2√π), which
    // differs from the σ/√(2π) mean of flooring draws at zero.
    //
    // Given
    // -----
    // - Level 0, std 10, 1-day horizon, 400_000 samples: expected mean
    //   10 / (2√π) ≈ 2.8209.
    //
    // Expect
    // ------
    // - Sample mean within 5% of σ / (2√π).
    fn two_stage_mean_matches_closed_form() {
        let opts = SimOptions::new(1, Some(400_000), 11, 4).unwrap();

        let result = simulate_censored_totals("site", 0.0, 10.0, &opts).unwrap();

        let expected = 10.0 / (2.0 * PI.sqrt());
        assert_relative_eq!(result.mean(), expected, max_relative = 0.05);
    }

    #[test]
    // Purpose
    // -------
    // Verify both branches of the zeroing stage: zero days occur, and a
    // negative drawn level that survives the stage stays negative.
    //
    // Given
    // -----
    // - Level 0, std 10 (half the levels negative, zero probability 0.5
    //   on average), 1-day horizon, 2_000 samples.
    //
    // Expect
    // ------
    // - Some totals exactly 0, some strictly negative, some strictly
    //   positive.
    fn zeroing_stage_keeps_negative_levels() {
        let opts = SimOptions::new(1, Some(2_000), 3, 2).unwrap();

        let result = simulate_censored_totals("site", 0.0, 10.0, &opts).unwrap();

        assert!(result.totals.iter().any(|&t| t == 0.0));
        assert!(result.totals.iter().any(|&t| t < 0.0));
        assert!(result.totals.iter().any(|&t| t > 0.0));
    }

    #[test]
    // Purpose
    // -------
    // Verify determinism for a fixed (seed, workers) pair.
    //
    // Given
    // -----
    // - Two runs with identical options.
    //
    // Expect
    // ------
    // - Identical totals arrays.
    fn censored_runs_are_deterministic() {
        let opts = SimOptions::new(5, Some(1_000), 42, 3).unwrap();

        let first = simulate_censored_totals("site", 50.0, 20.0, &opts).unwrap();
        let second = simulate_censored_totals("site", 50.0, 20.0, &opts).unwrap();

        assert_eq!(first.totals, second.totals);
    }
}
