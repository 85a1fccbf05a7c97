//! Maximum-likelihood estimation of Cauchy tail parameters.
//!
//! Purpose
//! -------
//! Fit a Cauchy(location, scale) distribution to a tail segment by direct
//! likelihood maximization. The Cauchy has no moment-based estimator (its
//! mean and variance are undefined), so the fit runs L-BFGS over the
//! unconstrained parameterization `θ = [x0, ln γ]` with analytic
//! gradients.
//!
//! Key behaviors
//! -------------
//! - [`CauchyLogLik`] implements the crate's
//!   [`LogLikelihood`](crate::optimization::mle::LogLikelihood) trait:
//!   `ℓ(θ) = Σᵢ [ln γ − ln π − ln(γ² + (xᵢ − x0)²)]` with the matching
//!   closed-form gradient.
//! - [`fit_cauchy`] seeds the optimizer at the sample median and half the
//!   interquartile range (robust analogues of location and scale) and runs
//!   with the crate's default solver options, so the estimate is
//!   deterministic for a given sample.
//!
//! Invariants & assumptions
//! ------------------------
//! - The scale lives in log space inside the optimizer; `γ = exp(θ[1])` is
//!   strictly positive by construction, so no barrier or clamping is
//!   needed.
//! - At least two distinct observations are required; a constant sample
//!   has no interior scale optimum.
//!
//! Downstream usage
//! ----------------
//! - [`fit_profile`](crate::fit::fitter::fit_profile) calls [`fit_cauchy`]
//!   when the tail family is [`TailDistribution::Cauchy`](crate::fit::profile::TailDistribution).
//!
//! Testing notes
//! -------------
//! - Tests check the log-likelihood value and gradient against hand
//!   computations at a fixed θ, and recovery of known parameters from a
//!   synthetic Cauchy sample.

use crate::fit::errors::{FitError, FitResult};
use crate::optimization::{
    errors::{OptError, OptResult},
    mle::{maximize, Cost, Grad, LogLikelihood, MleOptions, Theta},
};
use ndarray::Array1;
use std::f64::consts::PI;

/// Minimum observations required for a Cauchy tail fit.
pub const MIN_CAUCHY_OBS: usize = 2;

/// Cauchy log-likelihood over `θ = [location, ln scale]`.
#[derive(Debug, Clone, Copy)]
pub struct CauchyLogLik;

impl LogLikelihood for CauchyLogLik {
    type Data = Array1<f64>;

    /// Evaluate `ℓ(θ) = Σᵢ [ln γ − ln π − ln(γ² + (xᵢ − x0)²)]`.
    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<Cost> {
        let x0 = theta[0];
        let gamma = theta[1].exp();
        let gamma_sq = gamma * gamma;
        let n = data.len() as f64;

        let mut log_kernel_sum = 0.0;
        for &x in data.iter() {
            let d = x - x0;
            log_kernel_sum += (gamma_sq + d * d).ln();
        }
        Ok(n * (theta[1] - PI.ln()) - log_kernel_sum)
    }

    /// Evaluate the analytic gradient of `ℓ` with respect to `[x0, ln γ]`:
    ///
    /// - `∂ℓ/∂x0 = Σᵢ 2(xᵢ − x0) / (γ² + (xᵢ − x0)²)`
    /// - `∂ℓ/∂(ln γ) = Σᵢ [1 − 2γ² / (γ² + (xᵢ − x0)²)]`
    fn grad(&self, theta: &Theta, data: &Self::Data) -> OptResult<Grad> {
        let x0 = theta[0];
        let gamma = theta[1].exp();
        let gamma_sq = gamma * gamma;

        let mut d_x0 = 0.0;
        let mut d_log_gamma = 0.0;
        for &x in data.iter() {
            let d = x - x0;
            let denom = gamma_sq + d * d;
            d_x0 += 2.0 * d / denom;
            d_log_gamma += 1.0 - 2.0 * gamma_sq / denom;
        }
        Ok(Array1::from_vec(vec![d_x0, d_log_gamma]))
    }

    /// Reject undersized or non-finite samples and malformed `θ`.
    fn check(&self, theta: &Theta, data: &Self::Data) -> OptResult<()> {
        if theta.len() != 2 {
            return Err(OptError::GradientDimMismatch { expected: 2, found: theta.len() });
        }
        for (index, &value) in theta.iter().enumerate() {
            if !value.is_finite() {
                return Err(OptError::InvalidThetaHat {
                    index,
                    value,
                    reason: "Initial parameters must be finite.",
                });
            }
        }
        for (index, &value) in data.iter().enumerate() {
            if !value.is_finite() {
                return Err(OptError::InvalidLogLikInput {
                    index,
                    value,
                    reason: "Observations must be finite.",
                });
            }
        }
        Ok(())
    }
}

/// Fit Cauchy (location, scale) to a sample by maximum likelihood, using
/// the crate's default solver options.
pub fn fit_cauchy(values: &Array1<f64>) -> FitResult<(f64, f64)> {
    fit_cauchy_with(values, &MleOptions::default())
}

/// Fit Cauchy (location, scale) to a sample by maximum likelihood.
///
/// Parameters
/// ----------
/// - `values`: `&Array1<f64>`
///   Tail observations; at least [`MIN_CAUCHY_OBS`] with at least two
///   distinct values.
/// - `opts`: `&MleOptions`
///   Solver configuration (tolerances, line search, L-BFGS memory).
///
/// Returns
/// -------
/// `FitResult<(f64, f64)>`
///   The `(location, scale)` maximum-likelihood estimate, `scale > 0`.
///
/// Errors
/// ------
/// - [`FitError::InsufficientData`] for undersized samples.
/// - [`FitError::InvalidParameter`] for a constant sample (no scale
///   information).
/// - [`FitError::Optimization`] if the solver fails or diverges.
///
/// Notes
/// -----
/// - Starts from `(median, IQR / 2)`; when the interquartile range is zero
///   but the sample is not constant, half the full range is used instead.
/// - Deterministic: a fixed sample always produces the same estimate.
pub fn fit_cauchy_with(values: &Array1<f64>, opts: &MleOptions) -> FitResult<(f64, f64)> {
    if values.len() < MIN_CAUCHY_OBS {
        return Err(FitError::InsufficientData {
            segment: "tail",
            needed: MIN_CAUCHY_OBS,
            found: values.len(),
        });
    }

    let mut sorted: Vec<f64> = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let range = sorted[sorted.len() - 1] - sorted[0];
    if range == 0.0 {
        return Err(FitError::InvalidParameter {
            name: "tail_scale",
            value: 0.0,
            reason: "A constant sample carries no scale information.",
        });
    }

    let median = quantile(&sorted, 0.5);
    let iqr = quantile(&sorted, 0.75) - quantile(&sorted, 0.25);
    let scale0 = if iqr > 0.0 { iqr / 2.0 } else { range / 2.0 };

    let theta0 = Array1::from_vec(vec![median, scale0.ln()]);
    let outcome = maximize(&CauchyLogLik, theta0, values, opts)?;

    Ok((outcome.theta_hat[0], outcome.theta_hat[1].exp()))
}

/// Linear-interpolation quantile of an ascending-sorted slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + frac * (sorted[hi] - sorted[lo])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use statrs::distribution::Cauchy;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Log-likelihood value and gradient against hand computations.
    // - Parameter recovery from a synthetic Cauchy sample.
    // - Rejection of undersized and constant samples.
    //
    // They intentionally DO NOT cover:
    // - Solver internals (covered in `optimization::mle`).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify the log-likelihood value at a standard-Cauchy parameter point
    // against a direct density computation.
    //
    // Given
    // -----
    // - Sample [0.0, 1.0], θ = [0, ln 1] (standard Cauchy).
    //
    // Expect
    // ------
    // - ℓ = ln f(0) + ln f(1) = ln(1/π) + ln(1/(2π)).
    fn value_matches_hand_computation() {
        let data = array![0.0, 1.0];
        let theta = array![0.0, 0.0_f64];

        let ll = CauchyLogLik.value(&theta, &data).unwrap();

        let expected = (1.0 / PI).ln() + (1.0 / (2.0 * PI)).ln();
        assert_relative_eq!(ll, expected, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Verify the analytic gradient against the closed-form sums.
    //
    // Given
    // -----
    // - Sample [0.0, 1.0], θ = [0, ln 1]: d = [0, 1], denom = [1, 2].
    //
    // Expect
    // ------
    // - ∂ℓ/∂x0 = 0 + 2·1/2 = 1.
    // - ∂ℓ/∂lnγ = (1 − 2) + (1 − 1) = −1.
    fn grad_matches_hand_computation() {
        let data = array![0.0, 1.0];
        let theta = array![0.0, 0.0_f64];

        let g = CauchyLogLik.grad(&theta, &data).unwrap();

        assert_relative_eq!(g[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(g[1], -1.0, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Verify that the MLE recovers known parameters from a large synthetic
    // Cauchy sample.
    //
    // Given
    // -----
    // - 20_000 draws from Cauchy(location = 150, scale = 20), fixed seed.
    //
    // Expect
    // ------
    // - Fitted location within 1.0 and scale within 1.0 of the truth.
    fn fit_recovers_known_parameters() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let dist = Cauchy::new(150.0, 20.0).unwrap();
        let sample: Array1<f64> =
            Array1::from_iter((0..20_000).map(|_| rand::Rng::sample(&mut rng, dist)));

        let (location, scale) = fit_cauchy(&sample).unwrap();

        assert_relative_eq!(location, 150.0, epsilon = 1.0);
        assert_relative_eq!(scale, 20.0, epsilon = 1.0);
    }

    #[test]
    // Purpose
    // -------
    // Verify rejection of samples the estimator cannot handle.
    //
    // Given
    // -----
    // - A single observation, and a constant five-element sample.
    //
    // Expect
    // ------
    // - `InsufficientData` and `InvalidParameter` respectively.
    fn fit_rejects_degenerate_samples() {
        let one = array![3.0];
        assert!(matches!(fit_cauchy(&one), Err(FitError::InsufficientData { .. })));

        let constant = array![5.0, 5.0, 5.0, 5.0, 5.0];
        assert!(matches!(fit_cauchy(&constant), Err(FitError::InvalidParameter { .. })));
    }
}
