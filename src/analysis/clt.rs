//! Normal overlay for comparing simulated totals against the CLT limit.
//!
//! Purpose
//! -------
//! Fit a normal reference curve to a sample of N-day totals so plots can
//! show how close (or, for Cauchy-tailed mixtures, how far) the empirical
//! distribution sits from its central-limit approximation.
//!
//! Key behaviors
//! -------------
//! - [`CltOverlay::from_samples`] matches the sample mean and unbiased
//!   standard deviation; a constant sample is rejected rather than
//!   producing a degenerate curve.
//! - `cdf`/`pdf` evaluate the fitted normal pointwise; [`CltOverlay::curve`]
//!   evaluates the density over a grid in one call for plotting next to a
//!   histogram.
//!
//! Testing notes
//! -------------
//! - Tests pin the fitted moments, symmetry of the cdf around the mean,
//!   and the rejection branches.

use crate::analysis::errors::{AnalysisError, AnalysisResult};
use ndarray::Array1;
use statrs::distribution::{Continuous, ContinuousCDF, Normal};

/// Normal reference curve matched to a sample's first two moments.
#[derive(Debug, Clone)]
pub struct CltOverlay {
    mean: f64,
    std: f64,
    normal: Normal,
}

impl CltOverlay {
    /// Fit the overlay to a sample.
    ///
    /// Parameters
    /// ----------
    /// - `samples`: `&Array1<f64>`
    ///   At least two finite elements with positive spread.
    ///
    /// Errors
    /// ------
    /// - [`AnalysisError::EmptySample`] for fewer than two elements.
    /// - [`AnalysisError::NonFiniteSample`] naming the first bad element.
    /// - [`AnalysisError::ZeroVariance`] for a constant sample.
    pub fn from_samples(samples: &Array1<f64>) -> AnalysisResult<Self> {
        if samples.len() < 2 {
            return Err(AnalysisError::EmptySample);
        }
        for (index, &value) in samples.iter().enumerate() {
            if !value.is_finite() {
                return Err(AnalysisError::NonFiniteSample { index, value });
            }
        }
        let n = samples.len() as f64;
        let mean = samples.sum() / n;
        let sq_dev_sum: f64 = samples.iter().map(|&v| (v - mean) * (v - mean)).sum();
        let std = (sq_dev_sum / (n - 1.0)).sqrt();
        if std == 0.0 {
            return Err(AnalysisError::ZeroVariance);
        }
        // Parameters are finite and positive here, so construction succeeds.
        let normal = Normal::new(mean, std).map_err(|_| AnalysisError::ZeroVariance)?;
        Ok(Self { mean, std, normal })
    }

    /// Fitted mean.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Fitted (unbiased) standard deviation.
    pub fn std(&self) -> f64 {
        self.std
    }

    /// Normal cdf at `x`.
    pub fn cdf(&self, x: f64) -> f64 {
        self.normal.cdf(x)
    }

    /// Normal density at `x`.
    pub fn pdf(&self, x: f64) -> f64 {
        self.normal.pdf(x)
    }

    /// Density evaluated over a grid, for plotting against a histogram.
    pub fn curve(&self, grid: &Array1<f64>) -> Array1<f64> {
        grid.mapv(|x| self.normal.pdf(x))
    }
}
