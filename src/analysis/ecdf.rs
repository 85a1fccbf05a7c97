//! Empirical cumulative distribution function over simulated totals.
//!
//! Purpose
//! -------
//! Summarize a Monte-Carlo sample as a right-continuous step function
//! `F(x) = #{samples <= x} / n`, suitable both for pointwise evaluation
//! and for plotting one step per distinct value.
//!
//! Key behaviors
//! -------------
//! - [`Ecdf::from_samples`] validates finiteness and sorts once; all later
//!   queries are reads.
//! - [`Ecdf::eval`] answers pointwise queries in `O(log n)` by binary
//!   search.
//! - [`Ecdf::points`] yields `(value, F(value))` once per **distinct**
//!   value, using the highest rank of each tie group, so tied samples
//!   produce a single step of the full combined height. The iterator is
//!   restartable; calling `points` again yields a fresh pass.
//!
//! Invariants & assumptions
//! ------------------------
//! - `F` is non-decreasing, right-continuous, `F(x) = 0` below the
//!   minimum, and `F(max) = 1` exactly.
//!
//! Testing notes
//! -------------
//! - Tests pin `eval` at, between, and outside sample points, and the
//!   tie-collapsing behavior of `points`.

use crate::analysis::errors::{AnalysisError, AnalysisResult};
use ndarray::Array1;

/// Empirical CDF of a finite, non-empty sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Ecdf {
    // Ascending; ties retained so ranks stay exact.
    sorted: Vec<f64>,
}

impl Ecdf {
    /// Build an ECDF from a sample.
    ///
    /// Parameters
    /// ----------
    /// - `samples`: `&Array1<f64>`
    ///   Non-empty; every element finite.
    ///
    /// Errors
    /// ------
    /// - [`AnalysisError::EmptySample`] for an empty input.
    /// - [`AnalysisError::NonFiniteSample`] naming the first bad element.
    pub fn from_samples(samples: &Array1<f64>) -> AnalysisResult<Self> {
        if samples.is_empty() {
            return Err(AnalysisError::EmptySample);
        }
        for (index, &value) in samples.iter().enumerate() {
            if !value.is_finite() {
                return Err(AnalysisError::NonFiniteSample { index, value });
            }
        }
        let mut sorted: Vec<f64> = samples.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));
        Ok(Self { sorted })
    }

    /// Number of underlying samples (ties included).
    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    /// Always `false`; construction rejects empty samples.
    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    /// Evaluate `F(x) = #{samples <= x} / n`.
    pub fn eval(&self, x: f64) -> f64 {
        let below_or_equal = self.sorted.partition_point(|&v| v <= x);
        below_or_equal as f64 / self.sorted.len() as f64
    }

    /// Iterate the step points `(value, F(value))`, one per distinct value.
    ///
    /// Tied samples collapse into a single point carrying the tie group's
    /// highest rank, so consecutive heights strictly increase and the last
    /// point is `(max, 1.0)`.
    pub fn points(&self) -> EcdfPoints<'_> {
        EcdfPoints { sorted: &self.sorted, pos: 0 }
    }
}

/// Restartable iterator over ECDF step points; see [`Ecdf::points`].
#[derive(Debug, Clone)]
pub struct EcdfPoints<'a> {
    sorted: &'a [f64],
    pos: usize,
}

impl Iterator for EcdfPoints<'_> {
    type Item = (f64, f64);

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.sorted.len() {
            return None;
        }
        let value = self.sorted[self.pos];
        // Advance past the whole tie group; its highest rank is the step height.
        let mut end = self.pos + 1;
        while end < self.sorted.len() && self.sorted[end] == value {
            end += 1;
        }
        self.pos = end;
        Some((value, end as f64 / self.sorted.len() as f64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Pointwise evaluation at, between, and outside sample points.
    // - Tie collapsing in the step-point iterator.
    // - Restartability of the iterator.
    // - Construction error branches.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify pointwise evaluation of the step function.
    //
    // Given
    // -----
    // - The sample [1, 2, 3, 4].
    //
    // Expect
    // ------
    // - F(0.5) = 0, F(1) = 0.25, F(2.5) = 0.5, F(4) = 1, F(10) = 1.
    fn eval_matches_step_function() {
        let ecdf = Ecdf::from_samples(&array![4.0, 2.0, 1.0, 3.0]).unwrap();

        assert_relative_eq!(ecdf.eval(0.5), 0.0, epsilon = 1e-12);
        assert_relative_eq!(ecdf.eval(1.0), 0.25, epsilon = 1e-12);
        assert_relative_eq!(ecdf.eval(2.5), 0.5, epsilon = 1e-12);
        assert_relative_eq!(ecdf.eval(4.0), 1.0, epsilon = 1e-12);
        assert_relative_eq!(ecdf.eval(10.0), 1.0, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Verify that tied samples collapse into one step of combined height.
    //
    // Given
    // -----
    // - The sample [1, 2, 2, 3].
    //
    // Expect
    // ------
    // - Points [(1, 0.25), (2, 0.75), (3, 1.0)].
    fn points_collapse_ties_to_highest_rank() {
        let ecdf = Ecdf::from_samples(&array![2.0, 1.0, 3.0, 2.0]).unwrap();

        let points: Vec<(f64, f64)> = ecdf.points().collect();

        assert_eq!(points, vec![(1.0, 0.25), (2.0, 0.75), (3.0, 1.0)]);
    }

    #[test]
    // Purpose
    // -------
    // Verify that `points` is restartable: a second call yields the same
    // full pass.
    //
    // Given
    // -----
    // - A three-element sample iterated twice.
    //
    // Expect
    // ------
    // - Both passes produce identical point sequences ending at height 1.
    fn points_is_restartable() {
        let ecdf = Ecdf::from_samples(&array![5.0, 7.0, 6.0]).unwrap();

        let first: Vec<(f64, f64)> = ecdf.points().collect();
        let second: Vec<(f64, f64)> = ecdf.points().collect();

        assert_eq!(first, second);
        assert_eq!(first.last(), Some(&(7.0, 1.0)));
    }

    #[test]
    // Purpose
    // -------
    // Verify construction rejections.
    //
    // Given
    // -----
    // - An empty sample and one containing NaN.
    //
    // Expect
    // ------
    // - `EmptySample` and `NonFiniteSample` respectively.
    fn from_samples_rejects_bad_input() {
        let empty: Array1<f64> = Array1::zeros(0);
        assert_eq!(Ecdf::from_samples(&empty).unwrap_err(), AnalysisError::EmptySample);

        let result = Ecdf::from_samples(&array![1.0, f64::NAN]);
        assert!(matches!(result, Err(AnalysisError::NonFiniteSample { index: 1, .. })));
    }
}
