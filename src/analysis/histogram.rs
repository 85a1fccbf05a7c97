//! Equal-width histogram of simulated totals.
//!
//! Purpose
//! -------
//! Bin a Monte-Carlo sample for plotting. The bin-count heuristic scales
//! with the spread of the totals and shrinks with the horizon, matching
//! how the totals' range grows with `√n_days`.
//!
//! Key behaviors
//! -------------
//! - [`suggested_bin_count`] returns `max(150, round(range / √n_days))`,
//!   so short horizons with wide tails get finer resolution while no plot
//!   drops below 150 bins.
//! - [`Histogram::new`] bins into `bin_count` equal-width bins spanning
//!   `[min, max]`; the top edge is inclusive so the maximum lands in the
//!   last bin.
//! - A constant sample widens its single-point support by one unit so the
//!   histogram stays well-formed.
//!
//! Testing notes
//! -------------
//! - Tests pin the heuristic at a few points, count conservation, and
//!   boundary placement of the maximum.

use crate::analysis::errors::{AnalysisError, AnalysisResult};
use ndarray::Array1;

/// Minimum bin count used by [`suggested_bin_count`].
pub const MIN_BIN_COUNT: usize = 150;

/// Heuristic bin count for totals spanning `range` over an `n_days`
/// horizon: `max(150, round(range / √n_days))`.
pub fn suggested_bin_count(range: f64, n_days: usize) -> usize {
    if !range.is_finite() || range <= 0.0 || n_days == 0 {
        return MIN_BIN_COUNT;
    }
    let scaled = (range / (n_days as f64).sqrt()).round() as usize;
    scaled.max(MIN_BIN_COUNT)
}

/// `Histogram` — equal-width bin edges and occupancy counts.
///
/// Fields
/// ------
/// - `edges`: `bin_count + 1` ascending bin edges spanning the sample.
/// - `counts`: occupancy per bin; sums to the sample size.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub edges: Array1<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bin a sample into `bin_count` equal-width bins.
    ///
    /// Parameters
    /// ----------
    /// - `samples`: `&Array1<f64>`
    ///   Non-empty; every element finite.
    /// - `bin_count`: `usize`
    ///   At least one.
    ///
    /// Errors
    /// ------
    /// - [`AnalysisError::EmptySample`] / [`AnalysisError::NonFiniteSample`]
    ///   for bad samples.
    /// - [`AnalysisError::InvalidBinCount`] for a zero bin count.
    pub fn new(samples: &Array1<f64>, bin_count: usize) -> AnalysisResult<Self> {
        if samples.is_empty() {
            return Err(AnalysisError::EmptySample);
        }
        if bin_count == 0 {
            return Err(AnalysisError::InvalidBinCount {
                count: bin_count,
                reason: "A histogram needs at least one bin.",
            });
        }
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for (index, &value) in samples.iter().enumerate() {
            if !value.is_finite() {
                return Err(AnalysisError::NonFiniteSample { index, value });
            }
            min = min.min(value);
            max = max.max(value);
        }
        // Constant sample: widen the support so bins have positive width.
        let max = if max > min { max } else { min + 1.0 };
        let width = (max - min) / bin_count as f64;

        let edges =
            Array1::from_iter((0..=bin_count).map(|i| min + width * i as f64));
        let mut counts = vec![0_usize; bin_count];
        for &value in samples.iter() {
            let raw = ((value - min) / width) as usize;
            // The sample maximum belongs to the last (inclusive-top) bin.
            counts[raw.min(bin_count - 1)] += 1;
        }
        Ok(Self { edges, counts })
    }

    /// Number of bins.
    pub fn bin_count(&self) -> usize {
        self.counts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The bin-count heuristic at and above its floor.
    // - Count conservation and boundary placement of the maximum.
    // - Construction error branches.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify the heuristic's floor and scaling branches.
    //
    // Given
    // -----
    // - A narrow range (floor applies) and a wide range over 4 days.
    //
    // Expect
    // ------
    // - 150 for the narrow case; round(2000 / 2) = 1000 for the wide one.
    fn suggested_bin_count_floors_and_scales() {
        assert_eq!(suggested_bin_count(10.0, 1), 150);
        assert_eq!(suggested_bin_count(2000.0, 4), 1000);
    }

    #[test]
    // Purpose
    // -------
    // Verify count conservation and that the maximum lands in the last bin.
    //
    // Given
    // -----
    // - The sample [0, 1, 2, 3, 4] with 4 bins over [0, 4].
    //
    // Expect
    // ------
    // - Counts sum to 5; the last bin holds both 3 and 4.
    fn new_conserves_counts_and_places_maximum() {
        let samples = array![0.0, 1.0, 2.0, 3.0, 4.0];

        let hist = Histogram::new(&samples, 4).unwrap();

        assert_eq!(hist.bin_count(), 4);
        assert_eq!(hist.counts.iter().sum::<usize>(), 5);
        assert_eq!(hist.counts, vec![1, 1, 1, 2]);
        assert_eq!(hist.edges.len(), 5);
    }

    #[test]
    // Purpose
    // -------
    // Verify that a constant sample still produces a well-formed histogram.
    //
    // Given
    // -----
    // - Three copies of 7.0 with 2 bins.
    //
    // Expect
    // ------
    // - All three land in the first bin; edges span [7, 8].
    fn new_handles_constant_sample() {
        let samples = array![7.0, 7.0, 7.0];

        let hist = Histogram::new(&samples, 2).unwrap();

        assert_eq!(hist.counts, vec![3, 0]);
        assert_eq!(hist.edges[0], 7.0);
        assert_eq!(hist.edges[2], 8.0);
    }

    #[test]
    // Purpose
    // -------
    // Verify construction rejections.
    //
    // Given
    // -----
    // - An empty sample and a zero bin count.
    //
    // Expect
    // ------
    // - `EmptySample` and `InvalidBinCount` respectively.
    fn new_rejects_bad_input() {
        let empty: Array1<f64> = Array1::zeros(0);
        assert_eq!(Histogram::new(&empty, 10).unwrap_err(), AnalysisError::EmptySample);

        let samples = array![1.0, 2.0];
        assert!(matches!(
            Histogram::new(&samples, 0),
            Err(AnalysisError::InvalidBinCount { .. })
        ));
    }
}
