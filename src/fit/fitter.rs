//! Per-segment estimators and profile assembly.
//!
//! Purpose
//! -------
//! Turn a [`SegmentSet`](crate::segmentation::segmenter::SegmentSet) into a
//! simulatable [`SegmentProfile`](crate::fit::profile::SegmentProfile):
//! empirical bounds for the mid-regime uniform, and moment or
//! maximum-likelihood estimates for the tail.
//!
//! Key behaviors
//! -------------
//! - [`fit_uniform_bounds`] takes the sample minimum and maximum as the
//!   uniform support; a single observation yields the legal degenerate
//!   `lower == upper` case.
//! - [`fit_normal`] returns the sample mean and the unbiased (n − 1)
//!   standard deviation.
//! - [`fit_profile`] dispatches the tail fit on
//!   [`TailDistribution`](crate::fit::profile::TailDistribution) and
//!   assembles a validated profile. A regime that is empty **and** has zero
//!   share gets inert placeholder parameters; an empty regime with positive
//!   share is impossible by construction of the segmenter.
//!
//! Invariants & assumptions
//! ------------------------
//! - Segment values are finite and non-negative (guaranteed upstream by
//!   `ProductionTable`).
//! - Profile shares are copied verbatim from the segment set; the fitter
//!   never renormalizes.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the bound and moment estimators against hand
//!   computations, the empty-regime placeholder path, and error branches.

use crate::fit::{
    cauchy::fit_cauchy,
    errors::{FitError, FitResult},
    profile::{SegmentProfile, TailDistribution},
};
use crate::segmentation::segmenter::SegmentSet;
use ndarray::Array1;

/// Minimum observations required for a normal tail fit.
pub const MIN_NORMAL_OBS: usize = 2;

/// Estimate uniform support bounds as the sample minimum and maximum.
///
/// Parameters
/// ----------
/// - `values`: `&Array1<f64>`
///   Mid-regime observations; at least one.
///
/// Returns
/// -------
/// `FitResult<(f64, f64)>`
///   `(min, max)`; equal for a single observation.
///
/// Errors
/// ------
/// - [`FitError::InsufficientData`] if the sample is empty.
pub fn fit_uniform_bounds(values: &Array1<f64>) -> FitResult<(f64, f64)> {
    if values.is_empty() {
        return Err(FitError::InsufficientData { segment: "mid", needed: 1, found: 0 });
    }
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in values.iter() {
        min = min.min(v);
        max = max.max(v);
    }
    Ok((min, max))
}

/// Estimate normal (mean, standard deviation) by the method of moments.
///
/// Parameters
/// ----------
/// - `values`: `&Array1<f64>`
///   Tail observations; at least [`MIN_NORMAL_OBS`] with at least two
///   distinct values.
///
/// Returns
/// -------
/// `FitResult<(f64, f64)>`
///   `(mean, sample standard deviation)` with the unbiased n − 1
///   denominator; `std > 0`.
///
/// Errors
/// ------
/// - [`FitError::InsufficientData`] for undersized samples.
/// - [`FitError::InvalidParameter`] for a constant sample (zero standard
///   deviation is not simulatable).
pub fn fit_normal(values: &Array1<f64>) -> FitResult<(f64, f64)> {
    if values.len() < MIN_NORMAL_OBS {
        return Err(FitError::InsufficientData {
            segment: "tail",
            needed: MIN_NORMAL_OBS,
            found: values.len(),
        });
    }
    let n = values.len() as f64;
    let mean = values.sum() / n;
    let sq_dev_sum: f64 = values.iter().map(|&v| (v - mean) * (v - mean)).sum();
    let std = (sq_dev_sum / (n - 1.0)).sqrt();
    if std == 0.0 {
        return Err(FitError::InvalidParameter {
            name: "tail_scale",
            value: 0.0,
            reason: "A constant sample carries no scale information.",
        });
    }
    Ok((mean, std))
}

/// Fit a full mixture profile from a segmented location history.
///
/// Parameters
/// ----------
/// - `set`: `&SegmentSet`
///   Output of [`segment`](crate::segmentation::segmenter::segment).
/// - `tail`: [`TailDistribution`]
///   Parametric family for the high-production regime.
///
/// Returns
/// -------
/// `FitResult<SegmentProfile>`
///   A validated profile carrying the set's shares, the fitted uniform
///   bounds, and the fitted tail parameters.
///
/// Errors
/// ------
/// - [`FitError::InsufficientData`] if a regime with positive share has
///   too few observations for its estimator.
/// - [`FitError::InvalidParameter`] for constant tail samples.
/// - [`FitError::Optimization`] if a Cauchy tail fit fails to converge.
///
/// Notes
/// -----
/// - A regime with zero share never contributes draws, so its parameters
///   are placeholders: `(0, 0)` bounds for the mid regime, `(0, 1)` for
///   the tail. They are carried only to keep the profile well-formed.
pub fn fit_profile(set: &SegmentSet, tail: TailDistribution) -> FitResult<SegmentProfile> {
    let (uniform_lower, uniform_upper) = if set.segment_2.is_empty() && set.shares[1] == 0.0 {
        (0.0, 0.0)
    } else {
        fit_uniform_bounds(&set.segment_2)?
    };

    let (tail_location, tail_scale) = if set.segment_3.is_empty() && set.shares[2] == 0.0 {
        (0.0, 1.0)
    } else {
        match tail {
            TailDistribution::Normal => fit_normal(&set.segment_3)?,
            TailDistribution::Cauchy => fit_cauchy(&set.segment_3)?,
        }
    };

    SegmentProfile::new(
        set.location.clone(),
        (set.thresholds.lower(), set.thresholds.upper()),
        set.shares,
        uniform_lower,
        uniform_upper,
        tail,
        tail_location,
        tail_scale,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segmentation::{
        records::{ProductionRecord, ProductionTable},
        segmenter::segment,
        thresholds::Thresholds,
    };
    use approx::assert_relative_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Bound and moment estimators against hand computations.
    // - End-to-end profile assembly from a segmented table.
    // - The zero-share placeholder path and error branches.
    //
    // They intentionally DO NOT cover:
    // - Cauchy MLE accuracy (covered in `cauchy`).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that uniform bounds are the sample extrema.
    //
    // Given
    // -----
    // - The sample [10, 20, 30].
    //
    // Expect
    // ------
    // - Bounds (10, 30).
    fn uniform_bounds_are_sample_extrema() {
        let values = array![10.0, 20.0, 30.0];

        let (lower, upper) = fit_uniform_bounds(&values).unwrap();

        assert_eq!(lower, 10.0);
        assert_eq!(upper, 30.0);
    }

    #[test]
    // Purpose
    // -------
    // Verify the normal moment estimates against hand computations.
    //
    // Given
    // -----
    // - The sample [2, 4, 6]: mean 4, sample variance ((−2)² + 0 + 2²)/2 = 4.
    //
    // Expect
    // ------
    // - (mean, std) == (4, 2).
    fn normal_fit_matches_hand_computation() {
        let values = array![2.0, 4.0, 6.0];

        let (mean, std) = fit_normal(&values).unwrap();

        assert_relative_eq!(mean, 4.0, epsilon = 1e-12);
        assert_relative_eq!(std, 2.0, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Verify end-to-end assembly: segment a small table, fit a normal-tail
    // profile, and check that shares and parameters line up.
    //
    // Given
    // -----
    // - Six records for one location spanning all three regimes with
    //   thresholds (1.0, 100.0).
    //
    // Expect
    // ------
    // - Shares [1/6, 3/6, 2/6]; uniform bounds from the mid regime's
    //   extrema; a finite positive tail scale.
    fn fit_profile_assembles_from_segments() {
        let table = ProductionTable::new(vec![
            ProductionRecord::new("a", 0, 0.0),
            ProductionRecord::new("a", 1, 10.0),
            ProductionRecord::new("a", 2, 20.0),
            ProductionRecord::new("a", 3, 30.0),
            ProductionRecord::new("a", 4, 140.0),
            ProductionRecord::new("a", 5, 160.0),
        ])
        .unwrap();
        let set = segment(&table, "a", Thresholds::new(1.0, 100.0).unwrap()).unwrap();

        let profile = fit_profile(&set, TailDistribution::Normal).unwrap();

        assert_relative_eq!(profile.shares[0], 1.0 / 6.0, epsilon = 1e-12);
        assert_relative_eq!(profile.shares[1], 3.0 / 6.0, epsilon = 1e-12);
        assert_relative_eq!(profile.shares[2], 2.0 / 6.0, epsilon = 1e-12);
        assert_eq!(profile.uniform_lower, 10.0);
        assert_eq!(profile.uniform_upper, 30.0);
        assert_relative_eq!(profile.tail_location, 150.0, epsilon = 1e-12);
        assert!(profile.tail_scale > 0.0);
    }

    #[test]
    // Purpose
    // -------
    // Verify the zero-share placeholder path: a location with no tail days
    // still yields a valid profile with inert tail parameters.
    //
    // Given
    // -----
    // - Records only in regimes 1 and 2.
    //
    // Expect
    // ------
    // - `Ok(profile)` with `shares[2] == 0`, tail parameters `(0, 1)`.
    fn fit_profile_tolerates_empty_zero_share_tail() {
        let table = ProductionTable::new(vec![
            ProductionRecord::new("a", 0, 0.0),
            ProductionRecord::new("a", 1, 10.0),
            ProductionRecord::new("a", 2, 20.0),
        ])
        .unwrap();
        let set = segment(&table, "a", Thresholds::new(1.0, 100.0).unwrap()).unwrap();

        let profile = fit_profile(&set, TailDistribution::Normal).unwrap();

        assert_eq!(profile.shares[2], 0.0);
        assert_eq!(profile.tail_location, 0.0);
        assert_eq!(profile.tail_scale, 1.0);
    }

    #[test]
    // Purpose
    // -------
    // Verify that a tail regime with positive share but too few
    // observations fails loudly instead of producing placeholders.
    //
    // Given
    // -----
    // - A single tail record (share 1/2 > 0).
    //
    // Expect
    // ------
    // - `Err(FitError::InsufficientData { segment: "tail", .. })`.
    fn fit_profile_rejects_undersized_positive_share_tail() {
        let table = ProductionTable::new(vec![
            ProductionRecord::new("a", 0, 10.0),
            ProductionRecord::new("a", 1, 140.0),
        ])
        .unwrap();
        let set = segment(&table, "a", Thresholds::new(1.0, 100.0).unwrap()).unwrap();

        let result = fit_profile(&set, TailDistribution::Normal);

        assert!(matches!(
            result,
            Err(FitError::InsufficientData { segment: "tail", .. })
        ));
    }
}
