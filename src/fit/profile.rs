//! Fitted per-location mixture profile.
//!
//! Purpose
//! -------
//! Define the serializable parameter bundle that fully describes one
//! location's three-regime mixture: empirical shares, uniform bounds for
//! the mid regime, and a parametric tail. A profile is the hand-off point
//! between estimation and simulation, and the unit that gets persisted
//! between runs.
//!
//! Key behaviors
//! -------------
//! - [`SegmentProfile::new`] validates the threshold pair (finite,
//!   non-negative, strictly increasing), shares (each in `[0, 1]`, summing
//!   to one within `1e-9`), uniform bounds (finite, ordered, degenerate
//!   allowed), and tail parameters (finite location, positive scale).
//! - [`TailDistribution`] parses case-insensitively from `"Normal"` /
//!   `"Cauchy"` strings.
//! - Profiles serialize through a flat wire record whose field names are
//!   fixed (`threshold_1`, `share_1..share_3`, `lower_bound_s2`,
//!   `param1_s3`, `distribution_s3`, …) so persisted profiles stay
//!   readable across releases regardless of in-memory naming; the
//!   constructor re-validates on deserialization.
//!
//! Invariants & assumptions
//! ------------------------
//! - A profile constructed via [`SegmentProfile::new`] is always
//!   simulatable: the simulator performs no re-validation of shares or
//!   parameters beyond its own run options.
//! - `uniform_lower == uniform_upper` is a legal degenerate case; the
//!   simulator treats it as a point mass at that value.
//!
//! Conventions
//! -----------
//! - `tail_location`/`tail_scale` are (mean, standard deviation) for a
//!   normal tail and (location, scale) for a Cauchy tail.
//!
//! Testing notes
//! -------------
//! - Unit tests cover constructor rejection branches, tail-name parsing,
//!   and a serde round-trip.

use crate::fit::errors::{FitError, FitResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Parametric family used for the high-production tail regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TailDistribution {
    /// Gaussian tail, parameterized by (mean, standard deviation).
    Normal,
    /// Cauchy tail, parameterized by (location, scale).
    Cauchy,
}

impl FromStr for TailDistribution {
    type Err = FitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "normal" => Ok(TailDistribution::Normal),
            "cauchy" => Ok(TailDistribution::Cauchy),
            _ => Err(FitError::UnknownDistribution { name: s.to_string() }),
        }
    }
}

/// `SegmentProfile` — fitted mixture parameters for one location.
///
/// Purpose
/// -------
/// Carry everything the simulator needs to draw daily production values:
/// regime shares, uniform bounds for the mid regime, and the tail family
/// with its two parameters.
///
/// Fields
/// ------
/// - `location`: location the profile was fitted for.
/// - `threshold_lower` / `threshold_upper`: the regime boundaries the
///   profile was estimated under, carried for provenance.
/// - `shares`: `[share_1, share_2, share_3]` regime probabilities.
/// - `uniform_lower` / `uniform_upper`: mid-regime uniform bounds.
/// - `tail`: tail family tag.
/// - `tail_location` / `tail_scale`: tail parameters per [`TailDistribution`].
///
/// Invariants
/// ----------
/// - `0 <= threshold_lower < threshold_upper`, both finite.
/// - Shares each lie in `[0, 1]` and sum to one within `1e-9`.
/// - `uniform_lower <= uniform_upper`, both finite.
/// - `tail_scale > 0`, both tail parameters finite.
///
/// Serialization
/// -------------
/// - The wire form is a flat record layout (`threshold_1`,
///   `share_1..share_3`, `lower_bound_s2`, `param1_s3`, ...);
///   deserialization funnels through [`SegmentProfile::new`], so a stored
///   record that violates an invariant fails to load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "ProfileRecord", try_from = "ProfileRecord")]
pub struct SegmentProfile {
    /// Location the profile was fitted for.
    pub location: String,
    /// Lower regime boundary the profile was estimated under.
    pub threshold_lower: f64,
    /// Upper regime boundary the profile was estimated under.
    pub threshold_upper: f64,
    /// Regime probabilities, `[share_1, share_2, share_3]`.
    pub shares: [f64; 3],
    /// Lower bound of the mid-regime uniform.
    pub uniform_lower: f64,
    /// Upper bound of the mid-regime uniform.
    pub uniform_upper: f64,
    /// Tail family tag.
    pub tail: TailDistribution,
    /// Tail location parameter (mean for normal, location for Cauchy).
    pub tail_location: f64,
    /// Tail scale parameter (standard deviation for normal, scale for Cauchy).
    pub tail_scale: f64,
}

impl SegmentProfile {
    /// Construct a validated profile.
    ///
    /// Parameters
    /// ----------
    /// - `location`: `impl Into<String>`
    ///   Location label carried through to simulation output.
    /// - `thresholds`: `(f64, f64)`
    ///   The `(lower, upper)` regime boundaries the profile was estimated
    ///   under; finite, non-negative, strictly increasing.
    /// - `shares`: `[f64; 3]`
    ///   Regime probabilities; each in `[0, 1]`, summing to one within
    ///   `1e-9`.
    /// - `uniform_lower`, `uniform_upper`: `f64`
    ///   Mid-regime bounds; finite with `lower <= upper` (equality is the
    ///   degenerate point-mass case).
    /// - `tail`: [`TailDistribution`]
    /// - `tail_location`, `tail_scale`: `f64`
    ///   Tail parameters; location finite, scale finite and strictly
    ///   positive.
    ///
    /// Returns
    /// -------
    /// `FitResult<SegmentProfile>`
    ///
    /// Errors
    /// ------
    /// - [`FitError::InvalidParameter`] naming the first offending field.
    pub fn new(
        location: impl Into<String>, thresholds: (f64, f64), shares: [f64; 3],
        uniform_lower: f64, uniform_upper: f64, tail: TailDistribution, tail_location: f64,
        tail_scale: f64,
    ) -> FitResult<Self> {
        let (threshold_lower, threshold_upper) = thresholds;
        if !threshold_lower.is_finite()
            || !threshold_upper.is_finite()
            || threshold_lower < 0.0
            || threshold_lower >= threshold_upper
        {
            return Err(FitError::InvalidParameter {
                name: "thresholds",
                value: threshold_upper,
                reason: "Thresholds must be finite, non-negative, and strictly increasing.",
            });
        }
        for &share in &shares {
            if !share.is_finite() || !(0.0..=1.0).contains(&share) {
                return Err(FitError::InvalidParameter {
                    name: "share",
                    value: share,
                    reason: "Each regime share must lie in [0, 1].",
                });
            }
        }
        let share_sum: f64 = shares.iter().sum();
        if (share_sum - 1.0).abs() > 1e-9 {
            return Err(FitError::InvalidParameter {
                name: "share_sum",
                value: share_sum,
                reason: "Regime shares must sum to one.",
            });
        }
        if !uniform_lower.is_finite() || !uniform_upper.is_finite() || uniform_lower > uniform_upper
        {
            return Err(FitError::InvalidParameter {
                name: "uniform_bounds",
                value: uniform_upper,
                reason: "Uniform bounds must be finite with lower <= upper.",
            });
        }
        if !tail_location.is_finite() {
            return Err(FitError::InvalidParameter {
                name: "tail_location",
                value: tail_location,
                reason: "Tail location must be finite.",
            });
        }
        if !tail_scale.is_finite() || tail_scale <= 0.0 {
            return Err(FitError::InvalidParameter {
                name: "tail_scale",
                value: tail_scale,
                reason: "Tail scale must be finite and strictly positive.",
            });
        }
        Ok(Self {
            location: location.into(),
            threshold_lower,
            threshold_upper,
            shares,
            uniform_lower,
            uniform_upper,
            tail,
            tail_location,
            tail_scale,
        })
    }
}

/// Flat wire layout for a persisted profile. Field names are the storage
/// contract and must not change with in-memory renames.
#[derive(Serialize, Deserialize)]
struct ProfileRecord {
    location: String,
    threshold_1: f64,
    threshold_2: f64,
    share_1: f64,
    share_2: f64,
    share_3: f64,
    lower_bound_s2: f64,
    upper_bound_s2: f64,
    param1_s3: f64,
    param2_s3: f64,
    distribution_s3: TailDistribution,
}

impl From<SegmentProfile> for ProfileRecord {
    fn from(profile: SegmentProfile) -> Self {
        ProfileRecord {
            location: profile.location,
            threshold_1: profile.threshold_lower,
            threshold_2: profile.threshold_upper,
            share_1: profile.shares[0],
            share_2: profile.shares[1],
            share_3: profile.shares[2],
            lower_bound_s2: profile.uniform_lower,
            upper_bound_s2: profile.uniform_upper,
            param1_s3: profile.tail_location,
            param2_s3: profile.tail_scale,
            distribution_s3: profile.tail,
        }
    }
}

impl TryFrom<ProfileRecord> for SegmentProfile {
    type Error = FitError;

    // Stored records re-enter through the validated constructor, so a
    // hand-edited or corrupted record fails to load.
    fn try_from(record: ProfileRecord) -> Result<Self, Self::Error> {
        SegmentProfile::new(
            record.location,
            (record.threshold_1, record.threshold_2),
            [record.share_1, record.share_2, record.share_3],
            record.lower_bound_s2,
            record.upper_bound_s2,
            record.distribution_s3,
            record.param1_s3,
            record.param2_s3,
        )
    }
}
