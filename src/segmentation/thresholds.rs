//! Validated threshold pair for three-way regime partitioning.
//!
//! Purpose
//! -------
//! Centralize validation of the two production thresholds that define the
//! three regimes. Source implementations of this pipeline disagreed on
//! whether `lower < upper` was ever checked; here a violation is a hard
//! validation error, never silently degenerate segments.
//!
//! Key behaviors
//! -------------
//! - [`Thresholds::new`] enforces finiteness, non-negativity, and strict
//!   ordering at construction time.
//! - A constructed [`Thresholds`] is immutable; a changed threshold is a
//!   new value, mirroring how a changed threshold produces a new
//!   [`SegmentProfile`](crate::fit::profile::SegmentProfile).
//!
//! Testing notes
//! -------------
//! - Unit tests cover the happy path and each rejection branch.

use crate::segmentation::errors::{SegmentError, SegmentResult};

/// Validated pair of production thresholds, `0 <= lower < upper`.
///
/// The three regimes are the half-open intervals `[0, lower)`,
/// `[lower, upper)`, and `[upper, inf)` on the production axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    lower: f64,
    upper: f64,
}

impl Thresholds {
    /// Construct a validated threshold pair.
    ///
    /// # Rules
    /// - Both thresholds must be **finite**.
    /// - Both thresholds must be **non-negative** (production is).
    /// - `lower < upper` must hold **strictly**.
    ///
    /// # Errors
    /// Returns [`SegmentError::InvalidThreshold`] with the offending pair and
    /// a reason string when any rule is violated.
    pub fn new(lower: f64, upper: f64) -> SegmentResult<Self> {
        if !lower.is_finite() || !upper.is_finite() {
            return Err(SegmentError::InvalidThreshold {
                lower,
                upper,
                reason: "Thresholds must be finite.",
            });
        }
        if lower < 0.0 || upper < 0.0 {
            return Err(SegmentError::InvalidThreshold {
                lower,
                upper,
                reason: "Thresholds must be non-negative.",
            });
        }
        if lower >= upper {
            return Err(SegmentError::InvalidThreshold {
                lower,
                upper,
                reason: "Thresholds must be strictly increasing.",
            });
        }
        Ok(Thresholds { lower, upper })
    }

    /// The lower threshold (boundary between regimes 1 and 2).
    pub fn lower(&self) -> f64 {
        self.lower
    }

    /// The upper threshold (boundary between regimes 2 and 3).
    pub fn upper(&self) -> f64 {
        self.upper
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Successful construction for a strictly increasing pair.
    // - Each rejection branch: non-finite, negative, swapped/equal.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that a finite, non-negative, strictly increasing pair is
    // accepted and round-trips through the accessors.
    //
    // Given
    // -----
    // - `lower = 0.01`, `upper = 100.0`.
    //
    // Expect
    // ------
    // - `Thresholds::new` returns `Ok(..)` with matching accessors.
    fn new_accepts_strictly_increasing_pair() {
        let t = Thresholds::new(0.01, 100.0).unwrap();

        assert_eq!(t.lower(), 0.01);
        assert_eq!(t.upper(), 100.0);
    }

    #[test]
    // Purpose
    // -------
    // Ensure a non-finite threshold is rejected.
    //
    // Given
    // -----
    // - `upper = +∞`.
    //
    // Expect
    // ------
    // - `Err(SegmentError::InvalidThreshold { .. })`.
    fn new_rejects_non_finite_threshold() {
        let result = Thresholds::new(0.01, f64::INFINITY);

        assert!(matches!(result, Err(SegmentError::InvalidThreshold { .. })));
    }

    #[test]
    // Purpose
    // -------
    // Ensure a negative threshold is rejected even when the ordering holds.
    //
    // Given
    // -----
    // - `lower = -1.0`, `upper = 100.0`.
    //
    // Expect
    // ------
    // - `Err(SegmentError::InvalidThreshold { .. })`.
    fn new_rejects_negative_threshold() {
        let result = Thresholds::new(-1.0, 100.0);

        assert!(matches!(result, Err(SegmentError::InvalidThreshold { .. })));
    }

    #[test]
    // Purpose
    // -------
    // Ensure swapped and equal thresholds are both rejected; the segmenter
    // must never run with a degenerate partition.
    //
    // Given
    // -----
    // - Pairs (100.0, 0.01) and (5.0, 5.0).
    //
    // Expect
    // ------
    // - Both return `Err(SegmentError::InvalidThreshold { .. })`.
    fn new_rejects_swapped_and_equal_thresholds() {
        assert!(matches!(
            Thresholds::new(100.0, 0.01),
            Err(SegmentError::InvalidThreshold { .. })
        ));
        assert!(matches!(
            Thresholds::new(5.0, 5.0),
            Err(SegmentError::InvalidThreshold { .. })
        ));
    }
}
