//! Three-way partitioning of a location's production history.
//!
//! Purpose
//! -------
//! Split one location's daily production values into three regimes by two
//! thresholds and compute each regime's empirical share of days. This is
//! the first stage of the estimation pipeline; its output feeds the
//! distribution fitter.
//!
//! Key behaviors
//! -------------
//! - [`segment`] filters the table to one location, partitions by
//!   `p < lower`, `lower <= p < upper`, `p >= upper`, and derives shares
//!   as segment size over location size.
//! - The three segments always partition the location's records exactly:
//!   no overlap, union equals all records for that location.
//! - A segment may legitimately be empty (e.g., no zero-production days);
//!   the fitter handles empty segments explicitly.
//!
//! Invariants & assumptions
//! ------------------------
//! - `share_1 + share_2 + share_3 == 1.0` within floating tolerance for any
//!   location with at least one record.
//! - Thresholds are validated before this function runs
//!   ([`Thresholds::new`]); the segmenter never sees a degenerate pair.
//! - Pure function over its inputs; share computation is a derived read,
//!   not a mutation.
//!
//! Downstream usage
//! ----------------
//! - Pass the returned [`SegmentSet`] to
//!   [`fit_profile`](crate::fit::fitter::fit_profile) to obtain a
//!   [`SegmentProfile`](crate::fit::profile::SegmentProfile).
//!
//! Testing notes
//! -------------
//! - Unit tests cover exact partitioning, the shares-sum-to-one property,
//!   boundary placement of values equal to a threshold, empty segments,
//!   and the empty-location error.

use crate::segmentation::{
    errors::{SegmentError, SegmentResult},
    records::ProductionTable,
    thresholds::Thresholds,
};
use ndarray::Array1;

/// `SegmentSet` — one location's records partitioned into three regimes.
///
/// Purpose
/// -------
/// Hold the per-regime production values and empirical shares produced by
/// [`segment`], ready for distribution fitting.
///
/// Fields
/// ------
/// - `location`: the location the set was computed for.
/// - `thresholds`: the validated threshold pair that defined the regimes.
/// - `segment_1`: production values with `p < lower` (zero/near-zero days).
/// - `segment_2`: production values with `lower <= p < upper`.
/// - `segment_3`: production values with `p >= upper`.
/// - `shares`: `[share_1, share_2, share_3]`, each in `[0, 1]`.
///
/// Invariants
/// ----------
/// - `segment_1.len() + segment_2.len() + segment_3.len()` equals the number
///   of records for `location` in the source table.
/// - `shares.iter().sum() == 1.0` within floating tolerance.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentSet {
    /// Location the segments were computed for.
    pub location: String,
    /// Threshold pair defining the regime boundaries.
    pub thresholds: Thresholds,
    /// Regime 1 values: `production < lower`.
    pub segment_1: Array1<f64>,
    /// Regime 2 values: `lower <= production < upper`.
    pub segment_2: Array1<f64>,
    /// Regime 3 values: `production >= upper`.
    pub segment_3: Array1<f64>,
    /// Empirical share of days per regime, `[share_1, share_2, share_3]`.
    pub shares: [f64; 3],
}

impl SegmentSet {
    /// Total number of days for this location across all three segments.
    pub fn total_days(&self) -> usize {
        self.segment_1.len() + self.segment_2.len() + self.segment_3.len()
    }
}

/// Partition one location's records into three regimes by two thresholds.
///
/// Parameters
/// ----------
/// - `table`: `&ProductionTable`
///   Validated multi-location record table.
/// - `location`: `&str`
///   Location to filter to; records for other locations are ignored.
/// - `thresholds`: `Thresholds`
///   Validated regime boundaries (`0 <= lower < upper`).
///
/// Returns
/// -------
/// `SegmentResult<SegmentSet>`
///   - `Ok(set)` with the three segments and their empirical shares.
///   - `Err(SegmentError::EmptyLocation)` if no record matches `location`
///     (shares would otherwise divide by zero).
///
/// Panics
/// ------
/// - Never panics. The table guarantees finite, non-negative values.
///
/// Notes
/// -----
/// - A value exactly equal to `lower` lands in segment 2; a value exactly
///   equal to `upper` lands in segment 3 (half-open intervals).
/// - Runs in O(n) over the table with one allocation per segment.
pub fn segment(
    table: &ProductionTable, location: &str, thresholds: Thresholds,
) -> SegmentResult<SegmentSet> {
    let mut segment_1: Vec<f64> = Vec::new();
    let mut segment_2: Vec<f64> = Vec::new();
    let mut segment_3: Vec<f64> = Vec::new();

    for record in table.records() {
        if record.location != location {
            continue;
        }
        let p = record.production;
        if p < thresholds.lower() {
            segment_1.push(p);
        } else if p < thresholds.upper() {
            segment_2.push(p);
        } else {
            segment_3.push(p);
        }
    }

    let total = segment_1.len() + segment_2.len() + segment_3.len();
    if total == 0 {
        return Err(SegmentError::EmptyLocation { location: location.to_string() });
    }

    let total = total as f64;
    let shares = [
        segment_1.len() as f64 / total,
        segment_2.len() as f64 / total,
        segment_3.len() as f64 / total,
    ];

    Ok(SegmentSet {
        location: location.to_string(),
        thresholds,
        segment_1: Array1::from_vec(segment_1),
        segment_2: Array1::from_vec(segment_2),
        segment_3: Array1::from_vec(segment_3),
        shares,
    })
}
