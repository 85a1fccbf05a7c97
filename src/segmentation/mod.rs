//! segmentation — validated records, thresholds, and regime partitioning.
//!
//! Purpose
//! -------
//! Turn a raw multi-location table of daily production values into one
//! location's three-regime partition with empirical shares. This subtree
//! owns all input validation for records and thresholds so the fitter and
//! simulator downstream can assume clean data.
//!
//! Key behaviors
//! -------------
//! - Validate raw records once at the boundary via
//!   [`ProductionTable::new`](records::ProductionTable::new) (finite,
//!   non-negative production values).
//! - Validate the threshold pair eagerly via
//!   [`Thresholds::new`](thresholds::Thresholds::new); swapped or equal
//!   thresholds are a hard error, never silently degenerate segments.
//! - Partition a location's values into the three half-open regimes and
//!   derive each regime's empirical share of days via
//!   [`segment`](segmenter::segment).
//!
//! Invariants & assumptions
//! ------------------------
//! - The three segments partition a location's records exactly; shares sum
//!   to 1 within floating tolerance for any non-empty location.
//! - Everything in this subtree is a pure function over in-memory data;
//!   there is no I/O and no transient-failure class.
//! - Errors are reported via [`SegmentError`](errors::SegmentError) and the
//!   [`SegmentResult`](errors::SegmentResult) alias; nothing here panics on
//!   user input.
//!
//! Downstream usage
//! ----------------
//! - Typical callers run:
//!
//!   ```rust
//!   use production_mixture::segmentation::{segment, ProductionRecord, ProductionTable, Thresholds};
//!
//!   let table = ProductionTable::new(vec![
//!       ProductionRecord::new("plant_a", 0, 0.0),
//!       ProductionRecord::new("plant_a", 1, 42.0),
//!       ProductionRecord::new("plant_a", 2, 180.0),
//!   ])?;
//!   let set = segment(&table, "plant_a", Thresholds::new(0.01, 100.0)?)?;
//!   assert_eq!(set.total_days(), 3);
//!   # Ok::<(), production_mixture::segmentation::SegmentError>(())
//!   ```
//!
//!   and hand the [`SegmentSet`](segmenter::SegmentSet) to the `fit`
//!   subtree.
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each module; the partition-exactness and
//!   shares-sum-to-one properties are also exercised end-to-end by the
//!   pipeline integration test.

pub mod errors;
pub mod records;
pub mod segmenter;
pub mod thresholds;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{SegmentError, SegmentResult};
pub use self::records::{ProductionRecord, ProductionTable};
pub use self::segmenter::{segment, SegmentSet};
pub use self::thresholds::Thresholds;
