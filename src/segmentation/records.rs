//! Validated containers for daily production records.
//!
//! Purpose
//! -------
//! Provide small, validated containers for per-location daily production
//! data used by the segmenter and the distribution fitter. This module
//! centralizes input validation for raw records so downstream code can
//! assume clean, finite, non-negative production values.
//!
//! Key behaviors
//! -------------
//! - [`ProductionRecord`] pairs a location tag and day index with a single
//!   production value; it is immutable once ingested.
//! - [`ProductionTable`] enforces basic data invariants (non-empty table,
//!   finite and non-negative production) at construction time.
//!
//! Invariants & assumptions
//! ------------------------
//! - Production values must be **finite** and **non-negative**; zero is a
//!   valid zero-production day.
//! - The table must be non-empty at construction time.
//! - Records are owned by the collaborator that reads external documents;
//!   the core borrows them and never mutates a record in place.
//!
//! Conventions
//! -----------
//! - `day_index` is an opaque ordering tag; the core never interprets it
//!   (each day's draw is i.i.d. given its regime, so order is irrelevant).
//! - How records were encoded externally (JSON documents per day, etc.) is
//!   a collaborator concern; this module only sees `(location, production)`
//!   pairs plus the index.
//!
//! Downstream usage
//! ----------------
//! - Construct [`ProductionTable`] at the boundary where raw records enter
//!   the crate, then pass it to
//!   [`segment`](crate::segmentation::segmenter::segment).
//! - Consumers may safely rely on the table invariants when computing
//!   segment bounds and moments.
//!
//! Testing notes
//! -------------
//! - Unit tests cover construction behavior for `ProductionTable::new`
//!   (happy path, empty table, non-finite and negative production).

use crate::segmentation::errors::{SegmentError, SegmentResult};

/// A single day's production observation for one location.
///
/// Immutable once ingested. The core borrows slices of these; it never
/// mutates or re-orders a caller's records.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductionRecord {
    /// Location tag added by the ingestion collaborator.
    pub location: String,
    /// Opaque day ordering tag; not interpreted by the core.
    pub day_index: usize,
    /// Daily production (finite, non-negative).
    pub production: f64,
}

impl ProductionRecord {
    /// Construct a record without validation.
    ///
    /// Validation happens once, in [`ProductionTable::new`]; building an
    /// individual record is infallible so ingestion loops stay simple.
    pub fn new(location: impl Into<String>, day_index: usize, production: f64) -> Self {
        ProductionRecord { location: location.into(), day_index, production }
    }
}

/// `ProductionTable` — validated collection of daily production records.
///
/// Purpose
/// -------
/// Represent the merged, multi-location historical record handed to the
/// segmenter. Construction validates every production value once so that
/// segmentation and fitting never re-check basic data invariants.
///
/// Invariants
/// ----------
/// - `records.len() > 0`.
/// - Every `production` is finite and `>= 0.0`.
///
/// Performance
/// -----------
/// - Validation is O(n) in the number of records, a single scan.
/// - After construction this is a lightweight wrapper with no hidden
///   allocations.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductionTable {
    records: Vec<ProductionRecord>,
}

impl ProductionTable {
    /// Construct a validated [`ProductionTable`] from raw records.
    ///
    /// Parameters
    /// ----------
    /// - `records`: `Vec<ProductionRecord>`
    ///   Raw record table. Must be non-empty with finite, non-negative
    ///   production values.
    ///
    /// Returns
    /// -------
    /// `SegmentResult<ProductionTable>`
    ///   - `Ok(table)` if all invariants are satisfied.
    ///   - `Err(SegmentError)` if validation fails.
    ///
    /// Errors
    /// ------
    /// - `SegmentError::EmptyTable`
    ///   Returned when `records` is empty.
    /// - `SegmentError::NonFiniteProduction { index, value }`
    ///   Returned for the first NaN/±∞ production value.
    /// - `SegmentError::NegativeProduction { index, value }`
    ///   Returned for the first strictly negative production value.
    ///
    /// Panics
    /// ------
    /// - Never panics. All invalid inputs are reported via `SegmentError`.
    pub fn new(records: Vec<ProductionRecord>) -> SegmentResult<Self> {
        if records.is_empty() {
            return Err(SegmentError::EmptyTable);
        }

        for (index, record) in records.iter().enumerate() {
            let value = record.production;
            if !value.is_finite() {
                return Err(SegmentError::NonFiniteProduction { index, value });
            }
            if value < 0.0 {
                return Err(SegmentError::NegativeProduction { index, value });
            }
        }

        Ok(ProductionTable { records })
    }

    /// Borrow the validated records.
    pub fn records(&self) -> &[ProductionRecord] {
        &self.records
    }

    /// Number of records in the table (all locations).
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty. Always `false` for a constructed table;
    /// provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
