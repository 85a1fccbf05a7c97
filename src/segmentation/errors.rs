//! Errors for production-series segmentation (record validation, threshold
//! checks, and location filtering).
//!
//! This module defines [`SegmentError`], the error type shared by the record
//! containers and the segmenter, together with the [`SegmentResult`] alias.
//!
//! ## Conventions
//! - **Indices are 0-based** and refer to positions in the table handed to
//!   [`ProductionTable::new`](crate::segmentation::records::ProductionTable::new).
//! - Production values must be **finite and non-negative**; a zero value is a
//!   legitimate zero-production day, not an error.
//! - Threshold violations are reported eagerly at construction time; the
//!   segmenter never runs with degenerate or swapped thresholds.

/// Result alias for segmentation operations that may produce [`SegmentError`].
pub type SegmentResult<T> = Result<T, SegmentError>;

/// Unified error type for record validation and segmentation.
///
/// Covers malformed production values, threshold configuration problems, and
/// location filters that match no records. Implements `Display`/`Error`.
#[derive(Debug, Clone, PartialEq)]
pub enum SegmentError {
    // ---- Record validation ----
    /// The record table is empty.
    EmptyTable,

    /// A production value is NaN/±inf.
    NonFiniteProduction { index: usize, value: f64 },

    /// A production value is negative (production is a non-negative quantity).
    NegativeProduction { index: usize, value: f64 },

    // ---- Threshold validation ----
    /// Thresholds must be finite, non-negative, and strictly increasing.
    InvalidThreshold { lower: f64, upper: f64, reason: &'static str },

    // ---- Location filtering ----
    /// No record matches the requested location, so shares are undefined.
    EmptyLocation { location: String },
}

impl std::error::Error for SegmentError {}

impl std::fmt::Display for SegmentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SegmentError::EmptyTable => {
                write!(f, "Production table is empty.")
            }
            SegmentError::NonFiniteProduction { index, value } => {
                write!(f, "Production value at index {index} is non-finite: {value}")
            }
            SegmentError::NegativeProduction { index, value } => {
                write!(f, "Production value at index {index} is negative: {value}")
            }
            SegmentError::InvalidThreshold { lower, upper, reason } => {
                write!(
                    f,
                    "Invalid thresholds: lower = {lower}, upper = {upper}. {reason}"
                )
            }
            SegmentError::EmptyLocation { location } => {
                write!(f, "No records found for location '{location}'.")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Display formatting embeds the variant payloads.
    //
    // They intentionally DO NOT cover:
    // - The validation logic that produces these errors (covered in
    //   `records`, `thresholds`, and `segmenter`).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that payload-carrying variants embed their values in the
    // rendered message, so failures identify the offending record or
    // threshold pair.
    //
    // Given
    // -----
    // - One error per payload-carrying variant with distinctive values.
    //
    // Expect
    // ------
    // - Each rendered message contains the payload values.
    fn display_embeds_payloads() {
        let e = SegmentError::NonFiniteProduction { index: 7, value: f64::NAN };
        assert!(e.to_string().contains('7'));

        let e = SegmentError::NegativeProduction { index: 2, value: -1.5 };
        assert!(e.to_string().contains("-1.5"));

        let e = SegmentError::InvalidThreshold {
            lower: 100.0,
            upper: 0.01,
            reason: "Thresholds must be strictly increasing.",
        };
        let msg = e.to_string();
        assert!(msg.contains("100") && msg.contains("0.01"));

        let e = SegmentError::EmptyLocation { location: "plant_a".to_string() };
        assert!(e.to_string().contains("plant_a"));
    }
}
