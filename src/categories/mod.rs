//! categories — canonical fuel-type classification and counting.
//!
//! Purpose
//! -------
//! Collapse the messy free-text fuel labels found in vehicle records into
//! four canonical categories, and count records per category in the
//! ascending order charting code expects.
//!
//! Key behaviors
//! -------------
//! - [`canonical_category`] maps a raw label (or a missing one) through an
//!   immutable static table; anything unrecognized falls back to
//!   [`FuelCategory::Other`] rather than failing.
//! - [`category_counts`] tallies an iterator of raw labels and returns
//!   `(category, count)` pairs sorted by ascending count.
//!
//! Invariants & assumptions
//! ------------------------
//! - The mapping table is fixed at compile time; classification is total
//!   over all inputs and never errors.
//! - Raw labels are matched exactly (including case), mirroring the data
//!   this table was curated from.
//!
//! Testing notes
//! -------------
//! - Tests pin representative mappings from each category, the missing and
//!   unknown fallbacks, and the ascending count order.

use std::fmt;

/// Canonical fuel category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FuelCategory {
    Gasoline,
    Hybrid,
    Electric,
    Other,
}

impl fmt::Display for FuelCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FuelCategory::Gasoline => "Gasoline",
            FuelCategory::Hybrid => "Hybrid",
            FuelCategory::Electric => "Electric",
            FuelCategory::Other => "Other",
        };
        write!(f, "{name}")
    }
}

/// Classify a raw fuel label into its canonical category.
///
/// A missing label (`None`) and any label absent from the curated table
/// both map to [`FuelCategory::Other`].
pub fn canonical_category(raw: Option<&str>) -> FuelCategory {
    let Some(raw) = raw else {
        return FuelCategory::Other;
    };
    match raw {
        "Gasoline"
        | "Premium"
        | "Diesel"
        | "E85 Flex Fuel"
        | "Flexible Fuel"
        | "Gasoline Fuel"
        | "Premium (Required)"
        | "Regular Unleaded"
        | "Bi-Fuel"
        | "Flex Fuel Capability"
        | "Diesel Fuel"
        | "Premium Unleaded"
        | "Biodiesel"
        | "Bio Diesel"
        | "E85 Fl"
        | "Flex Fuel" => FuelCategory::Gasoline,
        "Hybrid"
        | "Gasoline/Mild Electric Hybrid"
        | "Plug-In Hybrid"
        | "PHEV"
        | "Hybrid Fuel"
        | "Gas/Electric Hybrid"
        | "Plug-In Electric/Gas" => FuelCategory::Hybrid,
        "Electric" | "Electric Fuel System" => FuelCategory::Electric,
        _ => FuelCategory::Other,
    }
}

/// Count records per canonical category, sorted by ascending count.
///
/// Categories with zero occurrences are omitted. Ties break on the
/// category's enum order so the output is deterministic.
pub fn category_counts<'a, I>(raw_labels: I) -> Vec<(FuelCategory, usize)>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut tallies = [0_usize; 4];
    for raw in raw_labels {
        let category = canonical_category(raw);
        tallies[category as usize] += 1;
    }

    let mut counts: Vec<(FuelCategory, usize)> = [
        FuelCategory::Gasoline,
        FuelCategory::Hybrid,
        FuelCategory::Electric,
        FuelCategory::Other,
    ]
    .into_iter()
    .map(|category| (category, tallies[category as usize]))
    .filter(|&(_, count)| count > 0)
    .collect();

    counts.sort_by(|a, b| a.1.cmp(&b.1).then(a.0.cmp(&b.0)));
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Representative mappings into each canonical category.
    // - The missing-label and unknown-label fallbacks.
    // - Ascending order and zero-count omission in `category_counts`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify representative labels from each category.
    //
    // Given
    // -----
    // - One raw label per canonical category.
    //
    // Expect
    // ------
    // - Each maps to its curated category.
    fn canonical_category_maps_representatives() {
        assert_eq!(canonical_category(Some("Regular Unleaded")), FuelCategory::Gasoline);
        assert_eq!(canonical_category(Some("Plug-In Hybrid")), FuelCategory::Hybrid);
        assert_eq!(canonical_category(Some("Electric Fuel System")), FuelCategory::Electric);
        assert_eq!(canonical_category(Some("Compressed Natural Gas")), FuelCategory::Other);
    }

    #[test]
    // Purpose
    // -------
    // Verify the fallback paths: missing labels, unseen labels, and
    // case-mismatched labels all land in `Other`.
    //
    // Given
    // -----
    // - `None`, a made-up label, and a lowercase variant of a known label.
    //
    // Expect
    // ------
    // - All three classify as `Other`.
    fn canonical_category_falls_back_to_other() {
        assert_eq!(canonical_category(None), FuelCategory::Other);
        assert_eq!(canonical_category(Some("Antimatter")), FuelCategory::Other);
        assert_eq!(canonical_category(Some("gasoline")), FuelCategory::Other);
    }

    #[test]
    // Purpose
    // -------
    // Verify ascending count order and omission of empty categories.
    //
    // Given
    // -----
    // - Three gasoline labels, one hybrid label, no electric labels.
    //
    // Expect
    // ------
    // - `[(Hybrid, 1), (Gasoline, 3)]` with no Electric or Other entry.
    fn category_counts_sorts_ascending_and_omits_zero() {
        let labels = [
            Some("Gasoline"),
            Some("Diesel"),
            Some("Premium"),
            Some("PHEV"),
        ];

        let counts = category_counts(labels);

        assert_eq!(counts, vec![(FuelCategory::Hybrid, 1), (FuelCategory::Gasoline, 3)]);
    }
}
