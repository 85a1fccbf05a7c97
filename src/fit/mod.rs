//! fit — per-segment distribution estimation and the mixture profile.
//!
//! Purpose
//! -------
//! Estimate the parametric pieces of the three-regime mixture from a
//! segmented location history: empirical uniform bounds for the mid
//! regime, and a normal or Cauchy fit for the tail. The result is a
//! serializable [`SegmentProfile`](profile::SegmentProfile) consumed by
//! the simulator.
//!
//! Key behaviors
//! -------------
//! - Closed-form estimators where they exist (extrema, moments); numerical
//!   maximum likelihood via the `optimization` subtree where they do not
//!   (Cauchy).
//! - All fitted bundles are validated on construction; a profile that
//!   exists is a profile the simulator accepts.
//!
//! Downstream usage
//! ----------------
//! - Feed a [`SegmentSet`](crate::segmentation::segmenter::SegmentSet)
//!   into [`fit_profile`](fitter::fit_profile), persist or pass the
//!   profile to [`simulate`](crate::simulate).
//!
//! Testing notes
//! -------------
//! - Estimator accuracy is unit-tested next to each module; the full
//!   segment-fit-simulate chain is covered by the pipeline integration
//!   test.

pub mod cauchy;
pub mod errors;
pub mod fitter;
pub mod profile;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::cauchy::{fit_cauchy, fit_cauchy_with};
pub use self::errors::{FitError, FitResult};
pub use self::fitter::{fit_normal, fit_profile, fit_uniform_bounds};
pub use self::profile::{SegmentProfile, TailDistribution};
