//! optimization — generic log-likelihood maximization on top of `argmin`.
//!
//! Purpose
//! -------
//! House the crate's numerical optimization layer: a [`LogLikelihood`]
//! trait for models with analytic gradients, validated solver
//! configuration, and an L-BFGS driver ([`maximize`]) that returns a
//! normalized [`MleOutcome`].
//!
//! Key behaviors
//! -------------
//! - Callers implement `ℓ(θ)` and `∇ℓ(θ)`; the layer minimizes `-ℓ(θ)`
//!   internally and reports results in log-likelihood terms.
//! - All configuration is validated on construction; solver failures are
//!   normalized into [`OptError`].
//!
//! Downstream usage
//! ----------------
//! - The `fit` subtree's Cauchy tail estimator is the in-crate consumer;
//!   the layer is public so other likelihood models can reuse it.
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each module; an end-to-end quadratic
//!   maximization in `mle` checks the full solver path.

pub mod errors;
pub mod mle;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{OptError, OptResult};
pub use self::mle::{
    maximize, LineSearcher, LogLikelihood, MleOptions, MleOutcome, Theta, Tolerances,
    DEFAULT_LBFGS_MEM,
};
