//! optimization::mle — Argmin-backed maximum-likelihood fitting.
//!
//! Purpose
//! -------
//! Provide a small, self-contained layer for **maximizing log-likelihoods**
//! `ℓ(θ)` with L-BFGS. Callers implement [`LogLikelihood`] (value, analytic
//! gradient, and a validation hook) and invoke [`maximize`] with validated
//! [`MleOptions`]. The Cauchy tail fit in the `fit` subtree is the in-crate
//! consumer.
//!
//! Key behaviors
//! -------------
//! - Convert a log-likelihood into an Argmin minimization problem
//!   `c(θ) = -ℓ(θ)` via [`ArgminAdapter`]; analytic gradients are negated
//!   to match.
//! - Build an L-BFGS solver with either Hager–Zhang or More–Thuente line
//!   search per [`LineSearcher`], apply [`Tolerances`], run the executor,
//!   and normalize the result into a validated [`MleOutcome`].
//! - Validate all configuration on construction ([`Tolerances::new`],
//!   [`MleOptions::new`]) so the solver layer can assume sane inputs.
//!
//! Invariants & assumptions
//! ------------------------
//! - The optimizer **always maximizes**; user code implements `ℓ(θ)` and
//!   `∇ℓ(θ)`, never the cost directly.
//! - Gradients are analytic and required; a model with no closed-form
//!   gradient does not belong behind this trait.
//! - Parameter vectors and gradients are `ndarray::Array1<f64>` and are
//!   finite whenever optimization proceeds; violations surface as
//!   [`OptError`] values, not panics.
//!
//! Conventions
//! -----------
//! - `theta` is treated as an unconstrained vector; constrained model
//!   parameters (e.g., a positive scale) are reparameterized by the caller
//!   (log-transform) before entering the optimizer.
//! - `MleOutcome::value` is the best **log-likelihood** `ℓ(θ̂)`, not the
//!   cost.
//!
//! Downstream usage
//! ----------------
//! - `fit::cauchy` implements [`LogLikelihood`] over `θ = [x0, ln γ]` and
//!   calls [`maximize`] with default options.
//!
//! Testing notes
//! -------------
//! - Unit tests exercise option validation branches, the adapter's sign
//!   flip, and an end-to-end maximization of a concave quadratic with a
//!   known optimum.

use crate::optimization::errors::{OptError, OptResult};
use argmin::core::{CostFunction, Error, Executor, Gradient, State, TerminationStatus};
use argmin::solver::{
    linesearch::{HagerZhangLineSearch, MoreThuenteLineSearch},
    quasinewton::LBFGS,
};
use argmin_math::ArgminL2Norm;
use ndarray::Array1;
use std::collections::HashMap;
use std::str::FromStr;

/// Parameter vector `θ`, the canonical optimizer type.
pub type Theta = Array1<f64>;

/// Gradient vector `∇ℓ(θ)`, matching the shape of [`Theta`].
pub type Grad = Array1<f64>;

/// Scalar objective value; internally the cost `c(θ) = -ℓ(θ)`.
pub type Cost = f64;

/// Function-evaluation counters as reported by the solver.
pub type FnEvalMap = HashMap<String, u64>;

/// Default history size (`m`) for L-BFGS runs.
pub const DEFAULT_LBFGS_MEM: usize = 7;

/// Hager–Zhang line search specialized to this crate's numeric types.
pub type HagerZhangLs = HagerZhangLineSearch<Theta, Grad, Cost>;

/// More–Thuente line search specialized to this crate's numeric types.
pub type MoreThuenteLs = MoreThuenteLineSearch<Theta, Grad, Cost>;

/// L-BFGS solver wired to the Hager–Zhang line search.
pub type LbfgsHagerZhang = LBFGS<HagerZhangLs, Theta, Grad, Cost>;

/// L-BFGS solver wired to the More–Thuente line search.
pub type LbfgsMoreThuente = LBFGS<MoreThuenteLs, Theta, Grad, Cost>;

/// User-implemented log-likelihood interface.
///
/// You maximize `ℓ(θ)`; internally we minimize the cost `c(θ) = -ℓ(θ)`.
/// `grad` must return the gradient of the **log-likelihood** `∇ℓ(θ)`; the
/// adapter flips the sign to match the cost.
///
/// - `type Data`: per-model data carried into `value`/`grad`/`check`.
///
/// Required:
/// - `value(&Theta, &Data) -> OptResult<Cost>`: evaluate `ℓ(θ)`.
/// - `grad(&Theta, &Data) -> OptResult<Grad>`: evaluate `∇ℓ(θ)`.
/// - `check(&Theta, &Data) -> OptResult<()>`: reject obviously invalid
///   `θ`/`data` pairs. Called once before optimization.
pub trait LogLikelihood {
    type Data: 'static;

    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<Cost>;
    fn grad(&self, theta: &Theta, data: &Self::Data) -> OptResult<Grad>;
    fn check(&self, theta: &Theta, data: &Self::Data) -> OptResult<()>;
}

/// Choice of line search used inside the L-BFGS solver.
///
/// Parsing: implements `FromStr` and accepts case-insensitive names
/// (`"MoreThuente"`, `"HagerZhang"`). Unknown names return
/// [`OptError::InvalidLineSearch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSearcher {
    MoreThuente,
    HagerZhang,
}

impl FromStr for LineSearcher {
    type Err = OptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "morethuente" => Ok(LineSearcher::MoreThuente),
            "hagerzhang" => Ok(LineSearcher::HagerZhang),
            _ => Err(OptError::InvalidLineSearch {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'MoreThuente' or 'HagerZhang'.",
            }),
        }
    }
}

/// Numerical tolerances and iteration limits used by the optimizer.
///
/// - `tol_grad`: terminate when the gradient norm falls below this threshold.
/// - `tol_cost`: terminate when the change in cost falls below this threshold.
/// - `max_iter`: hard cap on the number of iterations.
///
/// Any field can be `None` but **at least one** of the three must be
/// provided (see [`Tolerances::new`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub tol_grad: Option<f64>,
    pub tol_cost: Option<f64>,
    pub max_iter: Option<usize>,
}

impl Tolerances {
    /// Construct validated tolerances.
    ///
    /// # Rules
    /// - At least one of `tol_grad`, `tol_cost`, or `max_iter` must be `Some`.
    /// - If provided, tolerances must be **finite and strictly positive**.
    /// - If provided, `max_iter` must be `> 0`.
    ///
    /// # Errors
    /// - [`OptError::NoTolerancesProvided`] if all three are `None`.
    /// - [`OptError::InvalidTolGrad`] / [`OptError::InvalidTolCost`] for
    ///   non-finite or non-positive tolerances.
    /// - [`OptError::InvalidMaxIter`] if `max_iter == 0`.
    pub fn new(
        tol_grad: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>,
    ) -> OptResult<Self> {
        if tol_grad.is_none() && tol_cost.is_none() && max_iter.is_none() {
            return Err(OptError::NoTolerancesProvided);
        }
        verify_tol(tol_grad, true)?;
        verify_tol(tol_cost, false)?;
        if let Some(max_iter) = max_iter {
            if max_iter == 0 {
                return Err(OptError::InvalidMaxIter {
                    max_iter,
                    reason: "Maximum iterations must be greater than zero.",
                });
            }
        }
        Ok(Self { tol_grad, tol_cost, max_iter })
    }
}

/// Optimizer-level configuration.
///
/// Default: `tol_grad = 1e-8`, `max_iter = 300`, More–Thuente line search,
/// non-verbose, default L-BFGS memory.
#[derive(Debug, Clone, PartialEq)]
pub struct MleOptions {
    pub tols: Tolerances,
    pub line_searcher: LineSearcher,
    pub verbose: bool,
    pub lbfgs_mem: Option<usize>,
}

impl MleOptions {
    /// Create a new set of optimizer options.
    ///
    /// Validation of numeric fields is performed inside [`Tolerances::new`];
    /// this constructor only checks the L-BFGS memory.
    ///
    /// # Errors
    /// - [`OptError::InvalidLbfgsMem`] if `lbfgs_mem == Some(0)`.
    pub fn new(
        tols: Tolerances, line_searcher: LineSearcher, verbose: bool, lbfgs_mem: Option<usize>,
    ) -> OptResult<Self> {
        if let Some(m) = lbfgs_mem {
            if m == 0 {
                return Err(OptError::InvalidLbfgsMem {
                    mem: m,
                    reason: "L-BFGS memory must be greater than zero.",
                });
            }
        }
        Ok(Self { tols, line_searcher, verbose, lbfgs_mem })
    }
}

impl Default for MleOptions {
    fn default() -> Self {
        Self {
            tols: Tolerances { tol_grad: Some(1e-8), tol_cost: None, max_iter: Some(300) },
            line_searcher: LineSearcher::MoreThuente,
            verbose: false,
            lbfgs_mem: None,
        }
    }
}

/// Canonical result returned by [`maximize`].
///
/// - `theta_hat`: best parameter vector found (validated finite).
/// - `value`: best **log-likelihood** value `ℓ(θ̂)` (not the cost).
/// - `converged`: `true` if the solver reported a terminating status other
///   than `NotTerminated`.
/// - `status`: human-readable termination status string.
/// - `iterations`: number of optimizer iterations performed.
/// - `fn_evals`: function-evaluation counters reported by `argmin`.
/// - `grad_norm`: norm of the last available gradient, if present.
#[derive(Debug, Clone, PartialEq)]
pub struct MleOutcome {
    pub theta_hat: Theta,
    pub value: f64,
    pub converged: bool,
    pub status: String,
    pub iterations: usize,
    pub fn_evals: FnEvalMap,
    pub grad_norm: Option<f64>,
}

impl MleOutcome {
    /// Build a validated [`MleOutcome`] from raw solver state.
    ///
    /// Performs:
    /// - `theta_hat` check (present and all finite).
    /// - `value` finiteness check.
    /// - Maps `TerminationStatus` into `(converged, status)`.
    /// - Computes `grad_norm` if a gradient was available.
    ///
    /// # Errors
    /// Propagates validation errors for `theta_hat` or `value`.
    pub fn new(
        theta_hat_opt: Option<Theta>, value: f64, termination: TerminationStatus,
        iterations: u64, fn_evals: FnEvalMap, grad: Option<Grad>,
    ) -> OptResult<Self> {
        let theta_hat = validate_theta_hat(theta_hat_opt)?;
        if !value.is_finite() {
            return Err(OptError::NonFiniteCost { value });
        }
        let status: String;
        let converged = match termination {
            TerminationStatus::NotTerminated => {
                status = "Not terminated".to_string();
                false
            }
            _ => {
                status = format!("{termination:?}");
                true
            }
        };
        let grad_norm = grad.map(|g| g.l2_norm());
        Ok(Self {
            theta_hat,
            value,
            converged,
            status,
            iterations: iterations as usize,
            fn_evals,
            grad_norm,
        })
    }
}

/// Bridges a user [`LogLikelihood`] to `argmin`'s `CostFunction` and
/// `Gradient`.
///
/// - `CostFunction::cost` returns `-ℓ(θ)` (negative log-likelihood).
/// - `Gradient::gradient` returns `-∇ℓ(θ)` after validating the user
///   gradient for dimension and finiteness.
#[derive(Debug, Clone)]
pub struct ArgminAdapter<'a, F: LogLikelihood> {
    pub f: &'a F,
    pub data: &'a F::Data,
}

impl<'a, F: LogLikelihood> ArgminAdapter<'a, F> {
    /// Construct a new adapter over a user model and its data.
    pub fn new(f: &'a F, data: &'a F::Data) -> Self {
        Self { f, data }
    }
}

impl<F: LogLikelihood> CostFunction for ArgminAdapter<'_, F> {
    type Param = Theta;
    type Output = Cost;

    /// Evaluate the cost `c(θ) = -ℓ(θ)`.
    ///
    /// # Errors
    /// - Propagates any `OptError` from the user's `value`.
    /// - Returns [`OptError::NonFiniteCost`] if the value is not finite.
    fn cost(&self, theta: &Self::Param) -> Result<Self::Output, Error> {
        let output = self.f.value(theta, self.data)?;
        if !output.is_finite() {
            return Err((OptError::NonFiniteCost { value: output }).into());
        }
        Ok(-output)
    }
}

impl<F: LogLikelihood> Gradient for ArgminAdapter<'_, F> {
    type Param = Theta;
    type Gradient = Grad;

    /// Evaluate the gradient of the cost at `θ`: validate the user's
    /// `∇ℓ(θ)` and return its negation.
    ///
    /// # Errors
    /// - Propagates user errors from `grad`.
    /// - Returns validation errors for wrong dimension or non-finite
    ///   entries.
    fn gradient(&self, theta: &Self::Param) -> Result<Self::Gradient, Error> {
        let g = self.f.grad(theta, self.data)?;
        validate_grad(&g, theta.len())?;
        Ok(-g)
    }
}

/// Maximize a log-likelihood `ℓ(θ)` using L-BFGS with the chosen line
/// search.
///
/// # Behavior
/// - Validates the initial guess via `f.check(theta0, data)`.
/// - Wraps `(f, data)` in an [`ArgminAdapter`] exposing a minimization
///   problem to `argmin`.
/// - Builds an L-BFGS solver per `opts.line_searcher` and applies the
///   configured tolerances.
/// - Runs the executor and normalizes the result into an [`MleOutcome`].
///
/// # Errors
/// - Propagates any error from `f.check`.
/// - Propagates builder and runtime errors from the backend (e.g., line
///   search failures) as [`OptError::Backend`].
/// - Propagates validation errors when constructing the outcome.
pub fn maximize<F: LogLikelihood>(
    f: &F, theta0: Theta, data: &F::Data, opts: &MleOptions,
) -> OptResult<MleOutcome> {
    f.check(&theta0, data)?;
    let problem = ArgminAdapter::new(f, data);
    match opts.line_searcher {
        LineSearcher::MoreThuente => {
            let mut solver: LbfgsMoreThuente =
                LBFGS::new(MoreThuenteLineSearch::new(), opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM));
            if let Some(tol) = opts.tols.tol_grad {
                solver = solver.with_tolerance_grad(tol)?;
            }
            if let Some(tol) = opts.tols.tol_cost {
                solver = solver.with_tolerance_cost(tol)?;
            }
            run_lbfgs(theta0, opts, problem, solver)
        }
        LineSearcher::HagerZhang => {
            let mut solver: LbfgsHagerZhang =
                LBFGS::new(HagerZhangLineSearch::new(), opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM));
            if let Some(tol) = opts.tols.tol_grad {
                solver = solver.with_tolerance_grad(tol)?;
            }
            if let Some(tol) = opts.tols.tol_cost {
                solver = solver.with_tolerance_cost(tol)?;
            }
            run_lbfgs(theta0, opts, problem, solver)
        }
    }
}

/// Run an `argmin` optimization for a log-likelihood problem.
///
/// Wires up the adapted problem, the chosen solver, the initial parameter
/// `theta0`, an optional slog observer (behind the `obs_slog` feature), and
/// an optional iteration cap, then executes and converts the final state
/// into an [`MleOutcome`].
///
/// # Errors
/// - Propagates any `argmin` runtime error via `From<argmin::core::Error>`.
/// - Propagates outcome-validation errors.
fn run_lbfgs<'a, F, S>(
    theta0: Theta, opts: &MleOptions, problem: ArgminAdapter<'a, F>, solver: S,
) -> OptResult<MleOutcome>
where
    F: LogLikelihood,
    S: argmin::core::Solver<
            ArgminAdapter<'a, F>,
            argmin::core::IterState<Theta, Grad, (), (), (), f64>,
        > + Send
        + 'static,
{
    #[cfg(not(feature = "obs_slog"))]
    let _ = opts.verbose;

    let max_iter = opts.tols.max_iter;
    let executor = Executor::new(problem, solver).configure(|state| {
        let state = state.param(theta0);
        match max_iter {
            Some(cap) => state.max_iters(cap as u64),
            None => state,
        }
    });
    #[cfg(feature = "obs_slog")]
    let executor = if opts.verbose {
        executor.add_observer(
            argmin_observer_slog::SlogLogger::term_noblock(),
            argmin::core::observers::ObserverMode::Always,
        )
    } else {
        executor
    };

    let mut final_state = executor.run()?.state().clone();
    let best_loglik = -final_state.get_best_cost();
    MleOutcome::new(
        final_state.take_best_param(),
        best_loglik,
        final_state.get_termination_status().clone(),
        final_state.get_iter(),
        final_state.get_func_counts().clone(),
        final_state.take_gradient(),
    )
}

// ---- Validation helpers ----------------------------------------------------

fn verify_tol(tol: Option<f64>, is_grad: bool) -> OptResult<()> {
    if let Some(tol) = tol {
        if !tol.is_finite() || tol <= 0.0 {
            let reason = if tol.is_finite() {
                "Tolerance must be positive."
            } else {
                "Tolerance must be finite."
            };
            return Err(if is_grad {
                OptError::InvalidTolGrad { tol, reason }
            } else {
                OptError::InvalidTolCost { tol, reason }
            });
        }
    }
    Ok(())
}

/// Validate a gradient vector against dimension and finiteness.
///
/// # Errors
/// - [`OptError::GradientDimMismatch`] if length does not match `dim`.
/// - [`OptError::InvalidGradient`] for the first non-finite element.
pub fn validate_grad(grad: &Grad, dim: usize) -> OptResult<()> {
    if grad.len() != dim {
        return Err(OptError::GradientDimMismatch { expected: dim, found: grad.len() });
    }
    for (index, &value) in grad.iter().enumerate() {
        if !value.is_finite() {
            return Err(OptError::InvalidGradient {
                index,
                value,
                reason: "Gradient elements must be finite.",
            });
        }
    }
    Ok(())
}

/// Validate and unwrap an estimated parameter vector.
///
/// # Errors
/// - [`OptError::MissingThetaHat`] if no vector was provided.
/// - [`OptError::InvalidThetaHat`] for the first non-finite element.
pub fn validate_theta_hat(theta_hat: Option<Theta>) -> OptResult<Theta> {
    match theta_hat {
        Some(t) => {
            for (index, &value) in t.iter().enumerate() {
                if !value.is_finite() {
                    return Err(OptError::InvalidThetaHat {
                        index,
                        value,
                        reason: "Parameter estimates must be finite.",
                    });
                }
            }
            Ok(t)
        }
        None => Err(OptError::MissingThetaHat),
    }
}
