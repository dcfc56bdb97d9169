//! Explicit solver options overlaid on the solver defaults.

use crate::ffi::{DefaultSettingsFFI, DirectSolveMethod};
use derive_builder::{Builder, UninitializedFieldError};
use num_traits::Zero;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "serde")]
use serde_big_array::BigArray;

/// Error type returned by settings validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    /// A numeric setting that must be strictly positive is not
    #[error("setting {0} must be strictly positive")]
    NonPositive(&'static str),
    /// The builder could not assemble the settings
    #[error("settings builder error: {0}")]
    Builder(String),
    /// Malformed JSON settings overlay
    #[cfg(feature = "serde")]
    #[error("bad settings json: {0}")]
    Json(String),
}

impl From<UninitializedFieldError> for SettingsError {
    fn from(e: UninitializedFieldError) -> Self {
        SettingsError::Builder(e.to_string())
    }
}

/// Pardiso `iparm` parameter array.
///
/// Entries equal to `i32::MIN` leave the corresponding Pardiso default in place.
/// Indices are 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PardisoIparm(#[cfg_attr(feature = "serde", serde(with = "BigArray"))] pub [i32; 64]);

impl From<[i32; 64]> for PardisoIparm {
    fn from(iparm: [i32; 64]) -> Self {
        PardisoIparm(iparm)
    }
}

/// Solver options.  Every field is optional and an absent field keeps the
/// solver's own default.
///
/// Use [`SolverSettingsBuilder`] to construct a validated object:
/// ```
/// use clarabel_model::settings::SolverSettingsBuilder;
///
/// let settings = SolverSettingsBuilder::default()
///     .max_iter(50)
///     .tol_gap_abs(1e-7)
///     .build()
///     .unwrap();
///
/// assert_eq!(settings.max_iter, Some(50));
/// assert_eq!(settings.verbose, None);
/// ```
#[derive(Builder, Debug, Clone, Default, PartialEq)]
#[builder(
    default,
    setter(strip_option),
    build_fn(private, name = "fallible_build", error = "SettingsError")
)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct SolverSettings {
    ///maximum number of iterations
    pub max_iter: Option<u32>,
    ///maximum run time (seconds)
    pub time_limit: Option<f64>,
    ///verbose printing
    pub verbose: Option<bool>,
    ///maximum interior point step length
    pub max_step_fraction: Option<f64>,

    ///absolute duality gap tolerance
    pub tol_gap_abs: Option<f64>,
    ///relative duality gap tolerance
    pub tol_gap_rel: Option<f64>,
    ///feasibility check tolerance (primal and dual)
    pub tol_feas: Option<f64>,
    ///absolute infeasibility tolerance (primal and dual)
    pub tol_infeas_abs: Option<f64>,
    ///relative infeasibility tolerance (primal and dual)
    pub tol_infeas_rel: Option<f64>,
    ///κ/τ tolerance
    pub tol_ktratio: Option<f64>,

    ///reduced absolute duality gap tolerance
    pub reduced_tol_gap_abs: Option<f64>,
    ///reduced relative duality gap tolerance
    pub reduced_tol_gap_rel: Option<f64>,
    ///reduced feasibility check tolerance (primal and dual)
    pub reduced_tol_feas: Option<f64>,
    ///reduced absolute infeasibility tolerance (primal and dual)
    pub reduced_tol_infeas_abs: Option<f64>,
    ///reduced relative infeasibility tolerance (primal and dual)
    pub reduced_tol_infeas_rel: Option<f64>,
    ///reduced κ/τ tolerance
    pub reduced_tol_ktratio: Option<f64>,

    ///enable data equilibration pre-scaling
    pub equilibrate_enable: Option<bool>,
    ///maximum equilibration scaling iterations
    pub equilibrate_max_iter: Option<u32>,
    ///minimum equilibration scaling allowed
    pub equilibrate_min_scaling: Option<f64>,
    ///maximum equilibration scaling allowed
    pub equilibrate_max_scaling: Option<f64>,

    ///line search backtracking
    pub linesearch_backtrack_step: Option<f64>,
    ///minimum step size allowed for asymmetric cones with PrimalDual scaling
    pub min_switch_step_length: Option<f64>,
    ///minimum step size allowed for symmetric cones & asymmetric cones with Dual scaling
    pub min_terminate_step_length: Option<f64>,

    ///maximum solver threads for multithreaded KKT solvers.
    ///0 lets the solver choose for itself
    pub max_threads: Option<u32>,
    ///use a direct linear solver method
    pub direct_kkt_solver: Option<bool>,
    ///direct linear solver method
    pub direct_solve_method: Option<DirectSolveMethod>,

    ///enable KKT static regularization
    pub static_regularization_enable: Option<bool>,
    ///KKT static regularization parameter
    pub static_regularization_constant: Option<f64>,
    ///additional regularization parameter w.r.t. the maximum abs diagonal term
    pub static_regularization_proportional: Option<f64>,

    ///enable KKT dynamic regularization
    pub dynamic_regularization_enable: Option<bool>,
    ///KKT dynamic regularization threshold
    pub dynamic_regularization_eps: Option<f64>,
    ///KKT dynamic regularization shift
    pub dynamic_regularization_delta: Option<f64>,

    ///KKT direct solve with iterative refinement
    pub iterative_refinement_enable: Option<bool>,
    ///iterative refinement relative tolerance
    pub iterative_refinement_reltol: Option<f64>,
    ///iterative refinement absolute tolerance
    pub iterative_refinement_abstol: Option<f64>,
    ///iterative refinement maximum iterations
    pub iterative_refinement_max_iter: Option<u32>,
    ///iterative refinement stalling tolerance
    pub iterative_refinement_stop_ratio: Option<f64>,

    ///enable presolve constraint reduction
    pub presolve_enable: Option<bool>,
    ///explicitly drop structural zeros from sparse data inputs
    pub input_sparse_dropzeros: Option<bool>,

    /// Pardiso `iparm` parameter array.  Only forwarded when the solver is
    /// built with one of the Pardiso features.
    #[builder(setter(into, strip_option))]
    pub pardiso_iparm: Option<PardisoIparm>,
    /// enable pardiso verbose output
    pub pardiso_verbose: Option<bool>,
}

fn is_positive<T: PartialOrd + Zero>(v: T) -> bool {
    // false for NaN
    v > T::zero()
}

macro_rules! check_positive {
    ($settings:expr, $($field:ident),+ $(,)?) => {
        $(
            if matches!($settings.$field, Some(v) if !is_positive(v)) {
                return Err(SettingsError::NonPositive(stringify!($field)));
            }
        )+
    };
}

macro_rules! overlay {
    ($ffi:expr, $($field:ident),+ $(,)?) => {
        $(
            if let Some(v) = $field {
                $ffi.$field = *v;
            }
        )+
    };
}

impl SolverSettingsBuilder {
    /// Builds the settings, checking every field that is present.
    pub fn build(&self) -> Result<SolverSettings, SettingsError> {
        let settings = self.fallible_build()?;
        settings.validate()?;
        Ok(settings)
    }
}

impl SolverSettings {
    /// Checks that every numeric setting present is strictly positive.
    /// `max_threads` may be zero.
    pub fn validate(&self) -> Result<(), SettingsError> {
        check_positive!(
            self,
            max_iter,
            time_limit,
            max_step_fraction,
            tol_gap_abs,
            tol_gap_rel,
            tol_feas,
            tol_infeas_abs,
            tol_infeas_rel,
            tol_ktratio,
            reduced_tol_gap_abs,
            reduced_tol_gap_rel,
            reduced_tol_feas,
            reduced_tol_infeas_abs,
            reduced_tol_infeas_rel,
            reduced_tol_ktratio,
            equilibrate_max_iter,
            equilibrate_min_scaling,
            equilibrate_max_scaling,
            linesearch_backtrack_step,
            min_switch_step_length,
            min_terminate_step_length,
            static_regularization_constant,
            static_regularization_proportional,
            dynamic_regularization_eps,
            dynamic_regularization_delta,
            iterative_refinement_reltol,
            iterative_refinement_abstol,
            iterative_refinement_max_iter,
            iterative_refinement_stop_ratio,
        );
        Ok(())
    }

    /// Overwrites each slot of `ffi` for which a value is present.
    pub fn apply(&self, ffi: &mut DefaultSettingsFFI) {
        // exhaustive, so that a new field cannot be silently skipped
        let SolverSettings {
            max_iter,
            time_limit,
            verbose,
            max_step_fraction,
            tol_gap_abs,
            tol_gap_rel,
            tol_feas,
            tol_infeas_abs,
            tol_infeas_rel,
            tol_ktratio,
            reduced_tol_gap_abs,
            reduced_tol_gap_rel,
            reduced_tol_feas,
            reduced_tol_infeas_abs,
            reduced_tol_infeas_rel,
            reduced_tol_ktratio,
            equilibrate_enable,
            equilibrate_max_iter,
            equilibrate_min_scaling,
            equilibrate_max_scaling,
            linesearch_backtrack_step,
            min_switch_step_length,
            min_terminate_step_length,
            max_threads,
            direct_kkt_solver,
            direct_solve_method,
            static_regularization_enable,
            static_regularization_constant,
            static_regularization_proportional,
            dynamic_regularization_enable,
            dynamic_regularization_eps,
            dynamic_regularization_delta,
            iterative_refinement_enable,
            iterative_refinement_reltol,
            iterative_refinement_abstol,
            iterative_refinement_max_iter,
            iterative_refinement_stop_ratio,
            presolve_enable,
            input_sparse_dropzeros,
            pardiso_iparm,
            pardiso_verbose,
        } = self;

        overlay!(
            ffi,
            max_iter,
            time_limit,
            verbose,
            max_step_fraction,
            tol_gap_abs,
            tol_gap_rel,
            tol_feas,
            tol_infeas_abs,
            tol_infeas_rel,
            tol_ktratio,
            reduced_tol_gap_abs,
            reduced_tol_gap_rel,
            reduced_tol_feas,
            reduced_tol_infeas_abs,
            reduced_tol_infeas_rel,
            reduced_tol_ktratio,
            equilibrate_enable,
            equilibrate_max_iter,
            equilibrate_min_scaling,
            equilibrate_max_scaling,
            linesearch_backtrack_step,
            min_switch_step_length,
            min_terminate_step_length,
            max_threads,
            direct_kkt_solver,
            static_regularization_enable,
            static_regularization_constant,
            static_regularization_proportional,
            dynamic_regularization_enable,
            dynamic_regularization_eps,
            dynamic_regularization_delta,
            iterative_refinement_enable,
            iterative_refinement_reltol,
            iterative_refinement_abstol,
            iterative_refinement_max_iter,
            iterative_refinement_stop_ratio,
            presolve_enable,
            input_sparse_dropzeros,
            pardiso_verbose,
        );

        if let Some(method) = direct_solve_method {
            ffi.direct_solve_method = *method as u32;
        }
        if let Some(iparm) = pardiso_iparm {
            ffi.pardiso_iparm = iparm.0;
        }
    }
}

#[cfg(feature = "serde")]
impl SolverSettings {
    /// Reads a settings overlay from JSON.  Absent fields stay absent.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: SolverSettings =
            serde_json::from_str(json).map_err(|e| SettingsError::Json(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Writes the settings overlay as JSON
    pub fn to_json(&self) -> Result<String, SettingsError> {
        serde_json::to_string(self).map_err(|e| SettingsError::Json(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_fields() -> SolverSettingsBuilder {
        let mut builder = SolverSettingsBuilder::default();
        builder
            .max_iter(100)
            .time_limit(10.)
            .verbose(false)
            .max_step_fraction(0.98)
            .tol_gap_abs(1e-7)
            .tol_gap_rel(1e-7)
            .tol_feas(1e-7)
            .tol_infeas_abs(1e-7)
            .tol_infeas_rel(1e-7)
            .tol_ktratio(1e-5)
            .reduced_tol_gap_abs(1e-4)
            .reduced_tol_gap_rel(1e-4)
            .reduced_tol_feas(1e-3)
            .reduced_tol_infeas_abs(1e-11)
            .reduced_tol_infeas_rel(1e-4)
            .reduced_tol_ktratio(1e-3)
            .equilibrate_enable(true)
            .equilibrate_max_iter(5)
            .equilibrate_min_scaling(1e-3)
            .equilibrate_max_scaling(1e3)
            .linesearch_backtrack_step(0.7)
            .min_switch_step_length(0.2)
            .min_terminate_step_length(1e-3)
            .max_threads(0)
            .direct_kkt_solver(true)
            .direct_solve_method(DirectSolveMethod::Qdldl)
            .static_regularization_enable(true)
            .static_regularization_constant(1e-7)
            .static_regularization_proportional(1e-30)
            .dynamic_regularization_enable(true)
            .dynamic_regularization_eps(1e-12)
            .dynamic_regularization_delta(1e-6)
            .iterative_refinement_enable(true)
            .iterative_refinement_reltol(1e-12)
            .iterative_refinement_abstol(1e-11)
            .iterative_refinement_max_iter(5)
            .iterative_refinement_stop_ratio(4.)
            .presolve_enable(false)
            .input_sparse_dropzeros(true)
            .pardiso_iparm([i32::MIN; 64])
            .pardiso_verbose(false);
        builder
    }

    #[test]
    fn test_settings_build() {
        let settings = SolverSettingsBuilder::default().build().unwrap();
        assert_eq!(settings, SolverSettings::default());

        let settings = all_fields().build().unwrap();
        assert_eq!(settings.max_iter, Some(100));
        assert_eq!(settings.max_threads, Some(0));
        assert_eq!(settings.direct_solve_method, Some(DirectSolveMethod::Qdldl));
        assert_eq!(settings.pardiso_iparm, Some(PardisoIparm([i32::MIN; 64])));
    }

    #[test]
    fn test_settings_non_positive() {
        let cases: Vec<(&str, SolverSettingsBuilder)> = vec![
            ("max_iter", all_fields().max_iter(0).clone()),
            ("time_limit", all_fields().time_limit(0.).clone()),
            ("tol_gap_abs", all_fields().tol_gap_abs(-1e-8).clone()),
            ("tol_ktratio", all_fields().tol_ktratio(f64::NAN).clone()),
            (
                "reduced_tol_infeas_abs",
                all_fields().reduced_tol_infeas_abs(0.).clone(),
            ),
            (
                "equilibrate_max_iter",
                all_fields().equilibrate_max_iter(0).clone(),
            ),
            (
                "min_terminate_step_length",
                all_fields().min_terminate_step_length(-0.1).clone(),
            ),
            (
                "static_regularization_proportional",
                all_fields().static_regularization_proportional(0.).clone(),
            ),
            (
                "dynamic_regularization_delta",
                all_fields().dynamic_regularization_delta(-2e-7).clone(),
            ),
            (
                "iterative_refinement_stop_ratio",
                all_fields().iterative_refinement_stop_ratio(0.).clone(),
            ),
        ];

        for (field, builder) in cases {
            assert_eq!(builder.build(), Err(SettingsError::NonPositive(field)));
        }
    }

    #[test]
    fn test_settings_validate_direct() {
        let settings = SolverSettings {
            max_step_fraction: Some(-0.5),
            ..SolverSettings::default()
        };
        assert_eq!(
            settings.validate(),
            Err(SettingsError::NonPositive("max_step_fraction"))
        );
    }

    #[test]
    fn test_settings_overlay() {
        let defaults = DefaultSettingsFFI {
            max_iter: 200,
            tol_gap_abs: 1e-8,
            verbose: true,
            direct_solve_method: DirectSolveMethod::Auto as u32,
            ..DefaultSettingsFFI::default()
        };

        // nothing present, nothing written
        let mut ffi = defaults.clone();
        SolverSettings::default().apply(&mut ffi);
        assert_eq!(ffi, defaults);

        let settings = SolverSettingsBuilder::default()
            .max_iter(10)
            .verbose(false)
            .direct_solve_method(DirectSolveMethod::Qdldl)
            .build()
            .unwrap();
        let mut ffi = defaults.clone();
        settings.apply(&mut ffi);
        assert_eq!(ffi.max_iter, 10);
        assert!(!ffi.verbose);
        assert_eq!(ffi.direct_solve_method, 1);
        assert_eq!(ffi.tol_gap_abs, 1e-8);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_settings_json() {
        let settings = SolverSettings::from_json(r#"{"max_iter": 20, "direct_solve_method": "qdldl"}"#)
            .unwrap();
        assert_eq!(settings.max_iter, Some(20));
        assert_eq!(settings.direct_solve_method, Some(DirectSolveMethod::Qdldl));
        assert_eq!(settings.tol_feas, None);

        let settings = all_fields().build().unwrap();
        let json = settings.to_json().unwrap();
        assert_eq!(SolverSettings::from_json(&json).unwrap(), settings);

        assert_eq!(
            SolverSettings::from_json(r#"{"tol_feas": 0.0}"#),
            Err(SettingsError::NonPositive("tol_feas"))
        );
        assert!(matches!(
            SolverSettings::from_json(r#"{"max_iters": 20}"#),
            Err(SettingsError::Json(_))
        ));
    }
}
