/// Wire form of the solver settings block, one slot per tunable.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq)]
#[repr(C)]
pub struct DefaultSettingsFFI {
    // Main algorithm settings
    pub max_iter: u32,
    pub time_limit: f64,
    pub verbose: bool,
    pub max_step_fraction: f64,

    // Full accuracy settings
    pub tol_gap_abs: f64,
    pub tol_gap_rel: f64,
    pub tol_feas: f64,
    pub tol_infeas_abs: f64,
    pub tol_infeas_rel: f64,
    pub tol_ktratio: f64,

    // Reduced accuracy settings
    pub reduced_tol_gap_abs: f64,
    pub reduced_tol_gap_rel: f64,
    pub reduced_tol_feas: f64,
    pub reduced_tol_infeas_abs: f64,
    pub reduced_tol_infeas_rel: f64,
    pub reduced_tol_ktratio: f64,

    // data equilibration settings
    pub equilibrate_enable: bool,
    pub equilibrate_max_iter: u32,
    pub equilibrate_min_scaling: f64,
    pub equilibrate_max_scaling: f64,

    // Step size settings
    pub linesearch_backtrack_step: f64,
    pub min_switch_step_length: f64,
    pub min_terminate_step_length: f64,

    // Linear solver settings
    pub max_threads: u32,
    pub direct_kkt_solver: bool,
    /// raw [`DirectSolveMethod`](super::DirectSolveMethod) discriminant
    pub direct_solve_method: u32,

    // static regularization parameters
    pub static_regularization_enable: bool,
    pub static_regularization_constant: f64,
    pub static_regularization_proportional: f64,

    // dynamic regularization parameters
    pub dynamic_regularization_enable: bool,
    pub dynamic_regularization_eps: f64,
    pub dynamic_regularization_delta: f64,

    // iterative refinement (for direct solves)
    pub iterative_refinement_enable: bool,
    pub iterative_refinement_reltol: f64,
    pub iterative_refinement_abstol: f64,
    pub iterative_refinement_max_iter: u32,
    pub iterative_refinement_stop_ratio: f64,

    // preprocessing
    pub presolve_enable: bool,
    pub input_sparse_dropzeros: bool,

    //pardiso settings
    pub pardiso_iparm: [i32; 64],
    pub pardiso_verbose: bool,
}

/// An all-zero block with an unset Pardiso `iparm`.  The solver's real
/// defaults come from [`NativeSolver::default_settings`](crate::native::NativeSolver::default_settings).
impl Default for DefaultSettingsFFI {
    fn default() -> Self {
        Self {
            max_iter: 0,
            time_limit: 0.,
            verbose: false,
            max_step_fraction: 0.,
            tol_gap_abs: 0.,
            tol_gap_rel: 0.,
            tol_feas: 0.,
            tol_infeas_abs: 0.,
            tol_infeas_rel: 0.,
            tol_ktratio: 0.,
            reduced_tol_gap_abs: 0.,
            reduced_tol_gap_rel: 0.,
            reduced_tol_feas: 0.,
            reduced_tol_infeas_abs: 0.,
            reduced_tol_infeas_rel: 0.,
            reduced_tol_ktratio: 0.,
            equilibrate_enable: false,
            equilibrate_max_iter: 0,
            equilibrate_min_scaling: 0.,
            equilibrate_max_scaling: 0.,
            linesearch_backtrack_step: 0.,
            min_switch_step_length: 0.,
            min_terminate_step_length: 0.,
            max_threads: 0,
            direct_kkt_solver: false,
            direct_solve_method: 0,
            static_regularization_enable: false,
            static_regularization_constant: 0.,
            static_regularization_proportional: 0.,
            dynamic_regularization_enable: false,
            dynamic_regularization_eps: 0.,
            dynamic_regularization_delta: 0.,
            iterative_refinement_enable: false,
            iterative_refinement_reltol: 0.,
            iterative_refinement_abstol: 0.,
            iterative_refinement_max_iter: 0,
            iterative_refinement_stop_ratio: 0.,
            presolve_enable: false,
            input_sparse_dropzeros: false,
            pardiso_iparm: [i32::MIN; 64],
            pardiso_verbose: false,
        }
    }
}
