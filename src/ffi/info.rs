/// Wire form of the solution block.  The `x`, `z` and `s` arrays belong to
/// the solver and stay valid until the next solve or until the solver is freed.
#[allow(missing_docs)]
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct DefaultSolutionFFI {
    pub x: *const f64,
    pub x_length: usize,
    pub z: *const f64,
    pub z_length: usize,
    pub s: *const f64,
    pub s_length: usize,
    /// raw [`SolverStatus`](super::SolverStatus) discriminant
    pub status: u32,
    pub obj_val: f64,
    pub obj_val_dual: f64,
    pub solve_time: f64,
    pub iterations: u32,
    pub r_prim: f64,
    pub r_dual: f64,
}

/// Wire form of the linear solver summary
#[allow(missing_docs)]
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinearSolverInfoFFI {
    /// raw [`DirectSolveMethod`](super::DirectSolveMethod) discriminant
    pub name: u32,
    pub threads: u32,
    pub direct: bool,
    pub nnzA: u32,
    pub nnzL: u32,
}

/// Wire form of the solver information block
#[repr(C)]
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy)]
pub struct DefaultInfoFFI {
    pub mu: f64,
    pub sigma: f64,
    pub step_length: f64,
    pub iterations: u32,
    pub cost_primal: f64,
    pub cost_dual: f64,
    pub res_primal: f64,
    pub res_dual: f64,
    pub res_primal_inf: f64,
    pub res_dual_inf: f64,
    pub gap_abs: f64,
    pub gap_rel: f64,
    pub ktratio: f64,

    pub solve_time: f64,
    /// raw [`SolverStatus`](super::SolverStatus) discriminant
    pub status: u32,
    pub linsolver: LinearSolverInfoFFI,
}
