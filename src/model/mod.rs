//! The problem model and its solver lifecycle.

mod error;
mod output;
mod problem;

pub use error::*;
pub use output::*;

use crate::algebra::SparseMatrix;
use crate::cones::SupportedCone;
use crate::ffi::*;
use crate::native::{ClarabelSolver, HandleGuard, NativeSolver};
use crate::settings::SolverSettings;
use problem::check_problem;
use tracing::{debug, warn};

/// Lifecycle stage of a [`Model`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// no solver exists
    New,
    /// a solver has been built from the problem data
    Setup,
    /// the solver has run and results are available
    Optimized,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

enum State<B: NativeSolver> {
    New,
    Setup(HandleGuard<B>),
    Optimized {
        guard: HandleGuard<B>,
        solution: DefaultSolutionFFI,
        info: DefaultInfoFFI,
    },
}

/// A conic problem
///
/// $$
/// \begin{array}{rl}
/// \text{minimize} & \frac{1}{2}x^T P x + q^T x\\\\\[2ex\]
///  \text{subject to} & Ax + s = b \\\\\[1ex\]
///         & s \in \mathcal{K}
///  \end{array}
/// $$
///
/// solved by a [`NativeSolver`].
///
/// A model moves through the stages New → Setup → Optimized, and back to
/// New with [`Model::cleanup`].  Operations called in the wrong stage fail
/// with [`ModelError::InvalidState`].  Dropping the model releases the solver
/// and every buffer handed to it.
pub struct Model<B: NativeSolver = ClarabelSolver> {
    // declared before the arena, so the solver is freed before the
    // buffers it was built from
    state: State<B>,
    settings: SolverSettings,
    output: Output,
    arena: NativeArena,
}

impl Model<ClarabelSolver> {
    /// A model solved by the `clarabel` crate
    pub fn new() -> Self {
        Self::with_backend()
    }
}

impl Default for Model<ClarabelSolver> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: NativeSolver> Model<B> {
    /// A model solved by the backend `B`
    pub fn with_backend() -> Self {
        Self {
            state: State::New,
            settings: SolverSettings::default(),
            output: Output::default(),
            arena: NativeArena::new(),
        }
    }

    /// current lifecycle stage
    pub fn stage(&self) -> Stage {
        match self.state {
            State::New => Stage::New,
            State::Setup(_) => Stage::Setup,
            State::Optimized { .. } => Stage::Optimized,
        }
    }

    fn require_new(&self, operation: &'static str) -> Result<(), ModelError> {
        match self.stage() {
            Stage::New => Ok(()),
            stage => Err(ModelError::InvalidState { operation, stage }),
        }
    }

    /// Sets the solver options used by the next setup
    pub fn set_settings(&mut self, settings: SolverSettings) -> Result<(), ModelError> {
        self.require_new("set_settings")?;
        settings.validate()?;
        self.settings = settings;
        Ok(())
    }

    /// solver options used by the next setup
    pub fn settings(&self) -> &SolverSettings {
        &self.settings
    }

    /// Sets where the solver prints its progress
    pub fn set_output(&mut self, output: Output) -> Result<(), ModelError> {
        self.require_new("set_output")?;
        self.output = output;
        Ok(())
    }

    /// Sets up the problem.
    ///
    /// Omitted data is treated as follows: P and q are zero, and omitting
    /// A, b and cones (all three together) leaves the problem unconstrained.
    /// At least one of P and A must be supplied.  Only the upper triangle of
    /// P is read by the solver.
    pub fn setup(
        &mut self,
        P: Option<&SparseMatrix>,
        q: Option<&[f64]>,
        A: Option<&SparseMatrix>,
        b: Option<&[f64]>,
        cones: Option<&[SupportedCone]>,
    ) -> Result<(), ModelError> {
        self.require_new("setup")?;
        check_problem(P, q, A, b, cones)?;
        unsafe { self.setup_unchecked(P, q, A, b, cones) }
    }

    /// Same as [`Model::setup`] without quadratic cost
    pub fn setup_linear(
        &mut self,
        q: &[f64],
        A: &SparseMatrix,
        b: &[f64],
        cones: &[SupportedCone],
    ) -> Result<(), ModelError> {
        self.setup(None, Some(q), Some(A), Some(b), Some(cones))
    }

    /// Same as [`Model::setup`] without linear cost
    pub fn setup_without_linear_cost(
        &mut self,
        P: &SparseMatrix,
        A: &SparseMatrix,
        b: &[f64],
        cones: &[SupportedCone],
    ) -> Result<(), ModelError> {
        self.setup(Some(P), None, Some(A), Some(b), Some(cones))
    }

    /// Same as [`Model::setup`] without any cost
    pub fn setup_feasibility(
        &mut self,
        A: &SparseMatrix,
        b: &[f64],
        cones: &[SupportedCone],
    ) -> Result<(), ModelError> {
        self.setup(None, None, Some(A), Some(b), Some(cones))
    }

    /// Same as [`Model::setup`] without constraints
    pub fn setup_unconstrained(&mut self, P: &SparseMatrix, q: &[f64]) -> Result<(), ModelError> {
        self.setup(Some(P), Some(q), None, None, None)
    }

    /// Same as [`Model::setup`] with quadratic cost only
    pub fn setup_quadratic(&mut self, P: &SparseMatrix) -> Result<(), ModelError> {
        self.setup(Some(P), None, None, None, None)
    }

    /// Same as [`Model::setup`] without the problem data checks.
    ///
    /// # Safety
    /// The data must satisfy every condition [`Model::setup`] checks.
    /// Inconsistent dimensions make the solver read out of bounds.
    pub unsafe fn setup_unchecked(
        &mut self,
        P: Option<&SparseMatrix>,
        q: Option<&[f64]>,
        A: Option<&SparseMatrix>,
        b: Option<&[f64]>,
        cones: Option<&[SupportedCone]>,
    ) -> Result<(), ModelError> {
        self.require_new("setup")?;

        let n = P
            .or(A)
            .map(SparseMatrix::ncols)
            .unwrap_or_else(|| q.map_or(0, <[f64]>::len));
        let cones = cones.unwrap_or_default();

        if matches!(P, Some(P) if !P.is_triu()) {
            warn!(
                component = "model",
                operation = "setup",
                "P has entries below the diagonal, only the upper triangle is used"
            );
        }

        // buffers from a previous setup are no longer referenced
        self.arena.reset();

        let P_ptr = match P {
            Some(P) => self.arena.alloc_matrix(P),
            None => self.arena.alloc_matrix(&SparseMatrix::zeros((n, n))),
        };
        let q_ptr = match q {
            Some(q) => self.arena.alloc_floats(q),
            None => self.arena.alloc_zeros(n),
        };
        let A_ptr = match A {
            Some(A) => self.arena.alloc_matrix(A),
            None => self.arena.alloc_matrix(&SparseMatrix::zeros((0, n))),
        };
        let b_ptr = self.arena.alloc_floats(b.unwrap_or_default());
        let cones_ptr = self.arena.alloc_cones(cones);

        let mut settings = B::default_settings();
        self.settings.apply(&mut settings);
        let settings_ptr = self.arena.alloc_settings(settings);

        let handle = B::new(
            P_ptr,
            q_ptr,
            A_ptr,
            b_ptr,
            cones.len(),
            cones_ptr,
            settings_ptr,
        )
        .map_err(|e| {
            debug!(component = "model", operation = "setup", status = "rejected", error = %e);
            ModelError::SolverRejected(e)
        })?;
        let guard = HandleGuard::<B>::new(handle);

        match &self.output {
            Output::Stdout => B::print_to_stdout(guard.handle()),
            Output::Buffer => B::print_to_buffer(guard.handle()),
            Output::File(path) => {
                let path = path.to_str().ok_or(ModelError::BadOutputPath)?;
                let path = self
                    .arena
                    .alloc_c_string(path)
                    .map_err(|_| ModelError::BadOutputPath)?;
                B::print_to_file(guard.handle(), path)?;
            }
        }

        debug!(
            component = "model",
            operation = "setup",
            status = "success",
            n,
            m = b.map_or(0, <[f64]>::len),
            cones = cones.len(),
            arena_allocations = self.arena.len()
        );

        self.state = State::Setup(guard);
        Ok(())
    }

    /// Runs the solver and returns the termination status.
    ///
    /// Infeasible and numerical-error statuses are successful returns.
    /// Calling it again without [`Model::cleanup`] solves the same problem again.
    ///
    /// # Panics
    /// If the solver reports a status outside [`SolverStatus`].
    pub fn optimize(&mut self) -> Result<SolverStatus, ModelError> {
        let guard = match std::mem::replace(&mut self.state, State::New) {
            State::New => {
                return Err(ModelError::InvalidState {
                    operation: "optimize",
                    stage: Stage::New,
                })
            }
            State::Setup(guard) => guard,
            State::Optimized { guard, .. } => guard,
        };

        let (solution, info) = unsafe {
            B::solve(guard.handle());
            (B::solution(guard.handle()), B::info(guard.handle()))
        };
        let status = SolverStatus::from_ffi(solution.status);

        if status.is_errored() {
            warn!(
                component = "model",
                operation = "optimize",
                status = %status,
                iterations = solution.iterations,
                "solver stopped without a solution or certificate"
            );
        } else {
            debug!(
                component = "model",
                operation = "optimize",
                status = %status,
                iterations = solution.iterations,
                solve_time = solution.solve_time
            );
        }

        self.state = State::Optimized {
            guard,
            solution,
            info,
        };
        Ok(status)
    }

    /// Frees the solver.  The model returns to stage New and can be set up again.
    pub fn cleanup(&mut self) -> Result<(), ModelError> {
        if let State::New = self.state {
            return Err(ModelError::InvalidState {
                operation: "cleanup",
                stage: Stage::New,
            });
        }
        self.state = State::New;
        debug!(component = "model", operation = "cleanup", status = "success");
        Ok(())
    }

    fn results(
        &self,
        operation: &'static str,
    ) -> Result<(&DefaultSolutionFFI, &DefaultInfoFFI), ModelError> {
        match &self.state {
            State::Optimized { solution, info, .. } => Ok((solution, info)),
            _ => Err(ModelError::InvalidState {
                operation,
                stage: self.stage(),
            }),
        }
    }

    fn solution(&self, operation: &'static str) -> Result<&DefaultSolutionFFI, ModelError> {
        Ok(self.results(operation)?.0)
    }

    fn info(&self, operation: &'static str) -> Result<&DefaultInfoFFI, ModelError> {
        Ok(self.results(operation)?.1)
    }

    /// termination status of the last solve
    pub fn status(&self) -> Result<SolverStatus, ModelError> {
        Ok(SolverStatus::from_ffi(self.solution("status")?.status))
    }

    /// primal solution
    pub fn x(&self) -> Result<&[f64], ModelError> {
        let solution = self.solution("x")?;
        Ok(unsafe { slice_from_raw(solution.x, solution.x_length) })
    }

    /// dual solution (in dual cone)
    pub fn z(&self) -> Result<&[f64], ModelError> {
        let solution = self.solution("z")?;
        Ok(unsafe { slice_from_raw(solution.z, solution.z_length) })
    }

    /// vector of slacks (in primal cone)
    pub fn s(&self) -> Result<&[f64], ModelError> {
        let solution = self.solution("s")?;
        Ok(unsafe { slice_from_raw(solution.s, solution.s_length) })
    }

    /// primal objective value
    pub fn obj_val(&self) -> Result<f64, ModelError> {
        Ok(self.solution("obj_val")?.obj_val)
    }

    /// dual objective value
    pub fn obj_val_dual(&self) -> Result<f64, ModelError> {
        Ok(self.solution("obj_val_dual")?.obj_val_dual)
    }

    /// solve time in seconds
    pub fn solve_time(&self) -> Result<f64, ModelError> {
        Ok(self.solution("solve_time")?.solve_time)
    }

    /// number of iterations
    pub fn iterations(&self) -> Result<u32, ModelError> {
        Ok(self.solution("iterations")?.iterations)
    }

    /// primal residual
    pub fn r_prim(&self) -> Result<f64, ModelError> {
        Ok(self.solution("r_prim")?.r_prim)
    }

    /// dual residual
    pub fn r_dual(&self) -> Result<f64, ModelError> {
        Ok(self.solution("r_dual")?.r_dual)
    }

    /// absolute duality gap
    pub fn gap_abs(&self) -> Result<f64, ModelError> {
        Ok(self.info("gap_abs")?.gap_abs)
    }

    /// relative duality gap
    pub fn gap_rel(&self) -> Result<f64, ModelError> {
        Ok(self.info("gap_rel")?.gap_rel)
    }

    /// κ/τ ratio
    pub fn ktratio(&self) -> Result<f64, ModelError> {
        Ok(self.info("ktratio")?.ktratio)
    }

    /// linear solver used by the last solve
    ///
    /// # Panics
    /// If the solver reports a method outside [`DirectSolveMethod`].
    pub fn direct_solve_method(&self) -> Result<DirectSolveMethod, ModelError> {
        let info = self.info("direct_solve_method")?;
        Ok(DirectSolveMethod::from_ffi(info.linsolver.name))
    }

    /// threads used by the linear solver
    pub fn threads(&self) -> Result<u32, ModelError> {
        Ok(self.info("threads")?.linsolver.threads)
    }

    /// nonzeros in the KKT matrix
    pub fn nnz_a(&self) -> Result<u32, ModelError> {
        Ok(self.info("nnz_a")?.linsolver.nnzA)
    }

    /// nonzeros in the KKT factor
    pub fn nnz_l(&self) -> Result<u32, ModelError> {
        Ok(self.info("nnz_l")?.linsolver.nnzL)
    }

    /// Solver output printed so far.  Requires [`Output::Buffer`].
    pub fn print_buffer(&mut self) -> Result<String, ModelError> {
        let handle = match &self.state {
            State::Optimized { guard, .. } => guard.handle(),
            _ => {
                return Err(ModelError::InvalidState {
                    operation: "print_buffer",
                    stage: self.stage(),
                })
            }
        };
        if self.output != Output::Buffer {
            return Err(ModelError::OutputNotBuffered);
        }
        Ok(unsafe { B::get_print_buffer(handle)? })
    }
}
