use super::{NativeSolver, SolverHandle};
use crate::ffi::*;
use ::clarabel::algebra::CscMatrix;
use ::clarabel::io::ConfigurablePrintTarget;
use ::clarabel::solver::{
    DefaultSettings, DefaultSolver, IPSolver, SupportedConeT, SupportedConeT::*,
};
use std::ffi::{c_void, CStr};
use std::ptr::NonNull;

/// [`NativeSolver`] backed by the `clarabel` crate's `DefaultSolver<f64>`
#[derive(Debug, Clone, Copy, Default)]
pub struct ClarabelSolver;

// functions for converting solver to / from handles

fn to_handle(solver: Box<DefaultSolver<f64>>) -> SolverHandle {
    let ptr = Box::into_raw(solver) as *mut c_void;
    // Box::into_raw never returns null
    SolverHandle(unsafe { NonNull::new_unchecked(ptr) })
}

unsafe fn from_handle<'a>(handle: SolverHandle) -> &'a mut DefaultSolver<f64> {
    &mut *(handle.0.as_ptr() as *mut DefaultSolver<f64>)
}

// settings fields with the same type on both sides of the boundary.
// Some kind of procedural macro would be nice here.

macro_rules! for_common_settings {
    ($mac:ident, $dst:expr, $src:expr) => {
        $mac!(
            $dst,
            $src,
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
            input_sparse_dropzeros
        )
    };
}

macro_rules! copy_fields {
    ($dst:expr, $src:expr, $($field:ident),+) => {
        $( $dst.$field = $src.$field; )+
    };
}

fn settings_to_ffi(settings: &DefaultSettings<f64>) -> DefaultSettingsFFI {
    let mut ffi = DefaultSettingsFFI::default();
    for_common_settings!(copy_fields, ffi, settings);

    // an unknown name leaves the solver to choose
    ffi.direct_solve_method = settings
        .direct_solve_method
        .parse::<DirectSolveMethod>()
        .unwrap_or_default() as u32;

    cfg_if::cfg_if! {
        if #[cfg(any(feature = "pardiso-mkl", feature = "pardiso-panua"))] {
            ffi.pardiso_iparm = settings.pardiso_iparm;
            ffi.pardiso_verbose = settings.pardiso_verbose;
        }
    }
    ffi
}

fn settings_from_ffi(ffi: &DefaultSettingsFFI) -> DefaultSettings<f64> {
    let mut settings = DefaultSettings::<f64>::default();
    for_common_settings!(copy_fields, settings, ffi);

    settings.direct_solve_method = DirectSolveMethod::from_ffi(ffi.direct_solve_method)
        .as_str()
        .to_string();

    cfg_if::cfg_if! {
        if #[cfg(any(feature = "pardiso-mkl", feature = "pardiso-panua"))] {
            settings.pardiso_iparm = ffi.pardiso_iparm;
            settings.pardiso_verbose = ffi.pardiso_verbose;
        }
    }
    settings
}

unsafe fn matrix_from_ffi(M: &CscMatrixFFI) -> CscMatrix<f64> {
    let (colptr, rowval, nzval) = M.parts();
    CscMatrix::new(M.m, M.n, colptr.to_vec(), rowval.to_vec(), nzval.to_vec())
}

unsafe fn cone_from_ffi(cone: &SupportedConeFFI) -> SupportedConeT<f64> {
    match *cone {
        SupportedConeFFI::ZeroConeT(n) => ZeroConeT(n),
        SupportedConeFFI::NonnegativeConeT(n) => NonnegativeConeT(n),
        SupportedConeFFI::SecondOrderConeT(n) => SecondOrderConeT(n),
        SupportedConeFFI::ExponentialConeT => ExponentialConeT(),
        SupportedConeFFI::PowerConeT(a) => PowerConeT(a),
        SupportedConeFFI::GenPowerConeT { alpha, dim1, dim2 } => {
            GenPowerConeT(slice_from_raw(alpha, dim1).to_vec(), dim2)
        }
    }
}

impl NativeSolver for ClarabelSolver {
    fn default_settings() -> DefaultSettingsFFI {
        settings_to_ffi(&DefaultSettings::default())
    }

    unsafe fn new(
        P: *const CscMatrixFFI,
        q: *const f64,
        A: *const CscMatrixFFI,
        b: *const f64,
        n_cones: usize,
        cones: *const SupportedConeFFI,
        settings: *const DefaultSettingsFFI,
    ) -> Result<SolverHandle, String> {
        let P = matrix_from_ffi(&*P);
        let A = matrix_from_ffi(&*A);
        let q = slice_from_raw(q, P.n);
        let b = slice_from_raw(b, A.m);
        let cones: Vec<SupportedConeT<f64>> = slice_from_raw(cones, n_cones)
            .iter()
            .map(|cone| cone_from_ffi(cone))
            .collect();
        let settings = settings_from_ffi(&*settings);

        let solver =
            DefaultSolver::new(&P, q, &A, b, &cones, settings).map_err(|e| e.to_string())?;
        Ok(to_handle(Box::new(solver)))
    }

    unsafe fn solve(handle: SolverHandle) {
        from_handle(handle).solve();
    }

    unsafe fn solution(handle: SolverHandle) -> DefaultSolutionFFI {
        let solution = &from_handle(handle).solution;
        DefaultSolutionFFI {
            x: solution.x.as_ptr(),
            x_length: solution.x.len(),
            z: solution.z.as_ptr(),
            z_length: solution.z.len(),
            s: solution.s.as_ptr(),
            s_length: solution.s.len(),
            status: solution.status as u32,
            obj_val: solution.obj_val,
            obj_val_dual: solution.obj_val_dual,
            solve_time: solution.solve_time,
            iterations: solution.iterations,
            r_prim: solution.r_prim,
            r_dual: solution.r_dual,
        }
    }

    unsafe fn info(handle: SolverHandle) -> DefaultInfoFFI {
        let info = &from_handle(handle).info;
        let linsolver = &info.linsolver;
        DefaultInfoFFI {
            mu: info.mu,
            sigma: info.sigma,
            step_length: info.step_length,
            iterations: info.iterations,
            cost_primal: info.cost_primal,
            cost_dual: info.cost_dual,
            res_primal: info.res_primal,
            res_dual: info.res_dual,
            res_primal_inf: info.res_primal_inf,
            res_dual_inf: info.res_dual_inf,
            gap_abs: info.gap_abs,
            gap_rel: info.gap_rel,
            ktratio: info.ktratio,
            solve_time: info.solve_time,
            status: info.status as u32,
            linsolver: LinearSolverInfoFFI {
                // an unnamed linear solver maps to an out-of-range discriminant
                name: linsolver
                    .name
                    .parse::<DirectSolveMethod>()
                    .map_or(u32::MAX, |method| method as u32),
                threads: linsolver.threads as u32,
                direct: linsolver.direct,
                nnzA: linsolver.nnzA as u32,
                nnzL: linsolver.nnzL as u32,
            },
        }
    }

    unsafe fn free(handle: SolverHandle) {
        drop(Box::from_raw(
            handle.0.as_ptr() as *mut DefaultSolver<f64>
        ));
    }

    unsafe fn print_to_stdout(handle: SolverHandle) {
        from_handle(handle).print_to_stdout();
    }

    unsafe fn print_to_buffer(handle: SolverHandle) {
        from_handle(handle).print_to_buffer();
    }

    unsafe fn print_to_file(handle: SolverHandle, path: &CStr) -> std::io::Result<()> {
        let path = path
            .to_str()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
        let file = std::fs::File::create(path)?;
        from_handle(handle).print_to_file(file);
        Ok(())
    }

    unsafe fn get_print_buffer(handle: SolverHandle) -> std::io::Result<String> {
        from_handle(handle).get_print_buffer()
    }
}
