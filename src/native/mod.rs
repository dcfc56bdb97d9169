//! The native solver boundary.
//!
//! [`NativeSolver`] names the operations the model needs from a solver that
//! only speaks the `#[repr(C)]` types in [`ffi`](crate::ffi).  [`ClarabelSolver`]
//! implements it on top of the `clarabel` crate.

mod clarabel;
pub use self::clarabel::*;

use crate::ffi::*;
use std::ffi::{c_void, CStr};
use std::marker::PhantomData;
use std::ptr::NonNull;

/// Opaque pointer to a solver instance owned by a [`NativeSolver`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverHandle(pub NonNull<c_void>);

/// Operations of a solver reached through raw pointers.
///
/// All methods taking a [`SolverHandle`] require a handle returned by
/// [`NativeSolver::new`] of the same implementation that has not yet been
/// passed to [`NativeSolver::free`].
pub trait NativeSolver {
    /// The solver's default settings block
    fn default_settings() -> DefaultSettingsFFI;

    /// Builds a solver instance from the problem data.
    ///
    /// # Safety
    /// Every pointer must reference arena memory laid out as described by
    /// the `ffi` types, with `cones` holding `n_cones` entries, and dimensions
    /// consistent across `P`, `q`, `A`, `b` and the cones.
    #[allow(clippy::too_many_arguments)]
    unsafe fn new(
        P: *const CscMatrixFFI,
        q: *const f64,
        A: *const CscMatrixFFI,
        b: *const f64,
        n_cones: usize,
        cones: *const SupportedConeFFI,
        settings: *const DefaultSettingsFFI,
    ) -> Result<SolverHandle, String>;

    /// Runs the solver to termination
    ///
    /// # Safety
    /// `handle` must be live.
    unsafe fn solve(handle: SolverHandle);

    /// The solution block of the last solve
    ///
    /// # Safety
    /// `handle` must be live.
    unsafe fn solution(handle: SolverHandle) -> DefaultSolutionFFI;

    /// The information block of the last solve
    ///
    /// # Safety
    /// `handle` must be live.
    unsafe fn info(handle: SolverHandle) -> DefaultInfoFFI;

    /// Releases the solver instance
    ///
    /// # Safety
    /// `handle` must be live, and is dangling afterwards.
    unsafe fn free(handle: SolverHandle);

    /// # Safety
    /// `handle` must be live.
    unsafe fn print_to_stdout(handle: SolverHandle);

    /// # Safety
    /// `handle` must be live.
    unsafe fn print_to_buffer(handle: SolverHandle);

    /// # Safety
    /// `handle` must be live.
    unsafe fn print_to_file(handle: SolverHandle, path: &CStr) -> std::io::Result<()>;

    /// Contents of the print buffer.  Fails unless the solver prints to a buffer.
    ///
    /// # Safety
    /// `handle` must be live.
    unsafe fn get_print_buffer(handle: SolverHandle) -> std::io::Result<String>;
}

/// Frees the solver handle on drop
#[derive(Debug)]
pub(crate) struct HandleGuard<B: NativeSolver> {
    handle: SolverHandle,
    _backend: PhantomData<B>,
}

impl<B: NativeSolver> HandleGuard<B> {
    /// # Safety
    /// `handle` must be live and owned by nobody else.
    pub(crate) unsafe fn new(handle: SolverHandle) -> Self {
        Self {
            handle,
            _backend: PhantomData,
        }
    }

    pub(crate) fn handle(&self) -> SolverHandle {
        self.handle
    }
}

impl<B: NativeSolver> Drop for HandleGuard<B> {
    fn drop(&mut self) {
        unsafe { B::free(self.handle) }
    }
}
