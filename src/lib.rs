//! __clarabel-model__ is a validated problem model for the
//! [Clarabel](https://clarabel.org) interior point solver.  It solves problems of the form
//!
//! $$
//! \begin{array}{rl}
//! \text{minimize} & \frac{1}{2}x^T P x + q^T x\\\\\[2ex\]
//!  \text{subject to} & Ax + s = b \\\\\[1ex\]
//!         & s \in \mathcal{K}
//!  \end{array}
//! $$
//!
//! where the convex set $\mathcal{K}$ is a composition of zero, nonnegative, second-order,
//! exponential, power and generalized power cones.
//!
//! The crate does not implement any part of the interior point method.  It owns the
//! contract in front of the solver:
//!
//! * [`SparseMatrix`](crate::algebra::SparseMatrix) checks the CSC format on construction,
//! * [`SupportedCone`](crate::cones::SupportedCone) describes a cone and its dimension,
//! * [`SolverSettings`](crate::settings::SolverSettings) overlays explicit options on the
//!   solver defaults,
//! * [`Model`](crate::model::Model) validates the problem, marshals it into the solver's
//!   `#[repr(C)]` layout inside a [`NativeArena`](crate::ffi::NativeArena), drives the
//!   solver lifecycle and exposes the solution.
//!
//! __Example usage__ : the linear program
//! ```no_run
//! use clarabel_model::prelude::*;
//!
//! let q = vec![1., -1.];
//! let A = SparseMatrix::new(
//!     4,
//!     2,
//!     vec![0, 2, 4],
//!     vec![0, 2, 1, 3],
//!     vec![1., -1., 1., -1.],
//! )
//! .unwrap();
//! let b = vec![1.; 4];
//! let cones = vec![SupportedCone::nonnegative(4).unwrap()];
//!
//! let settings = SolverSettingsBuilder::default().verbose(false).build().unwrap();
//!
//! let mut model = Model::new();
//! model.set_settings(settings).unwrap();
//! model.setup_linear(&q, &A, &b, &cones).unwrap();
//!
//! let status = model.optimize().unwrap();
//! assert_eq!(status, SolverStatus::Solved);
//! println!("x = {:?}", model.x().unwrap());
//! ```
//!
//! # License
//!
//! Licensed under Apache License, Version 2.0.

#![allow(non_snake_case)]

pub mod algebra;
pub mod cones;
pub mod ffi;
pub mod model;
pub mod native;
pub mod settings;

pub use ffi::{DirectSolveMethod, SolverStatus};

/// Commonly used types, flattened for a single `use`
pub mod prelude {
    pub use crate::algebra::{SparseFormatError, SparseMatrix};
    pub use crate::cones::{ConeError, SupportedCone, SupportedCone::*, SupportedConeTag};
    pub use crate::ffi::{DirectSolveMethod, SolverStatus};
    pub use crate::model::{Model, ModelError, Output, ProblemDataError, Stage, ValidationError};
    pub use crate::native::{ClarabelSolver, NativeSolver};
    pub use crate::settings::{SettingsError, SolverSettings, SolverSettingsBuilder};
}
