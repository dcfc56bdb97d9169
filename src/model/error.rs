use super::Stage;
use crate::algebra::SparseFormatError;
use crate::cones::ConeError;
use crate::settings::SettingsError;
use thiserror::Error;

/// Inconsistent or incomplete problem data passed to `setup`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProblemDataError {
    #[error("P or A must be supplied")]
    MissingPAndA,
    #[error("A, b and cones must be supplied together or omitted together")]
    IncompleteConstraints,
    #[error("problem must have at least one variable")]
    EmptyProblem,
    #[error("P must be a square matrix, got {m} x {n}")]
    NonSquareP { m: usize, n: usize },
    #[error("q must not be empty")]
    EmptyQ,
    #[error("b must not be empty")]
    EmptyB,
    #[error("cones must not be empty")]
    EmptyCones,
    #[error("number of columns of P ({p}) must be equal to the length of q ({q})")]
    PQMismatch { p: usize, q: usize },
    #[error("number of columns of P ({p}) must be equal to the number of columns of A ({a})")]
    PAMismatch { p: usize, a: usize },
    #[error("length of q ({q}) must be equal to the number of columns of A ({a})")]
    QAMismatch { q: usize, a: usize },
    #[error("number of rows of A ({a}) must be equal to the length of b ({b})")]
    ABMismatch { a: usize, b: usize },
    #[error("number of rows of A ({a}) must be equal to the dimension of the cones ({cones})")]
    AConesMismatch { a: usize, cones: usize },
    #[error("total dimension of the cones overflows")]
    ConeDimensionOverflow,
}

/// Caller-fixable errors raised before any native call
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("bad matrix: {0}")]
    Matrix(#[from] SparseFormatError),
    #[error("bad cone: {0}")]
    Cone(#[from] ConeError),
    #[error("bad settings: {0}")]
    Settings(#[from] SettingsError),
    #[error("bad problem data: {0}")]
    Problem(#[from] ProblemDataError),
}

/// Error type returned by [`Model`](super::Model) operations
#[derive(Error, Debug)]
pub enum ModelError {
    /// Operation not allowed in the current lifecycle stage
    #[error("{operation} is not allowed in stage {stage}")]
    InvalidState {
        operation: &'static str,
        stage: Stage,
    },
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The native side refused to build a solver
    #[error("solver rejected the problem: {0}")]
    SolverRejected(String),
    #[error("solver output error: {0}")]
    Output(#[from] std::io::Error),
    #[error("output path is not representable as a C string")]
    BadOutputPath,
    #[error("solver output is not printed to a buffer")]
    OutputNotBuffered,
}

macro_rules! impl_from_validation {
    ($($err:ty),+) => {
        $(
            impl From<$err> for ModelError {
                fn from(e: $err) -> Self {
                    ModelError::Validation(e.into())
                }
            }
        )+
    };
}

impl_from_validation!(SparseFormatError, ConeError, SettingsError, ProblemDataError);
