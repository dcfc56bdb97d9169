use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Status of solver at termination

#[repr(u32)]
#[derive(PartialEq, Eq, Clone, Debug, Copy, FromPrimitive)]
pub enum SolverStatus {
    /// Problem is not solved (solver hasn't run).
    Unsolved = 0,
    /// Solver terminated with a solution.
    Solved = 1,
    /// Problem is primal infeasible.  Solution returned is a certificate of primal infeasibility.
    PrimalInfeasible = 2,
    /// Problem is dual infeasible.  Solution returned is a certificate of dual infeasibility.
    DualInfeasible = 3,
    /// Solver terminated with a solution (reduced accuracy)
    AlmostSolved = 4,
    /// Problem is primal infeasible.  Solution returned is a certificate of primal infeasibility (reduced accuracy).
    AlmostPrimalInfeasible = 5,
    /// Problem is dual infeasible.  Solution returned is a certificate of dual infeasibility (reduced accuracy).
    AlmostDualInfeasible = 6,
    /// Iteration limit reached before solution or infeasibility certificate found.
    MaxIterations = 7,
    /// Time limit reached before solution or infeasibility certificate found.
    MaxTime = 8,
    /// Solver terminated with a numerical error
    NumericalError = 9,
    /// Solver terminated due to lack of progress.
    InsufficientProgress = 10,
}

impl SolverStatus {
    /// Maps a raw status discriminant received from the solver.
    ///
    /// # Panics
    /// On a discriminant outside the known set.
    pub fn from_ffi(raw: u32) -> Self {
        match SolverStatus::from_u32(raw) {
            Some(status) => status,
            None => panic!("Received unrecognized solver status {raw}"),
        }
    }

    /// true for `Solved` and `AlmostSolved`
    pub fn is_solved(&self) -> bool {
        matches!(*self, SolverStatus::Solved | SolverStatus::AlmostSolved)
    }

    /// true for any (almost) primal or dual infeasible status
    pub fn is_infeasible(&self) -> bool {
        matches!(
            *self,
            SolverStatus::PrimalInfeasible
                | SolverStatus::DualInfeasible
                | SolverStatus::AlmostPrimalInfeasible
                | SolverStatus::AlmostDualInfeasible
        )
    }

    /// true if the solver stopped on an error
    pub fn is_errored(&self) -> bool {
        matches!(
            *self,
            SolverStatus::NumericalError | SolverStatus::InsufficientProgress
        )
    }
}

impl std::fmt::Display for SolverStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Direct linear solver used for the KKT system
#[repr(u32)]
#[derive(PartialEq, Eq, Clone, Debug, Copy, Default, FromPrimitive)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DirectSolveMethod {
    /// let the solver pick
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "auto"))]
    Auto = 0,
    #[cfg_attr(feature = "serde", serde(rename = "qdldl"))]
    Qdldl = 1,
    #[cfg_attr(feature = "serde", serde(rename = "faer"))]
    Faer = 2,
    #[cfg_attr(feature = "serde", serde(rename = "mkl"))]
    PardisoMkl = 3,
    #[cfg_attr(feature = "serde", serde(rename = "panua"))]
    PardisoPanua = 4,
}

/// Error returned when parsing an unknown linear solver name
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown direct solve method \"{0}\"")]
pub struct UnknownDirectSolveMethod(pub String);

impl DirectSolveMethod {
    /// Maps a raw linear solver discriminant received from the solver.
    ///
    /// # Panics
    /// On a discriminant outside the known set.
    pub fn from_ffi(raw: u32) -> Self {
        match DirectSolveMethod::from_u32(raw) {
            Some(method) => method,
            None => panic!("Received unrecognized direct solve method {raw}"),
        }
    }

    /// the solver's name for this method
    pub fn as_str(&self) -> &'static str {
        match self {
            DirectSolveMethod::Auto => "auto",
            DirectSolveMethod::Qdldl => "qdldl",
            DirectSolveMethod::Faer => "faer",
            DirectSolveMethod::PardisoMkl => "mkl",
            DirectSolveMethod::PardisoPanua => "panua",
        }
    }
}

impl std::fmt::Display for DirectSolveMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DirectSolveMethod {
    type Err = UnknownDirectSolveMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(DirectSolveMethod::Auto),
            "qdldl" => Ok(DirectSolveMethod::Qdldl),
            "faer" => Ok(DirectSolveMethod::Faer),
            "mkl" => Ok(DirectSolveMethod::PardisoMkl),
            "panua" => Ok(DirectSolveMethod::PardisoPanua),
            _ => Err(UnknownDirectSolveMethod(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_discriminants() {
        assert_eq!(SolverStatus::from_ffi(0), SolverStatus::Unsolved);
        assert_eq!(SolverStatus::from_ffi(1), SolverStatus::Solved);
        assert_eq!(SolverStatus::from_ffi(7), SolverStatus::MaxIterations);
        assert_eq!(
            SolverStatus::from_ffi(10),
            SolverStatus::InsufficientProgress
        );
        assert_eq!(SolverStatus::InsufficientProgress as u32, 10);
    }

    #[test]
    #[should_panic(expected = "unrecognized solver status")]
    fn test_status_unknown_discriminant() {
        SolverStatus::from_ffi(11);
    }

    #[test]
    fn test_status_classes() {
        assert!(SolverStatus::AlmostSolved.is_solved());
        assert!(SolverStatus::AlmostDualInfeasible.is_infeasible());
        assert!(SolverStatus::NumericalError.is_errored());
        assert!(!SolverStatus::MaxTime.is_solved());
        assert_eq!(SolverStatus::MaxTime.to_string(), "MaxTime");
    }

    #[test]
    fn test_direct_solve_method_names() {
        for raw in 0..5u32 {
            let method = DirectSolveMethod::from_ffi(raw);
            assert_eq!(method as u32, raw);
            assert_eq!(method.as_str().parse::<DirectSolveMethod>(), Ok(method));
        }
        assert_eq!(DirectSolveMethod::PardisoMkl.to_string(), "mkl");
        assert!("cholmod".parse::<DirectSolveMethod>().is_err());
    }

    #[test]
    #[should_panic(expected = "unrecognized direct solve method")]
    fn test_direct_solve_method_unknown_discriminant() {
        DirectSolveMethod::from_ffi(u32::MAX);
    }
}
