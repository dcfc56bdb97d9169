use super::{ProblemDataError, ValidationError};
use crate::algebra::SparseMatrix;
use crate::cones::{total_dim, SupportedCone};

/// Checks that optional problem data forms a consistent problem.
pub(crate) fn check_problem(
    P: Option<&SparseMatrix>,
    q: Option<&[f64]>,
    A: Option<&SparseMatrix>,
    b: Option<&[f64]>,
    cones: Option<&[SupportedCone]>,
) -> Result<(), ValidationError> {
    use ProblemDataError::*;

    if P.is_none() && A.is_none() {
        return Err(MissingPAndA.into());
    }
    if !(A.is_some() == b.is_some() && b.is_some() == cones.is_some()) {
        return Err(IncompleteConstraints.into());
    }

    if let Some(P) = P.filter(|P| !P.is_square()) {
        let (m, n) = P.size();
        return Err(NonSquareP { m, n }.into());
    }
    if P.or(A).is_some_and(|M| M.ncols() == 0) {
        return Err(EmptyProblem.into());
    }
    if matches!(q, Some(q) if q.is_empty()) {
        return Err(EmptyQ.into());
    }
    if matches!(b, Some(b) if b.is_empty()) {
        return Err(EmptyB.into());
    }
    if matches!(cones, Some(cones) if cones.is_empty()) {
        return Err(EmptyCones.into());
    }
    for cone in cones.unwrap_or_default() {
        cone.validate()?;
    }

    if let (Some(P), Some(q)) = (P, q) {
        if P.ncols() != q.len() {
            return Err(PQMismatch {
                p: P.ncols(),
                q: q.len(),
            }
            .into());
        }
    }
    if let (Some(P), Some(A)) = (P, A) {
        if P.ncols() != A.ncols() {
            return Err(PAMismatch {
                p: P.ncols(),
                a: A.ncols(),
            }
            .into());
        }
    }
    if let (Some(q), Some(A)) = (q, A) {
        if q.len() != A.ncols() {
            return Err(QAMismatch {
                q: q.len(),
                a: A.ncols(),
            }
            .into());
        }
    }
    if let (Some(A), Some(b), Some(cones)) = (A, b, cones) {
        if A.nrows() != b.len() {
            return Err(ABMismatch {
                a: A.nrows(),
                b: b.len(),
            }
            .into());
        }
        let dim = total_dim(cones).ok_or(ConeDimensionOverflow)?;
        if A.nrows() != dim {
            return Err(AConesMismatch {
                a: A.nrows(),
                cones: dim,
            }
            .into());
        }
    }

    Ok(())
}
