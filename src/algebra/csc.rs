use super::SparseFormatError;
use itertools::Itertools;

/// Sparse matrix in standard Compressed Sparse Column (CSC) format
///
/// __Example usage__ : To construct the 3 x 3 matrix
/// ```text
/// A = [1.  3.  5.]
///     [2.  0.  6.]
///     [0.  4.  7.]
/// ```
///
/// ```
/// use clarabel_model::algebra::SparseMatrix;
///
/// let A = SparseMatrix::new(
///    3,                                // m
///    3,                                // n
///    vec![0, 2, 4, 7],                 //colptr
///    vec![0, 1, 0, 2, 0, 1, 2],        //rowval
///    vec![1., 2., 3., 4., 5., 6., 7.], //nzval
///  )
///  .unwrap();
///
/// assert_eq!(A.nnz(), 7);
/// ```
///
/// Unlike the solver's own matrix type, the constructor checks the full CSC format
/// and the matrix is immutable afterwards.  A matrix without entries can only be
/// built with [`SparseMatrix::zeros`].
#[derive(Debug, Clone, PartialEq)]
pub struct SparseMatrix {
    m: usize,
    n: usize,
    colptr: Vec<usize>,
    rowval: Vec<usize>,
    nzval: Vec<f64>,
}

impl SparseMatrix {
    /// `SparseMatrix` constructor.
    ///
    /// Fails with the [`SparseFormatError`] naming the first violated invariant.
    /// Runs in O(nnz + n).
    pub fn new(
        m: usize,
        n: usize,
        colptr: Vec<usize>,
        rowval: Vec<usize>,
        nzval: Vec<f64>,
    ) -> Result<Self, SparseFormatError> {
        let A = SparseMatrix {
            m,
            n,
            colptr,
            rowval,
            nzval,
        };
        A.check_format()?;
        Ok(A)
    }

    /// An `m` x `n` matrix with no stored entries.
    ///
    /// Either dimension may be zero, which allows placeholders such as the
    /// empty constraint matrix of an unconstrained problem.
    /// ```
    /// use clarabel_model::algebra::SparseMatrix;
    /// let A = SparseMatrix::zeros((0, 4));
    /// assert_eq!(A.colptr(), &[0; 5]);
    /// ```
    pub fn zeros(size: (usize, usize)) -> Self {
        let (m, n) = size;
        SparseMatrix {
            m,
            n,
            colptr: vec![0; n + 1],
            rowval: Vec::new(),
            nzval: Vec::new(),
        }
    }

    fn check_format(&self) -> Result<(), SparseFormatError> {
        if self.m == 0 {
            return Err(SparseFormatError::NonPositiveRows);
        }
        if self.n == 0 {
            return Err(SparseFormatError::NonPositiveCols);
        }

        let nnz = self.nzval.len();
        if self.rowval.len() != nnz {
            return Err(SparseFormatError::IncompatibleDimension {
                rowval: self.rowval.len(),
                nzval: nnz,
            });
        }
        if nnz == 0 {
            return Err(SparseFormatError::NoNonzeros);
        }
        if self.colptr.len() != self.n + 1 {
            return Err(SparseFormatError::BadColptrLength {
                len: self.colptr.len(),
                expected: self.n + 1,
            });
        }
        if matches!(self.m.checked_mul(self.n), Some(numel) if nnz > numel) {
            return Err(SparseFormatError::TooManyNonzeros);
        }
        if self.colptr[0] != 0 || self.colptr[self.n] != nnz {
            return Err(SparseFormatError::BadColptrBounds);
        }

        // colptr monotonicity and the row ordering within each
        // column are checked in the same pass
        for (col, (&start, &stop)) in self.colptr.iter().tuple_windows().enumerate() {
            if start > stop || stop > nnz {
                return Err(SparseFormatError::BadColptr(col));
            }
            let rows = &self.rowval[start..stop];
            if rows.iter().tuple_windows().any(|(r0, r1)| r0 >= r1) {
                return Err(SparseFormatError::BadRowOrdering(col));
            }
            // rows are sorted, so only the last one can be out of bounds
            if matches!(rows.last(), Some(&r) if r >= self.m) {
                return Err(SparseFormatError::BadRowval(col));
            }
        }

        Ok(())
    }

    /// number of rows
    pub fn nrows(&self) -> usize {
        self.m
    }

    /// number of columns
    pub fn ncols(&self) -> usize {
        self.n
    }

    /// (rows, columns)
    pub fn size(&self) -> (usize, usize) {
        (self.m, self.n)
    }

    /// number of nonzeros
    pub fn nnz(&self) -> usize {
        self.nzval.len()
    }

    /// CSC format column pointer of length `n+1`
    pub fn colptr(&self) -> &[usize] {
        &self.colptr
    }

    /// row index of each stored entry
    pub fn rowval(&self) -> &[usize] {
        &self.rowval
    }

    /// stored entries
    pub fn nzval(&self) -> &[f64] {
        &self.nzval
    }

    /// true if the matrix is square
    pub fn is_square(&self) -> bool {
        self.m == self.n
    }

    /// true if no entries are stored below the diagonal
    pub fn is_triu(&self) -> bool {
        self.colptr
            .iter()
            .tuple_windows()
            .enumerate()
            .all(|(col, (&start, &stop))| self.rowval[start..stop].iter().all(|&row| row <= col))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 4 x 2 constraint matrix of the reference LP
    fn lp_data() -> (Vec<usize>, Vec<usize>, Vec<f64>) {
        (vec![0, 2, 4], vec![0, 2, 1, 3], vec![1., -1., 1., -1.])
    }

    #[test]
    fn test_new_returns_supplied_arrays() {
        let (colptr, rowval, nzval) = lp_data();
        let A = SparseMatrix::new(4, 2, colptr.clone(), rowval.clone(), nzval.clone()).unwrap();

        assert_eq!(A.size(), (4, 2));
        assert_eq!(A.nnz(), 4);
        assert_eq!(A.colptr(), colptr.as_slice());
        assert_eq!(A.rowval(), rowval.as_slice());
        assert_eq!(A.nzval(), nzval.as_slice());
        assert!(!A.is_square());
    }

    #[test]
    fn test_dense_matrix_is_accepted() {
        // nnz == m * n is the largest allowed size
        let A = SparseMatrix::new(2, 2, vec![0, 2, 4], vec![0, 1, 0, 1], vec![1., 2., 3., 4.]);
        assert!(A.is_ok());
    }

    #[test]
    fn test_empty_columns_are_accepted() {
        let A = SparseMatrix::new(3, 3, vec![0, 0, 1, 1], vec![2], vec![1.]).unwrap();
        assert_eq!(A.nnz(), 1);
        assert!(!A.is_triu());
    }

    #[test]
    fn test_zeros() {
        let A = SparseMatrix::zeros((3, 2));
        assert_eq!(A.size(), (3, 2));
        assert_eq!(A.nnz(), 0);
        assert_eq!(A.colptr(), &[0, 0, 0]);
        assert!(A.rowval().is_empty());
        assert!(A.nzval().is_empty());

        let A = SparseMatrix::zeros((0, 2));
        assert_eq!(A.nrows(), 0);
        assert_eq!(A.colptr().len(), 3);
    }

    #[test]
    fn test_is_triu() {
        let P = SparseMatrix::new(2, 2, vec![0, 1, 3], vec![0, 0, 1], vec![4., 1., 2.]).unwrap();
        assert!(P.is_triu());

        let P = SparseMatrix::new(2, 2, vec![0, 2, 3], vec![0, 1, 1], vec![4., 1., 2.]).unwrap();
        assert!(!P.is_triu());
    }

    #[test]
    fn test_bad_dimensions() {
        let (colptr, rowval, nzval) = lp_data();
        assert_eq!(
            SparseMatrix::new(0, 2, colptr.clone(), rowval.clone(), nzval.clone()),
            Err(SparseFormatError::NonPositiveRows)
        );
        assert_eq!(
            SparseMatrix::new(4, 0, colptr, rowval, nzval),
            Err(SparseFormatError::NonPositiveCols)
        );
    }

    #[test]
    fn test_bad_lengths() {
        assert_eq!(
            SparseMatrix::new(4, 2, vec![0, 2, 4], vec![0, 2, 1], vec![1., -1., 1., -1.]),
            Err(SparseFormatError::IncompatibleDimension {
                rowval: 3,
                nzval: 4
            })
        );
        assert_eq!(
            SparseMatrix::new(4, 2, vec![0, 0, 0], vec![], vec![]),
            Err(SparseFormatError::NoNonzeros)
        );
        assert_eq!(
            SparseMatrix::new(4, 2, vec![0, 4], vec![0, 2, 1, 3], vec![1., -1., 1., -1.]),
            Err(SparseFormatError::BadColptrLength {
                len: 2,
                expected: 3
            })
        );
        assert_eq!(
            SparseMatrix::new(1, 1, vec![0, 2], vec![0, 1], vec![1., 1.]),
            Err(SparseFormatError::TooManyNonzeros)
        );
    }

    #[test]
    fn test_bad_colptr() {
        let (_, rowval, nzval) = lp_data();
        assert_eq!(
            SparseMatrix::new(4, 2, vec![1, 2, 4], rowval.clone(), nzval.clone()),
            Err(SparseFormatError::BadColptrBounds)
        );
        assert_eq!(
            SparseMatrix::new(4, 2, vec![0, 2, 3], rowval.clone(), nzval.clone()),
            Err(SparseFormatError::BadColptrBounds)
        );
        assert_eq!(
            SparseMatrix::new(4, 3, vec![0, 3, 2, 4], vec![0, 1, 2, 3], nzval.clone()),
            Err(SparseFormatError::BadColptr(1))
        );
        assert_eq!(
            SparseMatrix::new(4, 3, vec![0, 5, 5, 4], rowval, nzval),
            Err(SparseFormatError::BadColptr(0))
        );
    }

    #[test]
    fn test_bad_rowval() {
        let (colptr, _, nzval) = lp_data();
        assert_eq!(
            SparseMatrix::new(4, 2, colptr.clone(), vec![2, 0, 1, 3], nzval.clone()),
            Err(SparseFormatError::BadRowOrdering(0))
        );
        // duplicate entries are not strictly increasing
        assert_eq!(
            SparseMatrix::new(4, 2, colptr.clone(), vec![0, 2, 3, 3], nzval.clone()),
            Err(SparseFormatError::BadRowOrdering(1))
        );
        assert_eq!(
            SparseMatrix::new(4, 2, colptr, vec![0, 2, 1, 4], nzval),
            Err(SparseFormatError::BadRowval(1))
        );
    }
}
