use thiserror::Error;

/// Error type returned by [`SparseMatrix`](crate::algebra::SparseMatrix) construction.
///
/// Each variant identifies exactly one violated CSC invariant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SparseFormatError {
    /// Matrix has no rows
    #[error("number of rows must be positive")]
    NonPositiveRows,
    /// Matrix has no columns
    #[error("number of columns must be positive")]
    NonPositiveCols,
    /// No nonzero entries.  Use `SparseMatrix::zeros` instead.
    #[error("number of non-zero entries must be positive")]
    NoNonzeros,
    /// `rowval` and `nzval` lengths differ
    #[error("length of data ({nzval}) must be equal to the length of the row index ({rowval})")]
    IncompatibleDimension {
        /// length of the row index
        rowval: usize,
        /// length of the data
        nzval: usize,
    },
    /// `colptr` does not have `n + 1` entries
    #[error("length of the column index ({len}) must be equal to the number of columns plus one ({expected})")]
    BadColptrLength {
        /// actual length
        len: usize,
        /// required length
        expected: usize,
    },
    /// More nonzeros than matrix entries
    #[error("number of non-zero entries must not exceed the number of rows times the number of columns")]
    TooManyNonzeros,
    /// `colptr[0] != 0` or `colptr[n] != nnz`
    #[error("the column index must start at zero and end at the number of non-zero entries")]
    BadColptrBounds,
    /// `colptr` decreases or leaves `[0, nnz]` at the given column
    #[error("Bad column pointer values at column {0}")]
    BadColptr(usize),
    /// Row indices within the given column are not strictly increasing
    #[error("Data is not sorted by row index within column {0}")]
    BadRowOrdering(usize),
    /// A row index in the given column exceeds the row dimension
    #[error("Row value exceeds the matrix row dimension in column {0}")]
    BadRowval(usize),
}
