/// Wire form of a CSC matrix.  The pointed-to arrays have lengths `n + 1`,
/// `colptr[n]` and `colptr[n]`.
#[allow(missing_docs)]
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct CscMatrixFFI {
    pub m: usize,
    pub n: usize,
    pub colptr: *const usize,
    pub rowval: *const usize,
    pub nzval: *const f64,
}

impl CscMatrixFFI {
    /// Reads back the column pointer, row indices and values.
    ///
    /// # Safety
    /// The pointers must satisfy the lengths documented on the type, and
    /// stay valid for `'a`.
    pub unsafe fn parts<'a>(&self) -> (&'a [usize], &'a [usize], &'a [f64]) {
        let colptr = super::slice_from_raw(self.colptr, self.n + 1);
        let nnz = colptr.last().copied().unwrap_or(0);
        let rowval = super::slice_from_raw(self.rowval, nnz);
        let nzval = super::slice_from_raw(self.nzval, nnz);
        (colptr, rowval, nzval)
    }
}
