use super::{CscMatrixFFI, DefaultSettingsFFI, SupportedConeFFI};
use crate::algebra::SparseMatrix;
use crate::cones::SupportedCone;
use std::ffi::{CStr, CString, NulError};

/// Owner of every buffer passed across the native boundary.
///
/// Each allocation is a separate box, so a pointer handed out by the arena
/// stays valid until [`NativeArena::reset`] or drop, however many further
/// allocations are made.
#[derive(Debug, Default)]
pub struct NativeArena {
    floats: Vec<Box<[f64]>>,
    indices: Vec<Box<[usize]>>,
    matrices: Vec<Box<CscMatrixFFI>>,
    cones: Vec<Box<[SupportedConeFFI]>>,
    settings: Vec<Box<DefaultSettingsFFI>>,
    strings: Vec<CString>,
}

impl NativeArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies `data` into the arena
    pub fn alloc_floats(&mut self, data: &[f64]) -> *const f64 {
        let buf: Box<[f64]> = data.into();
        let ptr = buf.as_ptr();
        self.floats.push(buf);
        ptr
    }

    /// `n` zeros
    pub fn alloc_zeros(&mut self, n: usize) -> *const f64 {
        self.alloc_floats(&vec![0.; n])
    }

    fn alloc_indices(&mut self, data: &[usize]) -> *const usize {
        let buf: Box<[usize]> = data.into();
        let ptr = buf.as_ptr();
        self.indices.push(buf);
        ptr
    }

    /// Copies the three CSC arrays of `M` and a matrix header pointing at them
    pub fn alloc_matrix(&mut self, M: &SparseMatrix) -> *const CscMatrixFFI {
        let header = Box::new(CscMatrixFFI {
            m: M.nrows(),
            n: M.ncols(),
            colptr: self.alloc_indices(M.colptr()),
            rowval: self.alloc_indices(M.rowval()),
            nzval: self.alloc_floats(M.nzval()),
        });
        let ptr: *const CscMatrixFFI = &*header;
        self.matrices.push(header);
        ptr
    }

    /// Writes one wire entry per cone.  Generalized power cone exponents
    /// are copied into the arena as well.
    pub fn alloc_cones(&mut self, cones: &[SupportedCone]) -> *const SupportedConeFFI {
        let wire: Box<[SupportedConeFFI]> = cones
            .iter()
            .map(|cone| match cone {
                SupportedCone::ZeroConeT(n) => SupportedConeFFI::ZeroConeT(*n),
                SupportedCone::NonnegativeConeT(n) => SupportedConeFFI::NonnegativeConeT(*n),
                SupportedCone::SecondOrderConeT(n) => SupportedConeFFI::SecondOrderConeT(*n),
                SupportedCone::ExponentialConeT => SupportedConeFFI::ExponentialConeT,
                SupportedCone::PowerConeT(a) => SupportedConeFFI::PowerConeT(*a),
                SupportedCone::GenPowerConeT(alpha, n) => SupportedConeFFI::GenPowerConeT {
                    alpha: self.alloc_floats(alpha),
                    dim1: alpha.len(),
                    dim2: *n,
                },
            })
            .collect();
        let ptr = wire.as_ptr();
        self.cones.push(wire);
        ptr
    }

    /// Moves a settings block into the arena
    pub fn alloc_settings(&mut self, settings: DefaultSettingsFFI) -> *const DefaultSettingsFFI {
        let settings = Box::new(settings);
        let ptr: *const DefaultSettingsFFI = &*settings;
        self.settings.push(settings);
        ptr
    }

    /// Copies `s` as a nul-terminated string
    pub fn alloc_c_string(&mut self, s: &str) -> Result<&CStr, NulError> {
        let s = CString::new(s)?;
        self.strings.push(s);
        Ok(self.strings[self.strings.len() - 1].as_c_str())
    }

    /// number of live allocations
    pub fn len(&self) -> usize {
        self.floats.len()
            + self.indices.len()
            + self.matrices.len()
            + self.cones.len()
            + self.settings.len()
            + self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Releases every allocation.  Pointers handed out earlier dangle.
    pub fn reset(&mut self) {
        self.floats.clear();
        self.indices.clear();
        self.matrices.clear();
        self.cones.clear();
        self.settings.clear();
        self.strings.clear();
    }
}
