//! `#[repr(C)]` types exchanged with the native solver, and the arena that
//! owns every buffer handed across that boundary.

mod arena;
mod cones;
mod enums;
mod info;
mod matrix;
mod settings;

pub use arena::*;
pub use cones::*;
pub use enums::*;
pub use info::*;
pub use matrix::*;
pub use settings::*;

/// View `len` values starting at `ptr`.
///
/// # Safety
/// `ptr` must be valid for `len` reads for the lifetime `'a`.  It is
/// ignored when `len` is zero, and may then be null or dangling.
pub(crate) unsafe fn slice_from_raw<'a, T>(ptr: *const T, len: usize) -> &'a [T] {
    if len == 0 || ptr.is_null() {
        &[]
    } else {
        std::slice::from_raw_parts(ptr, len)
    }
}
