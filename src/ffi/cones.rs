/// Wire form of a cone: a C tagged union whose tag follows
/// [`SupportedConeTag`](crate::cones::SupportedConeTag).
///
/// The `GenPowerConeT` exponents are referenced, not owned, and live in the
/// same [`NativeArena`](super::NativeArena) as the cone array.
#[allow(missing_docs)]
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub enum SupportedConeFFI {
    ZeroConeT(usize),
    NonnegativeConeT(usize),
    SecondOrderConeT(usize),
    ExponentialConeT,
    PowerConeT(f64),
    GenPowerConeT {
        alpha: *const f64,
        dim1: usize,
        dim2: usize,
    },
}
