//! Element kinds accepted by the compute engine.
//!
//! The engine exposes one entry point per element kind (the `s`/`d`/`c`/`z`
//! prefixes of BLAS). [`Scalar`] is sealed over exactly those four kinds so
//! every generic item in this crate monomorphizes to something the engine can
//! consume.

use num_complex::{Complex32, Complex64};

use crate::element_op::ElementOpApply;

mod private {
    pub trait Sealed {}

    impl Sealed for f32 {}
    impl Sealed for f64 {}
    impl Sealed for num_complex::Complex32 {}
    impl Sealed for num_complex::Complex64 {}
}

/// The four element kinds of the compute engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// `f32`
    Single,
    /// `f64`
    Double,
    /// `Complex<f32>`
    ComplexSingle,
    /// `Complex<f64>`
    ComplexDouble,
}

impl ScalarKind {
    /// BLAS routine prefix for this kind.
    pub fn blas_prefix(self) -> char {
        match self {
            ScalarKind::Single => 's',
            ScalarKind::Double => 'd',
            ScalarKind::ComplexSingle => 'c',
            ScalarKind::ComplexDouble => 'z',
        }
    }

    pub fn is_complex(self) -> bool {
        matches!(self, ScalarKind::ComplexSingle | ScalarKind::ComplexDouble)
    }
}

/// Element type usable in vectors, matrices and band matrices.
///
/// Sealed: implemented for `f32`, `f64`, `Complex32` and `Complex64` only.
pub trait Scalar:
    private::Sealed
    + ElementOpApply
    + Copy
    + Send
    + Sync
    + PartialEq
    + std::fmt::Debug
    + num_traits::Zero
    + 'static
{
    /// Which engine entry point this type dispatches to.
    const KIND: ScalarKind;
}

impl Scalar for f32 {
    const KIND: ScalarKind = ScalarKind::Single;
}

impl Scalar for f64 {
    const KIND: ScalarKind = ScalarKind::Double;
}

impl Scalar for Complex32 {
    const KIND: ScalarKind = ScalarKind::ComplexSingle;
}

impl Scalar for Complex64 {
    const KIND: ScalarKind = ScalarKind::ComplexDouble;
}
