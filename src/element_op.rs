//! Element operations applied lazily when a view is read.
//!
//! Structural transposition is carried by the descriptors, so the only
//! element-level operation a view needs is conjugation. The two operations
//! form a group under composition:
//! ```text
//!   ∘    | Id   | Conj
//! -------|------|------
//!   Id   | Id   | Conj
//!   Conj | Conj | Id
//! ```
//! Composition happens at the type level, so a conjugated view costs nothing
//! until an element is read.

use num_complex::Complex;
use num_traits::Num;

/// Trait for element operations attached to views.
pub trait ElementOp: Copy + Default + Send + Sync + 'static {
    /// Whether reading through this operation conjugates the element.
    const CONJUGATES: bool;

    /// Apply the operation to a value.
    fn apply<T: ElementOpApply>(value: T) -> T;

    /// Compose with Conj: Self ∘ Conj
    type ComposeConj: ElementOp;
}

/// Trait for element types that support conjugation.
pub trait ElementOpApply: Copy {
    fn conj(self) -> Self;
}

// Conjugation is the identity on real types.
macro_rules! impl_element_op_apply_real {
    ($($t:ty),*) => {
        $(
            impl ElementOpApply for $t {
                #[inline(always)]
                fn conj(self) -> Self { self }
            }
        )*
    };
}

impl_element_op_apply_real!(f32, f64);

impl<T: Num + Copy + Clone + std::ops::Neg<Output = T>> ElementOpApply for Complex<T> {
    #[inline(always)]
    fn conj(self) -> Self {
        Complex::conj(&self)
    }
}

/// Identity operation: f(x) = x
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Identity;

/// Complex conjugate operation: f(x) = conj(x)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Conj;

impl ElementOp for Identity {
    const CONJUGATES: bool = false;

    #[inline(always)]
    fn apply<T: ElementOpApply>(value: T) -> T {
        value
    }

    type ComposeConj = Conj;
}

impl ElementOp for Conj {
    const CONJUGATES: bool = true;

    #[inline(always)]
    fn apply<T: ElementOpApply>(value: T) -> T {
        value.conj()
    }

    type ComposeConj = Identity;
}
