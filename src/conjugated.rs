//! Conjugation tag for descriptors.

/// A descriptor whose elements are read conjugated.
///
/// The wrapped descriptor is unchanged; only consumers reading through the
/// tag negate imaginary parts. Conjugating again yields the base descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Conjugated<D> {
    base: D,
}

impl<D: Copy> Conjugated<D> {
    pub(crate) fn new(base: D) -> Self {
        Conjugated { base }
    }

    /// The descriptor the tag mirrors.
    #[inline]
    pub fn base(&self) -> D {
        self.base
    }
}
