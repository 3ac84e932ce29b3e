//! Strided vector descriptors and the views built on them.

use std::marker::PhantomData;

use crate::bounds::{ensure_fits, required_len_vector};
use crate::conjugated::Conjugated;
use crate::element_op::{ElementOp, ElementOpApply, Identity};
use crate::operand::VectorOperand;
use crate::{LayoutError, Result};

// ============================================================================
// Descriptors
// ============================================================================

/// Layout of a strided vector: `size` elements, `stride` apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VectorDescriptor {
    size: usize,
    stride: usize,
}

/// A vector descriptor tagged for element-wise conjugation.
pub type ConjugatedVectorDescriptor = Conjugated<VectorDescriptor>;

impl VectorDescriptor {
    /// Describe `size` elements `stride` apart. Both must be positive.
    pub fn new(size: usize, stride: usize) -> Result<Self> {
        if size == 0 {
            return Err(LayoutError::ZeroDimension { name: "size" });
        }
        if stride == 0 {
            return Err(LayoutError::StrideTooSmall { stride, min: 1 });
        }
        Ok(VectorDescriptor { size, stride })
    }

    /// Unit-stride vector of `size` elements.
    pub fn contiguous(size: usize) -> Result<Self> {
        Self::new(size, 1)
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Tag this layout for conjugated reading.
    #[inline]
    pub fn conjugate(self) -> ConjugatedVectorDescriptor {
        Conjugated::new(self)
    }

    /// Smallest buffer length that holds this vector starting at `offset`.
    pub fn required_len(&self, offset: usize) -> Result<usize> {
        required_len_vector(self.size, self.stride, offset)
    }
}

impl ConjugatedVectorDescriptor {
    #[inline]
    pub fn size(&self) -> usize {
        self.base().size
    }

    #[inline]
    pub fn stride(&self) -> usize {
        self.base().stride
    }

    /// Drop the tag again.
    #[inline]
    pub fn conjugate(self) -> VectorDescriptor {
        self.base()
    }
}

// ============================================================================
// Vector
// ============================================================================

/// Immutable strided vector over a borrowed buffer.
///
/// `Op` is applied on every read; [`Vector::conjugate`] composes `Conj`
/// without touching the buffer.
pub struct Vector<'a, T, Op: ElementOp = Identity> {
    descriptor: VectorDescriptor,
    data: &'a [T],
    offset: usize,
    _op: PhantomData<Op>,
}

impl<T, Op: ElementOp> Clone for Vector<'_, T, Op> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, Op: ElementOp> Copy for Vector<'_, T, Op> {}

impl<T, Op: ElementOp> std::fmt::Debug for Vector<'_, T, Op> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vector")
            .field("size", &self.descriptor.size)
            .field("stride", &self.descriptor.stride)
            .field("offset", &self.offset)
            .field("conjugated", &Op::CONJUGATES)
            .finish()
    }
}

impl<'a, T> Vector<'a, T> {
    /// Bind `descriptor` to `data`, starting at `offset`.
    pub fn new(descriptor: VectorDescriptor, data: &'a [T], offset: usize) -> Result<Self> {
        ensure_fits(descriptor.required_len(offset)?, data.len())?;
        Ok(Vector {
            descriptor,
            data,
            offset,
            _op: PhantomData,
        })
    }
}

impl<'a, T, Op: ElementOp> Vector<'a, T, Op> {
    #[inline]
    pub fn descriptor(&self) -> VectorDescriptor {
        self.descriptor
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.descriptor.size
    }

    #[inline]
    pub fn stride(&self) -> usize {
        self.descriptor.stride
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub fn data(&self) -> &'a [T] {
        self.data
    }

    #[inline]
    pub fn is_conjugated(&self) -> bool {
        Op::CONJUGATES
    }

    /// Conjugated view of the same storage.
    pub fn conjugate(&self) -> Vector<'a, T, Op::ComposeConj> {
        Vector {
            descriptor: self.descriptor,
            data: self.data,
            offset: self.offset,
            _op: PhantomData,
        }
    }

    /// Operand tuple for the compute engine.
    pub fn operand(&self) -> VectorOperand<'a, T> {
        VectorOperand {
            data: self.data,
            size: self.descriptor.size,
            stride: self.descriptor.stride,
            offset: self.offset,
            conjugated: Op::CONJUGATES,
        }
    }
}

impl<'a, T: ElementOpApply, Op: ElementOp> Vector<'a, T, Op> {
    /// Element `index` with the element operation applied.
    pub fn get(&self, index: usize) -> T {
        assert!(
            index < self.descriptor.size,
            "index {} out of bounds for size {}",
            index,
            self.descriptor.size
        );
        Op::apply(self.data[self.offset + index * self.descriptor.stride])
    }

    pub fn iter(&self) -> impl Iterator<Item = T> + 'a {
        let Vector {
            descriptor, data, offset, ..
        } = *self;
        (0..descriptor.size).map(move |i| Op::apply(data[offset + i * descriptor.stride]))
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.iter().collect()
    }
}

// ============================================================================
// VectorMut
// ============================================================================

/// Mutable strided vector, used for engine outputs.
///
/// Always uses the `Identity` element operation; conjugation is a read-side
/// concern.
pub struct VectorMut<'a, T> {
    descriptor: VectorDescriptor,
    data: &'a mut [T],
    offset: usize,
}

impl<T> std::fmt::Debug for VectorMut<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VectorMut")
            .field("size", &self.descriptor.size)
            .field("stride", &self.descriptor.stride)
            .field("offset", &self.offset)
            .finish()
    }
}

impl<'a, T> VectorMut<'a, T> {
    pub fn new(descriptor: VectorDescriptor, data: &'a mut [T], offset: usize) -> Result<Self> {
        ensure_fits(descriptor.required_len(offset)?, data.len())?;
        Ok(VectorMut {
            descriptor,
            data,
            offset,
        })
    }

    #[inline]
    pub fn descriptor(&self) -> VectorDescriptor {
        self.descriptor
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.descriptor.size
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Shared view of the same elements.
    pub fn as_view(&self) -> Vector<'_, T> {
        Vector {
            descriptor: self.descriptor,
            data: self.data,
            offset: self.offset,
            _op: PhantomData,
        }
    }

    /// Mutable buffer and addressing for the compute engine.
    pub fn operand_mut(&mut self) -> (&mut [T], VectorDescriptor, usize) {
        (&mut *self.data, self.descriptor, self.offset)
    }

    #[inline]
    fn position(&self, index: usize) -> usize {
        assert!(
            index < self.descriptor.size,
            "index {} out of bounds for size {}",
            index,
            self.descriptor.size
        );
        self.offset + index * self.descriptor.stride
    }
}

impl<'a, T: Copy> VectorMut<'a, T> {
    pub fn get(&self, index: usize) -> T {
        self.data[self.position(index)]
    }

    pub fn set(&mut self, index: usize, value: T) {
        let pos = self.position(index);
        self.data[pos] = value;
    }
}
