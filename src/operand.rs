//! Operand tuples handed to the compute engine.
//!
//! The engine takes, for every argument, a buffer plus the addressing needed
//! to walk it. These structs carry exactly that, derived from a view, so a
//! binding can forward the fields to a CBLAS-style call without inspecting
//! descriptors itself.

use crate::layout::{Layout, Transpose};
use crate::{LayoutError, Result};

/// Vector argument: `data[offset + i * stride]` for `i < size`.
#[derive(Debug, Clone, Copy)]
pub struct VectorOperand<'a, T> {
    pub data: &'a [T],
    pub size: usize,
    pub stride: usize,
    pub offset: usize,
    /// Elements are read conjugated.
    pub conjugated: bool,
}

/// Dense matrix argument.
///
/// `rows`, `columns` and `stride` describe the stored matrix in `layout`
/// (the engine's order). `transposed` says the logical operand is the
/// transpose of that stored matrix.
#[derive(Debug, Clone, Copy)]
pub struct MatrixOperand<'a, T> {
    pub data: &'a [T],
    pub rows: usize,
    pub columns: usize,
    pub stride: usize,
    pub offset: usize,
    pub layout: Layout,
    pub transposed: bool,
    pub conjugated: bool,
}

/// Band matrix argument, with the same conventions as [`MatrixOperand`].
#[derive(Debug, Clone, Copy)]
pub struct BandOperand<'a, T> {
    pub data: &'a [T],
    pub rows: usize,
    pub columns: usize,
    pub upper_bandwidth: usize,
    pub lower_bandwidth: usize,
    pub stride: usize,
    pub offset: usize,
    pub layout: Layout,
    pub transposed: bool,
    pub conjugated: bool,
}

impl<'a, T> VectorOperand<'a, T> {
    /// The buffer starting at the first addressed element.
    pub fn tail(&self) -> &'a [T] {
        &self.data[self.offset..]
    }
}

impl<'a, T> MatrixOperand<'a, T> {
    /// CBLAS transpose flag, `None` if only conjugation is requested.
    pub fn transpose_flag(&self) -> Option<Transpose> {
        Transpose::from_flags(self.transposed, self.conjugated)
    }

    /// Logical `(rows, columns)` of the operand after the transpose flag.
    pub fn logical_dims(&self) -> (usize, usize) {
        if self.transposed {
            (self.columns, self.rows)
        } else {
            (self.rows, self.columns)
        }
    }

    pub fn tail(&self) -> &'a [T] {
        &self.data[self.offset..]
    }
}

impl<'a, T> BandOperand<'a, T> {
    pub fn transpose_flag(&self) -> Option<Transpose> {
        Transpose::from_flags(self.transposed, self.conjugated)
    }

    pub fn logical_dims(&self) -> (usize, usize) {
        if self.transposed {
            (self.columns, self.rows)
        } else {
            (self.rows, self.columns)
        }
    }

    pub fn tail(&self) -> &'a [T] {
        &self.data[self.offset..]
    }
}

/// Fail with [`LayoutError::IncompatibleOperandSize`] unless the sizes agree.
pub fn ensure_same_size(expected: usize, found: usize) -> Result<()> {
    if expected != found {
        return Err(LayoutError::IncompatibleOperandSize { expected, found });
    }
    Ok(())
}

/// Check `y = op(A) x` operand sizes for a matrix with logical dims `(m, n)`.
pub fn ensure_matvec_sizes(dims: (usize, usize), x_size: usize, y_size: usize) -> Result<()> {
    ensure_same_size(dims.1, x_size)?;
    ensure_same_size(dims.0, y_size)
}
