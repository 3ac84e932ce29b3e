//! Dense matrix descriptors and views.
//!
//! A [`MatrixDescriptor`] is a BLAS-style `(rows, columns, stride, layout)`
//! tuple. Transposition only swaps the extents and flips the layout: reading
//! the same buffer through the transposed descriptor yields Aᵗ.

use std::marker::PhantomData;

use crate::bounds::{ensure_fits, required_len_matrix};
use crate::element_op::{ElementOp, ElementOpApply, Identity};
use crate::layout::Layout;
use crate::operand::MatrixOperand;
use crate::{LayoutError, Result};

/// Layout of a dense matrix in a flat buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MatrixDescriptor {
    rows: usize,
    columns: usize,
    stride: usize,
    layout: Layout,
}

impl MatrixDescriptor {
    /// Describe a `rows x columns` matrix whose major lines are `stride`
    /// elements apart.
    ///
    /// Row-major storage needs `stride >= columns`, column-major
    /// `stride >= rows`.
    pub fn new(rows: usize, columns: usize, stride: usize, layout: Layout) -> Result<Self> {
        if rows == 0 {
            return Err(LayoutError::ZeroDimension { name: "rows" });
        }
        if columns == 0 {
            return Err(LayoutError::ZeroDimension { name: "columns" });
        }
        let min = layout.leading_dim(rows, columns);
        if stride < min {
            return Err(LayoutError::StrideTooSmall { stride, min });
        }
        Ok(MatrixDescriptor {
            rows,
            columns,
            stride,
            layout,
        })
    }

    /// Tightly packed matrix: the stride is the minor extent.
    pub fn packed(rows: usize, columns: usize, layout: Layout) -> Result<Self> {
        Self::new(rows, columns, layout.leading_dim(rows, columns), layout)
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    #[inline]
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Whether the matrix has no padding between major lines.
    pub fn is_packed(&self) -> bool {
        self.stride == self.layout.leading_dim(self.rows, self.columns)
    }

    /// Same buffer read as the transpose.
    #[inline]
    pub fn transpose(self) -> Self {
        MatrixDescriptor {
            rows: self.columns,
            columns: self.rows,
            stride: self.stride,
            layout: self.layout.transpose(),
        }
    }

    /// Offset of element `(row, col)` relative to the view base.
    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        self.layout.index(row, col, self.stride)
    }

    /// Smallest buffer length that holds this matrix starting at `offset`.
    pub fn required_len(&self, offset: usize) -> Result<usize> {
        required_len_matrix(self.rows, self.columns, self.stride, self.layout, offset)
    }

    #[inline]
    fn check_index(&self, row: usize, col: usize) {
        assert!(
            row < self.rows && col < self.columns,
            "index ({}, {}) out of bounds for {}x{} matrix",
            row,
            col,
            self.rows,
            self.columns
        );
    }
}

// ============================================================================
// Matrix
// ============================================================================

/// Immutable dense matrix over a borrowed buffer.
pub struct Matrix<'a, T, Op: ElementOp = Identity> {
    descriptor: MatrixDescriptor,
    data: &'a [T],
    offset: usize,
    _op: PhantomData<Op>,
}

impl<T, Op: ElementOp> Clone for Matrix<'_, T, Op> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, Op: ElementOp> Copy for Matrix<'_, T, Op> {}

impl<T, Op: ElementOp> std::fmt::Debug for Matrix<'_, T, Op> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Matrix")
            .field("descriptor", &self.descriptor)
            .field("offset", &self.offset)
            .field("conjugated", &Op::CONJUGATES)
            .finish()
    }
}

impl<'a, T> Matrix<'a, T> {
    /// Bind `descriptor` to `data`, starting at `offset`.
    pub fn new(descriptor: MatrixDescriptor, data: &'a [T], offset: usize) -> Result<Self> {
        ensure_fits(descriptor.required_len(offset)?, data.len())?;
        Ok(Matrix {
            descriptor,
            data,
            offset,
            _op: PhantomData,
        })
    }
}

impl<'a, T, Op: ElementOp> Matrix<'a, T, Op> {
    #[inline]
    pub fn descriptor(&self) -> MatrixDescriptor {
        self.descriptor
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.descriptor.rows
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.descriptor.columns
    }

    #[inline]
    pub fn stride(&self) -> usize {
        self.descriptor.stride
    }

    #[inline]
    pub fn layout(&self) -> Layout {
        self.descriptor.layout
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

    /// Transpose (zero-copy).
    pub fn transpose(&self) -> Matrix<'a, T, Op> {
        Matrix {
            descriptor: self.descriptor.transpose(),
            data: self.data,
            offset: self.offset,
            _op: PhantomData,
        }
    }

    /// Complex conjugate (compose Conj without changing the descriptor).
    pub fn conjugate(&self) -> Matrix<'a, T, Op::ComposeConj> {
        Matrix {
            descriptor: self.descriptor,
            data: self.data,
            offset: self.offset,
            _op: PhantomData,
        }
    }

    /// Conjugate transpose (zero-copy).
    pub fn conjugate_transpose(&self) -> Matrix<'a, T, Op::ComposeConj> {
        self.transpose().conjugate()
    }

    /// Operand tuple for an engine that expects its matrices in `order`.
    ///
    /// The tuple always describes the *stored* matrix in `order`. A view
    /// whose layout differs from `order` is the transpose of that stored
    /// matrix, which the tuple reports through `transposed`.
    pub fn operand(&self, order: Layout) -> MatrixOperand<'a, T> {
        let transposed = self.descriptor.layout != order;
        let stored = if transposed {
            self.descriptor.transpose()
        } else {
            self.descriptor
        };
        MatrixOperand {
            data: self.data,
            rows: stored.rows,
            columns: stored.columns,
            stride: stored.stride,
            offset: self.offset,
            layout: order,
            transposed,
            conjugated: Op::CONJUGATES,
        }
    }
}

impl<'a, T: ElementOpApply, Op: ElementOp> Matrix<'a, T, Op> {
    /// Element `(row, col)` with the element operation applied.
    pub fn get(&self, row: usize, col: usize) -> T {
        self.descriptor.check_index(row, col);
        Op::apply(self.data[self.offset + self.descriptor.index(row, col)])
    }

    /// Copy into a packed buffer in `layout`.
    pub fn to_vec(&self, layout: Layout) -> Vec<T> {
        let (rows, columns) = (self.rows(), self.columns());
        let mut out = Vec::with_capacity(rows * columns);
        match layout {
            Layout::RowMajor => {
                for i in 0..rows {
                    out.extend((0..columns).map(|j| self.get(i, j)));
                }
            }
            Layout::ColumnMajor => {
                for j in 0..columns {
                    out.extend((0..rows).map(|i| self.get(i, j)));
                }
            }
        }
        out
    }
}

// ============================================================================
// MatrixMut
// ============================================================================

/// Mutable dense matrix, used for engine outputs.
///
/// Always uses the `Identity` element operation.
pub struct MatrixMut<'a, T> {
    descriptor: MatrixDescriptor,
    data: &'a mut [T],
    offset: usize,
}

impl<T> std::fmt::Debug for MatrixMut<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatrixMut")
            .field("descriptor", &self.descriptor)
            .field("offset", &self.offset)
            .finish()
    }
}

impl<'a, T> MatrixMut<'a, T> {
    pub fn new(descriptor: MatrixDescriptor, data: &'a mut [T], offset: usize) -> Result<Self> {
        ensure_fits(descriptor.required_len(offset)?, data.len())?;
        Ok(MatrixMut {
            descriptor,
            data,
            offset,
        })
    }

    #[inline]
    pub fn descriptor(&self) -> MatrixDescriptor {
        self.descriptor
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Shared view of the same elements.
    pub fn as_view(&self) -> Matrix<'_, T> {
        Matrix {
            descriptor: self.descriptor,
            data: self.data,
            offset: self.offset,
            _op: PhantomData,
        }
    }

    /// Mutable view of the transpose over the same buffer.
    pub fn transpose_mut(&mut self) -> MatrixMut<'_, T> {
        MatrixMut {
            descriptor: self.descriptor.transpose(),
            data: &mut *self.data,
            offset: self.offset,
        }
    }
}

impl<'a, T: Copy> MatrixMut<'a, T> {
    pub fn get(&self, row: usize, col: usize) -> T {
        self.descriptor.check_index(row, col);
        self.data[self.offset + self.descriptor.index(row, col)]
    }

    pub fn set(&mut self, row: usize, col: usize, value: T) {
        self.descriptor.check_index(row, col);
        let pos = self.offset + self.descriptor.index(row, col);
        self.data[pos] = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use num_complex::Complex64;

    fn iota(n: usize) -> Vec<f64> {
        (0..n).map(|x| x as f64).collect()
    }

    #[test]
    fn test_descriptor_validation() {
        assert!(MatrixDescriptor::new(3, 4, 4, Layout::RowMajor).is_ok());
        assert!(MatrixDescriptor::new(3, 4, 3, Layout::ColumnMajor).is_ok());

        let err = MatrixDescriptor::new(3, 4, 3, Layout::RowMajor).unwrap_err();
        assert!(matches!(err, LayoutError::StrideTooSmall { stride: 3, min: 4 }));
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let err = MatrixDescriptor::new(3, 4, 2, Layout::ColumnMajor).unwrap_err();
        assert!(matches!(err, LayoutError::StrideTooSmall { stride: 2, min: 3 }));

        assert!(matches!(
            MatrixDescriptor::new(0, 4, 4, Layout::RowMajor),
            Err(LayoutError::ZeroDimension { name: "rows" })
        ));
        assert!(matches!(
            MatrixDescriptor::new(3, 0, 4, Layout::RowMajor),
            Err(LayoutError::ZeroDimension { name: "columns" })
        ));
    }

    #[test]
    fn test_packed_defaults() {
        let r = MatrixDescriptor::packed(3, 5, Layout::RowMajor).unwrap();
        assert_eq!(r.stride(), 5);
        assert!(r.is_packed());
        let c = MatrixDescriptor::packed(3, 5, Layout::ColumnMajor).unwrap();
        assert_eq!(c.stride(), 3);
        let padded = MatrixDescriptor::new(3, 5, 8, Layout::RowMajor).unwrap();
        assert!(!padded.is_packed());
    }

    #[test]
    fn test_descriptor_transpose_involution() {
        let d = MatrixDescriptor::new(3, 4, 6, Layout::RowMajor).unwrap();
        let t = d.transpose();
        assert_eq!(t.rows(), 4);
        assert_eq!(t.columns(), 3);
        assert_eq!(t.stride(), 6);
        assert_eq!(t.layout(), Layout::ColumnMajor);
        assert_eq!(t.transpose(), d);
    }

    #[test]
    fn test_transposed_view_reads_transpose() {
        let data = iota(12);
        // Row-major 3x4
        let a = Matrix::new(MatrixDescriptor::packed(3, 4, Layout::RowMajor).unwrap(), &data, 0)
            .unwrap();
        let at = a.transpose();
        assert_eq!(at.rows(), 4);
        assert_eq!(at.columns(), 3);
        for i in 0..3 {
            for j in 0..4 {
                assert_eq!(a.get(i, j), at.get(j, i));
            }
        }
        assert_eq!(a.get(1, 2), 6.0);
        assert!(std::ptr::eq(a.data(), at.data()));
    }

    #[test]
    fn test_storage_bounds() {
        // 2x3 row-major with stride 4 needs 7 elements
        let d = MatrixDescriptor::new(2, 3, 4, Layout::RowMajor).unwrap();
        let ok = iota(7);
        let short = iota(6);
        assert!(Matrix::new(d, &ok, 0).is_ok());
        let err = Matrix::new(d, &short, 0).unwrap_err();
        assert!(matches!(
            err,
            LayoutError::InsufficientStorage { required: 7, len: 6 }
        ));
        // the transposed descriptor addresses the same range
        assert!(Matrix::new(d.transpose(), &ok, 0).is_ok());
        assert!(Matrix::new(d.transpose(), &short, 0).is_err());
    }

    #[test]
    fn test_offset_view() {
        let data = iota(10);
        let d = MatrixDescriptor::packed(2, 2, Layout::ColumnMajor).unwrap();
        let m = Matrix::new(d, &data, 6).unwrap();
        // columns [6, 7] and [8, 9]
        assert_eq!(m.to_vec(Layout::RowMajor), vec![6.0, 8.0, 7.0, 9.0]);
        assert_eq!(m.to_vec(Layout::ColumnMajor), vec![6.0, 7.0, 8.0, 9.0]);
        assert!(Matrix::new(d, &data, 7).is_err());
    }

    #[test]
    fn test_conjugate_transpose() {
        let data = vec![
            Complex64::new(1.0, 1.0),
            Complex64::new(2.0, 2.0),
            Complex64::new(3.0, 3.0),
            Complex64::new(4.0, 4.0),
            Complex64::new(5.0, 5.0),
            Complex64::new(6.0, 6.0),
        ];
        let a = Matrix::new(MatrixDescriptor::packed(2, 3, Layout::RowMajor).unwrap(), &data, 0)
            .unwrap();
        let ah = a.conjugate_transpose();
        assert!(ah.is_conjugated());
        assert_eq!(ah.rows(), 3);
        assert_eq!(ah.get(2, 1), Complex64::new(6.0, -6.0));
        assert_eq!(ah.conjugate_transpose().get(1, 2), a.get(1, 2));
    }

    #[test]
    fn test_operand_flags() {
        let data = iota(12);
        let a = Matrix::new(MatrixDescriptor::packed(3, 4, Layout::RowMajor).unwrap(), &data, 0)
            .unwrap();

        let op = a.operand(Layout::RowMajor);
        assert!(!op.transposed);
        assert_eq!((op.rows, op.columns, op.stride), (3, 4, 4));

        // Column-major engine sees the buffer as a 4x3 matrix and the view
        // as its transpose.
        let op = a.operand(Layout::ColumnMajor);
        assert!(op.transposed);
        assert_eq!((op.rows, op.columns, op.stride), (4, 3, 4));

        // The transposed view is the stored matrix for a column-major engine.
        let op = a.transpose().operand(Layout::ColumnMajor);
        assert!(!op.transposed);
        assert_eq!((op.rows, op.columns), (4, 3));
    }

    #[test]
    fn test_matrix_mut() {
        let mut data = vec![0.0f64; 6];
        let d = MatrixDescriptor::packed(2, 3, Layout::RowMajor).unwrap();
        let mut m = MatrixMut::new(d, &mut data, 0).unwrap();
        m.set(1, 2, 5.0);
        m.transpose_mut().set(0, 1, 7.0);
        assert_eq!(m.get(1, 0), 7.0);
        assert_eq!(m.as_view().get(1, 2), 5.0);
        assert_eq!(data, vec![0.0, 0.0, 0.0, 7.0, 0.0, 5.0]);
    }
}
