//! Band matrix descriptors and views.
//!
//! A band matrix keeps only the `upper_bandwidth` diagonals above and the
//! `lower_bandwidth` diagonals below the main diagonal. Storage follows the
//! CBLAS `?gbmv` convention:
//!
//! - row-major: element `(i, j)` sits at `i * stride + (lower + j - i)`,
//!   so each row is left-aligned on the first stored diagonal;
//! - column-major: element `(i, j)` sits at `j * stride + (upper + i - j)`.
//!
//! The two conventions map onto each other under [`BandMatrixDescriptor::transpose`],
//! which swaps the extents and the bandwidths and flips the layout.

use std::borrow::Cow;
use std::marker::PhantomData;

use crate::bounds::{ensure_fits, required_len_band};
use crate::conjugated::Conjugated;
use crate::element_op::{ElementOp, Identity};
use crate::layout::Layout;
use crate::operand::BandOperand;
use crate::scalar::Scalar;
use crate::{LayoutError, Result};

/// Layout of a band matrix in a flat buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BandMatrixDescriptor {
    rows: usize,
    columns: usize,
    upper_bandwidth: usize,
    lower_bandwidth: usize,
    stride: usize,
    layout: Layout,
}

/// A band descriptor that is the conjugate transpose of its base.
pub type ConjugateTransposedBandMatrixDescriptor = Conjugated<BandMatrixDescriptor>;

impl BandMatrixDescriptor {
    /// Describe a `rows x columns` band matrix.
    ///
    /// Requires `upper_bandwidth < columns`, `lower_bandwidth < rows` and
    /// `stride >= upper_bandwidth + lower_bandwidth + 1`.
    pub fn new(
        rows: usize,
        columns: usize,
        upper_bandwidth: usize,
        lower_bandwidth: usize,
        stride: usize,
        layout: Layout,
    ) -> Result<Self> {
        validate_band_shape(rows, columns, upper_bandwidth, lower_bandwidth)?;
        let min = upper_bandwidth + lower_bandwidth + 1;
        if stride < min {
            return Err(LayoutError::StrideTooSmall { stride, min });
        }
        Ok(BandMatrixDescriptor {
            rows,
            columns,
            upper_bandwidth,
            lower_bandwidth,
            stride,
            layout,
        })
    }

    /// Tightly packed band: `stride = upper_bandwidth + lower_bandwidth + 1`.
    pub fn packed(
        rows: usize,
        columns: usize,
        upper_bandwidth: usize,
        lower_bandwidth: usize,
        layout: Layout,
    ) -> Result<Self> {
        Self::new(
            rows,
            columns,
            upper_bandwidth,
            lower_bandwidth,
            upper_bandwidth + lower_bandwidth + 1,
            layout,
        )
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
    pub fn upper_bandwidth(&self) -> usize {
        self.upper_bandwidth
    }

    #[inline]
    pub fn lower_bandwidth(&self) -> usize {
        self.lower_bandwidth
    }

    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    #[inline]
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Number of stored diagonals.
    #[inline]
    pub fn width(&self) -> usize {
        self.upper_bandwidth + self.lower_bandwidth + 1
    }

    /// Number of major lines (rows when row-major, columns when column-major).
    #[inline]
    pub fn major_len(&self) -> usize {
        self.layout.major_minor(self.rows, self.columns).0
    }

    /// Buffer length of a freshly allocated band with this descriptor.
    #[inline]
    pub fn packed_len(&self) -> usize {
        self.major_len() * self.stride
    }

    /// Same buffer read as the transpose.
    ///
    /// Transposing moves the diagonals above the main diagonal below it, so
    /// the bandwidths swap along with the extents.
    #[inline]
    pub fn transpose(self) -> Self {
        BandMatrixDescriptor {
            rows: self.columns,
            columns: self.rows,
            upper_bandwidth: self.lower_bandwidth,
            lower_bandwidth: self.upper_bandwidth,
            stride: self.stride,
            layout: self.layout.transpose(),
        }
    }

    /// Transpose tagged for conjugated reading.
    #[inline]
    pub fn conjugate_transpose(self) -> ConjugateTransposedBandMatrixDescriptor {
        Conjugated::new(self.transpose())
    }

    /// Whether `(row, col)` lies inside the band.
    #[inline]
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows
            && col < self.columns
            && col + self.lower_bandwidth >= row
            && col <= row + self.upper_bandwidth
    }

    /// Offset of in-band element `(row, col)` relative to the view base.
    pub fn index(&self, row: usize, col: usize) -> Option<usize> {
        if !self.contains(row, col) {
            return None;
        }
        Some(match self.layout {
            Layout::RowMajor => row * self.stride + (self.lower_bandwidth + col - row),
            Layout::ColumnMajor => col * self.stride + (self.upper_bandwidth + row - col),
        })
    }

    /// Smallest buffer length that holds this band starting at `offset`.
    pub fn required_len(&self, offset: usize) -> Result<usize> {
        required_len_band(
            self.rows,
            self.columns,
            self.upper_bandwidth,
            self.lower_bandwidth,
            self.stride,
            self.layout,
            offset,
        )
    }
}

impl ConjugateTransposedBandMatrixDescriptor {
    #[inline]
    pub fn rows(&self) -> usize {
        self.base().rows
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.base().columns
    }

    #[inline]
    pub fn upper_bandwidth(&self) -> usize {
        self.base().upper_bandwidth
    }

    #[inline]
    pub fn lower_bandwidth(&self) -> usize {
        self.base().lower_bandwidth
    }

    #[inline]
    pub fn stride(&self) -> usize {
        self.base().stride
    }

    #[inline]
    pub fn layout(&self) -> Layout {
        self.base().layout
    }

    /// Plain transpose; the conjugation tag is kept.
    #[inline]
    pub fn transpose(self) -> Self {
        Conjugated::new(self.base().transpose())
    }

    /// Undo the conjugate transpose.
    #[inline]
    pub fn conjugate_transpose(self) -> BandMatrixDescriptor {
        self.base().transpose()
    }
}

/// Bandwidth and extent checks shared by descriptors and packing.
pub(crate) fn validate_band_shape(
    rows: usize,
    columns: usize,
    upper_bandwidth: usize,
    lower_bandwidth: usize,
) -> Result<()> {
    if rows == 0 {
        return Err(LayoutError::ZeroDimension { name: "rows" });
    }
    if columns == 0 {
        return Err(LayoutError::ZeroDimension { name: "columns" });
    }
    if upper_bandwidth >= columns {
        return Err(LayoutError::BandwidthOutOfRange {
            name: "upper_bandwidth",
            bandwidth: upper_bandwidth,
            limit: columns,
        });
    }
    if lower_bandwidth >= rows {
        return Err(LayoutError::BandwidthOutOfRange {
            name: "lower_bandwidth",
            bandwidth: lower_bandwidth,
            limit: rows,
        });
    }
    Ok(())
}

// ============================================================================
// BandMatrix
// ============================================================================

/// Band matrix view.
///
/// Storage is borrowed when the view is built over caller data with
/// [`BandMatrix::new`], and owned when produced by
/// [`BandMatrix::from_matrix`]. Transposed and conjugated views borrow the
/// storage of the view they come from.
pub struct BandMatrix<'a, T: Clone, Op: ElementOp = Identity> {
    descriptor: BandMatrixDescriptor,
    storage: Cow<'a, [T]>,
    offset: usize,
    _op: PhantomData<Op>,
}

impl<T: Clone, Op: ElementOp> Clone for BandMatrix<'_, T, Op> {
    fn clone(&self) -> Self {
        BandMatrix {
            descriptor: self.descriptor,
            storage: self.storage.clone(),
            offset: self.offset,
            _op: PhantomData,
        }
    }
}

impl<T: Clone, Op: ElementOp> std::fmt::Debug for BandMatrix<'_, T, Op> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BandMatrix")
            .field("descriptor", &self.descriptor)
            .field("offset", &self.offset)
            .field("owned", &self.is_owned())
            .field("conjugated", &Op::CONJUGATES)
            .finish()
    }
}

impl<'a, T: Clone> BandMatrix<'a, T> {
    /// Bind `descriptor` to caller `data`, starting at `offset`.
    pub fn new(descriptor: BandMatrixDescriptor, data: &'a [T], offset: usize) -> Result<Self> {
        ensure_fits(descriptor.required_len(offset)?, data.len())?;
        Ok(BandMatrix {
            descriptor,
            storage: Cow::Borrowed(data),
            offset,
            _op: PhantomData,
        })
    }
}

impl<T: Clone> BandMatrix<'static, T> {
    /// Take ownership of a buffer laid out by `descriptor` at offset 0.
    pub(crate) fn from_owned(descriptor: BandMatrixDescriptor, data: Vec<T>) -> Self {
        debug_assert!(descriptor.packed_len() <= data.len());
        BandMatrix {
            descriptor,
            storage: Cow::Owned(data),
            offset: 0,
            _op: PhantomData,
        }
    }
}

impl<'a, T: Clone, Op: ElementOp> BandMatrix<'a, T, Op> {
    #[inline]
    pub fn descriptor(&self) -> BandMatrixDescriptor {
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
    pub fn upper_bandwidth(&self) -> usize {
        self.descriptor.upper_bandwidth
    }

    #[inline]
    pub fn lower_bandwidth(&self) -> usize {
        self.descriptor.lower_bandwidth
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

    /// The whole backing buffer.
    #[inline]
    pub fn data(&self) -> &[T] {
        &*self.storage
    }

    /// Whether this view owns its buffer.
    #[inline]
    pub fn is_owned(&self) -> bool {
        matches!(self.storage, Cow::Owned(_))
    }

    #[inline]
    pub fn is_conjugated(&self) -> bool {
        Op::CONJUGATES
    }

    /// Transpose (zero-copy), borrowing this view's storage.
    pub fn transpose(&self) -> BandMatrix<'_, T, Op> {
        self.rewrap(self.descriptor.transpose())
    }

    /// Transpose (zero-copy), keeping ownership of the storage.
    pub fn into_transpose(self) -> BandMatrix<'a, T, Op> {
        BandMatrix {
            descriptor: self.descriptor.transpose(),
            storage: self.storage,
            offset: self.offset,
            _op: PhantomData,
        }
    }

    /// Complex conjugate (compose Conj without changing the descriptor).
    pub fn conjugate(&self) -> BandMatrix<'_, T, Op::ComposeConj> {
        self.rewrap(self.descriptor)
    }

    /// Conjugate transpose (zero-copy).
    pub fn conjugate_transpose(&self) -> BandMatrix<'_, T, Op::ComposeConj> {
        self.rewrap(self.descriptor.transpose())
    }

    /// Detach from borrowed storage by copying it.
    pub fn into_owned(self) -> BandMatrix<'static, T, Op> {
        BandMatrix {
            descriptor: self.descriptor,
            storage: Cow::Owned(self.storage.into_owned()),
            offset: self.offset,
            _op: PhantomData,
        }
    }

    /// Operand tuple for an engine that expects its matrices in `order`.
    ///
    /// As for dense matrices, the tuple describes the stored band in `order`
    /// and flags the view as its transpose when the layouts differ.
    pub fn operand(&self, order: Layout) -> BandOperand<'_, T> {
        let transposed = self.descriptor.layout != order;
        let stored = if transposed {
            self.descriptor.transpose()
        } else {
            self.descriptor
        };
        BandOperand {
            data: &*self.storage,
            rows: stored.rows,
            columns: stored.columns,
            upper_bandwidth: stored.upper_bandwidth,
            lower_bandwidth: stored.lower_bandwidth,
            stride: stored.stride,
            offset: self.offset,
            layout: order,
            transposed,
            conjugated: Op::CONJUGATES,
        }
    }

    fn rewrap<NewOp: ElementOp>(
        &self,
        descriptor: BandMatrixDescriptor,
    ) -> BandMatrix<'_, T, NewOp> {
        BandMatrix {
            descriptor,
            storage: Cow::Borrowed(&*self.storage),
            offset: self.offset,
            _op: PhantomData,
        }
    }
}

impl<'a, T: Scalar, Op: ElementOp> BandMatrix<'a, T, Op> {
    /// Logical element `(row, col)`: the stored value with the element
    /// operation applied inside the band, zero outside it.
    pub fn get(&self, row: usize, col: usize) -> T {
        assert!(
            row < self.descriptor.rows && col < self.descriptor.columns,
            "index ({}, {}) out of bounds for {}x{} band matrix",
            row,
            col,
            self.descriptor.rows,
            self.descriptor.columns
        );
        match self.descriptor.index(row, col) {
            Some(pos) => Op::apply(self.storage[self.offset + pos]),
            None => T::zero(),
        }
    }
}
