//! Conversion between dense and banded storage.
//!
//! Packing runs in a single row-major working frame. A column-major source
//! is read through its transpose (with the bandwidths swapped), packed
//! row by row, and the resulting descriptor is transposed back, so both
//! layouts go through the same loop and no data is copied twice.

use crate::band::{validate_band_shape, BandMatrix, BandMatrixDescriptor};
use crate::element_op::ElementOp;
use crate::layout::Layout;
use crate::matrix::Matrix;
use crate::scalar::Scalar;
use crate::{LayoutError, Result};

impl<T: Scalar> BandMatrix<'static, T> {
    /// Pack the band `[i - lower_bandwidth, i + upper_bandwidth]` of every
    /// row of `matrix` into a freshly allocated band matrix.
    ///
    /// The result reports the same layout as `matrix`. Element operations of
    /// the source view are applied while copying. Entries outside the band
    /// are dropped without inspection; see [`BandMatrix::from_matrix_strict`].
    pub fn from_matrix<Op: ElementOp>(
        matrix: &Matrix<'_, T, Op>,
        upper_bandwidth: usize,
        lower_bandwidth: usize,
    ) -> Result<Self> {
        validate_band_shape(
            matrix.rows(),
            matrix.columns(),
            upper_bandwidth,
            lower_bandwidth,
        )?;

        let flipped = matrix.layout() == Layout::ColumnMajor;
        let (source, upper, lower) = if flipped {
            (matrix.transpose(), lower_bandwidth, upper_bandwidth)
        } else {
            (*matrix, upper_bandwidth, lower_bandwidth)
        };
        let working = BandMatrixDescriptor::packed(
            source.rows(),
            source.columns(),
            upper,
            lower,
            Layout::RowMajor,
        )?;

        log::debug!(
            "packing {}x{} {:?} matrix into band ku={} kl={} (flipped={})",
            matrix.rows(),
            matrix.columns(),
            matrix.layout(),
            upper_bandwidth,
            lower_bandwidth,
            flipped
        );

        let packed = pack_row_major(&source, &working);
        let band = BandMatrix::from_owned(working, packed);
        Ok(if flipped { band.into_transpose() } else { band })
    }

    /// Like [`BandMatrix::from_matrix`], but fail with
    /// [`LayoutError::NonZeroOutsideBand`] if an entry outside the band is
    /// non-zero.
    pub fn from_matrix_strict<Op: ElementOp>(
        matrix: &Matrix<'_, T, Op>,
        upper_bandwidth: usize,
        lower_bandwidth: usize,
    ) -> Result<Self> {
        validate_band_shape(
            matrix.rows(),
            matrix.columns(),
            upper_bandwidth,
            lower_bandwidth,
        )?;
        for row in 0..matrix.rows() {
            for column in 0..matrix.columns() {
                let in_band =
                    column + lower_bandwidth >= row && column <= row + upper_bandwidth;
                if !in_band && !matrix.get(row, column).is_zero() {
                    return Err(LayoutError::NonZeroOutsideBand { row, column });
                }
            }
        }
        Self::from_matrix(matrix, upper_bandwidth, lower_bandwidth)
    }
}

/// Copy the band of a row-major `source` into a zeroed buffer laid out by the
/// row-major `target`.
fn pack_row_major<T: Scalar, Op: ElementOp>(
    source: &Matrix<'_, T, Op>,
    target: &BandMatrixDescriptor,
) -> Vec<T> {
    debug_assert_eq!(source.layout(), Layout::RowMajor);
    debug_assert_eq!(target.layout(), Layout::RowMajor);

    let upper = target.upper_bandwidth();
    let lower = target.lower_bandwidth();
    let columns = source.columns();
    let band_stride = target.stride();
    let data = source.data();

    let mut packed = vec![T::zero(); target.packed_len()];
    for i in 0..target.rows() {
        let begin_src = i.saturating_sub(lower);
        let begin_dst = lower.saturating_sub(i);
        let end_src = columns.min(i + upper + 1);
        // rows below the last column's lower diagonal stay padding
        if begin_src >= end_src {
            continue;
        }
        let len = end_src - begin_src;

        let src_start = source.offset() + i * source.stride() + begin_src;
        let dst_start = i * band_stride + begin_dst;
        let src_row = &data[src_start..src_start + len];
        let dst_row = &mut packed[dst_start..dst_start + len];
        for (dst, &src) in dst_row.iter_mut().zip(src_row) {
            *dst = Op::apply(src);
        }
    }
    log::trace!(
        "packed {} rows into stride {} ({} elements)",
        target.rows(),
        band_stride,
        packed.len()
    );
    packed
}

impl<'a, T: Scalar, Op: ElementOp> BandMatrix<'a, T, Op> {
    /// Unpack into a dense, tightly packed buffer in `layout`.
    ///
    /// Entries outside the band are zero; element operations of this view are
    /// applied.
    pub fn to_dense(&self, layout: Layout) -> Vec<T> {
        let (rows, columns) = (self.rows(), self.columns());
        let mut dense = vec![T::zero(); rows * columns];
        let ld = layout.leading_dim(rows, columns);
        let upper = self.upper_bandwidth();
        let lower = self.lower_bandwidth();
        for i in 0..rows {
            let begin = i.saturating_sub(lower);
            let end = columns.min(i + upper + 1);
            for j in begin..end {
                dense[layout.index(i, j, ld)] = self.get(i, j);
            }
        }
        dense
    }
}
