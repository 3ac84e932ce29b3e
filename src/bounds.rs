//! Addressable-range checks shared by all storage-bound views.

use crate::layout::Layout;
use crate::{LayoutError, Result};

/// Buffer length needed for `count` elements `stride` apart, starting at
/// `offset` and each followed by `tail` more addressable elements.
///
/// Returns the largest address plus one. `count` must be positive.
fn required_len(count: usize, stride: usize, tail: usize, offset: usize) -> Result<usize> {
    debug_assert!(count > 0);
    (count - 1)
        .checked_mul(stride)
        .and_then(|end| end.checked_add(tail))
        .and_then(|end| end.checked_add(offset))
        .and_then(|end| end.checked_add(1))
        .ok_or(LayoutError::OffsetOverflow)
}

/// Length needed by a strided vector: largest address is
/// `offset + (size - 1) * stride`.
pub(crate) fn required_len_vector(size: usize, stride: usize, offset: usize) -> Result<usize> {
    required_len(size, stride, 0, offset)
}

/// Length needed by a dense matrix: the last major line starts at
/// `offset + (major - 1) * stride` and spans `minor` elements.
pub(crate) fn required_len_matrix(
    rows: usize,
    columns: usize,
    stride: usize,
    layout: Layout,
    offset: usize,
) -> Result<usize> {
    let (major, minor) = layout.major_minor(rows, columns);
    required_len(major, stride, minor - 1, offset)
}

/// Length needed by a band matrix: every major line holds
/// `upper + lower + 1` packed diagonals.
pub(crate) fn required_len_band(
    rows: usize,
    columns: usize,
    upper: usize,
    lower: usize,
    stride: usize,
    layout: Layout,
    offset: usize,
) -> Result<usize> {
    let (major, _) = layout.major_minor(rows, columns);
    required_len(major, stride, upper + lower, offset)
}

/// Fail with [`LayoutError::InsufficientStorage`] unless `len` covers `required`.
pub(crate) fn ensure_fits(required: usize, len: usize) -> Result<()> {
    if required > len {
        return Err(LayoutError::InsufficientStorage { required, len });
    }
    Ok(())
}
