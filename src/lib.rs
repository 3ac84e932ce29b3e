//! Layout descriptors, zero-copy views and band packing for BLAS-style
//! compute engines.
//!
//! The engine performs the arithmetic; this crate describes where its
//! operands live. Every vector and matrix is a descriptor (extents, stride,
//! layout) bound to a borrowed buffer and an offset, and every transformation
//! (transpose, conjugate, conjugate transpose) is a new view over the same
//! buffer.
//!
//! # Core Types
//!
//! - [`VectorDescriptor`], [`MatrixDescriptor`], [`BandMatrixDescriptor`]:
//!   validated, immutable layout values
//! - [`Vector`], [`Matrix`], [`BandMatrix`]: views binding a descriptor to
//!   storage, with a lazy element operation ([`Identity`] or [`Conj`])
//! - [`VectorMut`], [`MatrixMut`]: mutable views for engine outputs
//! - [`VectorOperand`], [`MatrixOperand`], [`BandOperand`]: what the engine
//!   receives for each argument
//!
//! # Band packing
//!
//! [`BandMatrix::from_matrix`] copies the band of a dense matrix into
//! compact storage (the CBLAS `?gbmv` convention), for either layout.
//!
//! ```rust
//! use strided_band::{BandMatrix, Layout, Matrix, MatrixDescriptor};
//!
//! let data = vec![
//!     1.0, 2.0, 0.0,
//!     3.0, 4.0, 5.0,
//!     0.0, 6.0, 7.0,
//! ];
//! let m = Matrix::new(MatrixDescriptor::packed(3, 3, Layout::RowMajor).unwrap(), &data, 0)
//!     .unwrap();
//! let band = BandMatrix::from_matrix(&m, 1, 1).unwrap();
//!
//! assert_eq!(band.stride(), 3);
//! assert_eq!(band.data(), &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 0.0]);
//!
//! // Transpose (zero-copy)
//! let t = band.transpose();
//! assert_eq!(t.get(0, 1), 3.0);
//! ```

mod band;
mod bounds;
mod conjugated;
mod element_op;
mod layout;
mod matrix;
pub mod operand;
mod pack;
mod scalar;
mod vector;

// ============================================================================
// Layout and element types
// ============================================================================
pub use element_op::{Conj, ElementOp, ElementOpApply, Identity};
pub use layout::{Layout, Transpose};
pub use scalar::{Scalar, ScalarKind};

// ============================================================================
// Descriptors and views
// ============================================================================
pub use band::{BandMatrix, BandMatrixDescriptor, ConjugateTransposedBandMatrixDescriptor};
pub use conjugated::Conjugated;
pub use matrix::{Matrix, MatrixDescriptor, MatrixMut};
pub use vector::{ConjugatedVectorDescriptor, Vector, VectorDescriptor, VectorMut};

// ============================================================================
// Compute-engine boundary
// ============================================================================
pub use operand::{
    ensure_matvec_sizes, ensure_same_size, BandOperand, MatrixOperand, VectorOperand,
};

// ============================================================================
// Error types
// ============================================================================

/// Errors raised while building descriptors and views.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    /// A size, row count or column count is zero.
    #[error("{name} must be positive")]
    ZeroDimension { name: &'static str },

    /// Stride is smaller than the layout requires.
    #[error("stride {stride} is smaller than the minimum {min}")]
    StrideTooSmall { stride: usize, min: usize },

    /// A bandwidth is not strictly less than the matching dimension.
    #[error("{name} {bandwidth} must be less than {limit}")]
    BandwidthOutOfRange {
        name: &'static str,
        bandwidth: usize,
        limit: usize,
    },

    /// Buffer is too short for the addressed range.
    #[error("storage of length {len} is too small, {required} elements required")]
    InsufficientStorage { required: usize, len: usize },

    /// Integer overflow while computing the addressed range.
    #[error("offset overflow while computing addressed range")]
    OffsetOverflow,

    /// Two operands disagree in size.
    #[error("incompatible operand size: expected {expected}, found {found}")]
    IncompatibleOperandSize { expected: usize, found: usize },

    /// Strict packing found a non-zero entry outside the requested band.
    #[error("non-zero entry outside the band at ({row}, {column})")]
    NonZeroOutsideBand { row: usize, column: usize },
}

/// Coarse classification of [`LayoutError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidArgument,
    InsufficientStorage,
    IncompatibleOperandSize,
}

impl LayoutError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LayoutError::ZeroDimension { .. }
            | LayoutError::StrideTooSmall { .. }
            | LayoutError::BandwidthOutOfRange { .. }
            | LayoutError::NonZeroOutsideBand { .. } => ErrorKind::InvalidArgument,
            LayoutError::InsufficientStorage { .. } | LayoutError::OffsetOverflow => {
                ErrorKind::InsufficientStorage
            }
            LayoutError::IncompatibleOperandSize { .. } => ErrorKind::IncompatibleOperandSize,
        }
    }
}

/// Result type for layout operations.
pub type Result<T> = std::result::Result<T, LayoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = LayoutError::BandwidthOutOfRange {
            name: "upper_bandwidth",
            bandwidth: 5,
            limit: 5,
        };
        assert_eq!(err.to_string(), "upper_bandwidth 5 must be less than 5");
        let err = LayoutError::InsufficientStorage {
            required: 4,
            len: 3,
        };
        assert_eq!(
            err.to_string(),
            "storage of length 3 is too small, 4 elements required"
        );
        assert_eq!(err.kind(), ErrorKind::InsufficientStorage);
    }
}
