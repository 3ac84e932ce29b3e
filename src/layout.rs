//! Storage layout and operand transpose flags.
//!
//! Both enums carry the CBLAS integer codes so an engine binding can pass
//! them through unchanged.

/// Memory layout of a matrix in its flat buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Layout {
    /// Row-major (C-style): elements of a row are adjacent.
    #[default]
    RowMajor,
    /// Column-major (Fortran-style): elements of a column are adjacent.
    ColumnMajor,
}

impl Layout {
    /// The layout a transposed view of the same buffer reports.
    #[inline]
    pub fn transpose(self) -> Layout {
        match self {
            Layout::RowMajor => Layout::ColumnMajor,
            Layout::ColumnMajor => Layout::RowMajor,
        }
    }

    /// Minimal stride for a `rows x columns` matrix stored in this layout.
    #[inline]
    pub fn leading_dim(self, rows: usize, columns: usize) -> usize {
        match self {
            Layout::RowMajor => columns,
            Layout::ColumnMajor => rows,
        }
    }

    /// Split `(rows, columns)` into `(major, minor)` extents, where the major
    /// extent is the one that advances by `stride`.
    #[inline]
    pub fn major_minor(self, rows: usize, columns: usize) -> (usize, usize) {
        match self {
            Layout::RowMajor => (rows, columns),
            Layout::ColumnMajor => (columns, rows),
        }
    }

    /// Linear index of element `(row, col)` for a matrix with the given stride.
    #[inline(always)]
    pub fn index(self, row: usize, col: usize, stride: usize) -> usize {
        match self {
            Layout::RowMajor => row * stride + col,
            Layout::ColumnMajor => col * stride + row,
        }
    }

    /// CBLAS `CBLAS_LAYOUT` value.
    #[inline]
    pub fn cblas_code(self) -> u32 {
        match self {
            Layout::RowMajor => 101,
            Layout::ColumnMajor => 102,
        }
    }
}

/// Transpose flag handed to the compute engine for a matrix operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u32)]
pub enum Transpose {
    /// Use the stored matrix as is.
    #[default]
    NoTrans = 111,
    /// Use the transpose of the stored matrix.
    Trans = 112,
    /// Use the conjugate transpose of the stored matrix.
    ConjTrans = 113,
}

impl Transpose {
    /// Flag for an operand that is `transposed` and/or `conjugated` relative
    /// to its stored form.
    ///
    /// Returns `None` for conjugation without transposition, which the CBLAS
    /// flag set cannot express.
    pub fn from_flags(transposed: bool, conjugated: bool) -> Option<Transpose> {
        match (transposed, conjugated) {
            (false, false) => Some(Transpose::NoTrans),
            (true, false) => Some(Transpose::Trans),
            (true, true) => Some(Transpose::ConjTrans),
            (false, true) => None,
        }
    }

    /// CBLAS `CBLAS_TRANSPOSE` value.
    #[inline]
    pub fn cblas_code(self) -> u32 {
        self as u32
    }
}
