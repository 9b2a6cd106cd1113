//! Error types for matrix operations and linear-system solves.
//!
//! Every failure in this crate is typed and returned to the immediate
//! caller, using `thiserror` for the library error type with helper
//! methods for error categorization.

use std::fmt;
use thiserror::Error;

/// Why a linear system could not be assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IrregularReason {
    /// The coefficient matrix is not square.
    NotSquare {
        /// Number of rows of the coefficient matrix
        rows: usize,
        /// Number of columns of the coefficient matrix
        cols: usize,
    },
    /// The right-hand side length differs from the matrix order.
    RhsLength {
        /// Order of the coefficient matrix
        order: usize,
        /// Length of the offending right-hand side
        rhs_len: usize,
    },
    /// The system is too small for the requested algorithm.
    OrderTooSmall {
        /// Order of the system
        order: usize,
        /// Minimum order the algorithm accepts
        min: usize,
    },
}

impl fmt::Display for IrregularReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotSquare { rows, cols } => {
                write!(f, "coefficient matrix is {rows}x{cols}, not square")
            }
            Self::RhsLength { order, rhs_len } => {
                write!(f, "right-hand side has length {rhs_len}, expected {order}")
            }
            Self::OrderTooSmall { order, min } => {
                write!(f, "system order {order} is below the minimum of {min}")
            }
        }
    }
}

/// Errors that can occur in matrix arithmetic and linear solves.
#[derive(Debug, Error)]
pub enum LinSysError {
    /// Operand shapes are incompatible for the requested operation.
    #[error("dimension mismatch in {operation}: left is {left:?}, right is {right:?}")]
    DimensionMismatch {
        /// Name of the operation that failed
        operation: &'static str,
        /// Shape (rows, cols) of the left operand
        left: (usize, usize),
        /// Shape (rows, cols) of the right operand
        right: (usize, usize),
    },

    /// The operation requires a square matrix.
    #[error("matrix is {rows}x{cols}, a square matrix is required")]
    NotSquare {
        /// Number of rows
        rows: usize,
        /// Number of columns
        cols: usize,
    },

    /// A linear system was built from an incompatible matrix/RHS pair.
    #[error("irregular linear system: {reason}")]
    IrregularSystem {
        /// What made the system irregular
        reason: IrregularReason,
    },

    /// A container was requested with an empty shape or mismatched data.
    #[error("invalid shape {rows}x{cols}")]
    InvalidShape {
        /// Requested number of rows
        rows: usize,
        /// Requested number of columns
        cols: usize,
    },

    /// Row-major data with rows of differing lengths.
    #[error("row {row} has {got} columns, expected {expected}")]
    RaggedRows {
        /// Index of the first ragged row
        row: usize,
        /// Column count of the first row
        expected: usize,
        /// Column count of the ragged row
        got: usize,
    },

    /// A unit-triangular system whose diagonal is not within tolerance of 1.
    #[error("diagonal coefficient {value} at index {index} is not 1")]
    InvalidUnitDiagonal {
        /// Diagonal index
        index: usize,
        /// The offending coefficient
        value: f64,
    },

    /// An exact-zero diagonal pivot met during a diagonal or triangular solve.
    #[error("zero diagonal pivot at index {index}")]
    SingularDiagonal {
        /// Diagonal index
        index: usize,
    },

    /// A vanishing elimination pivot in the Thomas algorithm.
    #[error("tridiagonal system is singular at row {index} (pivot {pivot})")]
    SingularTridiagonal {
        /// Row at which elimination broke down
        index: usize,
        /// The pivot value
        pivot: f64,
    },

    /// A zero, or under the strict policy near-zero, LDR pivot.
    #[error("matrix is singular or nearly singular: pivot D[{index}] = {pivot}")]
    SingularOrNearSingular {
        /// Diagonal index of the pivot
        index: usize,
        /// The pivot value
        pivot: f64,
    },

    /// A partial resolution was requested before any factorization.
    #[error("no factorization available, call factor() first")]
    NotFactored,

    /// Inversion or conditioning failed because the matrix is not invertible.
    #[error("matrix is not invertible")]
    Singular(#[source] Box<LinSysError>),
}

/// A specialized `Result` type for linear-system operations.
pub type Result<T> = std::result::Result<T, LinSysError>;

impl LinSysError {
    pub(crate) fn mismatch(
        operation: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    ) -> Self {
        LinSysError::DimensionMismatch {
            operation,
            left,
            right,
        }
    }

    pub(crate) fn irregular(reason: IrregularReason) -> Self {
        LinSysError::IrregularSystem { reason }
    }

    /// Returns `true` if this is a shape-compatibility error.
    ///
    /// This includes `DimensionMismatch` and `NotSquare`.
    pub fn is_dimension_error(&self) -> bool {
        matches!(
            self,
            LinSysError::DimensionMismatch { .. } | LinSysError::NotSquare { .. }
        )
    }

    /// Returns `true` if the failure comes from a vanishing pivot.
    ///
    /// This includes the three pivot errors and the wrapping `Singular`.
    pub fn is_singular(&self) -> bool {
        matches!(
            self,
            LinSysError::SingularDiagonal { .. }
                | LinSysError::SingularTridiagonal { .. }
                | LinSysError::SingularOrNearSingular { .. }
                | LinSysError::Singular(_)
        )
    }

    /// Returns `true` if the error was raised while building a container or system.
    pub fn is_construction_error(&self) -> bool {
        matches!(
            self,
            LinSysError::IrregularSystem { .. }
                | LinSysError::InvalidShape { .. }
                | LinSysError::RaggedRows { .. }
                | LinSysError::InvalidUnitDiagonal { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_error_display() {
        let err = LinSysError::mismatch("add", (2, 3), (3, 2));
        assert_eq!(
            err.to_string(),
            "dimension mismatch in add: left is (2, 3), right is (3, 2)"
        );

        let err = LinSysError::irregular(IrregularReason::RhsLength {
            order: 3,
            rhs_len: 4,
        });
        assert_eq!(
            err.to_string(),
            "irregular linear system: right-hand side has length 4, expected 3"
        );
    }

    #[test]
    fn test_singular_keeps_source() {
        let err = LinSysError::Singular(Box::new(LinSysError::SingularOrNearSingular {
            index: 1,
            pivot: 0.0,
        }));
        assert!(err.is_singular());
        let source = err.source().expect("Singular should carry its cause");
        assert!(source.to_string().contains("D[1]"));
    }

    #[test]
    fn test_categories() {
        let dim = LinSysError::NotSquare { rows: 2, cols: 3 };
        let piv = LinSysError::SingularDiagonal { index: 0 };
        let ctor = LinSysError::InvalidUnitDiagonal {
            index: 2,
            value: 1.5,
        };

        assert!(dim.is_dimension_error());
        assert!(!dim.is_singular());
        assert!(piv.is_singular());
        assert!(!piv.is_construction_error());
        assert!(ctor.is_construction_error());
        assert!(!LinSysError::NotFactored.is_construction_error());
    }
}
