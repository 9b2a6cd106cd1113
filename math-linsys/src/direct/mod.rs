//! Direct solvers for linear systems
//!
//! This module provides direct (non-iterative) solvers:
//! - [`DiagonalSolver`]: O(n), one division per unknown
//! - [`LowerTriangularSolver`], [`UnitLowerTriangularSolver`]: forward substitution
//! - [`UpperTriangularSolver`], [`UnitUpperTriangularSolver`]: backward substitution
//! - [`LdrFactorization`]: `A = L·D·R` without pivoting, factor once and solve many
//! - [`ThomasSolver`]: O(n) elimination for [`TridiagonalMatrix`](crate::TridiagonalMatrix)
//!
//! [`solve`] dispatches on a [`SolverKind`] for callers that pick the
//! structure at runtime.

mod diagonal;
mod kind;
mod ldr;
mod thomas;
mod triangular;

pub use diagonal::DiagonalSolver;
pub use kind::{SolverKind, solve, solve_with_config};
pub use ldr::{LdrFactorization, LdrFactors};
pub use thomas::ThomasSolver;
pub use triangular::{
    LowerTriangularSolver, UnitLowerTriangularSolver, UnitUpperTriangularSolver,
    UpperTriangularSolver,
};

use crate::dense::{Matrix, Vector};
use crate::error::{IrregularReason, LinSysError, Result};
use crate::traits::RealField;

/// Validate a dense system and return its order.
pub(crate) fn check_square_system<T: RealField>(
    matrix: &Matrix<T>,
    rhs: &Vector<T>,
) -> Result<usize> {
    let (rows, cols) = matrix.shape();
    if rows != cols {
        return Err(LinSysError::irregular(IrregularReason::NotSquare { rows, cols }));
    }
    check_rhs_length(rows, rhs)?;
    Ok(rows)
}

/// Validate a right-hand side against an order.
pub(crate) fn check_rhs_length<T: RealField>(order: usize, rhs: &Vector<T>) -> Result<()> {
    if rhs.len() != order {
        return Err(LinSysError::irregular(IrregularReason::RhsLength {
            order,
            rhs_len: rhs.len(),
        }));
    }
    Ok(())
}

/// Reject a diagonal that strays from 1 by more than `tolerance`, or is NaN.
pub(crate) fn check_unit_diagonal<T: RealField>(matrix: &Matrix<T>, tolerance: f64) -> Result<()> {
    let tol = T::from_real(tolerance);
    for i in 0..matrix.nrows() {
        let value = matrix.get(i, i);
        if !((value - T::one()).abs() <= tol) {
            return Err(LinSysError::InvalidUnitDiagonal {
                index: i,
                value: value.to_real(),
            });
        }
    }
    Ok(())
}
