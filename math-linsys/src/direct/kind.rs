//! Runtime selection of a dense solver

use super::{
    DiagonalSolver, LdrFactorization, LowerTriangularSolver, UnitLowerTriangularSolver,
    UnitUpperTriangularSolver, UpperTriangularSolver,
};
use crate::config::SolverConfig;
use crate::dense::{Matrix, Vector};
use crate::error::Result;
use crate::traits::{LinearSystem, RealField};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Structure of a dense coefficient matrix, and so which solver applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SolverKind {
    Diagonal,
    LowerTriangular,
    UnitLowerTriangular,
    UpperTriangular,
    UnitUpperTriangular,
    /// General square matrix, solved through LDR factorization
    Full,
}

impl SolverKind {
    /// Cheapest kind that fits the exact zero pattern of `matrix`.
    ///
    /// Unit variants are chosen when every diagonal coefficient is within
    /// `tolerance` of 1. A matrix that is both lower and upper triangular is
    /// reported as [`SolverKind::Diagonal`].
    pub fn detect<T: RealField>(matrix: &Matrix<T>, tolerance: f64) -> Self {
        let a = matrix.as_array();
        let zero = T::zero();
        let lower = a.indexed_iter().all(|((i, j), &v)| j <= i || v == zero);
        let upper = a.indexed_iter().all(|((i, j), &v)| j >= i || v == zero);
        let tol = T::from_real(tolerance);
        let unit = a.diag().iter().all(|&d| (d - T::one()).abs() <= tol);

        match (lower, upper, unit) {
            (true, true, _) => SolverKind::Diagonal,
            (true, false, true) => SolverKind::UnitLowerTriangular,
            (true, false, false) => SolverKind::LowerTriangular,
            (false, true, true) => SolverKind::UnitUpperTriangular,
            (false, true, false) => SolverKind::UpperTriangular,
            (false, false, _) => SolverKind::Full,
        }
    }
}

/// Solve `matrix · x = rhs` with the solver for `kind` and default configuration.
///
/// The matrix is assumed to have the structure `kind` names; coefficients
/// outside that structure are ignored.
///
/// ```
/// use math_audio_linsys::{Matrix, SolverKind, Vector, solve};
///
/// let a = Matrix::from_rows(&[[2.0, 0.0], [1.0, 1.0]]);
/// let x = solve(SolverKind::LowerTriangular, &a, &Vector::from_vec(vec![2.0, 3.0])).unwrap();
/// assert_eq!(x.to_vec(), vec![1.0, 2.0]);
/// ```
pub fn solve<T: RealField>(
    kind: SolverKind,
    matrix: &Matrix<T>,
    rhs: &Vector<T>,
) -> Result<Vector<T>> {
    solve_with_config(kind, matrix, rhs, &SolverConfig::default())
}

/// [`solve`] with an explicit configuration.
pub fn solve_with_config<T: RealField>(
    kind: SolverKind,
    matrix: &Matrix<T>,
    rhs: &Vector<T>,
    config: &SolverConfig,
) -> Result<Vector<T>> {
    let rhs = rhs.clone();
    match kind {
        SolverKind::Diagonal => DiagonalSolver::new(matrix, rhs)?.resolution(),
        SolverKind::LowerTriangular => LowerTriangularSolver::new(matrix, rhs)?.resolution(),
        SolverKind::UnitLowerTriangular => {
            UnitLowerTriangularSolver::with_config(matrix, rhs, config)?.resolution()
        }
        SolverKind::UpperTriangular => UpperTriangularSolver::new(matrix, rhs)?.resolution(),
        SolverKind::UnitUpperTriangular => {
            UnitUpperTriangularSolver::with_config(matrix, rhs, config)?.resolution()
        }
        SolverKind::Full => LdrFactorization::with_config(matrix, rhs, *config)?.resolution(),
    }
}
