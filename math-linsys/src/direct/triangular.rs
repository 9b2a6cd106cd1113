//! Triangular system solvers
//!
//! Forward substitution for lower-triangular systems and backward
//! substitution for upper-triangular ones. Coefficients on the "wrong" side
//! of the diagonal are never read. The unit variants assume `A_ii = 1`, check
//! that assumption once at construction and never divide.

use super::{check_rhs_length, check_square_system, check_unit_diagonal};
use crate::config::SolverConfig;
use crate::dense::{Matrix, Vector};
use crate::error::{LinSysError, Result};
use crate::traits::{LinearSystem, RealField};
use ndarray::{Array1, Array2};

/// Solve `L x = b` row by row, top to bottom.
fn forward_substitution<T: RealField>(
    a: &Array2<T>,
    b: &Array1<T>,
    unit_diagonal: bool,
) -> Result<Array1<T>> {
    let n = b.len();
    let mut x = Array1::zeros(n);
    for i in 0..n {
        let mut sum = b[i];
        for j in 0..i {
            sum -= a[[i, j]] * x[j];
        }
        x[i] = if unit_diagonal {
            sum
        } else {
            let pivot = a[[i, i]];
            if pivot == T::zero() {
                return Err(LinSysError::SingularDiagonal { index: i });
            }
            sum / pivot
        };
    }
    Ok(x)
}

/// Solve `U x = b` row by row, bottom to top.
fn backward_substitution<T: RealField>(
    a: &Array2<T>,
    b: &Array1<T>,
    unit_diagonal: bool,
) -> Result<Array1<T>> {
    let n = b.len();
    let mut x = Array1::zeros(n);
    for i in (0..n).rev() {
        let mut sum = b[i];
        for j in (i + 1)..n {
            sum -= a[[i, j]] * x[j];
        }
        x[i] = if unit_diagonal {
            sum
        } else {
            let pivot = a[[i, i]];
            if pivot == T::zero() {
                return Err(LinSysError::SingularDiagonal { index: i });
            }
            sum / pivot
        };
    }
    Ok(x)
}

/// Shared body of the dense triangular `LinearSystem` impls.
macro_rules! dense_system_accessors {
    () => {
        type Coefficients = Matrix<T>;

        fn order(&self) -> usize {
            self.rhs.len()
        }

        fn coefficients(&self) -> &Matrix<T> {
            self.matrix
        }

        fn rhs(&self) -> &Vector<T> {
            &self.rhs
        }

        fn replace_rhs(&mut self, rhs: Vector<T>) -> Result<()> {
            check_rhs_length(self.order(), &rhs)?;
            self.rhs = rhs;
            Ok(())
        }
    };
}

/// Solver for `A x = b` with `A` lower triangular
#[derive(Debug, Clone)]
pub struct LowerTriangularSolver<'a, T: RealField = f64> {
    matrix: &'a Matrix<T>,
    rhs: Vector<T>,
}

impl<'a, T: RealField> LowerTriangularSolver<'a, T> {
    pub fn new(matrix: &'a Matrix<T>, rhs: Vector<T>) -> Result<Self> {
        check_square_system(matrix, &rhs)?;
        Ok(Self { matrix, rhs })
    }
}

impl<T: RealField> LinearSystem<T> for LowerTriangularSolver<'_, T> {
    dense_system_accessors!();

    fn resolution(&self) -> Result<Vector<T>> {
        forward_substitution(self.matrix.as_array(), self.rhs.as_array(), false)
            .map(Vector::from_array_unchecked)
    }
}

/// Solver for `A x = b` with `A` lower triangular and unit diagonal
#[derive(Debug, Clone)]
pub struct UnitLowerTriangularSolver<'a, T: RealField = f64> {
    matrix: &'a Matrix<T>,
    rhs: Vector<T>,
}

impl<'a, T: RealField> UnitLowerTriangularSolver<'a, T> {
    /// Validate the unit diagonal against [`EPSILON`](crate::EPSILON).
    pub fn new(matrix: &'a Matrix<T>, rhs: Vector<T>) -> Result<Self> {
        Self::with_config(matrix, rhs, &SolverConfig::default())
    }

    /// Validate the unit diagonal against `config.tolerance`.
    pub fn with_config(
        matrix: &'a Matrix<T>,
        rhs: Vector<T>,
        config: &SolverConfig,
    ) -> Result<Self> {
        check_square_system(matrix, &rhs)?;
        check_unit_diagonal(matrix, config.tolerance)?;
        Ok(Self { matrix, rhs })
    }
}

impl<T: RealField> LinearSystem<T> for UnitLowerTriangularSolver<'_, T> {
    dense_system_accessors!();

    fn resolution(&self) -> Result<Vector<T>> {
        forward_substitution(self.matrix.as_array(), self.rhs.as_array(), true)
            .map(Vector::from_array_unchecked)
    }
}

/// Solver for `A x = b` with `A` upper triangular
#[derive(Debug, Clone)]
pub struct UpperTriangularSolver<'a, T: RealField = f64> {
    matrix: &'a Matrix<T>,
    rhs: Vector<T>,
}

impl<'a, T: RealField> UpperTriangularSolver<'a, T> {
    pub fn new(matrix: &'a Matrix<T>, rhs: Vector<T>) -> Result<Self> {
        check_square_system(matrix, &rhs)?;
        Ok(Self { matrix, rhs })
    }
}

impl<T: RealField> LinearSystem<T> for UpperTriangularSolver<'_, T> {
    dense_system_accessors!();

    fn resolution(&self) -> Result<Vector<T>> {
        backward_substitution(self.matrix.as_array(), self.rhs.as_array(), false)
            .map(Vector::from_array_unchecked)
    }
}

/// Solver for `A x = b` with `A` upper triangular and unit diagonal
#[derive(Debug, Clone)]
pub struct UnitUpperTriangularSolver<'a, T: RealField = f64> {
    matrix: &'a Matrix<T>,
    rhs: Vector<T>,
}

impl<'a, T: RealField> UnitUpperTriangularSolver<'a, T> {
    /// Validate the unit diagonal against [`EPSILON`](crate::EPSILON).
    pub fn new(matrix: &'a Matrix<T>, rhs: Vector<T>) -> Result<Self> {
        Self::with_config(matrix, rhs, &SolverConfig::default())
    }

    /// Validate the unit diagonal against `config.tolerance`.
    pub fn with_config(
        matrix: &'a Matrix<T>,
        rhs: Vector<T>,
        config: &SolverConfig,
    ) -> Result<Self> {
        check_square_system(matrix, &rhs)?;
        check_unit_diagonal(matrix, config.tolerance)?;
        Ok(Self { matrix, rhs })
    }
}

impl<T: RealField> LinearSystem<T> for UnitUpperTriangularSolver<'_, T> {
    dense_system_accessors!();

    fn resolution(&self) -> Result<Vector<T>> {
        backward_substitution(self.matrix.as_array(), self.rhs.as_array(), true)
            .map(Vector::from_array_unchecked)
    }
}
