//! Diagonal system solver
//!
//! Each unknown is independent: `x_i = b_i / A_ii`. Only the diagonal of the
//! coefficient matrix is read.

use super::{check_rhs_length, check_square_system};
use crate::dense::{Matrix, Vector};
use crate::error::{LinSysError, Result};
use crate::traits::{LinearSystem, RealField};
use ndarray::Zip;

/// Solver for `A x = b` with `A` diagonal
#[derive(Debug, Clone)]
pub struct DiagonalSolver<'a, T: RealField = f64> {
    matrix: &'a Matrix<T>,
    rhs: Vector<T>,
}

impl<'a, T: RealField> DiagonalSolver<'a, T> {
    /// Pair a diagonal matrix with a right-hand side.
    pub fn new(matrix: &'a Matrix<T>, rhs: Vector<T>) -> Result<Self> {
        check_square_system(matrix, &rhs)?;
        Ok(Self { matrix, rhs })
    }
}

impl<T: RealField> LinearSystem<T> for DiagonalSolver<'_, T> {
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

    fn resolution(&self) -> Result<Vector<T>> {
        let diag = self.matrix.as_array().diag();
        if let Some(index) = diag.iter().position(|&d| d == T::zero()) {
            return Err(LinSysError::SingularDiagonal { index });
        }
        let x = Zip::from(self.rhs.as_array())
            .and(&diag)
            .map_collect(|&b, &d| b / d);
        Ok(Vector::from_array_unchecked(x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_diagonal_solve() {
        let a = Matrix::from_rows(&[[2.0, 0.0, 0.0], [0.0, 3.0, 0.0], [0.0, 0.0, 4.0]]);
        let b = Vector::from_vec(vec![8.0, 15.0, 24.0]);
        let x = DiagonalSolver::new(&a, b).unwrap().resolution().unwrap();

        assert_relative_eq!(x[0], 4.0);
        assert_relative_eq!(x[1], 5.0);
        assert_relative_eq!(x[2], 6.0);
    }

    #[test]
    fn test_off_diagonal_ignored() {
        let a = Matrix::from_rows(&[[2.0, 7.0], [-3.0, 0.5]]);
        let b = Vector::from_vec(vec![1.0, 1.0]);
        let x = DiagonalSolver::new(&a, b).unwrap().resolution().unwrap();
        assert_eq!(x.to_vec(), vec![0.5, 2.0]);
    }

    #[test]
    fn test_zero_pivot() {
        let a = Matrix::from_rows(&[[1.0, 0.0, 0.0], [0.0, 0.0, 0.0], [0.0, 0.0, 2.0]]);
        let b = Vector::from_vec(vec![1.0, 1.0, 1.0]);
        let err = DiagonalSolver::new(&a, b).unwrap().resolution().unwrap_err();
        assert!(matches!(err, LinSysError::SingularDiagonal { index: 1 }));
    }

    #[test]
    fn test_irregular_system() {
        let a = Matrix::from_rows(&[[1.0, 0.0], [0.0, 1.0]]);
        let err = DiagonalSolver::new(&a, Vector::from_vec(vec![1.0, 2.0, 3.0])).unwrap_err();
        assert!(err.is_construction_error());
    }

    #[test]
    fn test_replace_rhs() {
        let a = Matrix::from_rows(&[[2.0, 0.0], [0.0, 4.0]]);
        let mut system = DiagonalSolver::new(&a, Vector::from_vec(vec![2.0, 4.0])).unwrap();
        system.replace_rhs(Vector::from_vec(vec![4.0, 2.0])).unwrap();
        assert_eq!(system.resolution().unwrap().to_vec(), vec![2.0, 0.5]);
        assert!(system.replace_rhs(Vector::from_vec(vec![1.0])).is_err());
        assert_eq!(system.rhs().to_vec(), vec![4.0, 2.0]);
    }
}
