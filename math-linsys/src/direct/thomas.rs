//! Thomas algorithm for tridiagonal systems
//!
//! O(n) Gaussian elimination specialized to three bands. A forward sweep
//! computes the coefficients `p`, `q` such that `x[k] = p[k]·x[k+1] + q[k]`,
//! then a backward sweep recovers `x`. There is no pivoting, so any
//! elimination pivot with magnitude under the tolerance aborts the solve.

use super::check_rhs_length;
use crate::banded::TridiagonalMatrix;
use crate::config::SolverConfig;
use crate::dense::Vector;
use crate::error::{IrregularReason, LinSysError, Result};
use crate::traits::{LinearSystem, RealField};
use ndarray::Array1;

/// Smallest order the Thomas recurrences are defined for
const MIN_ORDER: usize = 2;

/// Solver for `A x = d` with `A` tridiagonal
#[derive(Debug, Clone)]
pub struct ThomasSolver<'a, T: RealField = f64> {
    matrix: &'a TridiagonalMatrix<T>,
    rhs: Vector<T>,
    tolerance: f64,
}

impl<'a, T: RealField> ThomasSolver<'a, T> {
    pub fn new(matrix: &'a TridiagonalMatrix<T>, rhs: Vector<T>) -> Result<Self> {
        Self::with_config(matrix, rhs, &SolverConfig::default())
    }

    /// Use `config.tolerance` as the pivot threshold.
    pub fn with_config(
        matrix: &'a TridiagonalMatrix<T>,
        rhs: Vector<T>,
        config: &SolverConfig,
    ) -> Result<Self> {
        let order = matrix.order();
        if order < MIN_ORDER {
            return Err(LinSysError::irregular(IrregularReason::OrderTooSmall {
                order,
                min: MIN_ORDER,
            }));
        }
        check_rhs_length(order, &rhs)?;
        Ok(Self {
            matrix,
            rhs,
            tolerance: config.tolerance,
        })
    }

    fn check_pivot(&self, index: usize, pivot: T) -> Result<()> {
        if pivot.is_nan() || pivot.is_zero_approx(self.tolerance) {
            return Err(LinSysError::SingularTridiagonal {
                index,
                pivot: pivot.to_real(),
            });
        }
        Ok(())
    }
}

impl<T: RealField> LinearSystem<T> for ThomasSolver<'_, T> {
    type Coefficients = TridiagonalMatrix<T>;

    fn order(&self) -> usize {
        self.matrix.order()
    }

    fn coefficients(&self) -> &TridiagonalMatrix<T> {
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
        let n = self.order();
        let (a, d) = (self.matrix, &self.rhs);

        log::trace!("Thomas forward sweep, order {}", n);
        let mut p = Array1::<T>::zeros(n - 1);
        let mut q = Array1::<T>::zeros(n - 1);

        let beta = a.main(0);
        self.check_pivot(0, beta)?;
        p[0] = -a.sup(0) / beta;
        q[0] = d[0] / beta;

        for k in 1..n - 1 {
            let beta = a.sub(k) * p[k - 1] + a.main(k);
            self.check_pivot(k, beta)?;
            p[k] = -a.sup(k) / beta;
            q[k] = (d[k] - a.sub(k) * q[k - 1]) / beta;
        }

        let last = n - 1;
        let denom = a.sub(last) * p[last - 1] + a.main(last);
        self.check_pivot(last, denom)?;

        let mut x = Array1::<T>::zeros(n);
        x[last] = (d[last] - a.sub(last) * q[last - 1]) / denom;
        for k in (0..last).rev() {
            x[k] = p[k] * x[k + 1] + q[k];
        }

        Ok(Vector::from_array_unchecked(x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn laplacian4() -> TridiagonalMatrix {
        TridiagonalMatrix::from_bands(
            vec![0.0, -1.0, -1.0, -1.0],
            vec![2.0, 2.0, 2.0, 2.0],
            vec![-1.0, -1.0, -1.0, 0.0],
        )
        .unwrap()
    }

    #[test]
    fn test_laplacian() {
        let a = laplacian4();
        let d = Vector::from_vec(vec![0.0, 0.0, 0.0, 5.0]);
        let x = ThomasSolver::new(&a, d).unwrap().resolution().unwrap();
        for (i, expected) in [1.0, 2.0, 3.0, 4.0].into_iter().enumerate() {
            assert_relative_eq!(x[i], expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_replace_rhs() {
        let a = laplacian4();
        let mut solver = ThomasSolver::new(&a, Vector::from_vec(vec![0.0; 4])).unwrap();
        solver
            .replace_rhs(Vector::from_vec(vec![1.0, 0.0, 0.0, 1.0]))
            .unwrap();
        let x = solver.resolution().unwrap();
        for i in 0..4 {
            assert_relative_eq!(x[i], 1.0, epsilon = 1e-12);
        }
        assert!(solver.replace_rhs(Vector::from_vec(vec![1.0])).is_err());
    }

    #[test]
    fn test_nonsymmetric_3x3() {
        let a = TridiagonalMatrix::from_rows(&[[0.0, 2.0, 4.0], [3.0, 1.0, -5.0], [5.0, 10.0, 0.0]]);
        let d = Vector::from_vec(vec![13.0, 34.0, -7.0]);
        let x = ThomasSolver::new(&a, d).unwrap().resolution().unwrap();
        assert_relative_eq!(x[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(x[1], 2.0, epsilon = 1e-12);
        assert_relative_eq!(x[2], 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_order_two() {
        let a = TridiagonalMatrix::from_rows(&[[0.0, 1.0], [4.0, 3.0], [1.0, 0.0]]);
        let x = ThomasSolver::new(&a, Vector::from_vec(vec![6.0, 7.0]))
            .unwrap()
            .resolution()
            .unwrap();
        assert_relative_eq!(x[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(x[1], 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_order_one_rejected() {
        let a = TridiagonalMatrix::from_rows(&[[0.0], [2.0], [0.0]]);
        let err = ThomasSolver::new(&a, Vector::from_vec(vec![1.0])).unwrap_err();
        assert!(matches!(
            err,
            LinSysError::IrregularSystem {
                reason: IrregularReason::OrderTooSmall { order: 1, min: 2 }
            }
        ));
    }

    #[test]
    fn test_rhs_length_rejected() {
        let a = laplacian4();
        assert!(ThomasSolver::new(&a, Vector::from_vec(vec![1.0, 2.0])).is_err());
    }

    #[test]
    fn test_singular() {
        let leading = TridiagonalMatrix::from_rows(&[[0.0, 1.0], [0.0, 1.0], [1.0, 0.0]]);
        let err = ThomasSolver::new(&leading, Vector::from_vec(vec![1.0, 1.0]))
            .unwrap()
            .resolution()
            .unwrap_err();
        assert!(matches!(err, LinSysError::SingularTridiagonal { index: 0, .. }));

        // [[1, 1], [1, 1]]
        let last = TridiagonalMatrix::from_rows(&[[0.0, 1.0], [1.0, 1.0], [1.0, 0.0]]);
        let err = ThomasSolver::new(&last, Vector::from_vec(vec![1.0, 1.0]))
            .unwrap()
            .resolution()
            .unwrap_err();
        assert!(matches!(err, LinSysError::SingularTridiagonal { index: 1, .. }));
        assert!(err.is_singular());
    }

    #[test]
    fn test_nan_pivot_is_singular() {
        let a = TridiagonalMatrix::from_rows(&[[0.0, 1.0], [f64::NAN, 2.0], [1.0, 0.0]]);
        let err = ThomasSolver::new(&a, Vector::from_vec(vec![1.0, 1.0]))
            .unwrap()
            .resolution()
            .unwrap_err();
        assert!(matches!(err, LinSysError::SingularTridiagonal { index: 0, .. }));
    }

    #[test]
    fn test_tolerance_is_configurable() {
        let a = TridiagonalMatrix::from_rows(&[[0.0, 1e-3], [1e-7, 1.0], [1e-3, 0.0]]);
        let d = Vector::from_vec(vec![1.0, 1.0]);
        assert!(ThomasSolver::new(&a, d.clone()).unwrap().resolution().is_err());

        let loose = SolverConfig::default().with_tolerance(1e-9);
        assert!(
            ThomasSolver::with_config(&a, d, &loose)
                .unwrap()
                .resolution()
                .is_ok()
        );
    }
}
