//! LDR factorization solver
//!
//! Decomposes a square matrix as `A = L·D·R` with `L` unit lower triangular,
//! `D` diagonal and `R` unit upper triangular. This is LU without pivoting:
//! a vanishing pivot is a failure, not a row swap.
//!
//! The factors are computed once and reused for many right-hand sides, each
//! solve being an O(n²) cascade of unit-lower, diagonal and unit-upper
//! substitutions.

use super::{
    DiagonalSolver, UnitLowerTriangularSolver, UnitUpperTriangularSolver, check_rhs_length,
    check_square_system,
};
use crate::config::SolverConfig;
use crate::dense::{Matrix, Vector};
use crate::error::{LinSysError, Result};
use crate::traits::{LinearSystem, RealField};
use ndarray::Array2;

/// The three factors of `A = L·D·R`
#[derive(Debug, Clone)]
pub struct LdrFactors<T: RealField = f64> {
    l: Matrix<T>,
    d: Matrix<T>,
    r: Matrix<T>,
    /// Pivots accepted under the lenient policy despite `|d| < tolerance`
    near_singular: Vec<usize>,
}

impl<T: RealField> LdrFactors<T> {
    /// Factor `a`.
    ///
    /// A pivot equal to zero always fails with
    /// [`LinSysError::SingularOrNearSingular`]. A non-zero pivot below
    /// `config.tolerance` fails under [`PivotPolicy::Strict`] and is recorded
    /// and logged under [`PivotPolicy::Lenient`].
    ///
    /// [`PivotPolicy::Strict`]: crate::PivotPolicy::Strict
    /// [`PivotPolicy::Lenient`]: crate::PivotPolicy::Lenient
    pub fn compute(a: &Matrix<T>, config: &SolverConfig) -> Result<Self> {
        let (rows, cols) = a.shape();
        if rows != cols {
            return Err(LinSysError::NotSquare { rows, cols });
        }
        let n = rows;
        let a = a.as_array();
        let tol = T::from_real(config.tolerance);

        let mut l = Array2::<T>::eye(n);
        let mut d = Array2::<T>::zeros((n, n));
        let mut r = Array2::<T>::eye(n);
        let mut near_singular = Vec::new();

        for i in 0..n {
            // Row i of L, left of the diagonal
            for j in 0..i {
                let mut sum = T::zero();
                for k in 0..j {
                    sum += l[[i, k]] * d[[k, k]] * r[[k, j]];
                }
                l[[i, j]] = (a[[i, j]] - sum) / d[[j, j]];
            }

            // Column i of R, above the diagonal
            for j in 0..i {
                let mut sum = T::zero();
                for k in 0..j {
                    sum += l[[j, k]] * d[[k, k]] * r[[k, i]];
                }
                r[[j, i]] = (a[[j, i]] - sum) / d[[j, j]];
            }

            let mut sum = T::zero();
            for k in 0..i {
                sum += l[[i, k]] * d[[k, k]] * r[[k, i]];
            }
            let pivot = a[[i, i]] - sum;

            if pivot == T::zero() || pivot.is_nan() || (config.is_strict() && pivot.abs() < tol) {
                return Err(LinSysError::SingularOrNearSingular {
                    index: i,
                    pivot: pivot.to_real(),
                });
            }
            if pivot.abs() < tol {
                log::warn!(
                    "LDR pivot D[{}] = {:e} is below tolerance {:e}",
                    i,
                    pivot.to_real(),
                    config.tolerance
                );
                near_singular.push(i);
            }
            d[[i, i]] = pivot;
        }

        let smallest = d.diag().iter().fold(T::infinity(), |acc, &p| acc.min(p.abs()));
        log::debug!(
            "LDR factorization of order {} done, smallest |pivot| {:e}, {} below tolerance",
            n,
            smallest.to_real(),
            near_singular.len()
        );

        Ok(Self {
            l: Matrix::from_array_unchecked(l),
            d: Matrix::from_array_unchecked(d),
            r: Matrix::from_array_unchecked(r),
            near_singular,
        })
    }

    /// Order of the factored matrix
    pub fn order(&self) -> usize {
        self.d.nrows()
    }

    /// Unit lower-triangular factor
    pub fn l(&self) -> &Matrix<T> {
        &self.l
    }

    /// Diagonal factor
    pub fn d(&self) -> &Matrix<T> {
        &self.d
    }

    /// Unit upper-triangular factor
    pub fn r(&self) -> &Matrix<T> {
        &self.r
    }

    /// Indices of pivots accepted with `|d| < tolerance`
    pub fn near_singular_pivots(&self) -> &[usize] {
        &self.near_singular
    }

    /// Product of the pivots
    pub fn determinant(&self) -> T {
        self.d
            .as_array()
            .diag()
            .iter()
            .fold(T::one(), |acc, &p| acc * p)
    }

    /// Solve `L·D·R x = b` by cascading the three structural solvers.
    pub fn solve(&self, b: &Vector<T>) -> Result<Vector<T>> {
        check_rhs_length(self.order(), b)?;
        let y = UnitLowerTriangularSolver::new(&self.l, b.clone())?.resolution()?;
        let z = DiagonalSolver::new(&self.d, y)?.resolution()?;
        UnitUpperTriangularSolver::new(&self.r, z)?.resolution()
    }

    /// Multiply the factors back together.
    pub fn reconstruct(&self) -> Matrix<T> {
        let ld = self.l.as_array().dot(self.d.as_array());
        Matrix::from_array_unchecked(ld.dot(self.r.as_array()))
    }
}

/// A dense system solved through its LDR factors
///
/// [`LinearSystem::resolution`] factors from scratch on each call. For
/// repeated solves against the same matrix, call [`LdrFactorization::factor`]
/// once, then alternate [`LinearSystem::replace_rhs`] and
/// [`LdrFactorization::resolve_partial`].
///
/// ```
/// use math_audio_linsys::{LdrFactorization, LinearSystem, Matrix, Vector};
///
/// let a: Matrix = Matrix::from_rows(&[[4.0, 1.0], [2.0, 3.0]]);
/// let mut system = LdrFactorization::new(&a, Vector::from_vec(vec![1.0, 0.0])).unwrap();
/// system.factor().unwrap();
/// let first = system.resolve_partial().unwrap();
///
/// system.replace_rhs(Vector::from_vec(vec![0.0, 1.0])).unwrap();
/// let second = system.resolve_partial().unwrap();
/// assert!((first[0] - 0.3).abs() < 1e-12);
/// assert!((second[1] - 0.4).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct LdrFactorization<'a, T: RealField = f64> {
    matrix: &'a Matrix<T>,
    rhs: Vector<T>,
    config: SolverConfig,
    factors: Option<LdrFactors<T>>,
}

impl<'a, T: RealField> LdrFactorization<'a, T> {
    pub fn new(matrix: &'a Matrix<T>, rhs: Vector<T>) -> Result<Self> {
        Self::with_config(matrix, rhs, SolverConfig::default())
    }

    pub fn with_config(
        matrix: &'a Matrix<T>,
        rhs: Vector<T>,
        config: SolverConfig,
    ) -> Result<Self> {
        check_square_system(matrix, &rhs)?;
        Ok(Self {
            matrix,
            rhs,
            config,
            factors: None,
        })
    }

    /// Active configuration
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Compute and cache the factors, replacing any previous ones.
    ///
    /// On failure the cache is left empty.
    pub fn factor(&mut self) -> Result<&LdrFactors<T>> {
        self.factors = None;
        let factors: &LdrFactors<T> = self
            .factors
            .insert(LdrFactors::compute(self.matrix, &self.config)?);
        Ok(factors)
    }

    /// Cached factors, if [`LdrFactorization::factor`] has succeeded
    pub fn factors(&self) -> Option<&LdrFactors<T>> {
        self.factors.as_ref()
    }

    pub fn is_factored(&self) -> bool {
        self.factors.is_some()
    }

    /// Factor, cache and solve for the current right-hand side.
    pub fn resolve(&mut self) -> Result<Vector<T>> {
        self.factor()?;
        self.resolve_partial()
    }

    /// Solve with the cached factors, without refactoring.
    pub fn resolve_partial(&self) -> Result<Vector<T>> {
        self.factors
            .as_ref()
            .ok_or(LinSysError::NotFactored)?
            .solve(&self.rhs)
    }
}

impl<T: RealField> LinearSystem<T> for LdrFactorization<'_, T> {
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
        LdrFactors::compute(self.matrix, &self.config)?.solve(&self.rhs)
    }
}
