//! Matrix inversion and conditioning
//!
//! The inverse is built column by column from one LDR factorization: the
//! matrix is factored once, then each basis vector `e_i` is solved for with
//! the cached factors. Condition numbers follow as `‖A‖·‖A⁻¹‖`.

use crate::config::SolverConfig;
use crate::dense::{Matrix, Vector};
use crate::direct::LdrFactorization;
use crate::error::{LinSysError, Result};
use crate::traits::{LinearOperator, LinearSystem, RealField};
use ndarray::Array2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Induced matrix norm used for conditioning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MatrixNorm {
    /// Maximum absolute column sum
    One,
    /// Maximum absolute row sum
    Infinity,
}

impl MatrixNorm {
    /// Evaluate this norm on `matrix`.
    pub fn of<T: RealField>(self, matrix: &Matrix<T>) -> T {
        match self {
            MatrixNorm::One => matrix.norm1(),
            MatrixNorm::Infinity => matrix.norm_inf(),
        }
    }
}

fn singular(source: LinSysError) -> LinSysError {
    LinSysError::Singular(Box::new(source))
}

/// Inverse of a square matrix, with the default configuration.
pub fn invert<T: RealField>(a: &Matrix<T>) -> Result<Matrix<T>> {
    invert_with_config(a, &SolverConfig::default())
}

/// Inverse of a square matrix.
///
/// Fails with [`LinSysError::NotSquare`] for a rectangular matrix, and with
/// [`LinSysError::Singular`] wrapping the underlying pivot failure when the
/// factorization or a column solve breaks down.
pub fn invert_with_config<T: RealField>(
    a: &Matrix<T>,
    config: &SolverConfig,
) -> Result<Matrix<T>> {
    let (rows, cols) = a.shape();
    if rows != cols {
        return Err(LinSysError::NotSquare { rows, cols });
    }
    let n = rows;
    log::debug!("inverting matrix of order {}", n);

    let mut system = LdrFactorization::with_config(a, Vector::basis(n, 0), *config)?;
    system.factor().map_err(singular)?;

    let mut inverse = Array2::zeros((n, n));
    for col in 0..n {
        system.replace_rhs(Vector::basis(n, col))?;
        let x = system.resolve_partial().map_err(singular)?;
        inverse.column_mut(col).assign(x.as_array());
    }

    Ok(Matrix::from_array_unchecked(inverse))
}

/// Condition number `‖A‖·‖A⁻¹‖` in the given norm, with the default configuration.
pub fn condition_number<T: RealField>(a: &Matrix<T>, norm: MatrixNorm) -> Result<T> {
    condition_number_with_config(a, norm, &SolverConfig::default())
}

/// Condition number `‖A‖·‖A⁻¹‖` in the given norm.
///
/// The inverse is computed with [`invert_with_config`], so a strict policy
/// refuses to condition a matrix whose LDR pivots fall below the tolerance.
pub fn condition_number_with_config<T: RealField>(
    a: &Matrix<T>,
    norm: MatrixNorm,
    config: &SolverConfig,
) -> Result<T> {
    let inverse = invert_with_config(a, config)?;
    Ok(norm.of(a) * norm.of(&inverse))
}

/// `‖op·x − b‖∞`, the largest absolute residual of a candidate solution.
pub fn residual_norm_inf<T, A>(op: &A, x: &Vector<T>, b: &Vector<T>) -> Result<T>
where
    T: RealField,
    A: LinearOperator<T> + ?Sized,
{
    let ax = op.apply(x)?;
    Ok(Vector::subtract(&ax, b)?.norm_inf())
}

impl<T: RealField> Matrix<T> {
    /// See [`invert`].
    pub fn invert(&self) -> Result<Matrix<T>> {
        invert(self)
    }

    /// See [`condition_number`].
    pub fn condition_number(&self, norm: MatrixNorm) -> Result<T> {
        condition_number(self, norm)
    }

    /// See [`condition_number_with_config`].
    pub fn condition_number_with_config(
        &self,
        norm: MatrixNorm,
        config: &SolverConfig,
    ) -> Result<T> {
        condition_number_with_config(self, norm, config)
    }

    /// Condition number in the 1-norm
    pub fn cond_1(&self) -> Result<T> {
        condition_number(self, MatrixNorm::One)
    }

    /// Condition number in the infinity norm
    pub fn cond_inf(&self) -> Result<T> {
        condition_number(self, MatrixNorm::Infinity)
    }
}
