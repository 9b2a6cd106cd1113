//! Core traits for linear algebra operations
//!
//! This module defines the fundamental abstractions used throughout the crate:
//! - [`RealField`]: Trait for real scalar types (`f64`, `f32`)
//! - [`LinearOperator`]: Trait for matrix-like objects that can perform matrix-vector products
//! - [`LinearSystem`]: Trait for a coefficient matrix paired with a right-hand side

use crate::dense::Vector;
use crate::error::Result;
use num_traits::{Float, FromPrimitive, NumAssign};
use std::fmt::{Debug, Display};

/// Trait for scalar types that can be used in linear algebra operations.
///
/// Tolerances are configured as `f64`; [`RealField::from_real`] brings them
/// into the working precision and [`RealField::to_real`] reports pivot values
/// back in errors.
///
/// # Implementations
///
/// Provided for:
/// - `f64` (default everywhere)
/// - `f32` (for memory-constrained applications)
pub trait RealField:
    Float + NumAssign + FromPrimitive + Debug + Display + Send + Sync + 'static
{
    /// Create from an `f64` value, rounding if needed
    fn from_real(r: f64) -> Self;

    /// Widen to `f64`
    fn to_real(self) -> f64;

    /// Check if this is approximately zero
    fn is_zero_approx(self, tol: f64) -> bool {
        self.abs() < Self::from_real(tol)
    }
}

impl RealField for f64 {
    #[inline]
    fn from_real(r: f64) -> Self {
        r
    }

    #[inline]
    fn to_real(self) -> f64 {
        self
    }
}

impl RealField for f32 {
    #[inline]
    fn from_real(r: f64) -> Self {
        r as f32
    }

    #[inline]
    fn to_real(self) -> f64 {
        f64::from(self)
    }
}

/// Trait for linear operators (matrices) that can perform matrix-vector products.
///
/// This abstraction lets residual checks work with dense and banded matrices
/// interchangeably.
pub trait LinearOperator<T: RealField> {
    /// Number of rows in the operator
    fn num_rows(&self) -> usize;

    /// Number of columns in the operator
    fn num_cols(&self) -> usize;

    /// Apply the operator: y = A * x
    fn apply(&self, x: &Vector<T>) -> Result<Vector<T>>;

    /// Check if the operator is square
    fn is_square(&self) -> bool {
        self.num_rows() == self.num_cols()
    }
}

/// A square coefficient matrix together with a compatible right-hand side.
///
/// Implementors validate shapes at construction and never mutate the
/// coefficient matrix. The right-hand side may be swapped between solves,
/// which is how one factorization serves many systems.
pub trait LinearSystem<T: RealField> {
    /// Representation of the coefficient matrix (dense or banded)
    type Coefficients;

    /// Order n of the system
    fn order(&self) -> usize;

    /// The coefficient matrix
    fn coefficients(&self) -> &Self::Coefficients;

    /// The current right-hand side
    fn rhs(&self) -> &Vector<T>;

    /// Replace the right-hand side, keeping the order unchanged
    fn replace_rhs(&mut self, rhs: Vector<T>) -> Result<()>;

    /// Solve the system for the current right-hand side
    fn resolution(&self) -> Result<Vector<T>>;
}
