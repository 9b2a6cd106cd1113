//! Dense and tridiagonal linear solvers
//!
//! This crate provides direct solvers for square linear systems `A x = b`,
//! together with the small dense containers they operate on.
//!
//! # Features
//!
//! - **Dense containers**: [`Matrix`] and [`Vector`] over `ndarray` storage
//! - **Structural solvers**: diagonal, lower/upper and unit lower/upper triangular
//! - **LDR factorization**: `A = L·D·R` without pivoting, factor once and solve many
//! - **Tridiagonal systems**: 3-band [`TridiagonalMatrix`] and the O(n) [`ThomasSolver`]
//! - **Inversion and conditioning**: [`invert`], [`condition_number`] in the 1- and ∞-norms
//! - **Generic Scalar Types**: Works with f64 (default) and f32
//!
//! Every solver implements [`LinearSystem`]: it is built from a coefficient
//! matrix and a right-hand side, checks their shapes up front and yields the
//! solution from [`LinearSystem::resolution`].
//!
//! # Example
//!
//! ```
//! use math_audio_linsys::{LdrFactorization, LinearSystem, Matrix, Vector};
//!
//! let a: Matrix = Matrix::from_rows(&[[4.0, 3.0, 2.0], [2.0, 4.0, 1.0], [1.0, 2.0, 3.0]]);
//! let b = Vector::from_vec(vec![9.0, 7.0, 6.0]);
//!
//! let x = LdrFactorization::new(&a, b)?.resolution()?;
//! assert!((x[0] - 1.0).abs() < 1e-12);
//!
//! let cond = a.cond_inf()?;
//! assert!(cond > 1.0);
//! # Ok::<(), math_audio_linsys::LinSysError>(())
//! ```
//!
//! # Tolerances
//!
//! A single tolerance, [`EPSILON`] by default, decides when a pivot is
//! "nearly zero" and when a diagonal coefficient is "close enough" to 1.
//! [`SolverConfig`] carries it together with the [`PivotPolicy`] applied to
//! near-singular LDR pivots.

pub mod banded;
pub mod config;
pub mod dense;
pub mod direct;
pub mod error;
pub mod inverse;
pub mod traits;

// Re-export main types
pub use banded::TridiagonalMatrix;
pub use config::{EPSILON, PivotPolicy, SolverConfig};
pub use dense::{Matrix, Vector};
pub use error::{IrregularReason, LinSysError, Result};
pub use traits::{LinearOperator, LinearSystem, RealField};

// Re-export direct solvers
pub use direct::{
    DiagonalSolver, LdrFactorization, LdrFactors, LowerTriangularSolver, SolverKind,
    ThomasSolver, UnitLowerTriangularSolver, UnitUpperTriangularSolver, UpperTriangularSolver,
    solve, solve_with_config,
};

// Re-export inversion and conditioning
pub use inverse::{
    MatrixNorm, condition_number, condition_number_with_config, invert, invert_with_config,
    residual_norm_inf,
};
