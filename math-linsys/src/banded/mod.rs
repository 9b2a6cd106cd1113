//! Banded matrix structures
//!
//! This module provides the 3-band [`TridiagonalMatrix`] used by the
//! Thomas solver. It is the only non-dense format in the crate.

mod tridiagonal;

pub use tridiagonal::TridiagonalMatrix;
