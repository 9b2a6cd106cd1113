//! Dense matrix and vector containers
//!
//! This module provides the rectangular [`Matrix`] and the single-column
//! [`Vector`] that every solver consumes and produces.

mod matrix;
mod vector;

pub use matrix::Matrix;
pub use vector::Vector;
