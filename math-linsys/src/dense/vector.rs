//! Dense column vector
//!
//! A vector is a single-column container in its own right rather than a
//! `Matrix` with a column-count constraint; it converts to and from a column
//! matrix explicitly.

use super::Matrix;
use crate::error::{LinSysError, Result};
use crate::traits::RealField;
use ndarray::{Array1, Axis};
use std::fmt;
use std::ops::{Index, IndexMut};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Dense real column vector of length at least 1
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Array1<T>", into = "Array1<T>"))]
pub struct Vector<T: RealField = f64> {
    data: Array1<T>,
}

impl<T: RealField> Vector<T> {
    /// Zero vector of length `len`.
    ///
    /// # Panics
    ///
    /// Panics if `len` is zero; see [`Vector::try_zeros`].
    pub fn zeros(len: usize) -> Self {
        assert!(len > 0, "Vector length must be at least 1");
        Self {
            data: Array1::zeros(len),
        }
    }

    /// Zero vector, rejecting an empty length.
    pub fn try_zeros(len: usize) -> Result<Self> {
        if len == 0 {
            return Err(LinSysError::InvalidShape { rows: 0, cols: 1 });
        }
        Ok(Self::zeros(len))
    }

    /// Vector from owned coefficients.
    ///
    /// # Panics
    ///
    /// Panics if `values` is empty; see [`Vector::from_array`].
    pub fn from_vec(values: Vec<T>) -> Self {
        assert!(!values.is_empty(), "Vector length must be at least 1");
        Self {
            data: Array1::from_vec(values),
        }
    }

    /// Wrap an existing `ndarray` vector.
    pub fn from_array(data: Array1<T>) -> Result<Self> {
        if data.is_empty() {
            return Err(LinSysError::InvalidShape { rows: 0, cols: 1 });
        }
        Ok(Self { data })
    }

    pub(crate) fn from_array_unchecked(data: Array1<T>) -> Self {
        debug_assert!(!data.is_empty());
        Self { data }
    }

    /// Standard basis vector `e_index` of length `len`.
    pub fn basis(len: usize, index: usize) -> Self {
        let mut e = Self::zeros(len);
        e.data[index] = T::one();
        e
    }

    /// Copy column `col` of `matrix`.
    pub fn from_matrix_column(matrix: &Matrix<T>, col: usize) -> Self {
        Self {
            data: matrix.as_array().column(col).to_owned(),
        }
    }

    /// This vector as an `n x 1` matrix
    pub fn to_column_matrix(&self) -> Matrix<T> {
        Matrix::from_array_unchecked(self.data.clone().insert_axis(Axis(1)))
    }

    /// Number of coefficients
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always `false`: vectors hold at least one coefficient
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Coefficient at `index`. Panics when out of range.
    #[inline]
    pub fn get(&self, index: usize) -> T {
        self.data[index]
    }

    /// Overwrite the coefficient at `index`. Panics when out of range.
    #[inline]
    pub fn set(&mut self, index: usize, value: T) {
        self.data[index] = value;
    }

    /// Iterate over the coefficients
    pub fn iter(&self) -> ndarray::iter::Iter<'_, T, ndarray::Ix1> {
        self.data.iter()
    }

    /// Borrow the underlying array
    pub fn as_array(&self) -> &Array1<T> {
        &self.data
    }

    /// Consume into the underlying array
    pub fn into_array(self) -> Array1<T> {
        self.data
    }

    /// Coefficients as a `Vec`
    pub fn to_vec(&self) -> Vec<T> {
        self.data.to_vec()
    }

    /// Resize to `other`'s length and deep-copy its coefficients.
    pub fn copy_from(&mut self, other: &Vector<T>) {
        self.data = other.data.clone();
    }

    /// Dot product; requires equal lengths.
    pub fn dot(a: &Vector<T>, b: &Vector<T>) -> Result<T> {
        if a.len() != b.len() {
            return Err(LinSysError::mismatch("dot", (a.len(), 1), (b.len(), 1)));
        }
        Ok(a.iter()
            .zip(b.iter())
            .fold(T::zero(), |acc, (&x, &y)| acc + x * y))
    }

    /// New vector `a - b`; requires equal lengths.
    pub fn subtract(a: &Vector<T>, b: &Vector<T>) -> Result<Vector<T>> {
        if a.len() != b.len() {
            return Err(LinSysError::mismatch(
                "subtract",
                (a.len(), 1),
                (b.len(), 1),
            ));
        }
        Ok(Vector {
            data: &a.data - &b.data,
        })
    }

    /// Product of `v` against every row of `matrix`: `result[i] = Σ_j v[j] * M[i][j]`.
    ///
    /// Requires `v.len() == matrix.ncols()`; the result has `matrix.nrows()` entries.
    pub fn row_vector_times_matrix(v: &Vector<T>, matrix: &Matrix<T>) -> Result<Vector<T>> {
        if v.len() != matrix.ncols() {
            return Err(LinSysError::mismatch(
                "row vector times matrix",
                (1, v.len()),
                matrix.shape(),
            ));
        }
        matrix.mul_vector(v)
    }

    /// Sum of absolute values
    pub fn norm1(&self) -> T {
        self.iter().fold(T::zero(), |acc, &v| acc + v.abs())
    }

    /// Euclidean norm
    pub fn norm2(&self) -> T {
        self.iter().fold(T::zero(), |acc, &v| acc + v * v).sqrt()
    }

    /// Largest absolute value
    pub fn norm_inf(&self) -> T {
        self.iter().fold(T::zero(), |acc, &v| acc.max(v.abs()))
    }
}

impl<T: RealField> TryFrom<Array1<T>> for Vector<T> {
    type Error = LinSysError;

    fn try_from(data: Array1<T>) -> Result<Self> {
        Self::from_array(data)
    }
}

impl<T: RealField> From<Vector<T>> for Array1<T> {
    fn from(vector: Vector<T>) -> Self {
        vector.data
    }
}

impl<T: RealField> Index<usize> for Vector<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        &self.data[index]
    }
}

impl<T: RealField> IndexMut<usize> for Vector<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.data[index]
    }
}

/// One coefficient per line.
impl<T: RealField> fmt::Display for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for v in self.iter() {
            writeln!(f, "{v}")?;
        }
        Ok(())
    }
}
