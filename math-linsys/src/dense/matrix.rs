//! Dense rectangular matrix
//!
//! Row-major `ndarray` storage with at least one row and one column. Shapes
//! never change behind the caller's back: only [`Matrix::copy_from`] resizes,
//! and it does so in a single assignment.

use super::Vector;
use crate::error::{LinSysError, Result};
use crate::traits::{LinearOperator, RealField};
use ndarray::{Array1, Array2};
use std::fmt;
use std::ops::{Index, IndexMut};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Dense real matrix
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Array2<T>", into = "Array2<T>"))]
pub struct Matrix<T: RealField = f64> {
    data: Array2<T>,
}

impl<T: RealField> Matrix<T> {
    /// Zero-filled matrix of the given shape.
    ///
    /// # Panics
    ///
    /// Panics if `rows` or `cols` is zero; see [`Matrix::try_zeros`].
    pub fn zeros(rows: usize, cols: usize) -> Self {
        assert!(
            rows > 0 && cols > 0,
            "Matrix dimensions must be at least 1x1, got {rows}x{cols}"
        );
        Self {
            data: Array2::zeros((rows, cols)),
        }
    }

    /// Zero-filled matrix, rejecting empty shapes.
    pub fn try_zeros(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(LinSysError::InvalidShape { rows, cols });
        }
        Ok(Self::zeros(rows, cols))
    }

    /// Identity matrix of order `n`.
    pub fn identity(n: usize) -> Self {
        assert!(n > 0, "Identity order must be at least 1");
        Self { data: Array2::eye(n) }
    }

    /// Hilbert matrix of order `n`, `A[i][j] = 1 / (i + j + 1)`.
    ///
    /// The classic ill-conditioned family: its condition number grows
    /// roughly like `e^{3.5 n}`.
    pub fn hilbert(n: usize) -> Self {
        assert!(n > 0, "Hilbert order must be at least 1");
        Self {
            data: Array2::from_shape_fn((n, n), |(i, j)| {
                T::one() / T::from_real((i + j + 1) as f64)
            }),
        }
    }

    /// Matrix from owned rows, rejecting empty or ragged input.
    pub fn from_vec_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, Vec::len);
        if nrows == 0 || ncols == 0 {
            return Err(LinSysError::InvalidShape {
                rows: nrows,
                cols: ncols,
            });
        }
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != ncols) {
            return Err(LinSysError::RaggedRows {
                row,
                expected: ncols,
                got: r.len(),
            });
        }
        let flat: Vec<T> = rows.into_iter().flatten().collect();
        Self::from_shape_vec(nrows, ncols, flat)
    }

    /// Matrix from a flat row-major buffer.
    pub fn from_shape_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(LinSysError::InvalidShape { rows, cols });
        }
        let data = Array2::from_shape_vec((rows, cols), data)
            .map_err(|_| LinSysError::InvalidShape { rows, cols })?;
        Ok(Self { data })
    }

    /// Wrap an existing `ndarray` matrix.
    pub fn from_array(data: Array2<T>) -> Result<Self> {
        let (rows, cols) = data.dim();
        if rows == 0 || cols == 0 {
            return Err(LinSysError::InvalidShape { rows, cols });
        }
        Ok(Self { data })
    }

    pub(crate) fn from_array_unchecked(data: Array2<T>) -> Self {
        debug_assert!(data.nrows() > 0 && data.ncols() > 0);
        Self { data }
    }

    /// Number of rows
    #[inline]
    pub fn nrows(&self) -> usize {
        self.data.nrows()
    }

    /// Number of columns
    #[inline]
    pub fn ncols(&self) -> usize {
        self.data.ncols()
    }

    /// `(rows, cols)`
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    /// Whether the matrix has as many rows as columns
    #[inline]
    pub fn is_square(&self) -> bool {
        self.nrows() == self.ncols()
    }

    /// Coefficient at `(row, col)`. Panics when out of range.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> T {
        self.data[[row, col]]
    }

    /// Overwrite the coefficient at `(row, col)`. Panics when out of range.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: T) {
        self.data[[row, col]] = value;
    }

    /// Borrow the underlying array
    pub fn as_array(&self) -> &Array2<T> {
        &self.data
    }

    /// Consume into the underlying array
    pub fn into_array(self) -> Array2<T> {
        self.data
    }

    /// Main diagonal as a vector (length `min(rows, cols)`)
    pub fn diagonal(&self) -> Vector<T> {
        Vector::from_array_unchecked(self.data.diag().to_owned())
    }

    /// Resize to `other`'s shape and deep-copy its coefficients.
    pub fn copy_from(&mut self, other: &Matrix<T>) {
        self.data = other.data.clone();
    }

    /// Element-wise sum of two matrices of identical shape.
    pub fn add(a: &Matrix<T>, b: &Matrix<T>) -> Result<Matrix<T>> {
        if a.shape() != b.shape() {
            return Err(LinSysError::mismatch("add", a.shape(), b.shape()));
        }
        Ok(Matrix {
            data: &a.data + &b.data,
        })
    }

    /// Matrix product `A * B`; requires `A.cols == B.rows`.
    pub fn multiply(a: &Matrix<T>, b: &Matrix<T>) -> Result<Matrix<T>> {
        if a.ncols() != b.nrows() {
            return Err(LinSysError::mismatch("multiply", a.shape(), b.shape()));
        }
        let (rows, inner, cols) = (a.nrows(), a.ncols(), b.ncols());
        let mut data = Array2::zeros((rows, cols));
        for i in 0..rows {
            for j in 0..cols {
                let mut sum = T::zero();
                for k in 0..inner {
                    sum += a.data[[i, k]] * b.data[[k, j]];
                }
                data[[i, j]] = sum;
            }
        }
        Ok(Matrix { data })
    }

    /// Multiply every coefficient by `scalar`, in place.
    pub fn scale(&mut self, scalar: T) -> &mut Self {
        self.data.mapv_inplace(|v| v * scalar);
        self
    }

    /// New matrix with rows and columns swapped
    pub fn transpose(&self) -> Matrix<T> {
        Matrix {
            data: self.data.t().to_owned(),
        }
    }

    /// Maximum absolute column sum
    pub fn norm1(&self) -> T {
        self.data
            .columns()
            .into_iter()
            .map(|col| col.iter().fold(T::zero(), |acc, &v| acc + v.abs()))
            .fold(T::zero(), T::max)
    }

    /// Maximum absolute row sum
    pub fn norm_inf(&self) -> T {
        self.data
            .rows()
            .into_iter()
            .map(|row| row.iter().fold(T::zero(), |acc, &v| acc + v.abs()))
            .fold(T::zero(), T::max)
    }

    /// Dense matrix-vector product `A * x`; requires `x.len() == A.cols`.
    pub fn mul_vector(&self, x: &Vector<T>) -> Result<Vector<T>> {
        if x.len() != self.ncols() {
            return Err(LinSysError::mismatch(
                "matrix-vector product",
                self.shape(),
                (x.len(), 1),
            ));
        }
        let result = self
            .data
            .rows()
            .into_iter()
            .map(|row| {
                row.iter()
                    .zip(x.iter())
                    .fold(T::zero(), |acc, (&a, &b)| acc + a * b)
            })
            .collect::<Vec<_>>();
        Ok(Vector::from_array_unchecked(Array1::from_vec(result)))
    }
}

impl Matrix<f64> {
    /// Matrix from literal row-major data.
    ///
    /// Pinned to `f64` so float literals need no annotation. Other scalars
    /// go through [`Matrix::from_vec_rows`] or [`Matrix::from_shape_vec`].
    ///
    /// ```
    /// use math_audio_linsys::Matrix;
    ///
    /// let a = Matrix::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
    /// assert_eq!(a.shape(), (2, 3));
    /// assert_eq!(a.get(1, 2), 6.0);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if there are no rows or no columns.
    pub fn from_rows<const C: usize>(rows: &[[f64; C]]) -> Self {
        assert!(
            !rows.is_empty() && C > 0,
            "Matrix dimensions must be at least 1x1, got {}x{C}",
            rows.len()
        );
        Self {
            data: Array2::from_shape_fn((rows.len(), C), |(i, j)| rows[i][j]),
        }
    }
}

impl<T: RealField> TryFrom<Array2<T>> for Matrix<T> {
    type Error = LinSysError;

    fn try_from(data: Array2<T>) -> Result<Self> {
        Self::from_array(data)
    }
}

impl<T: RealField> From<Matrix<T>> for Array2<T> {
    fn from(matrix: Matrix<T>) -> Self {
        matrix.data
    }
}

impl<T: RealField> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &T {
        &self.data[[row, col]]
    }
}

impl<T: RealField> IndexMut<(usize, usize)> for Matrix<T> {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        &mut self.data[[row, col]]
    }
}

impl<T: RealField> LinearOperator<T> for Matrix<T> {
    fn num_rows(&self) -> usize {
        self.nrows()
    }

    fn num_cols(&self) -> usize {
        self.ncols()
    }

    fn apply(&self, x: &Vector<T>) -> Result<Vector<T>> {
        self.mul_vector(x)
    }
}

/// One row per line, coefficients separated by a single space.
impl<T: RealField> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.data.rows() {
            for (j, v) in row.iter().enumerate() {
                if j > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{v}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_zeros_and_shape() {
        let m: Matrix = Matrix::zeros(2, 3);
        assert_eq!(m.shape(), (2, 3));
        assert!(!m.is_square());
        assert!(m.as_array().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_empty_shapes_rejected() {
        assert!(matches!(
            Matrix::<f64>::try_zeros(0, 3),
            Err(LinSysError::InvalidShape { rows: 0, cols: 3 })
        ));
        assert!(Matrix::<f64>::from_vec_rows(vec![]).is_err());
        assert!(Matrix::<f64>::from_shape_vec(2, 2, vec![1.0, 2.0, 3.0]).is_err());
    }

    #[test]
    #[should_panic]
    fn test_zeros_panics_on_empty() {
        let _ = Matrix::<f64>::zeros(3, 0);
    }

    #[test]
    fn test_literal_rows_infer_f64() {
        let m = Matrix::from_rows(&[[2.0, -3.0], [0.5, 1.0]]);
        assert_eq!((m.get(0, 1) - 1.0).abs(), 4.0);
        assert_eq!(m.norm_inf(), 5.0);

        let single = Matrix::<f32>::from_vec_rows(vec![vec![-2.0]]).unwrap();
        assert_eq!(single.get(0, 0).abs(), 2.0_f32);
    }

    #[test]
    fn test_from_vec_rows_ragged() {
        let err = Matrix::from_vec_rows(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert!(matches!(
            err,
            LinSysError::RaggedRows {
                row: 1,
                expected: 2,
                got: 1
            }
        ));
    }

    #[test]
    fn test_get_set_index() {
        let mut m = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]);
        m.set(0, 1, 8.0);
        m[(1, 0)] = -1.0;
        assert_eq!(m.get(0, 1), 8.0);
        assert_eq!(m[(1, 0)], -1.0);
    }

    #[test]
    fn test_copy_from_resizes() {
        let mut m = Matrix::from_rows(&[[1.0, 2.0]]);
        let other = Matrix::from_rows(&[[1.0], [2.0], [3.0]]);
        m.copy_from(&other);
        assert_eq!(m.shape(), (3, 1));
        assert_eq!(m, other);
    }

    #[test]
    fn test_add() {
        let a = Matrix::from_rows(&[[2.0, 1.0], [0.0, 1.0]]);
        let b = Matrix::from_rows(&[[1.0, -1.0], [5.0, 2.0]]);
        let c = Matrix::add(&a, &b).unwrap();
        assert_eq!(c, Matrix::from_rows(&[[3.0, 0.0], [5.0, 3.0]]));

        let d = Matrix::from_rows(&[[1.0, 2.0, 3.0]]);
        let err = Matrix::add(&a, &d).unwrap_err();
        assert!(err.is_dimension_error());
    }

    #[test]
    fn test_multiply() {
        let a = Matrix::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        let b = Matrix::from_rows(&[[7.0, 8.0], [9.0, 10.0], [11.0, 12.0]]);
        let c = Matrix::multiply(&a, &b).unwrap();
        assert_eq!(c, Matrix::from_rows(&[[58.0, 64.0], [139.0, 154.0]]));

        assert!(matches!(
            Matrix::multiply(&a, &a),
            Err(LinSysError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_scale_in_place() {
        let mut m = Matrix::from_rows(&[[1.0, -2.0], [0.5, 4.0]]);
        m.scale(-2.0);
        assert_eq!(m, Matrix::from_rows(&[[-2.0, 4.0], [-1.0, -8.0]]));
    }

    #[test]
    fn test_transpose() {
        let m = Matrix::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        let t = m.transpose();
        assert_eq!(t.shape(), (3, 2));
        for i in 0..2 {
            for j in 0..3 {
                assert_eq!(t.get(j, i), m.get(i, j));
            }
        }
    }

    #[test]
    fn test_norms() {
        let m = Matrix::from_rows(&[[1.0, -7.0], [-2.0, -3.0]]);
        assert_relative_eq!(m.norm1(), 10.0);
        assert_relative_eq!(m.norm_inf(), 8.0);
    }

    #[test]
    fn test_hilbert_and_identity() {
        let h: Matrix = Matrix::hilbert(3);
        assert_relative_eq!(h.get(0, 0), 1.0);
        assert_relative_eq!(h.get(1, 2), 0.25);
        assert_relative_eq!(h.get(2, 2), 0.2);
        assert_eq!(h, h.transpose());

        let id: Matrix = Matrix::identity(3);
        assert_eq!(Matrix::multiply(&h, &id).unwrap(), h);
    }

    #[test]
    fn test_mul_vector() {
        let m = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]);
        let x = Vector::from_vec(vec![1.0, -1.0]);
        let y = m.mul_vector(&x).unwrap();
        assert_eq!(y.to_vec(), vec![-1.0, -1.0, -1.0]);
        assert!(m.mul_vector(&y).is_err());
    }

    #[test]
    fn test_display() {
        let m = Matrix::from_rows(&[[1.0, 2.5], [0.0, -1.0]]);
        assert_eq!(m.to_string(), "1 2.5\n0 -1\n");
    }
}
