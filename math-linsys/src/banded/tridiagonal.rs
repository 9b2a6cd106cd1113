//! Tridiagonal matrix in 3-band storage
//!
//! The bands live in a `3 x n` array:
//! - row 0: sub-diagonal, `a[i] = A[i][i-1]` (`a[0]` unused)
//! - row 1: main diagonal, `b[i] = A[i][i]`
//! - row 2: super-diagonal, `c[i] = A[i][i+1]` (`c[n-1]` unused)
//!
//! Storage is O(n) and the matrix-vector product works on the bands directly.

use crate::dense::{Matrix, Vector};
use crate::error::{LinSysError, Result};
use crate::traits::{LinearOperator, RealField};
use ndarray::{Array1, Array2, ArrayView1, s};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const SUB: usize = 0;
const MAIN: usize = 1;
const SUPER: usize = 2;

/// Square tridiagonal matrix of order n stored as three bands of length n
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Array2<T>", into = "Array2<T>"))]
pub struct TridiagonalMatrix<T: RealField = f64> {
    bands: Array2<T>,
}

impl<T: RealField> TridiagonalMatrix<T> {
    /// Zero tridiagonal matrix of order `n`.
    ///
    /// # Panics
    ///
    /// Panics if `n` is zero.
    pub fn zeros(n: usize) -> Self {
        assert!(n > 0, "Tridiagonal order must be at least 1");
        Self {
            bands: Array2::zeros((3, n)),
        }
    }

    /// Build from the three bands, which must share one non-zero length.
    ///
    /// ```
    /// use math_audio_linsys::TridiagonalMatrix;
    ///
    /// // 1-D Laplacian of order 4
    /// let a = TridiagonalMatrix::from_bands(
    ///     vec![0.0, -1.0, -1.0, -1.0],
    ///     vec![2.0, 2.0, 2.0, 2.0],
    ///     vec![-1.0, -1.0, -1.0, 0.0],
    /// )
    /// .unwrap();
    /// assert_eq!(a.order(), 4);
    /// assert_eq!(a.to_dense().get(1, 0), -1.0);
    /// ```
    pub fn from_bands(sub: Vec<T>, main: Vec<T>, sup: Vec<T>) -> Result<Self> {
        let n = main.len();
        if n == 0 {
            return Err(LinSysError::InvalidShape { rows: 3, cols: 0 });
        }
        for band in [&sub, &sup] {
            if band.len() != n {
                return Err(LinSysError::mismatch(
                    "tridiagonal bands",
                    (1, n),
                    (1, band.len()),
                ));
            }
        }
        let flat: Vec<T> = sub.into_iter().chain(main).chain(sup).collect();
        let bands = Array2::from_shape_vec((3, n), flat)
            .map_err(|_| LinSysError::InvalidShape { rows: 3, cols: n })?;
        Ok(Self { bands })
    }

    /// Wrap an existing `3 x n` band array.
    pub fn from_array(bands: Array2<T>) -> Result<Self> {
        let (rows, cols) = bands.dim();
        if rows != 3 || cols == 0 {
            return Err(LinSysError::InvalidShape { rows, cols });
        }
        Ok(Self { bands })
    }

    /// Order n of the represented square matrix
    #[inline]
    pub fn order(&self) -> usize {
        self.bands.ncols()
    }

    /// Sub-diagonal coefficient `A[i][i-1]` (index 0 is unused storage)
    #[inline]
    pub fn sub(&self, i: usize) -> T {
        self.bands[[SUB, i]]
    }

    /// Main-diagonal coefficient `A[i][i]`
    #[inline]
    pub fn main(&self, i: usize) -> T {
        self.bands[[MAIN, i]]
    }

    /// Super-diagonal coefficient `A[i][i+1]` (index n-1 is unused storage)
    #[inline]
    pub fn sup(&self, i: usize) -> T {
        self.bands[[SUPER, i]]
    }

    /// Overwrite `A[i][i-1]`
    #[inline]
    pub fn set_sub(&mut self, i: usize, value: T) {
        self.bands[[SUB, i]] = value;
    }

    /// Overwrite `A[i][i]`
    #[inline]
    pub fn set_main(&mut self, i: usize, value: T) {
        self.bands[[MAIN, i]] = value;
    }

    /// Overwrite `A[i][i+1]`
    #[inline]
    pub fn set_sup(&mut self, i: usize, value: T) {
        self.bands[[SUPER, i]] = value;
    }

    /// Sub-diagonal band
    pub fn sub_band(&self) -> ArrayView1<'_, T> {
        self.bands.row(SUB)
    }

    /// Main-diagonal band
    pub fn main_band(&self) -> ArrayView1<'_, T> {
        self.bands.row(MAIN)
    }

    /// Super-diagonal band
    pub fn super_band(&self) -> ArrayView1<'_, T> {
        self.bands.row(SUPER)
    }

    /// Borrow the `3 x n` band array
    pub fn as_array(&self) -> &Array2<T> {
        &self.bands
    }

    /// Resize to `other`'s order and deep-copy its bands.
    pub fn copy_from(&mut self, other: &TridiagonalMatrix<T>) {
        self.bands = other.bands.clone();
    }

    /// Band-limited product `A * x`; requires `x.len() == n`.
    pub fn mul_vector(&self, x: &Vector<T>) -> Result<Vector<T>> {
        let n = self.order();
        if x.len() != n {
            return Err(LinSysError::mismatch(
                "tridiagonal matrix-vector product",
                (n, n),
                (x.len(), 1),
            ));
        }
        let mut result = Array1::zeros(n);
        for i in 0..n {
            let mut sum = self.main(i) * x[i];
            if i > 0 {
                sum += self.sub(i) * x[i - 1];
            }
            if i + 1 < n {
                sum += self.sup(i) * x[i + 1];
            }
            result[i] = sum;
        }
        Ok(Vector::from_array_unchecked(result))
    }

    /// Expand into a dense `n x n` matrix with zeros off the bands.
    pub fn to_dense(&self) -> Matrix<T> {
        let n = self.order();
        let mut dense = Array2::zeros((n, n));
        dense.diag_mut().assign(&self.main_band());
        if n > 1 {
            dense
                .slice_mut(s![1.., ..-1])
                .diag_mut()
                .assign(&self.bands.slice(s![SUB, 1..]));
            dense
                .slice_mut(s![..-1, 1..])
                .diag_mut()
                .assign(&self.bands.slice(s![SUPER, ..-1]));
        }
        Matrix::from_array_unchecked(dense)
    }
}

impl TridiagonalMatrix<f64> {
    /// Build from literal `[sub, main, super]` rows, in `f64`.
    ///
    /// # Panics
    ///
    /// Panics if `N` is zero.
    pub fn from_rows<const N: usize>(rows: &[[f64; N]; 3]) -> Self {
        assert!(N > 0, "Tridiagonal order must be at least 1");
        Self {
            bands: Array2::from_shape_fn((3, N), |(band, i)| rows[band][i]),
        }
    }
}

impl<T: RealField> TryFrom<Array2<T>> for TridiagonalMatrix<T> {
    type Error = LinSysError;

    fn try_from(bands: Array2<T>) -> Result<Self> {
        Self::from_array(bands)
    }
}

impl<T: RealField> From<TridiagonalMatrix<T>> for Array2<T> {
    fn from(matrix: TridiagonalMatrix<T>) -> Self {
        matrix.bands
    }
}

impl<T: RealField> LinearOperator<T> for TridiagonalMatrix<T> {
    fn num_rows(&self) -> usize {
        self.order()
    }

    fn num_cols(&self) -> usize {
        self.order()
    }

    fn apply(&self, x: &Vector<T>) -> Result<Vector<T>> {
        self.mul_vector(x)
    }
}

/// Densified view, off-band coefficients printed as zero.
impl<T: RealField> fmt::Display for TridiagonalMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_dense())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn laplacian(n: usize) -> TridiagonalMatrix {
        let mut a = TridiagonalMatrix::zeros(n);
        for i in 0..n {
            a.set_main(i, 2.0);
            if i > 0 {
                a.set_sub(i, -1.0);
            }
            if i + 1 < n {
                a.set_sup(i, -1.0);
            }
        }
        a
    }

    #[test]
    fn test_from_bands_checks_lengths() {
        let err = TridiagonalMatrix::from_bands(vec![0.0, 1.0], vec![1.0, 1.0], vec![1.0])
            .unwrap_err();
        assert!(err.is_dimension_error());
        assert!(TridiagonalMatrix::<f64>::from_bands(vec![], vec![], vec![]).is_err());
        assert!(TridiagonalMatrix::<f64>::from_array(Array2::zeros((2, 4))).is_err());
    }

    #[test]
    fn test_mul_vector_3x3() {
        let a = TridiagonalMatrix::from_rows(&[[0.0, 2.0, 4.0], [3.0, 1.0, -5.0], [5.0, 10.0, 0.0]]);
        let x = Vector::from_vec(vec![1.0, 2.0, 3.0]);
        let y = a.mul_vector(&x).unwrap();
        // [3*1 + 5*2, 2*1 + 1*2 + 10*3, 4*2 - 5*3]
        assert_eq!(y.to_vec(), vec![13.0, 34.0, -7.0]);
    }

    #[test]
    fn test_mul_vector_matches_dense() {
        let a = TridiagonalMatrix::from_rows(&[
            [0.0, 1.0, 2.0, 3.0, 4.0],
            [5.0, 6.0, 7.0, 8.0, 9.0],
            [11.0, 12.0, 13.0, 8.0, 0.0],
        ]);
        let x = Vector::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        let banded = a.mul_vector(&x).unwrap();
        let dense = a.to_dense().mul_vector(&x).unwrap();
        for i in 0..5 {
            assert_relative_eq!(banded[i], dense[i]);
        }
    }

    #[test]
    fn test_mul_vector_wrong_length() {
        let a = laplacian(4);
        let x = Vector::from_vec(vec![1.0, 2.0, 3.0]);
        assert!(a.mul_vector(&x).is_err());
    }

    #[test]
    fn test_to_dense_ignores_unused_corners() {
        let mut a = laplacian(3);
        a.set_sub(0, 99.0);
        a.set_sup(2, 99.0);
        let dense = a.to_dense();
        assert_eq!(
            dense,
            Matrix::from_rows(&[[2.0, -1.0, 0.0], [-1.0, 2.0, -1.0], [0.0, -1.0, 2.0]])
        );
    }

    #[test]
    fn test_order_one() {
        let a = TridiagonalMatrix::from_rows(&[[7.0], [3.0], [7.0]]);
        assert_eq!(a.to_dense(), Matrix::from_rows(&[[3.0]]));
        let y = a.mul_vector(&Vector::from_vec(vec![2.0])).unwrap();
        assert_eq!(y.to_vec(), vec![6.0]);
    }

    #[test]
    fn test_copy_from_and_display() {
        let mut a = laplacian(2);
        let b = laplacian(3);
        a.copy_from(&b);
        assert_eq!(a.order(), 3);
        assert_eq!(a.to_string(), "2 -1 0\n-1 2 -1\n0 -1 2\n");
    }
}
