//! Fixed-dimension dense matrices.
//!
//! A [`Matrix<T, R, C>`] is a row-major grid of [`Vector<T, C>`] rows, so
//! each row rides the lane block [`LaneSelect`] picks for the row width.
//! Row operations (the hot path of elimination and matrix products) are
//! whole-block operations.
//!
//! The column-vector convention is used throughout: `m * v` treats `v` as a
//! column and yields a column.

use std::array;
use std::fmt;
use std::ops::{Add, AddAssign, Div, Index, IndexMut, Mul, Neg, Sub, SubAssign};

use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeTuple;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::scalar::Real;
use crate::simd::{LaneOps, LaneSelect};
use crate::vector::Vector;

/// Dense `R x C` matrix, row-major.
///
/// # Example
/// ```
/// use ganita::{Matrix, Vector};
///
/// let m = Matrix::from_rows([[1.0f64, 2.0], [3.0, 4.0]]);
/// let v = Vector::new([1.0f64, 1.0]);
/// assert_eq!((m * v).to_array(), [3.0, 7.0]);
/// ```
#[derive(Clone, Copy, PartialEq)]
pub struct Matrix<T: LaneSelect<C>, const R: usize, const C: usize> {
    rows: [Vector<T, C>; R],
}

/// 2x2 matrix.
pub type Matrix2<T> = Matrix<T, 2, 2>;
/// 3x3 matrix.
pub type Matrix3<T> = Matrix<T, 3, 3>;
/// 4x4 matrix.
pub type Matrix4<T> = Matrix<T, 4, 4>;

impl<T: LaneSelect<C>, const R: usize, const C: usize> Matrix<T, R, C> {
    /// Create a matrix from row arrays.
    #[inline]
    pub fn from_rows(rows: [[T; C]; R]) -> Self {
        Self {
            rows: rows.map(Vector::new),
        }
    }

    /// Create a matrix from row vectors.
    #[inline]
    pub fn from_row_vectors(rows: [Vector<T, C>; R]) -> Self {
        Self { rows }
    }

    /// The zero matrix.
    #[inline]
    pub fn zero() -> Self {
        Self {
            rows: [Vector::zero(); R],
        }
    }

    /// Number of rows.
    #[inline]
    pub const fn row_count(&self) -> usize {
        R
    }

    /// Number of columns.
    #[inline]
    pub const fn col_count(&self) -> usize {
        C
    }

    /// Copy of row `i`.
    #[inline]
    pub fn row(&self, i: usize) -> Vector<T, C> {
        self.rows[i]
    }

    /// Replace row `i`.
    #[inline]
    pub fn set_row(&mut self, i: usize, row: Vector<T, C>) {
        self.rows[i] = row;
    }

    /// Swap two rows.
    #[inline]
    pub fn swap_rows(&mut self, a: usize, b: usize) {
        self.rows.swap(a, b);
    }

    /// Copy of column `j`.
    #[inline]
    pub fn col(&self, j: usize) -> Vector<T, R>
    where
        T: LaneSelect<R>,
    {
        Vector::new(array::from_fn(|i| self.rows[i].as_slice()[j]))
    }

    /// Extract all rows as arrays.
    #[inline]
    pub fn to_rows(self) -> [[T; C]; R] {
        self.rows.map(Vector::to_array)
    }

    /// The transposed matrix.
    pub fn transpose(&self) -> Matrix<T, C, R>
    where
        T: LaneSelect<R>,
    {
        let mut out = Matrix::<T, C, R>::zero();
        for i in 0..R {
            for j in 0..C {
                out[(j, i)] = self[(i, j)];
            }
        }
        out
    }

    /// Borrow a view that excludes one row and one column.
    ///
    /// The view is move-only and borrows `self`; materialize it with
    /// [`Submatrix::eval`].
    ///
    /// # Panics
    /// Panics if `row >= R` or `col >= C`.
    #[inline]
    pub fn submatrix(&self, row: usize, col: usize) -> Submatrix<'_, T, R, C> {
        assert!(row < R, "excluded row {row} out of range for {R} rows");
        assert!(col < C, "excluded column {col} out of range for {C} columns");
        Submatrix {
            source: self,
            skip_row: row,
            skip_col: col,
        }
    }
}

impl<T: LaneSelect<N>, const N: usize> Matrix<T, N, N> {
    /// The identity matrix.
    pub fn identity() -> Self {
        let mut out = Self::zero();
        for i in 0..N {
            out[(i, i)] = T::one();
        }
        out
    }

    /// Sum of the diagonal.
    #[inline]
    pub fn trace(&self) -> T {
        let mut acc = T::zero();
        for i in 0..N {
            acc += self[(i, i)];
        }
        acc
    }
}

impl<T: LaneSelect<C> + Real, const R: usize, const C: usize> Matrix<T, R, C> {
    /// Largest absolute entry (the max norm), the scale reference for
    /// pivot tolerances.
    #[inline]
    pub fn max_abs(&self) -> T {
        self.rows
            .iter()
            .fold(T::zero(), |acc, row| acc.max(row.max_abs()))
    }
}

impl<T: LaneSelect<3>> Matrix<T, 3, 3> {
    /// Determinant of the minor that excludes `row` and `col`.
    #[inline]
    pub fn minor(&self, row: usize, col: usize) -> T
    where
        T: LaneSelect<2> + Real,
    {
        let m = self.submatrix(row, col).eval::<2, 2>();
        m[(0, 0)] * m[(1, 1)] - m[(0, 1)] * m[(1, 0)]
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Submatrix view
// ─────────────────────────────────────────────────────────────────────────────

/// Transient view of a matrix with one row and one column excluded.
///
/// Deliberately neither `Clone` nor `Copy`: the view exists for the
/// duration of a single submatrix expression, and the borrow it holds keeps
/// the source matrix alive and un-mutated for exactly that long.
pub struct Submatrix<'a, T: LaneSelect<C>, const R: usize, const C: usize> {
    source: &'a Matrix<T, R, C>,
    skip_row: usize,
    skip_col: usize,
}

impl<T: LaneSelect<C>, const R: usize, const C: usize> Submatrix<'_, T, R, C> {
    /// Excluded row index.
    #[inline]
    pub fn skipped_row(&self) -> usize {
        self.skip_row
    }

    /// Excluded column index.
    #[inline]
    pub fn skipped_col(&self) -> usize {
        self.skip_col
    }

    /// Sign of the cofactor this view corresponds to:
    /// `(-1)^(row + col)`.
    #[inline]
    pub fn cofactor_sign(&self) -> i32 {
        if (self.skip_row + self.skip_col) % 2 == 0 {
            1
        } else {
            -1
        }
    }

    /// Copy the remaining entries into an `(R-1) x (C-1)` matrix.
    ///
    /// `RS` and `CS` are checked at compile time to be exactly one less
    /// than the source dimensions.
    pub fn eval<const RS: usize, const CS: usize>(self) -> Matrix<T, RS, CS>
    where
        T: LaneSelect<CS>,
    {
        const {
            assert!(
                RS + 1 == R && CS + 1 == C,
                "submatrix is exactly one row and one column smaller than its source"
            );
        }
        let mut out = Matrix::<T, RS, CS>::zero();
        for r in 0..RS {
            let sr = r + (r >= self.skip_row) as usize;
            for c in 0..CS {
                let sc = c + (c >= self.skip_col) as usize;
                out[(r, c)] = self.source[(sr, sc)];
            }
        }
        out
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Operators
// ─────────────────────────────────────────────────────────────────────────────

impl<T: LaneSelect<C>, const R: usize, const C: usize> Index<(usize, usize)> for Matrix<T, R, C> {
    type Output = T;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &T {
        &self.rows[row].as_slice()[col]
    }
}

impl<T: LaneSelect<C>, const R: usize, const C: usize> IndexMut<(usize, usize)>
    for Matrix<T, R, C>
{
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        &mut self.rows[row].as_mut_slice()[col]
    }
}

impl<T: LaneSelect<C>, const R: usize, const C: usize> Add for Matrix<T, R, C> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self {
            rows: array::from_fn(|i| self.rows[i] + rhs.rows[i]),
        }
    }
}

impl<T: LaneSelect<C>, const R: usize, const C: usize> Sub for Matrix<T, R, C> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self {
            rows: array::from_fn(|i| self.rows[i] - rhs.rows[i]),
        }
    }
}

impl<T: LaneSelect<C>, const R: usize, const C: usize> Mul<T> for Matrix<T, R, C> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: T) -> Self {
        Self {
            rows: self.rows.map(|row| row * rhs),
        }
    }
}

impl<T: LaneSelect<C>, const R: usize, const C: usize> Div<T> for Matrix<T, R, C> {
    type Output = Self;

    #[inline]
    fn div(self, rhs: T) -> Self {
        Self {
            rows: self.rows.map(|row| row / rhs),
        }
    }
}

impl<T: LaneSelect<C>, const R: usize, const C: usize> Neg for Matrix<T, R, C> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self {
            rows: self.rows.map(|row| -row),
        }
    }
}

impl<T: LaneSelect<C>, const R: usize, const C: usize> AddAssign for Matrix<T, R, C> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<T: LaneSelect<C>, const R: usize, const C: usize> SubAssign for Matrix<T, R, C> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

/// Matrix product. Each output row is accumulated with fused
/// multiply-adds over whole row blocks: `out_i = Σ_k a_ik * b_k`.
impl<T, const R: usize, const K: usize, const C: usize> Mul<Matrix<T, K, C>> for Matrix<T, R, K>
where
    T: LaneSelect<K> + LaneSelect<C>,
{
    type Output = Matrix<T, R, C>;

    fn mul(self, rhs: Matrix<T, K, C>) -> Matrix<T, R, C> {
        let mut rows = [Vector::<T, C>::zero(); R];
        for (i, out_row) in rows.iter_mut().enumerate() {
            let mut acc = <T as LaneSelect<C>>::Block::splat(T::zero());
            for k in 0..K {
                let scale = <T as LaneSelect<C>>::Block::splat(self[(i, k)]);
                acc = rhs.rows[k].block().mul_add(scale, acc);
            }
            *out_row = Vector::from_block(acc);
        }
        Matrix { rows }
    }
}

/// Matrix times column vector.
impl<T, const R: usize, const C: usize> Mul<Vector<T, C>> for Matrix<T, R, C>
where
    T: LaneSelect<C> + LaneSelect<R>,
{
    type Output = Vector<T, R>;

    #[inline]
    fn mul(self, rhs: Vector<T, C>) -> Vector<T, R> {
        Vector::new(array::from_fn(|i| self.rows[i].dot(rhs)))
    }
}

impl<T: LaneSelect<C>, const R: usize, const C: usize> Default for Matrix<T, R, C> {
    #[inline]
    fn default() -> Self {
        Self::zero()
    }
}

impl<T: LaneSelect<C>, const R: usize, const C: usize> fmt::Debug for Matrix<T, R, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Matrix(")?;
        f.debug_list()
            .entries(self.rows.iter().map(Vector::as_slice))
            .finish()?;
        write!(f, ")")
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Serde: a sequence of R rows, each a sequence of C scalars.
// ─────────────────────────────────────────────────────────────────────────────

impl<T, const R: usize, const C: usize> Serialize for Matrix<T, R, C>
where
    T: LaneSelect<C> + Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(R)?;
        for row in &self.rows {
            tuple.serialize_element(row)?;
        }
        tuple.end()
    }
}

struct MatrixVisitor<T, const R: usize, const C: usize>(std::marker::PhantomData<T>);

impl<'de, T, const R: usize, const C: usize> Visitor<'de> for MatrixVisitor<T, R, C>
where
    T: LaneSelect<C> + Deserialize<'de>,
{
    type Value = Matrix<T, R, C>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "a sequence of {R} rows of {C} scalars")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error> {
        let mut rows = [Vector::<T, C>::zero(); R];
        for (i, slot) in rows.iter_mut().enumerate() {
            *slot = seq
                .next_element()?
                .ok_or_else(|| de::Error::invalid_length(i, &self))?;
        }
        Ok(Matrix { rows })
    }
}

impl<'de, T, const R: usize, const C: usize> Deserialize<'de> for Matrix<T, R, C>
where
    T: LaneSelect<C> + Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_tuple(R, MatrixVisitor(std::marker::PhantomData))
    }
}
