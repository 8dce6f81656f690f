//! Dense, row-major matrix.

use std::fmt::{Display, Formatter};
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}
impl<T: Default + Clone> Matrix<T> {
    pub fn allocate(rows: usize, cols: usize) -> Self {
        let (len, overflow) = rows.overflowing_mul(cols);
        assert!(
            !overflow,
            "allocation of a {rows}x{cols} matrix failed due to overflow"
        );
        let data = vec![T::default(); len];
        Self { data, rows, cols }
    }
}

impl<T> Matrix<T> {
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn row_slice(&self, row: usize) -> &[T] {
        debug_assert!(self.validate_row_index(row));
        let row_start = row * self.cols;
        &self.data[row_start..(row_start + self.cols)]
    }

    pub fn row_slice_mut(&mut self, row: usize) -> &mut [T] {
        debug_assert!(self.validate_row_index(row));
        let row_start = row * self.cols;
        &mut self.data[row_start..(row_start + self.cols)]
    }

    /// All cells in row-major order.
    #[inline]
    pub fn flatten(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn flatten_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// A multi-line rendering of the matrix, one row per line.
    pub fn verbose(&self) -> Verbose<T> {
        Verbose(self)
    }

    fn validate_row_index(&self, row: usize) -> bool {
        assert!(
            row < self.rows,
            "invalid row index {row} for a {}x{} matrix",
            self.rows,
            self.cols
        );
        true
    }

    fn validate_col_index(&self, col: usize) -> bool {
        assert!(
            col < self.cols,
            "invalid column index {col} for a {}x{} matrix",
            self.rows,
            self.cols
        );
        true
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        debug_assert!(self.validate_row_index(row));
        debug_assert!(self.validate_col_index(col));
        &self.data[row * self.cols + col]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        debug_assert!(self.validate_row_index(row));
        debug_assert!(self.validate_col_index(col));
        &mut self.data[row * self.cols + col]
    }
}

pub struct Verbose<'a, T>(&'a Matrix<T>);

impl<'a, T: Display> Display for Verbose<'a, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let matrix = self.0;
        for row in 0..matrix.rows() {
            write!(f, "[")?;
            for (col, value) in matrix.row_slice(row).iter().enumerate() {
                if col != 0 {
                    write!(f, ", ")?;
                }
                match f.precision() {
                    Some(precision) => write!(f, "{value:.precision$}")?,
                    None => write!(f, "{value}")?,
                }
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}
