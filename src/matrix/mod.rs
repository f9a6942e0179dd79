//! Dense matrix algebra
//!
//! A small, dimension-checked matrix type over `f64` built on `ndarray`.
//! Every algebraic operation returns a new owned [`Matrix`]; the only
//! operation that mutates its receiver is [`Matrix::clear`].

mod render;

use ndarray::{Array1, Array2, Axis};
use thiserror::Error;

/// Matrix operation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatrixError {
    #[error("Dimension mismatch in {op}: {detail}")]
    DimensionMismatch { op: &'static str, detail: String },

    #[error("Operand is not a vector: shape {rows}x{cols}")]
    NotAVector { rows: usize, cols: usize },

    #[error("Column {column} out of range for a matrix with {columns} columns")]
    ColumnOutOfRange { column: usize, columns: usize },

    #[error("Ragged rows: row {row} has {found} values, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },
}

impl MatrixError {
    fn shapes(op: &'static str, left: (usize, usize), right: (usize, usize)) -> Self {
        MatrixError::DimensionMismatch {
            op,
            detail: format!("{}x{} vs {}x{}", left.0, left.1, right.0, right.1),
        }
    }
}

/// Elementwise scalar operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarOp {
    Add,
    Subtract,
    Multiply,
    /// Division by zero follows IEEE-754 (infinity or NaN)
    Divide,
}

impl ScalarOp {
    /// Apply the operation to a single element
    pub fn apply(&self, value: f64, x: f64) -> f64 {
        match self {
            ScalarOp::Add => value + x,
            ScalarOp::Subtract => value - x,
            ScalarOp::Multiply => value * x,
            ScalarOp::Divide => value / x,
        }
    }
}

/// Rectangular grid of real numbers with value semantics
///
/// # Example
///
/// ```rust
/// use hopfield_digits::matrix::Matrix;
///
/// let row = Matrix::row_matrix(&[1.0, -1.0, 1.0]);
/// let outer = row.transpose().multiply(&row).unwrap();
///
/// assert_eq!(outer.shape(), (3, 3));
/// assert_eq!(outer.get(0, 1), Some(-1.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    data: Array2<f64>,
}

impl Matrix {
    /// Zero-filled matrix of the given shape
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            data: Array2::zeros((rows, cols)),
        }
    }

    /// Wrap an existing ndarray
    pub fn from_array(data: Array2<f64>) -> Self {
        Self { data }
    }

    /// Build a matrix from nested rows, copying the values
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, MatrixError> {
        let cols = rows.first().map_or(0, Vec::len);

        for (i, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(MatrixError::RaggedRows {
                    row: i,
                    expected: cols,
                    found: row.len(),
                });
            }
        }

        Ok(Self::from_array(Array2::from_shape_fn(
            (rows.len(), cols),
            |(r, c)| rows[r][c],
        )))
    }

    /// n x n identity matrix
    pub fn identity(n: usize) -> Self {
        Self::from_array(Array2::eye(n))
    }

    /// Wrap a flat sequence as a 1 x N matrix
    pub fn row_matrix(values: &[f64]) -> Self {
        Self::from_array(Array1::from_vec(values.to_vec()).insert_axis(Axis(0)))
    }

    /// Inverse of [`Matrix::flatten`]: fill `rows` rows in row-major order
    pub fn reshape(values: &[f64], rows: usize) -> Result<Self, MatrixError> {
        if rows == 0 {
            return Err(MatrixError::DimensionMismatch {
                op: "reshape",
                detail: "row count must be positive".to_string(),
            });
        }
        if values.len() % rows != 0 {
            return Err(MatrixError::DimensionMismatch {
                op: "reshape",
                detail: format!("{} values do not divide into {} rows", values.len(), rows),
            });
        }

        let cols = values.len() / rows;
        Ok(Self::from_array(Array2::from_shape_fn(
            (rows, cols),
            |(r, c)| values[r * cols + c],
        )))
    }

    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    /// (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.data.get((row, col)).copied()
    }

    /// Borrow the underlying array
    pub fn as_array(&self) -> &Array2<f64> {
        &self.data
    }

    /// A vector has a single row or a single column
    pub fn is_vector(&self) -> bool {
        self.rows() == 1 || self.cols() == 1
    }

    pub fn is_square(&self) -> bool {
        self.rows() == self.cols()
    }

    /// Exact symmetry check
    pub fn is_symmetric(&self) -> bool {
        self.is_square() && self.data == self.data.t()
    }

    /// Main diagonal values
    pub fn diagonal(&self) -> Vec<f64> {
        self.data.diag().to_vec()
    }

    /// Elementwise sum
    pub fn add(&self, other: &Matrix) -> Result<Matrix, MatrixError> {
        if self.shape() != other.shape() {
            return Err(MatrixError::shapes("add", self.shape(), other.shape()));
        }
        Ok(Self::from_array(&self.data + &other.data))
    }

    /// `self + (other * -1)`
    pub fn subtract(&self, other: &Matrix) -> Result<Matrix, MatrixError> {
        if self.shape() != other.shape() {
            return Err(MatrixError::shapes("subtract", self.shape(), other.shape()));
        }
        self.add(&other.scalar(-1.0, ScalarOp::Multiply))
    }

    /// Matrix product; requires `self.cols() == other.rows()`
    pub fn multiply(&self, other: &Matrix) -> Result<Matrix, MatrixError> {
        if self.cols() != other.rows() {
            return Err(MatrixError::shapes("multiply", self.shape(), other.shape()));
        }
        Ok(Self::from_array(self.data.dot(&other.data)))
    }

    /// Apply a scalar operation to every element
    pub fn scalar(&self, x: f64, op: ScalarOp) -> Matrix {
        Self::from_array(self.data.mapv(|value| op.apply(value, x)))
    }

    pub fn transpose(&self) -> Matrix {
        Self::from_array(self.data.t().to_owned())
    }

    /// Σ aᵢ·bᵢ over two vectors of equal length, in either orientation
    pub fn dot_product(&self, other: &Matrix) -> Result<f64, MatrixError> {
        for operand in [self, other] {
            if !operand.is_vector() {
                return Err(MatrixError::NotAVector {
                    rows: operand.rows(),
                    cols: operand.cols(),
                });
            }
        }
        if self.data.len() != other.data.len() {
            return Err(MatrixError::shapes("dot_product", self.shape(), other.shape()));
        }

        Ok(self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| a * b)
            .sum())
    }

    /// Copy column `column` into a new N x 1 matrix
    pub fn column(&self, column: usize) -> Result<Matrix, MatrixError> {
        if column >= self.cols() {
            return Err(MatrixError::ColumnOutOfRange {
                column,
                columns: self.cols(),
            });
        }
        Ok(Self::from_array(
            self.data.column(column).to_owned().insert_axis(Axis(1)),
        ))
    }

    /// Row-major linearization
    pub fn flatten(&self) -> Vec<f64> {
        self.data.iter().copied().collect()
    }

    /// Zero every element in place
    pub fn clear(&mut self) -> &mut Self {
        self.data.fill(0.0);
        self
    }
}
