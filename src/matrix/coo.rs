use num::Num;

use crate::error::{Axis, ConvertError, Result};
use crate::matrix::CsrMatrix;
use crate::utils::sort::sort_by_column;

/// Coordinate triples `(row, col, value)` waiting to be compressed
///
/// Unordered; the same `(row, col)` may appear more than once.
/// Stored as three parallel arrays.
#[derive(Debug, Clone, Default)]
pub struct CooMatrix<N> {
    rows: Vec<u32>,
    cols: Vec<u32>,
    vals: Vec<N>,
}

impl<N> CooMatrix<N>
where
    N: Num + Copy,
{
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            cols: Vec::new(),
            vals: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            rows: Vec::with_capacity(capacity),
            cols: Vec::with_capacity(capacity),
            vals: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn push(&mut self, row: u32, col: u32, val: N) -> &mut Self {
        self.rows.push(row);
        self.cols.push(col);
        self.vals.push(val);
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vals.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vals.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, u32, N)> + '_ {
        self.rows
            .iter()
            .zip(self.cols.iter())
            .zip(self.vals.iter())
            .map(|((&row, &col), &val)| (row, col, val))
    }

    /// Compress into a CSR matrix of exactly `shape`
    ///
    /// Duplicate coordinates are summed, sums equal to zero are dropped.
    ///
    /// # Errors
    /// * `ShapeMismatch` - a row id is `>= shape.0` or a column id is `>= shape.1`
    pub fn into_csr(self, shape: (usize, usize)) -> Result<CsrMatrix<N>> {
        let (n_rows, n_cols) = shape;
        for (&row, &col) in self.rows.iter().zip(self.cols.iter()) {
            if row as usize >= n_rows {
                return Err(ConvertError::ShapeMismatch { axis: Axis::Row, id: row, bound: n_rows });
            }
            if col as usize >= n_cols {
                return Err(ConvertError::ShapeMismatch { axis: Axis::Col, id: col, bound: n_cols });
            }
        }

        // counting sort by row
        let mut row_start = vec![0usize; n_rows + 1];
        for &row in &self.rows {
            row_start[row as usize + 1] += 1;
        }
        for row in 0..n_rows {
            row_start[row + 1] += row_start[row];
        }
        let nnz = self.vals.len();
        let mut cursor = row_start.clone();
        let mut cols_buf = vec![0u32; nnz];
        let mut vals_buf = vec![N::zero(); nnz];
        for ((&row, &col), &val) in self.rows.iter().zip(self.cols.iter()).zip(self.vals.iter()) {
            let slot = &mut cursor[row as usize];
            cols_buf[*slot] = col;
            vals_buf[*slot] = val;
            *slot += 1;
        }

        // per row: order by column, fold duplicates, drop zeros
        let mut indptr = Vec::with_capacity(n_rows + 1);
        let mut indices = Vec::with_capacity(nnz);
        let mut data = Vec::with_capacity(nnz);
        indptr.push(0);
        for row in 0..n_rows {
            let range = row_start[row]..row_start[row + 1];
            let row_cols = &mut cols_buf[range.clone()];
            let row_vals = &mut vals_buf[range];
            sort_by_column(row_cols, row_vals);

            let mut i = 0;
            while i < row_cols.len() {
                let col = row_cols[i];
                let mut sum = row_vals[i];
                i += 1;
                while i < row_cols.len() && row_cols[i] == col {
                    sum = sum + row_vals[i];
                    i += 1;
                }
                if !sum.is_zero() {
                    indices.push(col);
                    data.push(sum);
                }
            }
            indptr.push(indices.len());
        }

        Ok(CsrMatrix::from_parts_unchecked(shape, indptr, indices, data))
    }
}

impl<N> FromIterator<(u32, u32, N)> for CooMatrix<N>
where
    N: Num + Copy,
{
    fn from_iter<I: IntoIterator<Item = (u32, u32, N)>>(iter: I) -> Self {
        let mut coo = CooMatrix::new();
        for (row, col, val) in iter {
            coo.push(row, col, val);
        }
        coo
    }
}
