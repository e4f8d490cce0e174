pub mod coo;
pub mod iter;

use num::Num;
use serde::{de::Error as DeError, Deserialize, Deserializer, Serialize};

use crate::error::{Axis, ConvertError, Result};
use crate::matrix::iter::NonZeroIter;

/// Compressed sparse row matrix
///
/// - `indptr`: `rows + 1` offsets, row `r` owns `indptr[r]..indptr[r + 1]`
/// - `indices`: column of each stored value, strictly ascending within a row
/// - `data`: stored values
///
/// Matrices built by this crate never store zeros.
/// Matrices handed in through [`CsrMatrix::from_raw_parts`] may; the
/// extractor skips them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CsrMatrix<N> {
    shape: (usize, usize),
    indptr: Vec<usize>,
    indices: Vec<u32>,
    data: Vec<N>,
}

impl<N> CsrMatrix<N>
where
    N: Num + Copy,
{
    /// All-zero matrix of the given shape
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            shape: (rows, cols),
            indptr: vec![0; rows + 1],
            indices: Vec::new(),
            data: Vec::new(),
        }
    }

    /// Build from CSR arrays, checking that they describe a valid matrix
    ///
    /// # Errors
    /// * `ShapeMismatch` - a column index is `>= cols`
    /// * `MalformedMatrix` - pointer array length, monotonicity, array
    ///   lengths or column order is inconsistent
    pub fn from_raw_parts(
        shape: (usize, usize),
        indptr: Vec<usize>,
        indices: Vec<u32>,
        data: Vec<N>,
    ) -> Result<Self> {
        let (rows, cols) = shape;
        let expected_ptrs = rows
            .checked_add(1)
            .ok_or_else(|| ConvertError::MalformedMatrix(format!("row count {rows} is too large")))?;
        if indptr.len() != expected_ptrs {
            return Err(ConvertError::MalformedMatrix(format!(
                "indptr has {} entries, expected {}",
                indptr.len(),
                expected_ptrs
            )));
        }
        if indptr[0] != 0 {
            return Err(ConvertError::MalformedMatrix("indptr must start at 0".to_string()));
        }
        if indices.len() != data.len() || indptr[rows] != indices.len() {
            return Err(ConvertError::MalformedMatrix(format!(
                "indptr ends at {}, but there are {} indices and {} values",
                indptr[rows],
                indices.len(),
                data.len()
            )));
        }
        for row in 0..rows {
            let (start, end) = (indptr[row], indptr[row + 1]);
            if start > end || end > indices.len() {
                return Err(ConvertError::MalformedMatrix(format!("indptr decreases at row {row}")));
            }
            let row_cols = &indices[start..end];
            if let Some(&col) = row_cols.iter().find(|&&col| col as usize >= cols) {
                return Err(ConvertError::ShapeMismatch { axis: Axis::Col, id: col, bound: cols });
            }
            if row_cols.windows(2).any(|w| w[0] >= w[1]) {
                return Err(ConvertError::MalformedMatrix(format!(
                    "columns of row {row} are not strictly ascending"
                )));
            }
        }
        Ok(Self { shape, indptr, indices, data })
    }

    /// Caller guarantees the CSR invariants
    pub(crate) fn from_parts_unchecked(
        shape: (usize, usize),
        indptr: Vec<usize>,
        indices: Vec<u32>,
        data: Vec<N>,
    ) -> Self {
        debug_assert_eq!(indptr.len(), shape.0 + 1);
        debug_assert_eq!(indices.len(), data.len());
        Self { shape, indptr, indices, data }
    }

    /// Split into `(shape, indptr, indices, data)`
    pub fn into_raw_parts(self) -> ((usize, usize), Vec<usize>, Vec<u32>, Vec<N>) {
        (self.shape, self.indptr, self.indices, self.data)
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        self.shape
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.shape.0
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.shape.1
    }

    /// Number of stored values
    #[inline]
    pub fn nnz(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn indptr(&self) -> &[usize] {
        &self.indptr
    }

    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    #[inline]
    pub fn data(&self) -> &[N] {
        &self.data
    }

    /// Stored columns and values of one row, `None` past the last row
    #[inline]
    pub fn row(&self, row: usize) -> Option<(&[u32], &[N])> {
        if row >= self.rows() {
            return None;
        }
        let range = self.indptr[row]..self.indptr[row + 1];
        Some((&self.indices[range.clone()], &self.data[range]))
    }

    /// Value at `(row, col)`; zero when nothing is stored there,
    /// `None` outside the shape
    pub fn get(&self, row: usize, col: usize) -> Option<N> {
        if col >= self.cols() {
            return None;
        }
        let (cols, vals) = self.row(row)?;
        match cols.binary_search(&(col as u32)) {
            Ok(pos) => Some(vals[pos]),
            Err(_) => Some(N::zero()),
        }
    }

    /// Sum of the stored values of one row
    pub fn row_sum(&self, row: usize) -> N {
        self.row(row)
            .map(|(_, vals)| vals.iter().fold(N::zero(), |acc, &v| acc + v))
            .unwrap_or_else(N::zero)
    }

    /// Stored entries as `(row, col, value)` in row-major order
    #[inline]
    pub fn iter(&self) -> NonZeroIter<'_, N> {
        NonZeroIter::new(self)
    }

    /// Apply `f` to every stored value, keeping shape and sparsity pattern
    ///
    /// Results equal to zero are dropped so the output stays free of
    /// stored zeros.
    pub fn map_values<M, F>(&self, mut f: F) -> CsrMatrix<M>
    where
        M: Num + Copy,
        F: FnMut(u32, u32, N) -> M,
    {
        let mut indptr = Vec::with_capacity(self.indptr.len());
        let mut indices = Vec::with_capacity(self.indices.len());
        let mut data = Vec::with_capacity(self.data.len());
        indptr.push(0);
        for row in 0..self.rows() {
            for pos in self.indptr[row]..self.indptr[row + 1] {
                let col = self.indices[pos];
                let val = f(row as u32, col, self.data[pos]);
                if !val.is_zero() {
                    indices.push(col);
                    data.push(val);
                }
            }
            indptr.push(indices.len());
        }
        CsrMatrix::from_parts_unchecked(self.shape, indptr, indices, data)
    }

    /// Dense copy, row by row
    pub fn to_dense(&self) -> Vec<Vec<N>> {
        let mut dense = vec![vec![N::zero(); self.cols()]; self.rows()];
        for (row, col, val) in self.iter() {
            dense[row as usize][col as usize] = val;
        }
        dense
    }
}

#[derive(Deserialize)]
struct CsrParts<N> {
    shape: (usize, usize),
    indptr: Vec<usize>,
    indices: Vec<u32>,
    data: Vec<N>,
}

impl<'de, N> Deserialize<'de> for CsrMatrix<N>
where
    N: Num + Copy + Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let parts = CsrParts::<N>::deserialize(deserializer)?;
        CsrMatrix::from_raw_parts(parts.shape, parts.indptr, parts.indices, parts.data)
            .map_err(DeError::custom)
    }
}
