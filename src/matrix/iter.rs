use std::iter::FusedIterator;

use num::Num;

use crate::matrix::CsrMatrix;

/// Iterator over the stored entries of a [`CsrMatrix`]
///
/// Walks `indptr`/`indices`/`data` directly, yielding `(row, col, value)`
/// row-major with ascending columns. Cost is O(nnz + rows), never
/// O(rows * cols).
pub struct NonZeroIter<'a, N>
where
    N: Num + Copy + 'a,
{
    matrix: &'a CsrMatrix<N>,
    row: usize,
    pos: usize,
}

impl<'a, N> NonZeroIter<'a, N>
where
    N: Num + Copy + 'a,
{
    #[inline]
    pub fn new(matrix: &'a CsrMatrix<N>) -> Self {
        Self {
            matrix,
            row: 0,
            pos: 0,
        }
    }
}

impl<'a, N> Iterator for NonZeroIter<'a, N>
where
    N: Num + Copy + 'a,
{
    type Item = (u32, u32, N);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let indptr = self.matrix.indptr();
        if self.pos >= self.matrix.nnz() {
            return None;
        }
        // skip rows that end before the cursor (empty rows included)
        while indptr[self.row + 1] <= self.pos {
            self.row += 1;
        }
        let pos = self.pos;
        self.pos += 1;
        Some((self.row as u32, self.matrix.indices()[pos], self.matrix.data()[pos]))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.matrix.nnz() - self.pos;
        (remaining, Some(remaining))
    }
}

impl<'a, N> ExactSizeIterator for NonZeroIter<'a, N>
where
    N: Num + Copy + 'a,
{
    #[inline]
    fn len(&self) -> usize {
        self.matrix.nnz() - self.pos
    }
}

impl<'a, N> FusedIterator for NonZeroIter<'a, N> where N: Num + Copy + 'a {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yields_row_major_and_skips_empty_rows() {
        // [[0, 0], [5, 0], [0, 0], [0, 7]]
        let m = CsrMatrix::from_raw_parts((4, 2), vec![0, 0, 1, 1, 2], vec![0, 1], vec![5u32, 7]).unwrap();
        let mut it = m.iter();
        assert_eq!(it.len(), 2);
        assert_eq!(it.next(), Some((1, 0, 5)));
        assert_eq!(it.len(), 1);
        assert_eq!(it.next(), Some((3, 1, 7)));
        assert_eq!(it.next(), None);
        assert_eq!(it.next(), None);
    }

    #[test]
    fn agrees_with_dense_scan() {
        let dense = vec![
            vec![0.0, 1.5, 0.0, 2.0],
            vec![0.0, 0.0, 0.0, 0.0],
            vec![3.0, 0.0, 0.0, 0.25],
        ];
        let mut indptr = vec![0];
        let mut indices = Vec::new();
        let mut data = Vec::new();
        for row in &dense {
            for (col, &v) in row.iter().enumerate() {
                if v != 0.0 {
                    indices.push(col as u32);
                    data.push(v);
                }
            }
            indptr.push(indices.len());
        }
        let m = CsrMatrix::from_raw_parts((3, 4), indptr, indices, data).unwrap();

        let expected: Vec<(u32, u32, f64)> = dense
            .iter()
            .enumerate()
            .flat_map(|(r, row)| {
                row.iter()
                    .enumerate()
                    .filter(|(_, &v)| v != 0.0)
                    .map(move |(c, &v)| (r as u32, c as u32, v))
            })
            .collect();
        assert_eq!(m.iter().collect::<Vec<_>>(), expected);
    }
}
