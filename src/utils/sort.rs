/// Rows up to this length are insertion sorted
const SMALL_ROW: usize = 32;

/// Stable LSD radix sort of one CSR row by column index.
/// - Sorts `cols` ascending
/// - Moves `vals` along with their column
/// - Only runs as many byte passes as the largest column needs
///
/// Complexity: at most 4 passes, each O(n + 256)
pub fn sort_by_column<N: Copy>(cols: &mut [u32], vals: &mut [N]) {
    assert_eq!(cols.len(), vals.len());
    let n = cols.len();
    if n <= 1 {
        return;
    }
    if n <= SMALL_ROW {
        insertion_sort_by_column(cols, vals);
        return;
    }

    let max_col = cols.iter().copied().max().unwrap_or(0);

    let mut src_cols = cols.to_vec();
    let mut src_vals = vals.to_vec();
    let mut dst_cols = vec![0u32; n];
    let mut dst_vals = src_vals.clone();

    let mut shift = 0u32;
    while shift < u32::BITS && (max_col >> shift) != 0 {
        let mut offsets = [0usize; 256];
        for &col in &src_cols {
            offsets[((col >> shift) & 0xFF) as usize] += 1;
        }

        let mut sum = 0usize;
        for slot in offsets.iter_mut() {
            let bucket = *slot;
            *slot = sum;
            sum += bucket;
        }

        // scatter in source order so equal keys stay in place
        for (&col, &val) in src_cols.iter().zip(src_vals.iter()) {
            let bucket = ((col >> shift) & 0xFF) as usize;
            let pos = offsets[bucket];
            offsets[bucket] = pos + 1;
            dst_cols[pos] = col;
            dst_vals[pos] = val;
        }

        std::mem::swap(&mut src_cols, &mut dst_cols);
        std::mem::swap(&mut src_vals, &mut dst_vals);
        shift += 8;
    }

    cols.copy_from_slice(&src_cols);
    vals.copy_from_slice(&src_vals);
}

#[inline]
fn insertion_sort_by_column<N: Copy>(cols: &mut [u32], vals: &mut [N]) {
    for i in 1..cols.len() {
        let mut j = i;
        while j > 0 && cols[j] < cols[j - 1] {
            cols.swap(j, j - 1);
            vals.swap(j, j - 1);
            j -= 1;
        }
    }
}
