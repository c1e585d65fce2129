//! Regression design matrices.

use std::f64::consts::TAU;

use nalgebra::DMatrix;

/// Lagged-difference block: column `j` holds `sign·d[r - j]` in row `r >= j`.
pub(crate) fn lagged_block(d: &[f64], lags: usize, sign: f64) -> DMatrix<f64> {
    let n = d.len();
    let mut m = DMatrix::zeros(n, lags + 1);
    for j in 0..=lags.min(n.saturating_sub(1)) {
        for k in 0..n - j {
            m[(j + k, j)] = sign * d[k];
        }
    }
    m
}

/// Harmonic block: all cosine columns, then all sine columns, over `time`.
pub(crate) fn harmonic_block(time: &[f64], frequencies: &[f64]) -> DMatrix<f64> {
    let m = frequencies.len();
    DMatrix::from_fn(time.len(), 2 * m, |r, c| {
        let arg = TAU * frequencies[c % m] * time[r];
        if c < m { arg.cos() } else { arg.sin() }
    })
}

/// `[1 | blocks...]`.
pub(crate) fn with_intercept(blocks: &[DMatrix<f64>], rows: usize) -> DMatrix<f64> {
    let cols = 1 + blocks.iter().map(|b| b.ncols()).sum::<usize>();
    let mut z = DMatrix::zeros(rows, cols);
    z.column_mut(0).fill(1.0);
    let mut offset = 1;
    for block in blocks {
        z.columns_mut(offset, block.ncols()).copy_from(block);
        offset += block.ncols();
    }
    z
}
