//! Sliding-window evaluation of local spatial statistics.
//!
//! [`evaluate`] applies a local reducer over a square neighborhood centered
//! on every cell of a raster frame and returns a frame of the same shape.
//!
//! # Border policy
//!
//! Edge cells reduce over the in-bounds part of their window (clamped /
//! reduced windows). No padding values are invented; a corner cell with a
//! 5x5 window sees only the 3x3 block that actually exists. The same policy
//! applies to every spatial feature type so that values near the raster
//! boundary are reproducible across features.

use ndarray::{Array2, ArrayView2};
use rayon::prelude::*;

/// Local reduction applied to each window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalReducer {
    /// Sample standard deviation of the window.
    Std,
    /// Peak-to-peak range (max - min) of the window.
    Range,
    /// Coefficient of variation: std / mean, `0` when the mean is `0`.
    Cv,
}

/// Apply `reducer` over a `window_size` x `window_size` neighborhood of
/// every cell.
///
/// `window_size` must be >= 1 and is conventionally odd; validation happens
/// at declaration level before this function is reached.
pub fn evaluate(frame: ArrayView2<'_, f64>, window_size: usize, reducer: LocalReducer) -> Array2<f64> {
    debug_assert!(window_size >= 1, "window_size validated upstream");

    let (rows, cols) = frame.dim();
    // Centered half-open window bounds: (w-1)/2 back, w/2 forward.
    let back = (window_size - 1) / 2;
    let forward = window_size / 2;

    let mut out = vec![0.0f64; rows * cols];
    out.par_chunks_mut(cols).enumerate().for_each(|(r, row)| {
        let r0 = r.saturating_sub(back);
        let r1 = (r + forward + 1).min(rows);
        for (c, cell) in row.iter_mut().enumerate() {
            let c0 = c.saturating_sub(back);
            let c1 = (c + forward + 1).min(cols);
            let window = frame.slice(ndarray::s![r0..r1, c0..c1]);
            *cell = reduce(window, reducer);
        }
    });

    Array2::from_shape_vec((rows, cols), out).expect("output matches frame shape")
}

fn reduce(window: ArrayView2<'_, f64>, reducer: LocalReducer) -> f64 {
    match reducer {
        LocalReducer::Std => sample_std(window),
        LocalReducer::Range => range(window),
        LocalReducer::Cv => {
            let mean = mean(window);
            if mean == 0.0 {
                0.0
            } else {
                sample_std(window) / mean
            }
        }
    }
}

fn mean(window: ArrayView2<'_, f64>) -> f64 {
    let n = window.len();
    debug_assert!(n > 0);
    window.iter().sum::<f64>() / n as f64
}

/// Two-pass sample standard deviation; `0` for windows of fewer than two
/// cells (degenerate clamped corners with `window_size == 1`).
fn sample_std(window: ArrayView2<'_, f64>) -> f64 {
    let n = window.len();
    if n < 2 {
        return 0.0;
    }
    let mean = mean(window);
    let ss: f64 = window.iter().map(|&v| (v - mean) * (v - mean)).sum();
    (ss / (n - 1) as f64).sqrt()
}

fn range(window: ArrayView2<'_, f64>) -> f64 {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in window.iter() {
        min = min.min(v);
        max = max.max(v);
    }
    max - min
}
