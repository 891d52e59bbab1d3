//! Gaussian-smoothed gradient magnitude (edge strength).
//!
//! The edge-strength feature smooths a raster frame with a Gaussian kernel
//! parameterized by `sigma`, computes horizontal and vertical Sobel
//! gradients, and takes `sqrt(gx^2 + gy^2)` per cell.
//!
//! Out-of-bounds taps replicate the nearest edge cell, the convolution
//! analogue of the clamped-window border policy used by the windowed
//! reducers: no values outside the observed data are invented.

use ndarray::Array2;
use rayon::prelude::*;

/// Edge strength of `frame`: Gaussian blur followed by Sobel gradient
/// magnitude.
///
/// `sigma` must be > 0; the dispatcher validates this before any array work.
pub fn edge_strength(frame: &Array2<f64>, sigma: f64) -> Array2<f64> {
    debug_assert!(sigma > 0.0, "sigma validated upstream");
    let smoothed = gaussian_smooth(frame, sigma);
    sobel_magnitude(&smoothed)
}

/// Separable Gaussian blur with edge-replicated borders.
///
/// Kernel radius is `ceil(3 * sigma)`, covering 99.7% of the kernel mass.
pub fn gaussian_smooth(frame: &Array2<f64>, sigma: f64) -> Array2<f64> {
    let kernel = gaussian_kernel(sigma);
    let horizontal = convolve_rows(frame, &kernel);
    // Second pass over columns via two cheap transposes; keeps the row
    // convolution cache-friendly for both directions.
    let transposed = horizontal.t().to_owned();
    let vertical = convolve_rows(&transposed, &kernel);
    vertical.t().to_owned()
}

/// Normalized 1-D Gaussian kernel of radius `ceil(3 * sigma)`.
fn gaussian_kernel(sigma: f64) -> Vec<f64> {
    let radius = (3.0 * sigma).ceil().max(1.0) as usize;
    let denom = 2.0 * sigma * sigma;
    let mut kernel: Vec<f64> = (-(radius as isize)..=radius as isize)
        .map(|x| (-((x * x) as f64) / denom).exp())
        .collect();
    let sum: f64 = kernel.iter().sum();
    for w in kernel.iter_mut() {
        *w /= sum;
    }
    kernel
}

/// Convolve every row of `frame` with `kernel`, clamping taps to the row.
fn convolve_rows(frame: &Array2<f64>, kernel: &[f64]) -> Array2<f64> {
    let (rows, cols) = frame.dim();
    let radius = kernel.len() / 2;

    let mut out = vec![0.0f64; rows * cols];
    out.par_chunks_mut(cols).enumerate().for_each(|(r, out_row)| {
        let row = frame.row(r);
        for (c, cell) in out_row.iter_mut().enumerate() {
            let mut acc = 0.0;
            for (k, &w) in kernel.iter().enumerate() {
                let tap = c as isize + k as isize - radius as isize;
                let tap = tap.clamp(0, cols as isize - 1) as usize;
                acc += w * row[tap];
            }
            *cell = acc;
        }
    });

    Array2::from_shape_vec((rows, cols), out).expect("output matches frame shape")
}

/// Sobel gradient magnitude with edge-replicated borders.
pub fn sobel_magnitude(frame: &Array2<f64>) -> Array2<f64> {
    let (rows, cols) = frame.dim();

    let mut out = vec![0.0f64; rows * cols];
    out.par_chunks_mut(cols).enumerate().for_each(|(r, out_row)| {
        let rr = r as isize;
        for (c, cell) in out_row.iter_mut().enumerate() {
            let cc = c as isize;
            let g = |dr: isize, dc: isize| -> f64 {
                let r2 = (rr + dr).clamp(0, rows as isize - 1) as usize;
                let c2 = (cc + dc).clamp(0, cols as isize - 1) as usize;
                frame[[r2, c2]]
            };

            // Classic 3x3 Sobel kernels
            let gx = -g(-1, -1) + g(-1, 1) - 2.0 * g(0, -1) + 2.0 * g(0, 1)
                - g(1, -1)
                + g(1, 1);
            let gy = -g(-1, -1) - 2.0 * g(-1, 0) - g(-1, 1)
                + g(1, -1)
                + 2.0 * g(1, 0)
                + g(1, 1);

            *cell = (gx * gx + gy * gy).sqrt();
        }
    });

    Array2::from_shape_vec((rows, cols), out).expect("output matches frame shape")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    const EPS: f64 = 1e-9;

    #[test]
    fn kernel_is_normalized_and_symmetric() {
        for sigma in [0.5, 1.0, 2.5] {
            let k = gaussian_kernel(sigma);
            assert_eq!(k.len() % 2, 1);
            let sum: f64 = k.iter().sum();
            assert!((sum - 1.0).abs() < EPS);
            for i in 0..k.len() / 2 {
                assert!((k[i] - k[k.len() - 1 - i]).abs() < EPS);
            }
        }
    }

    #[test]
    fn smoothing_preserves_a_constant_frame() {
        let frame = Array2::from_elem((7, 9), 4.2);
        let smoothed = gaussian_smooth(&frame, 1.0);
        for &v in smoothed.iter() {
            assert!((v - 4.2).abs() < EPS);
        }
    }

    #[test]
    fn edge_strength_of_constant_frame_is_zero() {
        let frame = Array2::from_elem((6, 6), 11.0);
        let edges = edge_strength(&frame, 1.0);
        for &v in edges.iter() {
            assert!(v.abs() < EPS);
        }
    }

    #[test]
    fn vertical_step_produces_horizontal_gradient() {
        // Left half 0, right half 1: edge strength peaks along the step.
        let frame = Array2::from_shape_fn((8, 8), |(_, c)| if c < 4 { 0.0 } else { 1.0 });
        let edges = edge_strength(&frame, 0.5);

        let at_step = edges[[4, 4]];
        let far_away = edges[[4, 0]];
        assert!(at_step > far_away);
        assert!(at_step > 0.1);
    }

    #[test]
    fn sobel_on_linear_ramp_is_constant_in_the_interior() {
        // f(r, c) = c has gx = 8 under the Sobel kernel, gy = 0.
        let frame = Array2::from_shape_fn((6, 6), |(_, c)| c as f64);
        let mag = sobel_magnitude(&frame);
        for r in 1..5 {
            for c in 1..5 {
                assert!((mag[[r, c]] - 8.0).abs() < EPS, "at ({r},{c})");
            }
        }
    }

    #[test]
    fn smoothing_is_shift_invariant_on_interior() {
        // A smoothed impulse keeps its mass centered on the impulse.
        let mut frame = Array2::zeros((11, 11));
        frame[[5, 5]] = 1.0;
        let smoothed = gaussian_smooth(&frame, 1.0);
        let max = smoothed
            .indexed_iter()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
            .map(|(idx, _)| idx)
            .unwrap();
        assert_eq!(max, (5, 5));
    }
}
