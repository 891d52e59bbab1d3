//! Spatial feature computations.
//!
//! Every spatial feature first collapses the selected band's covered time
//! slice to a single raster frame (the temporal mean per pixel), then runs
//! a local (windowed or gradient) computation over that frame and flattens
//! the result back into pixel order.

use ndarray::Array2;

use crate::features::gradient;
use crate::features::temporal;
use crate::features::window::{self, LocalReducer};
use crate::interval::ResolvedInterval;
use crate::stack::ImageryStack;

/// Temporal-mean frame of one band over a resolved interval.
pub fn temporal_mean_frame(
    stack: &ImageryStack,
    band: usize,
    interval: ResolvedInterval,
) -> Array2<f64> {
    stack.to_frame(temporal::mean(stack.band_series(band), interval))
}

/// Local coefficient of variation of the temporal-mean frame.
pub fn spatial_cv(
    stack: &ImageryStack,
    band: usize,
    interval: ResolvedInterval,
    window_size: usize,
) -> Vec<f64> {
    windowed(stack, band, interval, window_size, LocalReducer::Cv)
}

/// Local standard deviation of the temporal-mean frame.
pub fn spatial_std(
    stack: &ImageryStack,
    band: usize,
    interval: ResolvedInterval,
    window_size: usize,
) -> Vec<f64> {
    windowed(stack, band, interval, window_size, LocalReducer::Std)
}

/// Local peak-to-peak range of the temporal-mean frame.
pub fn spatial_range(
    stack: &ImageryStack,
    band: usize,
    interval: ResolvedInterval,
    window_size: usize,
) -> Vec<f64> {
    windowed(stack, band, interval, window_size, LocalReducer::Range)
}

/// Local standard deviation of the difference between two interval-mean
/// frames.
///
/// The two frames are computed independently, subtracted element-wise, and
/// the local-std reducer runs on the difference frame.
pub fn spatial_std_difference(
    stack: &ImageryStack,
    band: usize,
    interval_one: ResolvedInterval,
    interval_two: ResolvedInterval,
    window_size: usize,
) -> Vec<f64> {
    let frame_one = temporal_mean_frame(stack, band, interval_one);
    let frame_two = temporal_mean_frame(stack, band, interval_two);
    let difference = frame_one - frame_two;
    window::evaluate(difference.view(), window_size, LocalReducer::Std)
        .into_iter()
        .collect()
}

/// Gaussian-smoothed Sobel gradient magnitude of the temporal-mean frame.
pub fn spatial_edge_strength(
    stack: &ImageryStack,
    band: usize,
    interval: ResolvedInterval,
    sigma: f64,
) -> Vec<f64> {
    let frame = temporal_mean_frame(stack, band, interval);
    gradient::edge_strength(&frame, sigma).into_iter().collect()
}

fn windowed(
    stack: &ImageryStack,
    band: usize,
    interval: ResolvedInterval,
    window_size: usize,
    reducer: LocalReducer,
) -> Vec<f64> {
    let frame = temporal_mean_frame(stack, band, interval);
    window::evaluate(frame.view(), window_size, reducer)
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::Interval;
    use crate::stack::GridShape;
    use ndarray::Array3;

    const EPS: f64 = 1e-12;

    /// 4x4 raster, 6 time steps, 2 bands. Band 0 is constant per pixel with
    /// value = flat pixel index; band 1 oscillates around it over time.
    fn test_stack() -> ImageryStack {
        let data = Array3::from_shape_fn((16, 6, 2), |(p, t, b)| {
            let base = p as f64;
            if b == 0 {
                base
            } else {
                base + if t % 2 == 0 { 1.0 } else { -1.0 }
            }
        });
        ImageryStack::new(data, GridShape::new(4, 4)).unwrap()
    }

    fn full(stack: &ImageryStack) -> ResolvedInterval {
        Interval::full().resolve(stack.n_steps()).unwrap()
    }

    #[test]
    fn temporal_mean_frame_collapses_time() {
        let stack = test_stack();
        let interval = full(&stack);
        // Band 1 oscillates +-1 over an even number of steps: mean equals
        // the pixel base value, same as band 0.
        let frame0 = temporal_mean_frame(&stack, 0, interval);
        let frame1 = temporal_mean_frame(&stack, 1, interval);
        assert_eq!(frame0.dim(), (4, 4));
        for (a, b) in frame0.iter().zip(frame1.iter()) {
            assert!((a - b).abs() < EPS);
        }
        assert!((frame0[[1, 2]] - 6.0).abs() < EPS);
    }

    #[test]
    fn spatial_cv_of_uniform_band_is_zero() {
        let data = Array3::from_elem((16, 6, 1), 5.0);
        let stack = ImageryStack::new(data, GridShape::new(4, 4)).unwrap();
        let interval = full(&stack);
        let out = spatial_cv(&stack, 0, interval, 3);
        assert_eq!(out.len(), 16);
        assert!(out.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn spatial_std_difference_of_identical_intervals_is_zero() {
        let stack = test_stack();
        let one = Interval::new(0, 3).resolve(6).unwrap();
        let two = Interval::new(0, 3).resolve(6).unwrap();
        let out = spatial_std_difference(&stack, 0, one, two, 3);
        assert!(out.iter().all(|&v| v.abs() < EPS));
    }

    #[test]
    fn spatial_range_sees_the_pixel_gradient() {
        let stack = test_stack();
        let interval = full(&stack);
        let out = spatial_range(&stack, 0, interval, 3);
        // Interior pixel (1,1) = flat index 5: window covers values 0..=10,
        // range 10.
        assert!((out[5] - 10.0).abs() < EPS);
    }

    #[test]
    fn edge_strength_is_flat_for_a_constant_frame() {
        let data = Array3::from_elem((16, 4, 1), 2.0);
        let stack = ImageryStack::new(data, GridShape::new(4, 4)).unwrap();
        let interval = full(&stack);
        let out = spatial_edge_strength(&stack, 0, interval, 1.0);
        assert!(out.iter().all(|&v| v.abs() < 1e-9));
    }

    #[test]
    fn output_is_flattened_row_major() {
        let stack = test_stack();
        let interval = full(&stack);
        let frame = temporal_mean_frame(&stack, 0, interval);
        let out = spatial_range(&stack, 0, interval, 1);
        assert_eq!(out.len(), frame.len());
        // window_size 1 makes every local range 0; shape is all that matters
        assert!(out.iter().all(|&v| v == 0.0));
    }
}
