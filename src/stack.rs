//! The raw imagery array and its spatial layout.
//!
//! An [`ImageryStack`] owns a three-axis array of per-pixel observations,
//! axes `(pixel, time, band)`, together with the raster shape that maps the
//! flat pixel axis back onto a 2-D grid. Temporal features read per-pixel
//! time series straight off the first two axes; spatial features reshape
//! per-pixel values through [`GridShape`] into a frame before windowed
//! computation.
//!
//! The stack is read-only for its whole lifetime. Every extraction run works
//! against the same in-memory array; there is no caching or mutation.

use ndarray::{Array2, Array3, ArrayView1, ArrayView2, Axis};

use crate::error::{FeatureError, Result};

/// Raster dimensions of the flat pixel axis, row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GridShape {
    /// Raster rows.
    pub rows: usize,
    /// Raster columns.
    pub cols: usize,
}

impl GridShape {
    /// Create a grid shape.
    pub fn new(rows: usize, cols: usize) -> Self {
        GridShape { rows, cols }
    }

    /// Total pixel count covered by the grid.
    pub fn n_pixels(&self) -> usize {
        self.rows * self.cols
    }
}

/// Immutable multi-band satellite imagery time series.
///
/// Axis layout: `(pixel, time, band)`. All bands share the time axis and all
/// pixels share the band count by construction of `Array3`.
#[derive(Debug, Clone)]
pub struct ImageryStack {
    data: Array3<f64>,
    grid: GridShape,
}

impl ImageryStack {
    /// Create a stack from an array and its raster layout.
    ///
    /// Fails with [`FeatureError::GridMismatch`] when `rows * cols` does not
    /// equal the array's pixel count.
    pub fn new(data: Array3<f64>, grid: GridShape) -> Result<Self> {
        let n_pixels = data.len_of(Axis(0));
        if grid.n_pixels() != n_pixels {
            return Err(FeatureError::GridMismatch {
                rows: grid.rows,
                cols: grid.cols,
                n_pixels,
            });
        }
        Ok(ImageryStack { data, grid })
    }

    /// Create a stack with a degenerate single-row raster.
    ///
    /// Useful when only temporal features will be computed and no meaningful
    /// raster layout exists.
    pub fn from_flat(data: Array3<f64>) -> Self {
        let n_pixels = data.len_of(Axis(0));
        ImageryStack {
            data,
            grid: GridShape::new(1, n_pixels),
        }
    }

    /// Number of pixels (first axis).
    pub fn n_pixels(&self) -> usize {
        self.data.len_of(Axis(0))
    }

    /// Number of time steps (second axis).
    pub fn n_steps(&self) -> usize {
        self.data.len_of(Axis(1))
    }

    /// Number of spectral bands (third axis).
    pub fn n_bands(&self) -> usize {
        self.data.len_of(Axis(2))
    }

    /// Raster layout of the pixel axis.
    pub fn grid(&self) -> GridShape {
        self.grid
    }

    /// Per-pixel time series of one band, shape `(pixel, time)`.
    ///
    /// Callers must validate `band < n_bands()` beforehand; the dispatcher
    /// does this for every declaration.
    pub fn band_series(&self, band: usize) -> ArrayView2<'_, f64> {
        self.data.index_axis(Axis(2), band)
    }

    /// One pixel's full time series for one band.
    pub fn pixel_series(&self, pixel: usize, band: usize) -> ArrayView1<'_, f64> {
        self.data.slice(ndarray::s![pixel, .., band])
    }

    /// Reshape a per-pixel column into a raster frame, row-major.
    ///
    /// The inverse of frame flattening: pixel `i` lands at
    /// `(i / cols, i % cols)`.
    pub fn to_frame(&self, per_pixel: Vec<f64>) -> Array2<f64> {
        debug_assert_eq!(per_pixel.len(), self.grid.n_pixels());
        Array2::from_shape_vec((self.grid.rows, self.grid.cols), per_pixel)
            .expect("grid shape verified at construction")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    fn stack_3x2(rows: usize, cols: usize) -> ImageryStack {
        // pixel p, time t, band b -> 100*p + 10*t + b
        let n = rows * cols;
        let data = Array3::from_shape_fn((n, 4, 2), |(p, t, b)| {
            (100 * p + 10 * t + b) as f64
        });
        ImageryStack::new(data, GridShape::new(rows, cols)).unwrap()
    }

    #[test]
    fn dimensions_are_reported() {
        let stack = stack_3x2(2, 3);
        assert_eq!(stack.n_pixels(), 6);
        assert_eq!(stack.n_steps(), 4);
        assert_eq!(stack.n_bands(), 2);
    }

    #[test]
    fn grid_mismatch_is_rejected() {
        let data = Array3::<f64>::zeros((6, 4, 2));
        let err = ImageryStack::new(data, GridShape::new(2, 2)).unwrap_err();
        assert!(matches!(
            err,
            crate::error::FeatureError::GridMismatch { n_pixels: 6, .. }
        ));
    }

    #[test]
    fn band_series_selects_the_right_band() {
        let stack = stack_3x2(2, 3);
        let series = stack.band_series(1);
        assert_eq!(series.shape(), &[6, 4]);
        // pixel 2, time 3, band 1
        assert_eq!(series[[2, 3]], 231.0);
    }

    #[test]
    fn frame_reshape_is_row_major() {
        let stack = stack_3x2(2, 3);
        let frame = stack.to_frame((0..6).map(|v| v as f64).collect());
        assert_eq!(frame[[0, 2]], 2.0);
        assert_eq!(frame[[1, 0]], 3.0);
    }

    #[test]
    fn from_flat_uses_single_row() {
        let data = Array3::<f64>::zeros((5, 3, 1));
        let stack = ImageryStack::from_flat(data);
        assert_eq!(stack.grid(), GridShape::new(1, 5));
    }
}
