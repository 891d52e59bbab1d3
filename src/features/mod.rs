//! The feature catalog and its dispatcher.
//!
//! Feature computation is organized into:
//! - `temporal`: per-pixel reductions of one band's time series
//! - `spatial`: windowed raster statistics of temporal-mean frames
//! - `window`: the sliding-window evaluator shared by spatial features
//! - `gradient`: Gaussian smoothing and Sobel magnitude for edge strength
//!
//! [`evaluate`] is the single entry point: it takes a validated
//! [`FeatureSpec`], checks the band against the actual array, resolves the
//! declared intervals against the actual time axis, and invokes the matching
//! catalog computation. One spec produces one column, except `raw`, which
//! produces one column per covered time step.

pub mod gradient;
pub mod spatial;
pub mod temporal;
pub mod window;

pub use window::LocalReducer;

use crate::error::{FeatureError, Result};
use crate::schema::FeatureSpec;
use crate::stack::ImageryStack;

/// One named output column, one value per pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureColumn {
    /// Deterministic column name.
    pub name: String,
    /// Per-pixel values, in pixel order.
    pub values: Vec<f64>,
}

impl FeatureColumn {
    /// Create a column.
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        FeatureColumn {
            name: name.into(),
            values,
        }
    }
}

/// Compute the column(s) for one validated feature spec.
///
/// Validates `band` against the stack's band count, resolves intervals
/// against the stack's time axis, and dispatches on the spec variant.
pub fn evaluate(spec: &FeatureSpec, stack: &ImageryStack) -> Result<Vec<FeatureColumn>> {
    let band = spec.band();
    if band >= stack.n_bands() {
        return Err(FeatureError::invalid(
            "band_id",
            format!(
                "band {band} out of range for array with {} bands",
                stack.n_bands()
            ),
        ));
    }

    let steps = stack.n_steps();
    let base = spec.column_base();

    let columns = match *spec {
        FeatureSpec::Raw { band, interval } => {
            let interval = interval.resolve(steps)?;
            return Ok(temporal::raw(stack.band_series(band), interval)
                .into_iter()
                .map(|(t, values)| FeatureColumn::new(format!("{base}_t{t}"), values))
                .collect());
        }
        FeatureSpec::Mean { band, interval } => {
            let interval = interval.resolve(steps)?;
            temporal::mean(stack.band_series(band), interval)
        }
        FeatureSpec::Std { band, interval } => {
            let interval = interval.resolve(steps)?;
            temporal::std(stack.band_series(band), interval)
        }
        FeatureSpec::DeseasonalizedDiff {
            band,
            lag,
            interval,
        } => {
            let interval = interval.resolve(steps)?;
            temporal::deseasonalized_diff(stack.band_series(band), interval, lag)?
        }
        FeatureSpec::DeseasonalizedDiffSpecificMonth {
            band,
            lag,
            month,
            interval,
        } => {
            let interval = interval.resolve(steps)?;
            temporal::deseasonalized_diff_specific_month(
                stack.band_series(band),
                interval,
                lag,
                month,
            )?
        }
        FeatureSpec::DifferenceInMeanBetweenIntervals {
            band,
            interval_one,
            interval_two,
        } => {
            let one = interval_one.resolve(steps)?;
            let two = interval_two.resolve(steps)?;
            temporal::difference_in_mean_between_intervals(stack.band_series(band), one, two)
        }
        FeatureSpec::SpatialCv {
            band,
            window_size,
            interval,
        } => {
            let interval = interval.resolve(steps)?;
            spatial::spatial_cv(stack, band, interval, window_size)
        }
        FeatureSpec::SpatialStd {
            band,
            window_size,
            interval,
        } => {
            let interval = interval.resolve(steps)?;
            spatial::spatial_std(stack, band, interval, window_size)
        }
        FeatureSpec::SpatialStdDifference {
            band,
            window_size,
            interval_one,
            interval_two,
        } => {
            let one = interval_one.resolve(steps)?;
            let two = interval_two.resolve(steps)?;
            spatial::spatial_std_difference(stack, band, one, two, window_size)
        }
        FeatureSpec::SpatialRange {
            band,
            window_size,
            interval,
        } => {
            let interval = interval.resolve(steps)?;
            spatial::spatial_range(stack, band, interval, window_size)
        }
        FeatureSpec::SpatialEdgeStrength {
            band,
            sigma,
            interval,
        } => {
            let interval = interval.resolve(steps)?;
            spatial::spatial_edge_strength(stack, band, interval, sigma)
        }
    };

    Ok(vec![FeatureColumn::new(base, columns)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FeatureDecl, FeatureKind};
    use crate::stack::GridShape;
    use ndarray::Array3;

    fn stack_2x2() -> ImageryStack {
        let data = Array3::from_shape_fn((4, 24, 2), |(p, t, b)| {
            (p * 100 + t * 2 + b) as f64
        });
        ImageryStack::new(data, GridShape::new(2, 2)).unwrap()
    }

    #[test]
    fn out_of_range_band_is_rejected() {
        let stack = stack_2x2();
        let spec = FeatureDecl::new(FeatureKind::Mean, 2).validate().unwrap();
        let err = evaluate(&spec, &stack).unwrap_err();
        assert!(matches!(
            err,
            FeatureError::InvalidParameter { name: "band_id", .. }
        ));
    }

    #[test]
    fn scalar_features_yield_exactly_one_column() {
        let stack = stack_2x2();
        for decl in [
            FeatureDecl::new(FeatureKind::Mean, 0),
            FeatureDecl::new(FeatureKind::Std, 1),
            FeatureDecl::new(FeatureKind::SpatialRange, 0).with_window_size(3),
            FeatureDecl::new(FeatureKind::DifferenceInMeanBetweenIntervals, 0),
        ] {
            let spec = decl.validate().unwrap();
            let columns = evaluate(&spec, &stack).unwrap();
            assert_eq!(columns.len(), 1, "{:?}", spec.kind());
            assert_eq!(columns[0].values.len(), 4);
        }
    }

    #[test]
    fn raw_yields_one_column_per_covered_step() {
        let stack = stack_2x2();
        let spec = FeatureDecl::new(FeatureKind::Raw, 0)
            .with_consideration_interval(Some(-3), None)
            .validate()
            .unwrap();
        let columns = evaluate(&spec, &stack).unwrap();
        assert_eq!(columns.len(), 3);
        assert_eq!(columns[0].name, "raw_b0_t-3:_t21");
        assert_eq!(columns[0].values[0], 42.0);
    }

    #[test]
    fn empty_interval_propagates() {
        let stack = stack_2x2();
        let spec = FeatureDecl::new(FeatureKind::Mean, 0)
            .with_consideration_interval(Some(5), Some(5))
            .validate()
            .unwrap();
        let err = evaluate(&spec, &stack).unwrap_err();
        assert!(matches!(err, FeatureError::EmptyInterval { .. }));
    }

    #[test]
    fn dual_interval_feature_resolves_both_independently() {
        let stack = stack_2x2();
        let spec = FeatureDecl::new(FeatureKind::DifferenceInMeanBetweenIntervals, 0)
            .with_interval_one(0, 12)
            .with_interval_two(12, 24)
            .validate()
            .unwrap();
        let columns = evaluate(&spec, &stack).unwrap();
        // Linear in t with slope 2: first-year mean is 24 lower.
        for &v in &columns[0].values {
            assert!((v + 24.0).abs() < 1e-12);
        }
    }
}
