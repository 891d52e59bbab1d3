//! Declarative feature definitions.
//!
//! A feature set arrives as a JSON-shaped object with a single `features`
//! array; each element carries a `type` tag plus the parameters that type
//! understands. [`FeatureDecl`] is that wire record, accepted unmodified
//! from the external configuration layer. [`FeatureDecl::validate`] turns it
//! into a [`FeatureSpec`], a per-type configuration record with defaults
//! applied and every parameter checked. Validation happens once, before any
//! array computation.
//!
//! Fields irrelevant to a declaration's type are ignored, not errors: a
//! `sigma` on a `mean` feature simply has no effect.

pub mod presets;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FeatureError, Result};
use crate::interval::Interval;

pub use presets::Preset;

/// Default spatial window side length.
pub const DEFAULT_WINDOW_SIZE: usize = 5;
/// Default Gaussian sigma for edge strength.
pub const DEFAULT_SIGMA: f64 = 1.0;
/// Default lag for deseasonalized differences (one year of monthly steps).
pub const DEFAULT_LAG: usize = 12;
/// Default first interval of dual-interval features: the first year.
pub const DEFAULT_INTERVAL_ONE: (i64, i64) = (0, 11);
/// Default second interval of dual-interval features: the last year.
pub const DEFAULT_INTERVAL_TWO: (i64, i64) = (-12, -1);

/// The closed catalog of feature type tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKind {
    /// Raw band values over the considered interval (multi-column).
    Raw,
    /// Temporal mean.
    Mean,
    /// Temporal population standard deviation.
    Std,
    /// Mean lagged difference over the considered interval.
    DeseasonalizedDiff,
    /// Mean lagged difference restricted to one calendar month.
    DeseasonalizedDiffSpecificMonth,
    /// Mean of interval one minus mean of interval two.
    DifferenceInMeanBetweenIntervals,
    /// Local coefficient of variation of the temporal-mean frame.
    SpatialCv,
    /// Local standard deviation of the temporal-mean frame.
    SpatialStd,
    /// Local standard deviation of the difference of two interval-mean frames.
    SpatialStdDifference,
    /// Local peak-to-peak range of the temporal-mean frame.
    SpatialRange,
    /// Gaussian-smoothed Sobel gradient magnitude of the temporal-mean frame.
    SpatialEdgeStrength,
}

impl FeatureKind {
    /// All catalog entries, in canonical order.
    pub fn all() -> &'static [FeatureKind] {
        &[
            FeatureKind::Raw,
            FeatureKind::Mean,
            FeatureKind::Std,
            FeatureKind::DeseasonalizedDiff,
            FeatureKind::DeseasonalizedDiffSpecificMonth,
            FeatureKind::DifferenceInMeanBetweenIntervals,
            FeatureKind::SpatialCv,
            FeatureKind::SpatialStd,
            FeatureKind::SpatialStdDifference,
            FeatureKind::SpatialRange,
            FeatureKind::SpatialEdgeStrength,
        ]
    }

    /// Wire-format type tag.
    pub fn tag(&self) -> &'static str {
        match self {
            FeatureKind::Raw => "raw",
            FeatureKind::Mean => "mean",
            FeatureKind::Std => "std",
            FeatureKind::DeseasonalizedDiff => "deseasonalized_diff",
            FeatureKind::DeseasonalizedDiffSpecificMonth => "deseasonalized_diff_specific_month",
            FeatureKind::DifferenceInMeanBetweenIntervals => {
                "difference_in_mean_between_intervals"
            }
            FeatureKind::SpatialCv => "spatial_cv",
            FeatureKind::SpatialStd => "spatial_std",
            FeatureKind::SpatialStdDifference => "spatial_std_difference",
            FeatureKind::SpatialRange => "spatial_range",
            FeatureKind::SpatialEdgeStrength => "spatial_edge_strength",
        }
    }

    /// True for the spatial (windowed raster) feature types.
    pub fn is_spatial(&self) -> bool {
        matches!(
            self,
            FeatureKind::SpatialCv
                | FeatureKind::SpatialStd
                | FeatureKind::SpatialStdDifference
                | FeatureKind::SpatialRange
                | FeatureKind::SpatialEdgeStrength
        )
    }
}

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for FeatureKind {
    type Err = FeatureError;

    fn from_str(s: &str) -> Result<Self> {
        FeatureKind::all()
            .iter()
            .copied()
            .find(|k| k.tag() == s)
            .ok_or_else(|| FeatureError::UnknownFeatureType(s.to_string()))
    }
}

/// One feature declaration as it appears on the wire.
///
/// Only `type` and `band_id` are required; everything else is optional with
/// type-dependent defaults. Unknown extra fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureDecl {
    /// Feature type tag; validated against the catalog, not at parse time.
    #[serde(rename = "type")]
    pub kind: String,

    /// Spectral band index into the imagery array's third axis.
    pub band_id: usize,

    /// Spatial window side length (spatial types; default 5).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_size: Option<usize>,

    /// Gaussian sigma (edge strength; default 1.0).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sigma: Option<f64>,

    /// Lag in time steps (deseasonalized types; default 12).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lag: Option<usize>,

    /// Calendar month 0-11 (specific-month type; required there).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,

    /// Consideration interval start (most types; open by default).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consideration_interval_start: Option<i64>,

    /// Consideration interval end (most types; open by default).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consideration_interval_end: Option<i64>,

    /// First interval start (dual-interval types; default 0).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_one_start: Option<i64>,

    /// First interval end (dual-interval types; default 11).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_one_end: Option<i64>,

    /// Second interval start (dual-interval types; default -12).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_two_start: Option<i64>,

    /// Second interval end (dual-interval types; default -1).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_two_end: Option<i64>,
}

impl FeatureDecl {
    /// Declaration of `kind` on `band_id`, everything else defaulted.
    pub fn new(kind: FeatureKind, band_id: usize) -> Self {
        FeatureDecl {
            kind: kind.tag().to_string(),
            band_id,
            window_size: None,
            sigma: None,
            lag: None,
            month: None,
            consideration_interval_start: None,
            consideration_interval_end: None,
            interval_one_start: None,
            interval_one_end: None,
            interval_two_start: None,
            interval_two_end: None,
        }
    }

    /// Set the spatial window size.
    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = Some(window_size);
        self
    }

    /// Set the Gaussian sigma.
    pub fn with_sigma(mut self, sigma: f64) -> Self {
        self.sigma = Some(sigma);
        self
    }

    /// Set the lag.
    pub fn with_lag(mut self, lag: usize) -> Self {
        self.lag = Some(lag);
        self
    }

    /// Set the calendar month (0-11).
    pub fn with_month(mut self, month: u32) -> Self {
        self.month = Some(month);
        self
    }

    /// Set the consideration interval.
    pub fn with_consideration_interval(mut self, start: Option<i64>, end: Option<i64>) -> Self {
        self.consideration_interval_start = start;
        self.consideration_interval_end = end;
        self
    }

    /// Set the first of the two dual intervals.
    pub fn with_interval_one(mut self, start: i64, end: i64) -> Self {
        self.interval_one_start = Some(start);
        self.interval_one_end = Some(end);
        self
    }

    /// Set the second of the two dual intervals.
    pub fn with_interval_two(mut self, start: i64, end: i64) -> Self {
        self.interval_two_start = Some(start);
        self.interval_two_end = Some(end);
        self
    }

    /// Consideration interval as declared, open bounds preserved.
    fn consideration_interval(&self) -> Interval {
        Interval {
            start: self.consideration_interval_start,
            end: self.consideration_interval_end,
        }
    }

    fn interval_one(&self) -> Interval {
        Interval {
            start: Some(self.interval_one_start.unwrap_or(DEFAULT_INTERVAL_ONE.0)),
            end: Some(self.interval_one_end.unwrap_or(DEFAULT_INTERVAL_ONE.1)),
        }
    }

    fn interval_two(&self) -> Interval {
        Interval {
            start: Some(self.interval_two_start.unwrap_or(DEFAULT_INTERVAL_TWO.0)),
            end: Some(self.interval_two_end.unwrap_or(DEFAULT_INTERVAL_TWO.1)),
        }
    }

    /// Validate the declaration and produce its typed configuration record.
    ///
    /// Checks the type tag against the catalog, applies defaults for omitted
    /// optional parameters, and rejects out-of-range values. Band range is
    /// checked later by the dispatcher, against the actual array.
    pub fn validate(&self) -> Result<FeatureSpec> {
        let kind = FeatureKind::from_str(&self.kind)?;
        let band = self.band_id;

        let spec = match kind {
            FeatureKind::Raw => FeatureSpec::Raw {
                band,
                interval: self.consideration_interval(),
            },
            FeatureKind::Mean => FeatureSpec::Mean {
                band,
                interval: self.consideration_interval(),
            },
            FeatureKind::Std => FeatureSpec::Std {
                band,
                interval: self.consideration_interval(),
            },
            FeatureKind::DeseasonalizedDiff => FeatureSpec::DeseasonalizedDiff {
                band,
                lag: self.validated_lag()?,
                interval: self.consideration_interval(),
            },
            FeatureKind::DeseasonalizedDiffSpecificMonth => {
                let month = self
                    .month
                    .ok_or_else(|| FeatureError::invalid("month", "required for this type"))?;
                if month > 11 {
                    return Err(FeatureError::invalid(
                        "month",
                        format!("must be within [0, 11], got {month}"),
                    ));
                }
                FeatureSpec::DeseasonalizedDiffSpecificMonth {
                    band,
                    lag: self.validated_lag()?,
                    month,
                    interval: self.consideration_interval(),
                }
            }
            FeatureKind::DifferenceInMeanBetweenIntervals => {
                FeatureSpec::DifferenceInMeanBetweenIntervals {
                    band,
                    interval_one: self.interval_one(),
                    interval_two: self.interval_two(),
                }
            }
            FeatureKind::SpatialCv => FeatureSpec::SpatialCv {
                band,
                window_size: self.validated_window()?,
                interval: self.consideration_interval(),
            },
            FeatureKind::SpatialStd => FeatureSpec::SpatialStd {
                band,
                window_size: self.validated_window()?,
                interval: self.consideration_interval(),
            },
            FeatureKind::SpatialStdDifference => FeatureSpec::SpatialStdDifference {
                band,
                window_size: self.validated_window()?,
                interval_one: self.interval_one(),
                interval_two: self.interval_two(),
            },
            FeatureKind::SpatialRange => FeatureSpec::SpatialRange {
                band,
                window_size: self.validated_window()?,
                interval: self.consideration_interval(),
            },
            FeatureKind::SpatialEdgeStrength => {
                let sigma = self.sigma.unwrap_or(DEFAULT_SIGMA);
                if sigma <= 0.0 || !sigma.is_finite() {
                    return Err(FeatureError::invalid(
                        "sigma",
                        format!("must be > 0, got {sigma}"),
                    ));
                }
                FeatureSpec::SpatialEdgeStrength {
                    band,
                    sigma,
                    interval: self.consideration_interval(),
                }
            }
        };

        Ok(spec)
    }

    fn validated_window(&self) -> Result<usize> {
        let window_size = self.window_size.unwrap_or(DEFAULT_WINDOW_SIZE);
        if window_size == 0 {
            return Err(FeatureError::invalid("window_size", "must be >= 1, got 0"));
        }
        Ok(window_size)
    }

    fn validated_lag(&self) -> Result<usize> {
        let lag = self.lag.unwrap_or(DEFAULT_LAG);
        if lag == 0 {
            return Err(FeatureError::invalid("lag", "must be >= 1, got 0"));
        }
        Ok(lag)
    }
}

/// Validated, per-type feature configuration.
///
/// Adding a feature type means adding a variant here, one arm in the
/// dispatcher, and one computation in the catalog; nothing else changes.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureSpec {
    /// Raw band values over the considered interval.
    Raw {
        /// Spectral band.
        band: usize,
        /// Consideration interval.
        interval: Interval,
    },
    /// Temporal mean per pixel.
    Mean {
        /// Spectral band.
        band: usize,
        /// Consideration interval.
        interval: Interval,
    },
    /// Temporal population standard deviation per pixel.
    Std {
        /// Spectral band.
        band: usize,
        /// Consideration interval.
        interval: Interval,
    },
    /// Mean lagged difference per pixel.
    DeseasonalizedDiff {
        /// Spectral band.
        band: usize,
        /// Lag in time steps.
        lag: usize,
        /// Consideration interval.
        interval: Interval,
    },
    /// Mean lagged difference for one calendar month per pixel.
    DeseasonalizedDiffSpecificMonth {
        /// Spectral band.
        band: usize,
        /// Lag in time steps.
        lag: usize,
        /// Calendar month, 0-11, step 0 = month 0.
        month: u32,
        /// Consideration interval.
        interval: Interval,
    },
    /// Mean of interval one minus mean of interval two, per pixel.
    DifferenceInMeanBetweenIntervals {
        /// Spectral band.
        band: usize,
        /// First interval.
        interval_one: Interval,
        /// Second interval.
        interval_two: Interval,
    },
    /// Local coefficient of variation of the temporal-mean frame.
    SpatialCv {
        /// Spectral band.
        band: usize,
        /// Window side length.
        window_size: usize,
        /// Consideration interval.
        interval: Interval,
    },
    /// Local standard deviation of the temporal-mean frame.
    SpatialStd {
        /// Spectral band.
        band: usize,
        /// Window side length.
        window_size: usize,
        /// Consideration interval.
        interval: Interval,
    },
    /// Local std of the element-wise difference of two interval-mean frames.
    SpatialStdDifference {
        /// Spectral band.
        band: usize,
        /// Window side length.
        window_size: usize,
        /// First interval.
        interval_one: Interval,
        /// Second interval.
        interval_two: Interval,
    },
    /// Local peak-to-peak range of the temporal-mean frame.
    SpatialRange {
        /// Spectral band.
        band: usize,
        /// Window side length.
        window_size: usize,
        /// Consideration interval.
        interval: Interval,
    },
    /// Gaussian-smoothed Sobel magnitude of the temporal-mean frame.
    SpatialEdgeStrength {
        /// Spectral band.
        band: usize,
        /// Gaussian sigma, > 0.
        sigma: f64,
        /// Consideration interval.
        interval: Interval,
    },
}

impl FeatureSpec {
    /// The catalog entry this spec belongs to.
    pub fn kind(&self) -> FeatureKind {
        match self {
            FeatureSpec::Raw { .. } => FeatureKind::Raw,
            FeatureSpec::Mean { .. } => FeatureKind::Mean,
            FeatureSpec::Std { .. } => FeatureKind::Std,
            FeatureSpec::DeseasonalizedDiff { .. } => FeatureKind::DeseasonalizedDiff,
            FeatureSpec::DeseasonalizedDiffSpecificMonth { .. } => {
                FeatureKind::DeseasonalizedDiffSpecificMonth
            }
            FeatureSpec::DifferenceInMeanBetweenIntervals { .. } => {
                FeatureKind::DifferenceInMeanBetweenIntervals
            }
            FeatureSpec::SpatialCv { .. } => FeatureKind::SpatialCv,
            FeatureSpec::SpatialStd { .. } => FeatureKind::SpatialStd,
            FeatureSpec::SpatialStdDifference { .. } => FeatureKind::SpatialStdDifference,
            FeatureSpec::SpatialRange { .. } => FeatureKind::SpatialRange,
            FeatureSpec::SpatialEdgeStrength { .. } => FeatureKind::SpatialEdgeStrength,
        }
    }

    /// The spectral band the spec reads.
    pub fn band(&self) -> usize {
        match *self {
            FeatureSpec::Raw { band, .. }
            | FeatureSpec::Mean { band, .. }
            | FeatureSpec::Std { band, .. }
            | FeatureSpec::DeseasonalizedDiff { band, .. }
            | FeatureSpec::DeseasonalizedDiffSpecificMonth { band, .. }
            | FeatureSpec::DifferenceInMeanBetweenIntervals { band, .. }
            | FeatureSpec::SpatialCv { band, .. }
            | FeatureSpec::SpatialStd { band, .. }
            | FeatureSpec::SpatialStdDifference { band, .. }
            | FeatureSpec::SpatialRange { band, .. }
            | FeatureSpec::SpatialEdgeStrength { band, .. } => band,
        }
    }

    /// Deterministic base column name built from type and parameters.
    ///
    /// Column names must be reproducible across runs: they are derived only
    /// from the declared parameters, never from runtime state.
    pub fn column_base(&self) -> String {
        fn ivl(interval: &Interval) -> String {
            if interval.is_full() {
                String::new()
            } else {
                let s = interval.start.map(|v| v.to_string()).unwrap_or_default();
                let e = interval.end.map(|v| v.to_string()).unwrap_or_default();
                format!("_t{s}:{e}")
            }
        }

        match self {
            FeatureSpec::Raw { band, interval } => {
                format!("raw_b{band}{}", ivl(interval))
            }
            FeatureSpec::Mean { band, interval } => {
                format!("mean_b{band}{}", ivl(interval))
            }
            FeatureSpec::Std { band, interval } => {
                format!("std_b{band}{}", ivl(interval))
            }
            FeatureSpec::DeseasonalizedDiff {
                band,
                lag,
                interval,
            } => format!("deseasonalized_diff_b{band}_lag{lag}{}", ivl(interval)),
            FeatureSpec::DeseasonalizedDiffSpecificMonth {
                band,
                lag,
                month,
                interval,
            } => format!(
                "deseasonalized_diff_specific_month_b{band}_lag{lag}_m{month}{}",
                ivl(interval)
            ),
            FeatureSpec::DifferenceInMeanBetweenIntervals {
                band,
                interval_one,
                interval_two,
            } => format!(
                "difference_in_mean_between_intervals_b{band}{}_vs{}",
                ivl(interval_one),
                ivl(interval_two)
            ),
            FeatureSpec::SpatialCv {
                band,
                window_size,
                interval,
            } => format!("spatial_cv_b{band}_w{window_size}{}", ivl(interval)),
            FeatureSpec::SpatialStd {
                band,
                window_size,
                interval,
            } => format!("spatial_std_b{band}_w{window_size}{}", ivl(interval)),
            FeatureSpec::SpatialStdDifference {
                band,
                window_size,
                interval_one,
                interval_two,
            } => format!(
                "spatial_std_difference_b{band}_w{window_size}{}_vs{}",
                ivl(interval_one),
                ivl(interval_two)
            ),
            FeatureSpec::SpatialRange {
                band,
                window_size,
                interval,
            } => format!("spatial_range_b{band}_w{window_size}{}", ivl(interval)),
            FeatureSpec::SpatialEdgeStrength {
                band,
                sigma,
                interval,
            } => format!("spatial_edge_strength_b{band}_s{sigma}{}", ivl(interval)),
        }
    }
}

/// An ordered feature set in the exact wire shape:
/// `{ "features": [ ... ] }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSet {
    /// Declarations in output column order.
    pub features: Vec<FeatureDecl>,
}

impl FeatureSet {
    /// A feature set from explicit declarations.
    pub fn new(features: Vec<FeatureDecl>) -> Self {
        FeatureSet { features }
    }

    /// Parse the wire format.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize back to the wire format.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Number of declarations.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// True when the set holds no declarations.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Iterate declarations in order.
    pub fn iter(&self) -> std::slice::Iter<'_, FeatureDecl> {
        self.features.iter()
    }
}
