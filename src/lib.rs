//! Imagery Feature Extractor
//!
//! Configuration-driven feature extraction from multi-band satellite imagery
//! time series, for downstream land-cover and forest-health classification.
//!
//! # Overview
//!
//! The input is a three-axis array `(pixel, time, band)` of monthly
//! observations. A declarative feature set (the JSON wire shape
//! `{ "features": [...] }`) selects which temporal and spatial statistics
//! to compute per pixel; the output is a flat table with one row per pixel
//! and one named column per feature.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      FeatureService                            │
//! ├────────────────────────────────────────────────────────────────┤
//! │  schema/     - wire declarations, validation, presets          │
//! │  interval    - flexible [lo, hi) time-interval resolution      │
//! │  features/   - temporal + spatial catalog, dispatcher          │
//! │  table       - insertion-ordered named output columns          │
//! │  config      - TOML/JSON persistence of feature sets           │
//! │  export      - .npy matrix + JSON metadata hand-off            │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Feature catalog
//!
//! | Type tag | Output |
//! |----------|--------|
//! | `raw` | one column per covered time step |
//! | `mean`, `std` | temporal statistics per pixel |
//! | `deseasonalized_diff` | mean lagged difference |
//! | `deseasonalized_diff_specific_month` | lagged difference of one month |
//! | `difference_in_mean_between_intervals` | interval mean delta |
//! | `spatial_cv`, `spatial_std`, `spatial_range` | windowed raster stats |
//! | `spatial_std_difference` | local std of an interval-mean delta frame |
//! | `spatial_edge_strength` | Gaussian-smoothed Sobel magnitude |
//!
//! # Example
//!
//! ```
//! use imagery_feature_extractor::prelude::*;
//! use ndarray::Array3;
//!
//! // 4 pixels on a 2x2 grid, 24 monthly steps, 2 bands
//! let data = Array3::from_shape_fn((4, 24, 2), |(p, t, b)| {
//!     (p + t + b) as f64
//! });
//! let stack = ImageryStack::new(data, GridShape::new(2, 2)).unwrap();
//!
//! let features = FeatureSet::new(vec![
//!     FeatureDecl::new(FeatureKind::Mean, 0),
//!     FeatureDecl::new(FeatureKind::SpatialStd, 1).with_window_size(3),
//! ]);
//!
//! let service = FeatureService::new(stack, features);
//! let table = service.extract().unwrap();
//! assert_eq!(table.names(), vec!["mean_b0", "spatial_std_b1_w3"]);
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod features;
pub mod interval;
pub mod prelude;
pub mod schema;
pub mod service;
pub mod stack;
pub mod table;

// Re-exports - Core types
pub use error::{FeatureError, Result};
pub use interval::{Interval, ResolvedInterval};
pub use stack::{GridShape, ImageryStack};

// Re-exports - Schema
pub use schema::{FeatureDecl, FeatureKind, FeatureSet, FeatureSpec, Preset};

// Re-exports - Computation & output
pub use features::{FeatureColumn, LocalReducer};
pub use service::FeatureService;
pub use table::FeatureTable;

// Re-exports - Persistence
pub use config::{ExtractionConfig, RunMetadata};
pub use export::{ExportMetadata, NpyExporter};
