//! Preset feature sets.
//!
//! The monitoring pipeline historically shipped with a bundled default
//! feature configuration; [`Preset::MonthlyIndices`] reproduces it. The
//! other presets exist for smoke testing and exploration.

use super::{FeatureDecl, FeatureKind, FeatureSet};

/// Named, ready-made feature sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Preset {
    /// The bundled default for monthly vegetation/water index stacks:
    /// all-time mean of NDRE740 (band 3) plus September year-over-year
    /// differences of NDRE705 (band 2), NDVI (band 5) and NDWI (band 6).
    MonthlyIndices,

    /// One declaration of every catalog type with default parameters;
    /// exercises the full dispatcher in one pass.
    FullCatalog,
}

impl Preset {
    /// Build the preset's feature set.
    pub fn feature_set(&self) -> FeatureSet {
        match self {
            Preset::MonthlyIndices => FeatureSet::new(vec![
                FeatureDecl::new(FeatureKind::Mean, 3),
                FeatureDecl::new(FeatureKind::DeseasonalizedDiffSpecificMonth, 2).with_month(8),
                FeatureDecl::new(FeatureKind::DeseasonalizedDiffSpecificMonth, 5).with_month(8),
                FeatureDecl::new(FeatureKind::DeseasonalizedDiffSpecificMonth, 6).with_month(8),
            ]),
            Preset::FullCatalog => FeatureSet::new(vec![
                // Keep raw to a single step so the preset stays one column
                // per declaration.
                FeatureDecl::new(FeatureKind::Raw, 0)
                    .with_consideration_interval(Some(-1), None),
                FeatureDecl::new(FeatureKind::Mean, 0),
                FeatureDecl::new(FeatureKind::Std, 0),
                FeatureDecl::new(FeatureKind::DeseasonalizedDiff, 0),
                FeatureDecl::new(FeatureKind::DeseasonalizedDiffSpecificMonth, 0).with_month(0),
                FeatureDecl::new(FeatureKind::DifferenceInMeanBetweenIntervals, 0),
                FeatureDecl::new(FeatureKind::SpatialCv, 0),
                FeatureDecl::new(FeatureKind::SpatialStd, 0),
                FeatureDecl::new(FeatureKind::SpatialStdDifference, 0),
                FeatureDecl::new(FeatureKind::SpatialRange, 0),
                FeatureDecl::new(FeatureKind::SpatialEdgeStrength, 0),
            ]),
        }
    }
}
