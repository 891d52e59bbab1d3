//! Convenience re-exports for common usage.
//!
//! ```
//! use imagery_feature_extractor::prelude::*;
//! ```

pub use crate::config::{ExtractionConfig, RunMetadata};
pub use crate::error::{FeatureError, Result};
pub use crate::export::NpyExporter;
pub use crate::features::FeatureColumn;
pub use crate::interval::Interval;
pub use crate::schema::{FeatureDecl, FeatureKind, FeatureSet, Preset};
pub use crate::service::FeatureService;
pub use crate::stack::{GridShape, ImageryStack};
pub use crate::table::FeatureTable;
