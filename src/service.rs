//! The feature-extraction façade.
//!
//! A [`FeatureService`] owns the imagery stack and a feature set for its
//! whole lifetime; both are read-only. Every [`FeatureService::extract`]
//! call performs a fresh, independent computation pass and returns a new
//! [`FeatureTable`]; there is no cross-call caching.
//!
//! Declarations are independent of each other, so they are evaluated in
//! parallel on the rayon pool. Column order in the result still matches
//! declaration order: ordering is enforced at assembly, not at computation
//! time. A failure in any declaration fails the whole call; the first error
//! in declaration order wins and carries the feature's index, type, and
//! band.

use rayon::prelude::*;
use tracing::{debug, info};

use crate::error::Result;
use crate::features::{self, FeatureColumn};
use crate::schema::{FeatureSet, FeatureSpec, Preset};
use crate::stack::ImageryStack;
use crate::table::FeatureTable;

/// Owns the raw data and declarations; produces feature tables.
#[derive(Debug, Clone)]
pub struct FeatureService {
    stack: ImageryStack,
    feature_set: FeatureSet,
}

impl FeatureService {
    /// Service over `stack` with an explicit feature set.
    pub fn new(stack: ImageryStack, feature_set: FeatureSet) -> Self {
        FeatureService { stack, feature_set }
    }

    /// Service over `stack` with the bundled default feature set.
    pub fn with_default_features(stack: ImageryStack) -> Self {
        FeatureService::new(stack, Preset::MonthlyIndices.feature_set())
    }

    /// The owned imagery stack.
    pub fn stack(&self) -> &ImageryStack {
        &self.stack
    }

    /// The owned feature set.
    pub fn feature_set(&self) -> &FeatureSet {
        &self.feature_set
    }

    /// Extract the owned feature set into a fresh table.
    pub fn extract(&self) -> Result<FeatureTable> {
        self.extract_set(&self.feature_set)
    }

    /// Extract an explicit feature set into a fresh table.
    ///
    /// All declarations are validated before any array computation; a
    /// malformed declaration fails fast. Evaluation is parallel across
    /// declarations, but errors still surface deterministically in
    /// declaration order, wrapped with the offending feature's index, type,
    /// and band. No partial table is ever returned.
    pub fn extract_set(&self, feature_set: &FeatureSet) -> Result<FeatureTable> {
        // Eager validation pass: parse-level errors surface before any
        // pixel is touched.
        let specs: Vec<FeatureSpec> = feature_set
            .iter()
            .enumerate()
            .map(|(index, decl)| {
                decl.validate()
                    .map_err(|e| e.for_declaration(index, &decl.kind, decl.band_id))
            })
            .collect::<Result<_>>()?;

        let results: Vec<Result<Vec<FeatureColumn>>> = specs
            .par_iter()
            .enumerate()
            .map(|(index, spec)| {
                debug!(index, kind = %spec.kind(), band = spec.band(), "evaluating feature");
                features::evaluate(spec, &self.stack)
                    .map_err(|e| e.for_declaration(index, spec.kind().tag(), spec.band()))
            })
            .collect();

        // Assembly in declaration order; the first error wins regardless of
        // which parallel task failed first.
        let mut table = FeatureTable::new(self.stack.n_pixels());
        for result in results {
            for column in result? {
                table.insert(column);
            }
        }

        info!(
            n_features = feature_set.len(),
            n_columns = table.n_columns(),
            n_pixels = table.n_rows(),
            "feature extraction complete"
        );
        Ok(table)
    }
}
