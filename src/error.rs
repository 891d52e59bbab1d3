//! Error types for feature extraction.
//!
//! All failure modes surface through [`FeatureError`]. Validation errors are
//! raised eagerly, before any array computation, so a malformed declaration
//! never produces a partially computed table. When a declaration fails during
//! extraction, the service wraps the underlying error in
//! [`FeatureError::Declaration`] so the offending entry can be located by
//! index, type, and band.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, FeatureError>;

/// All errors produced by the feature-extraction engine.
#[derive(Debug, Error)]
pub enum FeatureError {
    /// The `type` tag of a feature declaration is not in the catalog.
    #[error("unknown feature type `{0}`")]
    UnknownFeatureType(String),

    /// A declared parameter is out of range or malformed.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Parameter name as it appears in the wire format.
        name: &'static str,
        /// Human-readable description of the violation.
        reason: String,
    },

    /// A consideration interval resolved to zero length.
    #[error(
        "empty interval: ({start:?}, {end:?}) resolved to [{lo}, {hi}) \
         against a time axis of length {axis_len}"
    )]
    EmptyInterval {
        /// Declared start offset (may be negative or open).
        start: Option<i64>,
        /// Declared end offset (may be negative or open).
        end: Option<i64>,
        /// Resolved, clamped lower bound.
        lo: usize,
        /// Resolved, clamped upper bound.
        hi: usize,
        /// Length of the time axis the interval was resolved against.
        axis_len: usize,
    },

    /// A lag-based feature found no time step with a valid lagged partner.
    #[error(
        "insufficient history: lag {lag} has no valid pair within [{lo}, {hi})"
    )]
    InsufficientHistory {
        /// Declared lag in time steps.
        lag: usize,
        /// Resolved interval lower bound.
        lo: usize,
        /// Resolved interval upper bound.
        hi: usize,
    },

    /// The declared grid shape does not match the pixel count of the array.
    #[error("grid shape {rows}x{cols} does not cover {n_pixels} pixels")]
    GridMismatch {
        /// Declared raster rows.
        rows: usize,
        /// Declared raster columns.
        cols: usize,
        /// Pixel count of the imagery array's first axis.
        n_pixels: usize,
    },

    /// Context wrapper: which declaration failed, and why.
    #[error("feature #{index} (type `{kind}`, band {band}) failed")]
    Declaration {
        /// Zero-based position in the feature set.
        index: usize,
        /// The declaration's type tag.
        kind: String,
        /// The declaration's band id.
        band: usize,
        /// The underlying error.
        #[source]
        source: Box<FeatureError>,
    },

    /// Filesystem failure while persisting or loading configuration/exports.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization failure.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML deserialization failure.
    #[error("toml parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    /// TOML serialization failure.
    #[error("toml serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// NumPy export failure.
    #[error("npy write error: {0}")]
    Npy(#[from] ndarray_npy::WriteNpyError),
}

impl FeatureError {
    /// Wrap an error with the declaration that produced it.
    pub fn for_declaration(self, index: usize, kind: &str, band: usize) -> Self {
        FeatureError::Declaration {
            index,
            kind: kind.to_string(),
            band,
            source: Box::new(self),
        }
    }

    /// Shorthand for an [`FeatureError::InvalidParameter`].
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        FeatureError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declaration_wrapper_preserves_source() {
        let inner = FeatureError::invalid("sigma", "must be > 0, got -1");
        let wrapped = inner.for_declaration(3, "spatial_edge_strength", 2);

        match wrapped {
            FeatureError::Declaration {
                index,
                ref kind,
                band,
                ref source,
            } => {
                assert_eq!(index, 3);
                assert_eq!(kind, "spatial_edge_strength");
                assert_eq!(band, 2);
                assert!(matches!(
                    **source,
                    FeatureError::InvalidParameter { name: "sigma", .. }
                ));
            }
            other => panic!("expected Declaration, got {other:?}"),
        }
    }

    #[test]
    fn error_messages_name_the_parameter() {
        let err = FeatureError::invalid("month", "must be within [0, 11], got 12");
        assert!(err.to_string().contains("month"));
        assert!(err.to_string().contains("[0, 11]"));
    }
}
