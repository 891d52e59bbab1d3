//! Extraction configuration management.
//!
//! Bundles a feature set with optional run metadata and persists the whole
//! thing to TOML or JSON, so an extraction run can be reproduced from a
//! version-controlled file.
//!
//! The feature set inside the file keeps the exact wire shape
//! (`features = [...]`), so a JSON config is also directly consumable by
//! [`crate::schema::FeatureSet::from_json_str`].

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::schema::FeatureSet;

/// Feature set plus metadata for one extraction run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// The declarative feature set, wire shape preserved.
    #[serde(flatten)]
    pub feature_set: FeatureSet,

    /// Optional run metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<RunMetadata>,
}

/// Free-form metadata for tracking and reproducibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMetadata {
    /// Run or experiment name.
    pub name: String,

    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Version or commit the config belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Custom tags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl ExtractionConfig {
    /// Config holding just a feature set.
    pub fn new(feature_set: FeatureSet) -> Self {
        ExtractionConfig {
            feature_set,
            metadata: None,
        }
    }

    /// Attach metadata.
    pub fn with_metadata(mut self, metadata: RunMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Save as pretty TOML.
    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let toml_string = toml::to_string_pretty(self)?;
        fs::write(path, toml_string)?;
        Ok(())
    }

    /// Load from a TOML file.
    pub fn load_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Save as pretty JSON.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json_string = serde_json::to_string_pretty(self)?;
        fs::write(path, json_string)?;
        Ok(())
    }

    /// Load from a JSON file.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FeatureDecl, FeatureKind, Preset};

    fn sample_config() -> ExtractionConfig {
        ExtractionConfig::new(FeatureSet::new(vec![
            FeatureDecl::new(FeatureKind::Mean, 3),
            FeatureDecl::new(FeatureKind::SpatialEdgeStrength, 0).with_sigma(1.5),
        ]))
        .with_metadata(RunMetadata {
            name: "unit-test".to_string(),
            description: Some("round-trip check".to_string()),
            version: None,
            tags: Some(vec!["test".to_string()]),
        })
    }

    #[test]
    fn toml_round_trip_preserves_the_config() {
        let config = sample_config();
        let path = std::env::temp_dir().join("ife_test_config.toml");
        config.save_toml(&path).unwrap();
        let loaded = ExtractionConfig::load_toml(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn json_round_trip_preserves_the_config() {
        let config = sample_config();
        let path = std::env::temp_dir().join("ife_test_config.json");
        config.save_json(&path).unwrap();
        let loaded = ExtractionConfig::load_json(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn json_config_is_wire_compatible() {
        // A config without metadata is byte-for-byte the wire format.
        let config = ExtractionConfig::new(Preset::MonthlyIndices.feature_set());
        let json = serde_json::to_string(&config).unwrap();
        let as_wire = FeatureSet::from_json_str(&json).unwrap();
        assert_eq!(as_wire, config.feature_set);
    }

    #[test]
    fn wire_json_parses_as_config() {
        let json = r#"{ "features": [ { "type": "std", "band_id": 1 } ] }"#;
        let config: ExtractionConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.feature_set.len(), 1);
        assert!(config.metadata.is_none());
    }
}
