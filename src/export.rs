//! Feature-table export.
//!
//! Writes an extracted [`FeatureTable`] as a NumPy `.npy` matrix plus a JSON
//! metadata sidecar (column names, shape, timestamp), the hand-off artifact
//! for the downstream modeling pipeline.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use ndarray_npy::WriteNpyExt;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::table::FeatureTable;

/// Metadata written next to the exported matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportMetadata {
    /// Rows of the exported matrix (pixels).
    pub n_pixels: usize,
    /// Columns of the exported matrix (features).
    pub n_columns: usize,
    /// Column names in matrix order.
    pub columns: Vec<String>,
    /// RFC 3339 export timestamp.
    pub export_timestamp: String,
}

/// Exports feature tables into a target directory.
#[derive(Debug, Clone)]
pub struct NpyExporter {
    output_dir: PathBuf,
}

impl NpyExporter {
    /// Exporter rooted at `output_dir`; the directory is created on demand.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        NpyExporter {
            output_dir: output_dir.into(),
        }
    }

    /// Write `{stem}.npy` and `{stem}.meta.json` for `table`.
    ///
    /// Returns the path of the written matrix.
    pub fn export(&self, table: &FeatureTable, stem: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;

        let matrix_path = self.output_dir.join(format!("{stem}.npy"));
        let mut file = File::create(&matrix_path)?;
        table.to_array2().write_npy(&mut file)?;

        let metadata = ExportMetadata {
            n_pixels: table.n_rows(),
            n_columns: table.n_columns(),
            columns: table.names().iter().map(|s| s.to_string()).collect(),
            export_timestamp: chrono::Utc::now().to_rfc3339(),
        };
        let meta_path = self.output_dir.join(format!("{stem}.meta.json"));
        fs::write(&meta_path, serde_json::to_string_pretty(&metadata)?)?;

        info!(
            path = %matrix_path.display(),
            n_pixels = metadata.n_pixels,
            n_columns = metadata.n_columns,
            "exported feature table"
        );
        Ok(matrix_path)
    }

    /// The exporter's target directory.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FeatureColumn;
    use ndarray::Array2;

    fn sample_table() -> FeatureTable {
        let mut table = FeatureTable::new(3);
        table.insert(FeatureColumn::new("mean_b0", vec![1.0, 2.0, 3.0]));
        table.insert(FeatureColumn::new("std_b0", vec![0.5, 0.5, 0.5]));
        table
    }

    #[test]
    fn export_writes_matrix_and_metadata() {
        let dir = std::env::temp_dir().join("ife_export_test");
        let exporter = NpyExporter::new(&dir);
        let matrix_path = exporter.export(&sample_table(), "features").unwrap();

        let file = File::open(&matrix_path).unwrap();
        let matrix: Array2<f64> = ndarray_npy::ReadNpyExt::read_npy(file).unwrap();
        assert_eq!(matrix.dim(), (3, 2));
        assert_eq!(matrix[[2, 0]], 3.0);

        let meta_json =
            fs::read_to_string(dir.join("features.meta.json")).unwrap();
        let metadata: ExportMetadata = serde_json::from_str(&meta_json).unwrap();
        assert_eq!(metadata.n_pixels, 3);
        assert_eq!(metadata.columns, vec!["mean_b0", "std_b0"]);

        fs::remove_dir_all(&dir).unwrap();
    }
}
