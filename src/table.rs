//! The assembled feature table.
//!
//! One row per pixel, one named column per computed feature, columns in
//! declaration order. The table is created once per extraction call and not
//! mutated afterwards.

use std::collections::HashMap;

use ndarray::Array2;

use crate::features::FeatureColumn;

/// Insertion-ordered, named feature columns over a fixed pixel count.
#[derive(Debug, Clone, Default)]
pub struct FeatureTable {
    n_rows: usize,
    columns: Vec<FeatureColumn>,
    // Occurrences per base name, for deterministic dedup suffixes.
    name_counts: HashMap<String, usize>,
}

impl FeatureTable {
    /// An empty table over `n_rows` pixels.
    pub fn new(n_rows: usize) -> Self {
        FeatureTable {
            n_rows,
            columns: Vec::new(),
            name_counts: HashMap::new(),
        }
    }

    /// Append a column, deduplicating its name deterministically.
    ///
    /// A repeated base name gets `#2`, `#3`, ... suffixes in insertion
    /// order, so two identical declarations still produce distinct columns.
    pub fn insert(&mut self, column: FeatureColumn) {
        debug_assert_eq!(column.values.len(), self.n_rows);

        let count = self.name_counts.entry(column.name.clone()).or_insert(0);
        *count += 1;
        let name = if *count == 1 {
            column.name
        } else {
            format!("{}#{count}", column.name)
        };

        self.columns.push(FeatureColumn::new(name, column.values));
    }

    /// Number of rows (pixels).
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Number of columns.
    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// Column names in insertion order.
    pub fn names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Look up a column by exact name.
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    /// Column by position.
    pub fn column_at(&self, index: usize) -> Option<&FeatureColumn> {
        self.columns.get(index)
    }

    /// Iterate columns in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, FeatureColumn> {
        self.columns.iter()
    }

    /// One row of the table, in column order.
    pub fn row(&self, pixel: usize) -> Vec<f64> {
        self.columns.iter().map(|c| c.values[pixel]).collect()
    }

    /// Dense `(n_rows, n_columns)` matrix in column insertion order.
    pub fn to_array2(&self) -> Array2<f64> {
        let mut out = Array2::zeros((self.n_rows, self.columns.len()));
        for (j, column) in self.columns.iter().enumerate() {
            for (i, &v) in column.values.iter().enumerate() {
                out[[i, j]] = v;
            }
        }
        out
    }
}
