//! Generation × identifier count matrix
//!
//! The in-memory table both artifact writers render from, and what the
//! CSV reader produces when loading an artifact back.

use crate::snapshot::Snapshot;
use std::collections::HashMap;

/// Count table for one unit category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountMatrix {
    /// Label of the leading generation column
    pub generation_column: String,
    /// Column identifiers in registration order (duplicates kept)
    pub names: Vec<String>,
    /// One row per completed generation, one value per name
    pub rows: Vec<Vec<u64>>,
}

impl CountMatrix {
    /// Build the matrix for `names` from a generation history
    ///
    /// Identifiers missing from an older snapshot are filled with zero.
    pub fn from_history(generation_column: &str, names: &[String], history: &[Snapshot]) -> Self {
        let rows = history
            .iter()
            .map(|snapshot| names.iter().map(|name| snapshot.count(name)).collect())
            .collect();

        Self {
            generation_column: generation_column.to_string(),
            names: names.to_vec(),
            rows,
        }
    }

    /// Number of generations (data rows)
    pub fn generations(&self) -> usize {
        self.rows.len()
    }

    /// Count at (`generation`, `col`), zero when the row is short
    pub fn cell(&self, generation: usize, col: usize) -> u64 {
        self.rows
            .get(generation)
            .and_then(|row| row.get(col))
            .copied()
            .unwrap_or(0)
    }

    /// Exactly one count per name for `generation`
    ///
    /// Short rows are zero-filled and cells past the last name are ignored.
    pub fn row_counts(&self, generation: usize) -> impl Iterator<Item = u64> + '_ {
        (0..self.names.len()).map(move |col| self.cell(generation, col))
    }

    /// Convert each row back into a snapshot keyed by name
    pub fn to_snapshots(&self) -> Vec<Snapshot> {
        (0..self.rows.len())
            .map(|generation| {
                self.names
                    .iter()
                    .cloned()
                    .zip(self.row_counts(generation))
                    .collect::<HashMap<_, _>>()
                    .into()
            })
            .collect()
    }

    /// Per-identifier (total, peak) across all generations, in column order
    ///
    /// Repeated column names collapse into their first occurrence.
    pub fn totals(&self) -> Vec<UnitTotal> {
        let mut totals: Vec<UnitTotal> = Vec::new();

        for (col, name) in self.names.iter().enumerate() {
            if totals.iter().any(|t| &t.name == name) {
                continue;
            }
            let values = (0..self.rows.len()).map(|generation| self.cell(generation, col));
            totals.push(UnitTotal {
                name: name.clone(),
                total: values.clone().sum(),
                peak: values.max().unwrap_or(0),
            });
        }

        totals
    }
}

/// Aggregate counts for one identifier across all generations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitTotal {
    pub name: String,
    pub total: u64,
    pub peak: u64,
}
