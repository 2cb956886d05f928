use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Represents a cell value with type information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum CellValue {
    Empty,
    String(String),
    Number(f64),
    Boolean(bool),
    DateTime(String), // ISO 8601 format
    Error(String),
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Empty
    }
}

/// In-memory table of named columns and ordered rows.
///
/// Every row holds exactly one value per column, and the index is a
/// contiguous 0-based sequence aligned with the rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<String>,
    index: Vec<u64>,
    rows: Vec<Vec<CellValue>>,
}

impl Table {
    /// Creates a table from named columns and row-aligned values, assigning
    /// a fresh contiguous 0-based index.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Table {
        debug_assert!(rows.iter().all(|row| row.len() == columns.len()));
        let index = (0..rows.len() as u64).collect();
        Table {
            columns,
            index,
            rows,
        }
    }

    /// The ordered column names. Two tables are schema-consistent iff these
    /// are equal as ordered sequences.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// The 0-based row index.
    pub fn index(&self) -> &[u64] {
        &self.index
    }

    /// The rows, each aligned with `columns()`.
    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Concatenates tables in order, row-major.
    ///
    /// Columns are unioned by name: the result's column order is the first
    /// table's columns followed by columns newly seen in later tables, in
    /// order of appearance. Cells a source table has no column for are
    /// filled with `CellValue::Empty`. The result carries a fresh
    /// contiguous 0-based index regardless of the inputs' indices.
    pub fn concat(tables: &[Table]) -> Table {
        let mut columns: Vec<String> = Vec::new();
        for table in tables {
            for name in &table.columns {
                if !columns.contains(name) {
                    columns.push(name.clone());
                }
            }
        }

        let positions: HashMap<&str, usize> = columns
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.as_str(), idx))
            .collect();

        let mut rows = Vec::new();
        for table in tables {
            let targets: Vec<Option<usize>> = table
                .columns
                .iter()
                .map(|name| positions.get(name.as_str()).copied())
                .collect();

            for row in &table.rows {
                let mut merged = vec![CellValue::Empty; columns.len()];
                for (value, target) in row.iter().zip(&targets) {
                    if let Some(idx) = target {
                        merged[*idx] = value.clone();
                    }
                }
                rows.push(merged);
            }
        }

        Table::new(columns, rows)
    }
}

/// Errors produced while loading or consolidating tabular files.
#[derive(Debug, Error)]
pub enum TableError {
    /// The path's extension maps to no known file format. Callers treat
    /// this as "no data" rather than a fatal condition.
    #[error("unsupported file type: {}", extension.as_deref().unwrap_or(""))]
    UnsupportedFormat {
        path: PathBuf,
        extension: Option<String>,
    },

    #[error("file list is empty")]
    EmptyFileList,

    #[error("no readable files to consolidate")]
    NoReadableFiles,

    #[error("failed to read {}: {}", path.display(), source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {}", path.display(), message)]
    Parse { path: PathBuf, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(s: &str) -> CellValue {
        CellValue::String(s.to_string())
    }

    fn table(columns: &[&str], rows: Vec<Vec<CellValue>>) -> Table {
        Table::new(columns.iter().map(|c| c.to_string()).collect(), rows)
    }

    #[test]
    fn test_new_assigns_contiguous_index() {
        let t = table(
            &["id", "value"],
            vec![
                vec![cell("1"), cell("a")],
                vec![cell("2"), cell("b")],
                vec![cell("3"), cell("c")],
            ],
        );

        assert_eq!(t.index(), &[0, 1, 2]);
        assert_eq!(t.row_count(), 3);
        assert_eq!(t.column_count(), 2);
    }

    #[test]
    fn test_concat_identical_schemas_preserves_row_order() {
        let a = table(
            &["id", "value"],
            vec![vec![cell("1"), cell("a")], vec![cell("2"), cell("b")]],
        );
        let b = table(
            &["id", "value"],
            vec![
                vec![cell("3"), cell("c")],
                vec![cell("4"), cell("d")],
                vec![cell("5"), cell("e")],
            ],
        );

        let merged = Table::concat(&[a, b]);

        assert_eq!(merged.columns(), &["id", "value"]);
        assert_eq!(merged.row_count(), 5);
        assert_eq!(merged.index(), &[0, 1, 2, 3, 4]);
        assert_eq!(merged.rows()[0], vec![cell("1"), cell("a")]);
        assert_eq!(merged.rows()[1], vec![cell("2"), cell("b")]);
        assert_eq!(merged.rows()[2], vec![cell("3"), cell("c")]);
        assert_eq!(merged.rows()[4], vec![cell("5"), cell("e")]);
    }

    #[test]
    fn test_concat_mismatched_schemas_unions_columns_with_gaps() {
        let a = table(&["id", "name"], vec![vec![cell("1"), cell("alice")]]);
        let b = table(&["id", "score"], vec![vec![cell("2"), cell("95")]]);

        let merged = Table::concat(&[a, b]);

        // First-seen column order: a's columns, then b's new ones.
        assert_eq!(merged.columns(), &["id", "name", "score"]);
        assert_eq!(
            merged.rows()[0],
            vec![cell("1"), cell("alice"), CellValue::Empty]
        );
        assert_eq!(
            merged.rows()[1],
            vec![cell("2"), CellValue::Empty, cell("95")]
        );
    }

    #[test]
    fn test_concat_empty_input_yields_empty_table() {
        let merged = Table::concat(&[]);
        assert_eq!(merged.row_count(), 0);
        assert_eq!(merged.column_count(), 0);
        assert!(merged.index().is_empty());
    }
}
