//! Loading CSV and XLSX files into in-memory tables.
//!
//! The format of a file is resolved once from its extension into a
//! [`FileFormat`] tag; the tag maps to a format-specific parse function.
//! Unsupported extensions are reported and surfaced as a named error, never
//! escalated. Parse and I/O failures from the underlying parsers propagate
//! to the caller untouched.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader};
use serde::{Deserialize, Serialize};

use crate::report::{Event, Reporter};
use crate::types::{CellValue, Table, TableError};

/// Supported tabular file formats, resolved once per path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    Csv,
    Xlsx,
}

impl FileFormat {
    /// Resolves the format tag from the extension after the last `'.'`.
    /// Matching is ASCII-case-insensitive.
    pub fn from_path(path: &Path) -> Result<FileFormat, TableError> {
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned());

        match extension.as_deref() {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Ok(FileFormat::Csv),
            Some(ext) if ext.eq_ignore_ascii_case("xlsx") => Ok(FileFormat::Xlsx),
            _ => Err(TableError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension,
            }),
        }
    }

    /// Maps the format tag to its parse function.
    pub fn parser(self) -> fn(&Path) -> Result<Table, TableError> {
        match self {
            FileFormat::Csv => read_csv,
            FileFormat::Xlsx => read_xlsx,
        }
    }
}

/// Reads a tabular file into a [`Table`], dispatching on its extension.
///
/// An unsupported extension is reported through `reporter` and returned as
/// [`TableError::UnsupportedFormat`]; callers treat that case as "no data"
/// rather than a fatal condition. Any other error means the file itself
/// failed to load.
pub fn read_file(path: &Path, reporter: &dyn Reporter) -> Result<Table, TableError> {
    let format = match FileFormat::from_path(path) {
        Ok(format) => format,
        Err(err) => {
            if let TableError::UnsupportedFormat { extension, .. } = &err {
                reporter.report(&Event::UnsupportedFileType {
                    path: path.to_path_buf(),
                    extension: extension.clone(),
                });
            }
            return Err(err);
        }
    };

    (format.parser())(path)
}

/// Parse comma-delimited text with a header row naming the columns.
fn read_csv(path: &Path) -> Result<Table, TableError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| csv_error(path, e))?;

    let columns: Vec<String> = reader
        .headers()
        .map_err(|e| csv_error(path, e))?
        .iter()
        .map(String::from)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| csv_error(path, e))?;
        let row: Vec<CellValue> = record
            .iter()
            .map(|field| {
                if field.is_empty() {
                    CellValue::Empty
                } else {
                    CellValue::String(field.to_string())
                }
            })
            .collect();
        rows.push(row);
    }

    Ok(Table::new(columns, rows))
}

fn csv_error(path: &Path, err: csv::Error) -> TableError {
    let message = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(source) => TableError::Io {
            path: path.to_path_buf(),
            source,
        },
        _ => TableError::Parse {
            path: path.to_path_buf(),
            message,
        },
    }
}

/// Parse the first sheet of a workbook with a header row naming the columns.
fn read_xlsx(path: &Path) -> Result<Table, TableError> {
    let mut workbook = open_workbook_auto(path).map_err(|e| xlsx_error(path, e))?;

    let sheet_names = workbook.sheet_names().to_vec();
    let first_sheet = sheet_names.first().cloned().ok_or_else(|| TableError::Parse {
        path: path.to_path_buf(),
        message: "workbook has no sheets".to_string(),
    })?;

    let range = workbook
        .worksheet_range(&first_sheet)
        .map_err(|e| xlsx_error(path, e))?;

    Ok(table_from_range(&range))
}

fn xlsx_error(path: &Path, err: calamine::Error) -> TableError {
    match err {
        calamine::Error::Io(source) => TableError::Io {
            path: path.to_path_buf(),
            source,
        },
        other => TableError::Parse {
            path: path.to_path_buf(),
            message: other.to_string(),
        },
    }
}

fn table_from_range(range: &Range<Data>) -> Table {
    let (row_count, col_count) = range.get_size();
    if row_count == 0 || col_count == 0 {
        return Table::new(Vec::new(), Vec::new());
    }

    // First row names the columns
    let mut columns = Vec::with_capacity(col_count);
    for col_idx in 0..col_count {
        let header = match convert_cell_value(range.get((0, col_idx))) {
            CellValue::String(s) => s,
            CellValue::Number(n) => n.to_string(),
            _ => String::new(),
        };
        columns.push(header);
    }

    let mut rows = Vec::with_capacity(row_count - 1);
    for row_idx in 1..row_count {
        let mut row = Vec::with_capacity(col_count);
        for col_idx in 0..col_count {
            row.push(convert_cell_value(range.get((row_idx, col_idx))));
        }
        rows.push(row);
    }

    Table::new(columns, rows)
}

/// Convert a calamine cell to our CellValue
fn convert_cell_value(cell: Option<&Data>) -> CellValue {
    match cell {
        None => CellValue::Empty,
        Some(data) => match data {
            Data::Empty => CellValue::Empty,
            Data::String(s) => CellValue::String(s.clone()),
            Data::Float(f) => CellValue::Number(*f),
            Data::Int(i) => CellValue::Number(*i as f64),
            Data::Bool(b) => CellValue::Boolean(*b),
            Data::DateTime(dt) => CellValue::DateTime(format_excel_datetime(dt.as_f64())),
            Data::DateTimeIso(s) => CellValue::DateTime(s.clone()),
            Data::DurationIso(s) => CellValue::String(s.clone()),
            Data::Error(e) => CellValue::Error(format!("{:?}", e)),
        },
    }
}

/// Format Excel datetime (days since 1899-12-30) to ISO 8601
fn format_excel_datetime(value: f64) -> String {
    let days = value.floor() as i64;
    let time_fraction = value.fract();

    let epoch = chrono::NaiveDate::from_ymd_opt(1899, 12, 30).unwrap();
    let date = epoch + chrono::Duration::days(days);

    let total_seconds = (time_fraction * 86400.0).round() as u32;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    let time = chrono::NaiveTime::from_hms_opt(hours, minutes, seconds).unwrap_or_default();
    let datetime = chrono::NaiveDateTime::new(date, time);

    datetime.format("%Y-%m-%dT%H:%M:%S").to_string()
}
