//! Row-wise consolidation of tabular files into a single table.

use std::path::Path;

use crate::reader::read_file;
use crate::report::{Event, Reporter};
use crate::types::{Table, TableError};

/// Consolidates the files in `paths` into one table, in input order.
///
/// Every path is attempted; unsupported files drop out of the merge (the
/// loader's event is their only trace). No consistency check is performed:
/// mismatched schemas silently produce a sparse result, with columns
/// unioned by name and missing cells filled with `CellValue::Empty`. The
/// result carries a fresh contiguous 0-based index, and the count of files
/// actually merged is reported.
///
/// Returns [`TableError::EmptyFileList`] for an empty input and
/// [`TableError::NoReadableFiles`] when no file in the list could be
/// loaded. Parse and I/O failures propagate as errors.
pub fn consolidate_data<P: AsRef<Path>>(
    paths: &[P],
    reporter: &dyn Reporter,
) -> Result<Table, TableError> {
    if paths.is_empty() {
        reporter.report(&Event::EmptyFileList);
        return Err(TableError::EmptyFileList);
    }

    let mut tables = Vec::with_capacity(paths.len());
    for path in paths {
        match read_file(path.as_ref(), reporter) {
            Ok(table) => tables.push(table),
            Err(TableError::UnsupportedFormat { .. }) => {}
            Err(err) => return Err(err),
        }
    }

    if tables.is_empty() {
        reporter.report(&Event::NothingToConsolidate);
        return Err(TableError::NoReadableFiles);
    }

    let consolidated = Table::concat(&tables);
    reporter.report(&Event::Consolidated {
        files: tables.len(),
    });
    Ok(consolidated)
}
