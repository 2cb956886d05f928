//! Column-consistency checking across tabular files.

use std::path::Path;

use crate::reader::read_file;
use crate::report::{Event, Reporter};
use crate::types::TableError;

/// Checks that every file in `paths` has the same ordered column names as
/// the first.
///
/// Comparison is strictly positional: the same names in a different order
/// count as a mismatch. Checking stops at the first file that fails to load
/// or mismatches; later files are never read. An unsupported file yields
/// `Ok(false)` (the loader's event is the only report), while parse and I/O
/// failures propagate as errors.
pub fn check_column_consistency<P: AsRef<Path>>(
    paths: &[P],
    reporter: &dyn Reporter,
) -> Result<bool, TableError> {
    let Some((first, rest)) = paths.split_first() else {
        reporter.report(&Event::EmptyFileList);
        return Ok(false);
    };

    let master = match read_file(first.as_ref(), reporter) {
        Ok(table) => table,
        Err(TableError::UnsupportedFormat { .. }) => return Ok(false),
        Err(err) => return Err(err),
    };

    for path in rest {
        let current = match read_file(path.as_ref(), reporter) {
            Ok(table) => table,
            Err(TableError::UnsupportedFormat { .. }) => return Ok(false),
            Err(err) => return Err(err),
        };

        if current.columns() != master.columns() {
            reporter.report(&Event::InconsistentColumns {
                file: base_name(path.as_ref()),
            });
            return Ok(false);
        }
    }

    reporter.report(&Event::ConsistentColumns { files: paths.len() });
    Ok(true)
}

fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
