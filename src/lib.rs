//! Column-consistency validation and consolidation for CSV and XLSX files.
//!
//! This crate provides:
//! - Loading CSV and XLSX files into an in-memory [`Table`]
//! - Checking that an ordered list of files shares one column schema
//! - Consolidating an ordered list of files into a single table
//! - Pluggable status reporting via the [`Reporter`] trait

pub mod merger;
pub mod reader;
pub mod report;
pub mod types;
pub mod validator;

// Re-export commonly used types and functions
pub use merger::consolidate_data;
pub use reader::{read_file, FileFormat};
pub use report::{ConsoleReporter, Event, JsonReporter, MemoryReporter, Reporter};
pub use types::{CellValue, Table, TableError};
pub use validator::check_column_consistency;
