//! Status reporting decoupled from control flow.
//!
//! The checking and consolidation functions never print directly; they emit
//! [`Event`]s to an injected [`Reporter`]. `ConsoleReporter` renders the
//! events as human-readable status lines, `JsonReporter` serializes them one
//! JSON object per line, and `MemoryReporter` collects them for inspection
//! in tests.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::Serialize;

/// A status event emitted while checking or consolidating files.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    /// A file's extension maps to no known format; the file produced no data.
    UnsupportedFileType {
        path: PathBuf,
        extension: Option<String>,
    },
    /// An operation was invoked with an empty file list.
    EmptyFileList,
    /// A file's ordered column names differ from the first file's.
    InconsistentColumns { file: String },
    /// Every file in the list loaded and matched the first file's columns.
    ConsistentColumns { files: usize },
    /// No file in the list could be loaded; nothing to consolidate.
    NothingToConsolidate,
    /// Consolidation succeeded over this many loadable files.
    Consolidated { files: usize },
}

/// Sink for status events.
pub trait Reporter {
    fn report(&self, event: &Event);
}

/// Writes human-readable status lines to standard output.
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn report(&self, event: &Event) {
        match event {
            Event::UnsupportedFileType { extension, .. } => {
                println!(
                    "Unsupported file type: {}",
                    extension.as_deref().unwrap_or("")
                );
            }
            Event::EmptyFileList => println!("File list is empty."),
            Event::InconsistentColumns { file } => {
                println!("Inconsistency found in '{}'!", file);
            }
            Event::ConsistentColumns { .. } => {
                println!("All files have consistent columns.");
            }
            Event::NothingToConsolidate => println!("No valid files to consolidate."),
            Event::Consolidated { files } => {
                println!("Successfully consolidated {} files.", files);
            }
        }
    }
}

/// Serializes each event to the wrapped writer, one JSON object per line.
#[derive(Debug)]
pub struct JsonReporter<W: Write> {
    out: Mutex<W>,
}

impl<W: Write> JsonReporter<W> {
    pub fn new(out: W) -> Self {
        JsonReporter {
            out: Mutex::new(out),
        }
    }

    /// Consumes the reporter and returns the wrapped writer.
    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|e| e.into_inner())
    }
}

impl<W: Write> Reporter for JsonReporter<W> {
    fn report(&self, event: &Event) {
        let Ok(mut out) = self.out.lock() else {
            return;
        };
        if let Ok(line) = serde_json::to_string(event) {
            let _ = writeln!(out, "{}", line);
        }
    }
}

/// Collects events in memory so tests can assert on what was reported.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    events: Mutex<Vec<Event>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        MemoryReporter::default()
    }

    /// Snapshot of the events reported so far, in order.
    pub fn events(&self) -> Vec<Event> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl Reporter for MemoryReporter {
    fn report(&self, event: &Event) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}
