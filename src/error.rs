//! Error types for corpus and data-file operations.
//!
//! Every failure a caller can act on gets its own variant: load and write
//! failures carry the offending path, bulk-add failures list the relative
//! paths missing from the caller's value map, and copying onto an existing
//! directory is a distinct recoverable condition rather than a silent null.

use std::path::PathBuf;

use thiserror::Error;

/// Unified result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A source file could not be read or parsed.
    #[error("failed to load {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: LoadErrorKind,
    },

    /// A destination file could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The root directory for a corpus scan does not exist or could not
    /// be walked.
    #[error("failed to scan corpus root {}: {source}", root.display())]
    Scan {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// A bulk column add was invoked with a value map that does not cover
    /// every indexed relative path.
    #[error("no column values supplied for {} indexed file(s): {}", missing.len(), missing.join(", "))]
    MissingColumnValues { missing: Vec<String> },

    /// A column was set with a value count different from the table's
    /// row count.
    #[error("column {name:?} has {got} values but the table has {rows} rows")]
    ColumnLength {
        name: String,
        got: usize,
        rows: usize,
    },

    /// A corpus copy targeted a directory that already exists.
    #[error("copy destination already exists: {}", path.display())]
    DestinationExists { path: PathBuf },

    /// Creating the destination directory tree for a copy or add failed.
    #[error("failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// What went wrong while loading a single file.
#[derive(Debug, Error)]
pub enum LoadErrorKind {
    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("file has no header row")]
    EmptyFile,

    #[error("row {row}: cannot parse timestamp {value:?}")]
    Timestamp { row: usize, value: String },
}
