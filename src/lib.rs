//! # tscorpus
//!
//! Manage a directory tree of labeled time-series CSV files as one
//! in-memory corpus.
//!
//! Benchmark and evaluation pipelines routinely need to attach auxiliary
//! columns (anomaly scores, labels) to many data files at once, strip them
//! again, snapshot a whole corpus before mutating it, and restrict
//! processing to a named group of files. tscorpus provides exactly that:
//! a [`DataFile`] wraps one CSV (load, edit columns, range-query
//! timestamps, write back) and a [`Corpus`] indexes a directory's worth of
//! them by relative path, composing every bulk operation from repeated
//! single-file edits.
//!
//! ```no_run
//! use tscorpus::Corpus;
//!
//! # fn main() -> tscorpus::Result<()> {
//! let mut corpus = Corpus::load("data/")?;
//! corpus.remove_column("label", true)?;
//! let snapshot = corpus.copy("data-experiment/")?;
//! for (path, df) in snapshot.subset("nyc_taxi") {
//!     println!("{path}: {} rows", df.table.row_count());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`datafile`] | One CSV file in memory: load, edit, persist, query |
//! | [`corpus`] | Directory-rooted index of data files and bulk operations |
//! | [`table`] | Ordered timestamp-plus-columns table representation |
//! | [`timestamp`] | Timestamp parsing and canonical formatting |
//! | [`error`] | Typed failure conditions |

pub mod corpus;
pub mod datafile;
pub mod error;
pub mod table;
pub mod timestamp;

pub use corpus::Corpus;
pub use datafile::DataFile;
pub use error::{Error, Result};
