//! # tscorpus CLI (`tsc`)
//!
//! Driver for bulk operations over a corpus of labeled time-series CSV
//! files. Every command takes the corpus root (or a single file for
//! `range`) as an argument; nothing touches disk unless the command or a
//! `--write` flag asks for it.
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `tsc list <root>` | Show indexed files and their row counts |
//! | `tsc subset <root> <query>` | Show files whose relative path contains a substring |
//! | `tsc range <file> <t1> <t2>` | Print timestamps of one file within a range |
//! | `tsc add-column <root> <name> --values <json>` | Attach a column to every file |
//! | `tsc remove-column <root> <name>` | Strip a column from every file |
//! | `tsc copy <root> <dest>` | Snapshot the corpus under a new root |
//!
//! ## Examples
//!
//! ```bash
//! # Snapshot before mutating
//! tsc copy data/ results/run1/
//!
//! # Attach per-file label columns from a JSON map and write them out
//! tsc add-column results/run1/ label --values labels.json --write
//!
//! # Strip the column again
//! tsc remove-column results/run1/ label --write
//! ```
//!
//! The `--values` JSON file maps each corpus-relative path to an array of
//! cell values, one per row:
//!
//! ```json
//! { "realAWSCloudwatch/ec2_cpu.csv": [0, 0, 1], "realTweets/t1.csv": [1] }
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;

use tscorpus::corpus::normalize_rel_path;
use tscorpus::{Corpus, DataFile};

/// tscorpus CLI — manage a directory tree of labeled time-series CSV
/// files as one corpus.
#[derive(Parser)]
#[command(
    name = "tsc",
    about = "Manage a directory tree of labeled time-series CSV files as one corpus",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// List the corpus: dataset count, then each relative path with its
    /// row count, in key order.
    List {
        /// Corpus root directory.
        root: PathBuf,
    },

    /// List the entries whose relative path contains a substring.
    ///
    /// An empty query matches every entry.
    Subset {
        /// Corpus root directory.
        root: PathBuf,

        /// Substring to match against relative-path keys.
        query: String,
    },

    /// Print the timestamps of one file that fall within a range.
    ///
    /// Bounds are inclusive on both ends. Accepts `YYYY-MM-DD HH:MM:SS`,
    /// the `T`-separated variant, minute precision, or a bare date.
    Range {
        /// Path to a single CSV data file.
        file: PathBuf,

        /// Start of the range (inclusive).
        t1: String,

        /// End of the range (inclusive).
        t2: String,
    },

    /// Attach a column to every file in the corpus.
    ///
    /// Values come from a JSON file mapping each corpus-relative path to
    /// an array of cell values (one per row). The map must cover every
    /// indexed file; rows and values must line up exactly.
    AddColumn {
        /// Corpus root directory.
        root: PathBuf,

        /// Name of the column to attach.
        name: String,

        /// JSON file mapping relative path -> array of cell values.
        #[arg(long)]
        values: PathBuf,

        /// Write each edited file back to disk.
        #[arg(long)]
        write: bool,
    },

    /// Strip a column from every file in the corpus.
    ///
    /// Files that never had the column are left alone.
    RemoveColumn {
        /// Corpus root directory.
        root: PathBuf,

        /// Name of the column to strip.
        name: String,

        /// Write each edited file back to disk.
        #[arg(long)]
        write: bool,
    },

    /// Snapshot the corpus under a new root directory.
    ///
    /// The destination must not already exist; every file is deep-copied
    /// and written under it at the same relative path.
    Copy {
        /// Corpus root directory.
        root: PathBuf,

        /// Destination root; created by the command.
        dest: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::List { root } => {
            let corpus = Corpus::load(&root)?;
            println!("{} data file(s) under {}", corpus.len(), root.display());
            for (key, df) in corpus.iter() {
                println!("  {key}  ({} rows)", df.table.row_count());
            }
        }
        Commands::Subset { root, query } => {
            let corpus = Corpus::load(&root)?;
            let matched = corpus.subset(&query);
            println!("{} of {} file(s) match {:?}", matched.len(), corpus.len(), query);
            for (key, df) in matched {
                println!("  {key}  ({} rows)", df.table.row_count());
            }
        }
        Commands::Range { file, t1, t2 } => {
            let df = DataFile::load(&file)?;
            let t1 = parse_bound(&t1)?;
            let t2 = parse_bound(&t2)?;
            let hits = df.timestamps_in_range(t1, t2);
            println!("{} timestamp(s) in range", hits.len());
            for ts in hits {
                println!("  {}", tscorpus::timestamp::format(&ts));
            }
        }
        Commands::AddColumn {
            root,
            name,
            values,
            write,
        } => {
            let values_by_path = read_values_file(&values)?;
            let mut corpus = Corpus::load(&root)?;
            corpus.add_column(&name, &values_by_path, write)?;
            println!(
                "added column {:?} to {} file(s){}",
                name,
                corpus.len(),
                if write { " (written)" } else { " (in memory only)" }
            );
        }
        Commands::RemoveColumn { root, name, write } => {
            let mut corpus = Corpus::load(&root)?;
            corpus.remove_column(&name, write)?;
            println!(
                "removed column {:?} from {} file(s){}",
                name,
                corpus.len(),
                if write { " (written)" } else { " (in memory only)" }
            );
        }
        Commands::Copy { root, dest } => {
            let corpus = Corpus::load(&root)?;
            let copied = corpus.copy(&dest)?;
            println!(
                "copied {} file(s) to {}",
                copied.len(),
                copied.root().display()
            );
        }
    }

    Ok(())
}

fn parse_bound(value: &str) -> Result<chrono::NaiveDateTime> {
    tscorpus::timestamp::parse(value)
        .with_context(|| format!("cannot parse timestamp bound {value:?}"))
}

/// One cell in the `--values` JSON map. Scalars only — arrays and objects
/// are rejected at parse time. Numbers keep their JSON text form.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CellValue {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
}

impl CellValue {
    fn into_cell(self) -> String {
        match self {
            CellValue::Null => String::new(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Number(n) => n.to_string(),
            CellValue::Text(s) => s,
        }
    }
}

/// Read the `--values` JSON map, stringifying scalar cell values and
/// normalizing the relative-path keys.
fn read_values_file(path: &Path) -> Result<HashMap<String, Vec<String>>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read values file {}", path.display()))?;
    let raw: HashMap<String, Vec<CellValue>> = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse values file {}", path.display()))?;

    Ok(raw
        .into_iter()
        .map(|(key, cells)| {
            let key = normalize_rel_path(&key);
            (key, cells.into_iter().map(CellValue::into_cell).collect())
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_values_file_scalars_and_key_normalization() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("labels.json");
        fs::write(
            &path,
            r#"{ "/a/x.csv": [0, 1.5, "high", true, null], "b/y.csv": [1] }"#,
        )
        .unwrap();

        let map = read_values_file(&path).unwrap();
        assert_eq!(map["a/x.csv"], vec!["0", "1.5", "high", "true", ""]);
        assert_eq!(map["b/y.csv"], vec!["1"]);
    }

    #[test]
    fn test_values_file_rejects_nested_values() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.json");
        fs::write(&path, r#"{ "a/x.csv": [[0, 1]] }"#).unwrap();
        assert!(read_values_file(&path).is_err());
    }
}
