//! One labeled time-series CSV file held in memory.
//!
//! A [`DataFile`] loads its whole source file at construction, supports
//! column-level edits and timestamp-range lookup, and writes itself back
//! explicitly — never implicitly, except when an edit asks to persist.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use crate::error::{Error, LoadErrorKind, Result};
use crate::table::{Column, Table};
use crate::timestamp;

/// In-memory representation of one tabular time-series file plus the path
/// it was read from (and will be written to by default).
#[derive(Debug, Clone)]
pub struct DataFile {
    /// Where this file was loaded from; also the default write target.
    pub src_path: PathBuf,
    /// Final path component of `src_path`.
    pub file_name: String,
    pub table: Table,
}

impl DataFile {
    /// Read the file at `path` into memory. The header row names the
    /// columns; the first column is parsed as timestamps and every other
    /// cell is kept verbatim.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let table = read_table(&path).map_err(|source| Error::Load {
            path: path.clone(),
            source,
        })?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        Ok(Self {
            src_path: path,
            file_name,
            table,
        })
    }

    /// Serialize the table back to its source path.
    pub fn write(&self) -> Result<()> {
        self.write_to(&self.src_path)
    }

    /// Serialize the table to `path`, header row included, no row index.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        write_table(&self.table, path).map_err(|source| Error::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Set or remove a named value column. `Some(values)` sets the column
    /// (value count must equal the row count); `None` removes it, with
    /// absence being a no-op. When `persist` is true the file is written
    /// back to its source path immediately after the edit.
    pub fn set_column(&mut self, name: &str, values: Option<Vec<String>>, persist: bool) -> Result<()> {
        match values {
            Some(values) => self.table.set_column(name, values)?,
            None => self.table.remove_column(name),
        }
        if persist {
            self.write()?;
        }
        Ok(())
    }

    /// All timestamps `t` with `t1 <= t <= t2`, in row order.
    pub fn timestamps_in_range(&self, t1: NaiveDateTime, t2: NaiveDateTime) -> Vec<NaiveDateTime> {
        self.table.timestamps_in_range(t1, t2)
    }
}

fn read_table(path: &Path) -> std::result::Result<Table, LoadErrorKind> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)?;

    let header = reader.headers()?.clone();
    let timestamp_name = header
        .get(0)
        .filter(|n| !n.is_empty() || header.len() > 1)
        .ok_or(LoadErrorKind::EmptyFile)?
        .to_string();

    let mut timestamps = Vec::new();
    let mut columns: Vec<Column> = header
        .iter()
        .skip(1)
        .map(|name| Column {
            name: name.to_string(),
            values: Vec::new(),
        })
        .collect();

    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let raw = record.get(0).unwrap_or_default();
        let ts = timestamp::parse(raw).ok_or_else(|| LoadErrorKind::Timestamp {
            row: row + 1,
            value: raw.to_string(),
        })?;
        timestamps.push(ts);
        for (col, cell) in columns.iter_mut().zip(record.iter().skip(1)) {
            col.values.push(cell.to_string());
        }
    }

    Ok(Table {
        timestamp_name,
        timestamps,
        columns,
    })
}

fn write_table(table: &Table, path: &Path) -> std::result::Result<(), csv::Error> {
    // Serialize into a temp file next to the destination and rename it
    // into place only after a clean flush. A failure partway must leave
    // the existing file exactly as it was, never truncated.
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    {
        let mut writer = csv::Writer::from_writer(&mut tmp);
        writer.write_record(table.header())?;
        for row in 0..table.row_count() {
            let mut record = Vec::with_capacity(table.columns.len() + 1);
            record.push(timestamp::format(&table.timestamps[row]));
            for col in &table.columns {
                record.push(col.values[row].clone());
            }
            writer.write_record(&record)?;
        }
        writer.flush()?;
    }
    tmp.persist(path).map_err(|e| csv::Error::from(e.error))?;
    Ok(())
}
