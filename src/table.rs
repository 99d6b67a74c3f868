//! In-memory ordered table backing one data file.
//!
//! The first CSV column is parsed into timestamps; every other column is
//! held verbatim as strings so values survive a round-trip untouched.
//! Column order is significant: the timestamp column is always first,
//! original value columns keep their file order, and newly added columns
//! go to the end in the order they were added.

use chrono::NaiveDateTime;

use crate::error::{Error, Result};

/// One named value column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<String>,
}

/// Ordered table of timestamped rows. Rows keep the order they were read
/// in; timestamps are assumed ascending and are never re-sorted.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Header name of the timestamp column (conventionally `timestamp`).
    pub timestamp_name: String,
    pub timestamps: Vec<NaiveDateTime>,
    pub columns: Vec<Column>,
}

impl Table {
    pub fn row_count(&self) -> usize {
        self.timestamps.len()
    }

    /// All column names in output order, timestamp column first.
    pub fn header(&self) -> Vec<&str> {
        let mut names = Vec::with_capacity(self.columns.len() + 1);
        names.push(self.timestamp_name.as_str());
        names.extend(self.columns.iter().map(|c| c.name.as_str()));
        names
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Set a named value column. An existing column is overwritten in
    /// place, keeping its position; a new column is appended. The value
    /// count must match the row count.
    pub fn set_column(&mut self, name: &str, values: Vec<String>) -> Result<()> {
        if values.len() != self.row_count() {
            return Err(Error::ColumnLength {
                name: name.to_string(),
                got: values.len(),
                rows: self.row_count(),
            });
        }
        match self.columns.iter_mut().find(|c| c.name == name) {
            Some(col) => col.values = values,
            None => self.columns.push(Column {
                name: name.to_string(),
                values,
            }),
        }
        Ok(())
    }

    /// Remove a named value column. Absent columns are a no-op.
    pub fn remove_column(&mut self, name: &str) {
        self.columns.retain(|c| c.name != name);
    }

    /// All timestamps `t` with `t1 <= t <= t2`, in row order.
    pub fn timestamps_in_range(&self, t1: NaiveDateTime, t2: NaiveDateTime) -> Vec<NaiveDateTime> {
        self.timestamps
            .iter()
            .filter(|t| **t >= t1 && **t <= t2)
            .copied()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timestamp;

    fn sample() -> Table {
        Table {
            timestamp_name: "timestamp".to_string(),
            timestamps: vec![
                timestamp::parse("2014-04-01 00:00:00").unwrap(),
                timestamp::parse("2014-04-01 00:05:00").unwrap(),
                timestamp::parse("2014-04-01 00:10:00").unwrap(),
            ],
            columns: vec![Column {
                name: "value".to_string(),
                values: vec!["1.0".into(), "2.0".into(), "3.0".into()],
            }],
        }
    }

    #[test]
    fn test_set_new_column_appends() {
        let mut t = sample();
        t.set_column("label", vec!["0".into(), "0".into(), "1".into()])
            .unwrap();
        assert_eq!(t.header(), vec!["timestamp", "value", "label"]);
        assert_eq!(t.column("label").unwrap().values[2], "1");
    }

    #[test]
    fn test_set_existing_column_keeps_position() {
        let mut t = sample();
        t.set_column("label", vec!["0".into(), "0".into(), "1".into()])
            .unwrap();
        t.set_column("value", vec!["9".into(), "9".into(), "9".into()])
            .unwrap();
        assert_eq!(t.header(), vec!["timestamp", "value", "label"]);
        assert_eq!(t.column("value").unwrap().values, vec!["9", "9", "9"]);
    }

    #[test]
    fn test_set_column_length_mismatch() {
        let mut t = sample();
        let err = t.set_column("label", vec!["0".into()]).unwrap_err();
        match err {
            Error::ColumnLength { name, got, rows } => {
                assert_eq!(name, "label");
                assert_eq!(got, 1);
                assert_eq!(rows, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
        // A failed set leaves the column set untouched.
        assert_eq!(t.header(), vec!["timestamp", "value"]);
    }

    #[test]
    fn test_remove_then_readd_restores_column_set() {
        let mut t = sample();
        let before = t.header().join(",");
        t.set_column("label", vec!["0".into(), "1".into(), "1".into()])
            .unwrap();
        t.remove_column("label");
        assert_eq!(t.header().join(","), before);
    }

    #[test]
    fn test_remove_absent_column_is_noop() {
        let mut t = sample();
        t.remove_column("nope");
        assert_eq!(t.header(), vec!["timestamp", "value"]);
    }

    #[test]
    fn test_range_inclusive_both_ends() {
        let t = sample();
        let got = t.timestamps_in_range(
            timestamp::parse("2014-04-01 00:00:00").unwrap(),
            timestamp::parse("2014-04-01 00:10:00").unwrap(),
        );
        assert_eq!(got.len(), 3);
    }

    #[test]
    fn test_range_interior() {
        let t = sample();
        let got = t.timestamps_in_range(
            timestamp::parse("2014-04-01 00:01:00").unwrap(),
            timestamp::parse("2014-04-01 00:09:00").unwrap(),
        );
        assert_eq!(got, vec![timestamp::parse("2014-04-01 00:05:00").unwrap()]);
    }

    #[test]
    fn test_range_inverted_is_empty() {
        let t = sample();
        let got = t.timestamps_in_range(
            timestamp::parse("2014-04-01 00:10:00").unwrap(),
            timestamp::parse("2014-04-01 00:00:00").unwrap(),
        );
        assert!(got.is_empty());
    }

    #[test]
    fn test_range_outside_is_empty() {
        let t = sample();
        let got = t.timestamps_in_range(
            timestamp::parse("2020-01-01 00:00:00").unwrap(),
            timestamp::parse("2020-12-31 00:00:00").unwrap(),
        );
        assert!(got.is_empty());
    }
}
