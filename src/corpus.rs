//! A keyed collection of data files rooted at one directory.
//!
//! Construction walks the root recursively and loads every `.csv` file it
//! finds, keyed by its root-relative path with separators normalized to
//! forward slashes. Bulk operations are plain loops over the indexed
//! files: column add/remove delegate to [`DataFile::set_column`], and
//! copying a corpus deep-clones every file into a fresh root.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::datafile::DataFile;
use crate::error::{Error, Result};

/// File extension (lowercased) a file must carry to be indexed.
const DATA_EXTENSION: &str = "csv";

/// A corpus of data files discovered under one root directory, keyed by
/// forward-slash-normalized relative path.
#[derive(Debug)]
pub struct Corpus {
    root: PathBuf,
    data_files: BTreeMap<String, DataFile>,
}

impl Corpus {
    /// Scan `root` recursively and load every eligible file. Any single
    /// file failing to load aborts construction.
    pub fn load(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let mut data_files = BTreeMap::new();

        for entry in WalkDir::new(&root) {
            let entry = entry.map_err(|source| Error::Scan {
                root: root.clone(),
                source,
            })?;
            if !entry.file_type().is_file() || !is_eligible(entry.path()) {
                continue;
            }
            let relative = entry.path().strip_prefix(&root).unwrap_or(entry.path());
            let key = normalize_rel_path(&relative.to_string_lossy());
            data_files.insert(key, DataFile::load(entry.path())?);
        }

        Ok(Self { root, data_files })
    }

    /// An empty corpus rooted at `root`, populated via [`add_data_file`].
    ///
    /// [`add_data_file`]: Corpus::add_data_file
    fn empty(root: PathBuf) -> Self {
        Self {
            root,
            data_files: BTreeMap::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of indexed data files.
    pub fn len(&self) -> usize {
        self.data_files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data_files.is_empty()
    }

    pub fn get(&self, relative_path: &str) -> Option<&DataFile> {
        self.data_files.get(&normalize_rel_path(relative_path))
    }

    pub fn get_mut(&mut self, relative_path: &str) -> Option<&mut DataFile> {
        self.data_files.get_mut(&normalize_rel_path(relative_path))
    }

    /// Iterate over `(relative path, data file)` entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &DataFile)> {
        self.data_files.iter()
    }

    /// Add `column_name` to every indexed file, taking each file's values
    /// from `values_by_path` under the same relative-path key.
    ///
    /// The value map must cover the full current key set; missing keys are
    /// reported up front, before any file is touched. Extra keys are
    /// ignored. When `persist` is true each file is written back as it is
    /// edited, so a failure partway leaves earlier files already written.
    pub fn add_column(
        &mut self,
        column_name: &str,
        values_by_path: &HashMap<String, Vec<String>>,
        persist: bool,
    ) -> Result<()> {
        let missing: Vec<String> = self
            .data_files
            .keys()
            .filter(|key| !values_by_path.contains_key(*key))
            .cloned()
            .collect();
        if !missing.is_empty() {
            return Err(Error::MissingColumnValues { missing });
        }

        for (key, df) in &mut self.data_files {
            let values = values_by_path[key].clone();
            df.set_column(column_name, Some(values), persist)?;
        }
        Ok(())
    }

    /// Remove `column_name` from every indexed file. Files that never had
    /// the column are untouched.
    pub fn remove_column(&mut self, column_name: &str, persist: bool) -> Result<()> {
        for df in self.data_files.values_mut() {
            df.set_column(column_name, None, persist)?;
        }
        Ok(())
    }

    /// Duplicate this corpus under `new_root`, which must not already
    /// exist. Every data file is deep-copied and written under the new
    /// root at its same relative path.
    pub fn copy(&self, new_root: impl Into<PathBuf>) -> Result<Corpus> {
        let new_root = new_root.into();
        if new_root.is_dir() {
            return Err(Error::DestinationExists { path: new_root });
        }
        std::fs::create_dir_all(&new_root).map_err(|source| Error::CreateDir {
            path: new_root.clone(),
            source,
        })?;

        let mut copied = Corpus::empty(new_root);
        for (key, df) in &self.data_files {
            copied.add_data_file(key, df)?;
        }
        Ok(copied)
    }

    /// Deep-copy `data_file` into this corpus at `relative_path`: the
    /// clone is pointed at `root/relative_path`, intervening directories
    /// are created, the file is written out, and the entry is indexed.
    /// This is the only way a corpus grows after construction.
    pub fn add_data_file(&mut self, relative_path: &str, data_file: &DataFile) -> Result<()> {
        let key = normalize_rel_path(relative_path);
        let dest = self.root.join(&key);

        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent).map_err(|source| Error::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let mut clone = data_file.clone();
        clone.src_path = dest;
        clone.file_name = key.rsplit('/').next().unwrap_or(&key).to_string();
        clone.write()?;
        self.data_files.insert(key, clone);
        Ok(())
    }

    /// Entries whose relative-path key contains `query` as a substring.
    /// The empty query matches everything. Returns borrowed entries; no
    /// table content is copied.
    pub fn subset(&self, query: &str) -> BTreeMap<&String, &DataFile> {
        self.data_files
            .iter()
            .filter(|(key, _)| key.contains(query))
            .collect()
    }
}

fn is_eligible(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case(DATA_EXTENSION))
        .unwrap_or(false)
}

/// Normalize a corpus-relative path: forward slashes only, no leading or
/// trailing separators. Applied at discovery and at every keyed lookup so
/// host path conventions never leak into the index. Only the host
/// separator is rewritten; on Unix a backslash is an ordinary filename
/// character and joining root and key must still reach the file.
pub fn normalize_rel_path(path: &str) -> String {
    #[cfg(windows)]
    let path = path.replace('\\', "/");
    path.trim_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(windows)]
    #[test]
    fn test_normalize_host_separator() {
        assert_eq!(normalize_rel_path("a\\b\\x.csv"), "a/b/x.csv");
    }

    #[cfg(unix)]
    #[test]
    fn test_normalize_keeps_backslash_filename_chars() {
        assert_eq!(normalize_rel_path("a/odd\\name.csv"), "a/odd\\name.csv");
    }

    #[test]
    fn test_normalize_strips_edge_separators() {
        assert_eq!(normalize_rel_path("/a/x.csv/"), "a/x.csv");
        assert_eq!(normalize_rel_path("a/x.csv"), "a/x.csv");
    }

    #[test]
    fn test_eligible_extension_case_insensitive() {
        assert!(is_eligible(Path::new("a/x.csv")));
        assert!(is_eligible(Path::new("a/x.CSV")));
        assert!(!is_eligible(Path::new("a/x.txt")));
        assert!(!is_eligible(Path::new("a/csv")));
    }
}
