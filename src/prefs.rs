//! File-backed key-value namespace.
//!
//! Each namespace is one JSON object of string keys to string values stored
//! at `<dir>/<namespace>.json`. Every write replaces the whole file through a
//! temp file in the same directory, so readers never see a partial document.

use crate::config;
use crate::error::Result;
use std::collections::BTreeMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;
use tempfile::NamedTempFile;

/// A named key-value namespace persisted as a single JSON document.
pub struct Preferences {
    dir: PathBuf,
    namespace: String,
}

impl Preferences {
    /// Open (or create) a namespace.
    ///
    /// If `dir` is `None`, uses the platform-appropriate default data directory.
    /// Creates the directory if it does not exist.
    pub fn open(dir: Option<PathBuf>, namespace: &str) -> Result<Self> {
        let dir = dir.unwrap_or_else(config::default_data_dir);
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            namespace: namespace.to_string(),
        })
    }

    /// Path of the namespace document.
    pub fn path(&self) -> PathBuf {
        self.dir.join(format!("{}.json", self.namespace))
    }

    /// Read the value stored under `key`.
    pub fn get_string(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_document()?.remove(key))
    }

    /// Store `value` under `key`, replacing any previous value.
    pub fn put_string(&self, key: &str, value: &str) -> Result<()> {
        let mut doc = self.read_document()?;
        doc.insert(key.to_string(), value.to_string());
        self.write_document(&doc)
    }

    /// Remove `key`. Removing a missing key is not an error.
    pub fn remove(&self, key: &str) -> Result<()> {
        let mut doc = self.read_document()?;
        if doc.remove(key).is_some() {
            self.write_document(&doc)?;
        }
        Ok(())
    }

    /// Load the namespace document.
    ///
    /// A missing file is an empty namespace. A file that is not a JSON object
    /// of strings is logged and also treated as empty; the next write
    /// replaces it.
    fn read_document(&self) -> Result<BTreeMap<String, String>> {
        let path = self.path();
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_str(&contents) {
            Ok(doc) => Ok(doc),
            Err(e) => {
                log::warn!(
                    "Unreadable preferences file {}: {} -- treating as empty",
                    path.display(),
                    e
                );
                Ok(BTreeMap::new())
            }
        }
    }

    /// Write the namespace document via temp file + rename.
    fn write_document(&self, doc: &BTreeMap<String, String>) -> Result<()> {
        let bytes = serde_json::to_vec(doc)?;
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(&bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(self.path()).map_err(|e| e.error)?;
        Ok(())
    }

    /// Delete the namespace file and leave the directory in place.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(self.path()) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_namespace_reads_as_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let prefs = Preferences::open(Some(tmp.path().to_path_buf()), "ns").unwrap();
        assert_eq!(prefs.get_string("anything").unwrap(), None);
    }

    #[test]
    fn put_then_get_and_remove() {
        let tmp = tempfile::tempdir().unwrap();
        let prefs = Preferences::open(Some(tmp.path().to_path_buf()), "ns").unwrap();

        prefs.put_string("a", "1").unwrap();
        prefs.put_string("b", "2").unwrap();
        assert_eq!(prefs.get_string("a").unwrap().as_deref(), Some("1"));
        assert_eq!(prefs.get_string("b").unwrap().as_deref(), Some("2"));

        prefs.remove("a").unwrap();
        assert_eq!(prefs.get_string("a").unwrap(), None);
        assert_eq!(prefs.get_string("b").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn garbage_file_is_treated_as_empty_and_replaced() {
        let tmp = tempfile::tempdir().unwrap();
        let prefs = Preferences::open(Some(tmp.path().to_path_buf()), "ns").unwrap();
        fs::write(prefs.path(), "not json at all").unwrap();

        assert_eq!(prefs.get_string("k").unwrap(), None);
        prefs.put_string("k", "v").unwrap();
        assert_eq!(prefs.get_string("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn clear_deletes_namespace_file() {
        let tmp = tempfile::tempdir().unwrap();
        let prefs = Preferences::open(Some(tmp.path().to_path_buf()), "ns").unwrap();
        prefs.put_string("k", "v").unwrap();

        prefs.clear().unwrap();
        assert!(!prefs.path().exists());
        assert_eq!(prefs.get_string("k").unwrap(), None);
        prefs.clear().unwrap();
    }

    #[test]
    fn writes_leave_no_temp_files_behind() {
        let tmp = tempfile::tempdir().unwrap();
        let prefs = Preferences::open(Some(tmp.path().to_path_buf()), "ns").unwrap();
        prefs.put_string("k", "v").unwrap();

        let entries: Vec<_> = fs::read_dir(tmp.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }
}
