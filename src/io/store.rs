use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::io::cipher;
use crate::model::entry::{ENTRY_EXT, Entry, FILE_STEM_FMT};

/// Error type for entry storage operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not create data directory {path}: {source}")]
    Init { path: PathBuf, source: io::Error },
    #[error("could not read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("could not write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("could not delete {path}: {source}")]
    Delete { path: PathBuf, source: io::Error },
    #[error("could not list {path}: {source}")]
    List { path: PathBuf, source: io::Error },
}

/// Durable read/write of individual entry records.
///
/// One flat directory, one file per entry. The store is cheap to clone so
/// every background job can carry its own handle.
#[derive(Debug, Clone)]
pub struct EntryStore {
    data_dir: PathBuf,
}

impl EntryStore {
    /// Open the store, creating the data directory if it does not exist.
    pub fn open(data_dir: &Path) -> Result<EntryStore, StoreError> {
        fs::create_dir_all(data_dir).map_err(|e| StoreError::Init {
            path: data_dir.to_path_buf(),
            source: e,
        })?;
        Ok(EntryStore {
            data_dir: data_dir.to_path_buf(),
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Read an entry's content, decrypting it. A file that fails decryption
    /// for any reason is returned as-is, so records written before
    /// encryption existed stay readable.
    pub fn load(&self, entry: &Entry) -> Result<String, StoreError> {
        let raw = fs::read(&entry.path).map_err(|e| StoreError::Read {
            path: entry.path.clone(),
            source: e,
        })?;
        let text = String::from_utf8(raw).map_err(|e| StoreError::Read {
            path: entry.path.clone(),
            source: io::Error::new(io::ErrorKind::InvalidData, e),
        })?;
        match cipher::decrypt(&text) {
            Ok(plain) => Ok(String::from_utf8_lossy(&plain).into_owned()),
            Err(_) => Ok(text),
        }
    }

    /// Encrypt and write an entry's content, replacing the file wholesale.
    /// A crash mid-write can corrupt the record; there is no rename dance.
    pub fn save(&self, entry: &Entry, content: &str) -> Result<(), StoreError> {
        let payload = cipher::encrypt(content.as_bytes());
        fs::write(&entry.path, payload).map_err(|e| StoreError::Write {
            path: entry.path.clone(),
            source: e,
        })
    }

    /// Remove an entry's file. A file that is already gone counts as removed.
    pub fn delete(&self, entry: &Entry) -> Result<(), StoreError> {
        match fs::remove_file(&entry.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Delete {
                path: entry.path.clone(),
                source: e,
            }),
        }
    }

    /// Create an empty record named for the current local time. Two creates
    /// within the same second collide on one stem and the later write wins.
    pub fn create(&self) -> Result<Entry, StoreError> {
        let timestamp = Local::now().naive_local();
        let stem = timestamp.format(FILE_STEM_FMT).to_string();
        let path = self.data_dir.join(format!("{stem}.{ENTRY_EXT}"));
        fs::write(&path, "").map_err(|e| StoreError::Write {
            path: path.clone(),
            source: e,
        })?;
        Ok(Entry { path, timestamp })
    }

    /// Enumerate record files. Order is whatever the directory yields; the
    /// index sorts.
    pub fn list(&self) -> Result<Vec<Entry>, StoreError> {
        let read_dir = fs::read_dir(&self.data_dir).map_err(|e| StoreError::List {
            path: self.data_dir.clone(),
            source: e,
        })?;

        let mut entries = Vec::new();
        for dirent in read_dir {
            let dirent = dirent.map_err(|e| StoreError::List {
                path: self.data_dir.clone(),
                source: e,
            })?;
            let path = dirent.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) != Some(ENTRY_EXT) {
                continue;
            }
            entries.push(Entry::from_path(path));
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_store() -> (EntryStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = EntryStore::open(&dir.path().join("entries")).unwrap();
        (store, dir)
    }

    #[test]
    fn open_creates_data_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a/b/entries");
        let store = EntryStore::open(&nested).unwrap();
        assert!(store.data_dir().is_dir());
    }

    #[test]
    fn open_fails_when_path_is_a_file() {
        let dir = TempDir::new().unwrap();
        let blocked = dir.path().join("blocked");
        fs::write(&blocked, "").unwrap();
        assert!(matches!(
            EntryStore::open(&blocked),
            Err(StoreError::Init { .. })
        ));
    }

    #[test]
    fn save_then_load_round_trips_through_encryption() {
        let (store, _dir) = test_store();
        let entry = store.create().unwrap();

        store.save(&entry, "<p>secret thoughts</p>").unwrap();

        // On disk: base64 ciphertext, not the markup.
        let on_disk = fs::read_to_string(&entry.path).unwrap();
        assert!(!on_disk.contains("secret"));
        assert!(
            on_disk
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'+' | b'/' | b'='))
        );

        assert_eq!(store.load(&entry).unwrap(), "<p>secret thoughts</p>");
    }

    #[test]
    fn load_falls_back_to_plaintext() {
        let (store, _dir) = test_store();
        let path = store.data_dir().join("2020-05-05_05-05-05.html");
        fs::write(&path, "<p>written before encryption</p>").unwrap();

        let entry = Entry::from_path(path);
        assert_eq!(
            store.load(&entry).unwrap(),
            "<p>written before encryption</p>"
        );
    }

    #[test]
    fn load_missing_file_is_a_read_error() {
        let (store, _dir) = test_store();
        let entry = Entry::from_path(store.data_dir().join("2020-01-01_00-00-00.html"));
        assert!(matches!(store.load(&entry), Err(StoreError::Read { .. })));
    }

    #[test]
    fn create_writes_empty_file_with_timestamp_stem() {
        let (store, _dir) = test_store();
        let entry = store.create().unwrap();

        assert!(entry.path.is_file());
        assert_eq!(fs::read(&entry.path).unwrap(), b"");
        // The stem parses back to the same timestamp.
        assert_eq!(Entry::from_path(entry.path.clone()).timestamp, entry.timestamp);
    }

    #[test]
    fn delete_is_idempotent() {
        let (store, _dir) = test_store();
        let entry = store.create().unwrap();

        store.delete(&entry).unwrap();
        assert!(!entry.path.exists());
        store.delete(&entry).unwrap();
    }

    #[test]
    fn list_skips_foreign_files() {
        let (store, _dir) = test_store();
        fs::write(store.data_dir().join("2024-01-15_10-30-00.html"), "").unwrap();
        fs::write(store.data_dir().join("notes.txt"), "not a record").unwrap();
        fs::create_dir(store.data_dir().join("subdir.html")).unwrap();

        let entries = store.list().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id(), "2024-01-15_10-30-00");
    }

    #[test]
    fn list_tolerates_malformed_stems() {
        let (store, _dir) = test_store();
        fs::write(store.data_dir().join("legacy-entry.html"), "old").unwrap();

        let entries = store.list().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id(), "legacy-entry");
    }
}
