use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tempfile::NamedTempFile;

/// Error type for key-value store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("could not write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("could not encode value: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Synchronous string storage addressed by key
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

// ---------------------------------------------------------------------------
// File-backed store
// ---------------------------------------------------------------------------

/// All keys live in one JSON object file, rewritten atomically on every set.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: IndexMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`. A missing file is an empty store.
    ///
    /// A file that is not a JSON object of strings is copied aside to
    /// `<path>.corrupt` and the store starts empty, so the next write cannot
    /// destroy the only copy.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => IndexMap::new(),
            Ok(text) => match serde_json::from_str::<IndexMap<String, String>>(&text) {
                Ok(entries) => entries,
                Err(e) => {
                    let backup = backup_path(&path);
                    tracing::warn!(
                        "store file {} is unreadable ({e}); saving a copy to {}",
                        path.display(),
                        backup.display()
                    );
                    atomic_write(&backup, text.as_bytes()).map_err(|source| StoreError::Write {
                        path: backup.clone(),
                        source,
                    })?;
                    IndexMap::new()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => IndexMap::new(),
            Err(source) => return Err(StoreError::Read { path, source }),
        };
        tracing::debug!("opened store {} ({} key(s))", path.display(), entries.len());
        Ok(FileStore { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(&self.entries)?;
        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir).map_err(|source| StoreError::Write {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        atomic_write(&self.path, content.as_bytes()).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }
}

fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".corrupt");
    path.with_file_name(name)
}

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(d) if !d.as_os_str().is_empty() => d,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// Store that lives only as long as the process. Counts writes.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: IndexMap<String, String>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a key without counting it as a write
    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }

    /// Number of `set` calls so far
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.writes += 1;
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_empty_store() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path().join("store.json")).unwrap();
        assert_eq!(store.get("anything").unwrap(), None);
    }

    #[test]
    fn set_then_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/store.json");
        let mut store = FileStore::open(&path).unwrap();
        store.set("a", "[1,2]").unwrap();
        store.set("b", "x").unwrap();

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("a").unwrap().as_deref(), Some("[1,2]"));
        assert_eq!(reopened.get("b").unwrap().as_deref(), Some("x"));
    }

    #[test]
    fn set_overwrites_wholesale() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        let mut store = FileStore::open(&path).unwrap();
        store.set("k", "first").unwrap();
        store.set("k", "second").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("second"));
        let raw = fs::read_to_string(&path).unwrap();
        assert!(!raw.contains("first"));
    }

    #[test]
    fn malformed_file_is_backed_up_and_store_starts_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "not json {{{").unwrap();

        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get("chaosToDoTasks").unwrap(), None);
        let backup = fs::read_to_string(dir.path().join("store.json.corrupt")).unwrap();
        assert_eq!(backup, "not json {{{");
    }

    #[test]
    fn memory_store_counts_writes_but_not_seeds() {
        let mut store = MemoryStore::new().with_entry("k", "v");
        assert_eq!(store.writes(), 0);
        store.set("k", "w").unwrap();
        assert_eq!(store.writes(), 1);
        assert_eq!(store.get("k").unwrap().as_deref(), Some("w"));
    }
}
