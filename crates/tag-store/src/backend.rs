use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Key/value storage behind the tag store.
///
/// The store takes the backend as a constructor parameter so tests can
/// inject [`MemoryBackend`] instead of touching the filesystem.
pub trait StorageBackend {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-memory backend; state lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: HashMap<String, String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// File-per-key backend rooted at a state directory.
///
/// This is the session-storage analogue for a CLI process: a missing file
/// reads as an absent key, and removal is the explicit end of the data's
/// lifetime. Concurrent writers to the same root are last-writer-wins.
#[derive(Debug)]
pub struct FileBackend {
    root: PathBuf,
}

impl FileBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Backend at the default state directory, `~/.local/state/fwtag/`.
    pub fn open_default() -> Result<Self> {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .context("Could not determine home directory")?;
        Ok(Self::new(
            PathBuf::from(home).join(".local").join("state").join("fwtag"),
        ))
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl StorageBackend for FileBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        match std::fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("read {}", path.display())),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        std::fs::create_dir_all(&self.root)
            .with_context(|| format!("create dir {}", self.root.display()))?;
        let path = self.key_path(key);
        std::fs::write(&path, value).with_context(|| format!("write {}", path.display()))
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.key_path(key);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("remove {}", path.display())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn memory_backend_round_trips() {
        let mut backend = MemoryBackend::new();
        assert!(backend.get("k").expect("get").is_none());
        backend.set("k", "v").expect("set");
        assert_eq!(backend.get("k").expect("get").as_deref(), Some("v"));
        backend.remove("k").expect("remove");
        assert!(backend.get("k").expect("get").is_none());
    }

    #[test]
    fn file_backend_missing_key_reads_as_none() {
        let dir = tempdir().expect("temp dir");
        let backend = FileBackend::new(dir.path());
        assert!(backend.get("absent").expect("get").is_none());
    }

    #[test]
    fn file_backend_creates_root_on_first_write() {
        let dir = tempdir().expect("temp dir");
        let mut backend = FileBackend::new(dir.path().join("nested/state"));
        backend.set("tags", "[]").expect("set");
        assert_eq!(backend.get("tags").expect("get").as_deref(), Some("[]"));
    }

    #[test]
    fn file_backend_remove_is_idempotent() {
        let dir = tempdir().expect("temp dir");
        let mut backend = FileBackend::new(dir.path());
        backend.set("tags", "[]").expect("set");
        backend.remove("tags").expect("remove");
        backend.remove("tags").expect("second remove");
        assert!(backend.get("tags").expect("get").is_none());
    }
}
