use anyhow::{bail, Context, Result};
use std::{
    cell::{Cell, RefCell},
    fs,
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
    rc::Rc,
};
use tracing::debug;

pub const DEFAULT_STORAGE_KEY: &str = "catalog-jubei";

/// A single named slot holding the serialized catalog.
///
/// Callers treat every method as best-effort: a failed `save` must never
/// change in-memory state, and a failed `load` is equivalent to `Ok(None)`.
pub trait SnapshotStore {
    fn load(&self) -> Result<Option<String>>;

    fn save(&self, snapshot: &str) -> Result<()>;

    /// When false the caller skips `save` entirely.
    fn is_available(&self) -> bool {
        true
    }
}

impl<T: SnapshotStore + ?Sized> SnapshotStore for Box<T> {
    fn load(&self) -> Result<Option<String>> {
        (**self).load()
    }

    fn save(&self, snapshot: &str) -> Result<()> {
        (**self).save(snapshot)
    }

    fn is_available(&self) -> bool {
        (**self).is_available()
    }
}

/// Stores the slot `<key>` as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    dir: PathBuf,
    key: String,
}

impl FileSnapshotStore {
    pub fn new(dir: impl Into<PathBuf>, key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        validate_key(&key)?;
        let mut dir = dir.into();
        if dir.as_os_str().is_empty() {
            dir = PathBuf::from(".");
        }
        Ok(Self { dir, key })
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(format!("{}.json", self.key))
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn load(&self) -> Result<Option<String>> {
        let path = self.path();
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err)
                .with_context(|| format!("failed to read snapshot '{}'", path.display())),
        }
    }

    fn save(&self, snapshot: &str) -> Result<()> {
        ensure_dir_exists(&self.dir)?;
        let path = self.path();

        // Same-directory temp file so the final rename stays on one filesystem.
        let mut staged = tempfile::NamedTempFile::new_in(&self.dir).with_context(|| {
            format!("failed to stage snapshot in '{}'", self.dir.display())
        })?;
        staged
            .write_all(snapshot.as_bytes())
            .context("failed to write staged snapshot")?;
        staged
            .persist(&path)
            .map_err(|err| err.error)
            .with_context(|| format!("failed to replace snapshot '{}'", path.display()))?;

        debug!(path = %path.display(), bytes = snapshot.len(), "snapshot saved");
        Ok(())
    }
}

/// In-process slot. Clones share the same slot, so a second store opened on a
/// clone sees what the first one saved.
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshotStore {
    slot: Rc<RefCell<Option<String>>>,
    saves: Rc<Cell<usize>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: impl Into<String>) -> Self {
        let store = Self::new();
        store.slot.replace(Some(snapshot.into()));
        store
    }

    pub fn snapshot(&self) -> Option<String> {
        self.slot.borrow().clone()
    }

    /// Number of successful `save` calls across all clones.
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.snapshot())
    }

    fn save(&self, snapshot: &str) -> Result<()> {
        self.slot.replace(Some(snapshot.to_string()));
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}

/// Backend used when no persistent storage exists.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledSnapshotStore;

impl SnapshotStore for DisabledSnapshotStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(None)
    }

    fn save(&self, _snapshot: &str) -> Result<()> {
        bail!("persistent storage is not available")
    }

    fn is_available(&self) -> bool {
        false
    }
}

fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        bail!("storage key must not be empty");
    }
    if let Some(bad) = key
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
    {
        bail!("storage key '{key}' contains unsupported character {bad:?}");
    }
    Ok(())
}

fn ensure_dir_exists(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create data directory '{}'", dir.display()))
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
