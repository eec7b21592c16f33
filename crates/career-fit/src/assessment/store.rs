use super::domain::AssessmentData;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Fixed key the completed answer snapshot is stored under.
pub const STORAGE_KEY: &str = "assessmentData";

/// Storage abstraction for the single completed assessment.
///
/// `load_raw` returns the stored text untouched so callers can tell a missing
/// record from one that no longer parses.
pub trait AssessmentStore: Send + Sync {
    fn save(&self, data: &AssessmentData) -> Result<(), StoreError>;
    fn load_raw(&self) -> Result<Option<String>, StoreError>;
    fn clear(&self) -> Result<(), StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store io failure at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode assessment data: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Keeps the record as `<dir>/assessmentData.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(format!("{STORAGE_KEY}.json"))
    }

    fn io_error(path: &Path, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl AssessmentStore for JsonFileStore {
    fn save(&self, data: &AssessmentData) -> Result<(), StoreError> {
        let encoded = serde_json::to_string_pretty(data)?;
        fs::create_dir_all(&self.dir).map_err(|err| Self::io_error(&self.dir, err))?;
        let path = self.path();
        fs::write(&path, encoded).map_err(|err| Self::io_error(&path, err))
    }

    fn load_raw(&self) -> Result<Option<String>, StoreError> {
        let path = self.path();
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(Self::io_error(&path, err)),
        }
    }

    fn clear(&self) -> Result<(), StoreError> {
        let path = self.path();
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(Self::io_error(&path, err)),
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    slot: Arc<Mutex<Option<String>>>,
}

impl InMemoryStore {
    /// Seeds the slot with arbitrary text, including text that will not parse.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(raw.into()))),
        }
    }

    fn with_slot<T>(&self, f: impl FnOnce(&mut Option<String>) -> T) -> Result<T, StoreError> {
        let mut guard = self
            .slot
            .lock()
            .map_err(|_| StoreError::Unavailable("in-memory store mutex poisoned".to_string()))?;
        Ok(f(&mut guard))
    }
}

impl AssessmentStore for InMemoryStore {
    fn save(&self, data: &AssessmentData) -> Result<(), StoreError> {
        let encoded = serde_json::to_string(data)?;
        self.with_slot(|slot| *slot = Some(encoded))
    }

    fn load_raw(&self) -> Result<Option<String>, StoreError> {
        self.with_slot(|slot| slot.clone())
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.with_slot(|slot| *slot = None)
    }
}
