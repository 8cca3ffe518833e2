use std::{
    collections::{BTreeMap, HashMap},
    fs,
    path::{Path, PathBuf},
};

use parking_lot::{Mutex, RwLock};

use crate::error::LedgerError;

/// String key-value storage the ledger persists into.
pub trait ScoreStore {
    fn get(&self, key: &str) -> Result<Option<String>, LedgerError>;
    fn set(&self, key: &str, value: String) -> Result<(), LedgerError>;
    fn remove(&self, key: &str) -> Result<(), LedgerError>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.read().is_empty()
    }
}

impl ScoreStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, LedgerError> {
        Ok(self.values.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> Result<(), LedgerError> {
        self.values.write().insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), LedgerError> {
        self.values.write().remove(key);
        Ok(())
    }
}

/// One JSON object on disk, rewritten after every change.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: Mutex<BTreeMap<String, String>>,
}

impl JsonFileStore {
    /// Opens `path`, starting empty when the file does not exist yet.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LedgerError> {
        let path = path.as_ref().to_path_buf();
        let values = if path.exists() {
            let bytes = fs::read(&path).map_err(|source| LedgerError::Io {
                path: path.display().to_string(),
                source,
            })?;
            serde_json::from_slice(&bytes)?
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path,
            values: Mutex::new(values),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, values: &BTreeMap<String, String>) -> Result<(), LedgerError> {
        let json = serde_json::to_string_pretty(values)?;
        fs::write(&self.path, json).map_err(|source| LedgerError::Io {
            path: self.path.display().to_string(),
            source,
        })
    }
}

impl ScoreStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, LedgerError> {
        Ok(self.values.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> Result<(), LedgerError> {
        let mut values = self.values.lock();
        let mut next = values.clone();
        next.insert(key.to_string(), value);
        self.flush(&next)?;
        *values = next;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), LedgerError> {
        let mut values = self.values.lock();
        if !values.contains_key(key) {
            return Ok(());
        }
        let mut next = values.clone();
        next.remove(key);
        self.flush(&next)?;
        *values = next;
        Ok(())
    }
}

impl<S: ScoreStore + ?Sized> ScoreStore for &S {
    fn get(&self, key: &str) -> Result<Option<String>, LedgerError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: String) -> Result<(), LedgerError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), LedgerError> {
        (**self).remove(key)
    }
}
