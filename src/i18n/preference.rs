use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};


use crate::foundation::error::{SiteError, SiteResult};

/// Storage key holding the visitor's language choice.
pub const LANGUAGE_KEY: &str = "preferred-language";

/// Small string key-value store for visitor preferences.
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> SiteResult<()>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> SiteResult<()> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// JSON object on disk. Writes go to a sibling temp file that is then renamed over the target.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> SiteResult<BTreeMap<String, String>> {
        let bytes = match std::fs::read(&self.path) {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(SiteError::storage(format!(
                    "read '{}': {e}",
                    self.path.display()
                )));
            }
        };
        serde_json::from_slice(&bytes).map_err(|e| {
            SiteError::storage(format!("parse '{}': {e}", self.path.display()))
        })
    }

    fn write_all(&self, values: &BTreeMap<String, String>) -> SiteResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                SiteError::storage(format!("create dir '{}': {e}", parent.display()))
            })?;
        }
        let tmp = self.path.with_extension("tmp");
        let json = serde_json::to_vec_pretty(values)?;
        std::fs::write(&tmp, json)
            .map_err(|e| SiteError::storage(format!("write '{}': {e}", tmp.display())))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| {
            SiteError::storage(format!("replace '{}': {e}", self.path.display()))
        })?;
        Ok(())
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        match self.read_all() {
            Ok(mut values) => values.remove(key),
            Err(err) => {
                tracing::warn!(error = %err, "ignoring unreadable preference file");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> SiteResult<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        // A corrupt file is replaced rather than blocking every later write.
        let mut values = self.read_all().unwrap_or_default();
        values.insert(key.to_owned(), value.to_owned());
        self.write_all(&values)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/i18n/preference.rs"]
mod tests;
