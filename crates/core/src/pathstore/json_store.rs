//! JSON-file-backed path store.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use tracing::{debug, warn};

use crate::registry::{Chain, ConversionOption, FormatRegistry};

use super::store::{PathStore, PathStoreError, StoredPath};

/// Path store persisted as a single JSON object mapping route keys to
/// stored chains. The whole map is rewritten on every mutation; entries
/// are few and small.
pub struct JsonPathStore {
    path: PathBuf,
    entries: RwLock<HashMap<String, StoredPath>>,
}

impl JsonPathStore {
    /// Opens the store at `path`. A missing file starts empty; a corrupt
    /// file is treated as empty with a warning.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let entries = match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!("Path store {} is corrupt: {}", path.display(), e);
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                warn!("Path store {} not loaded: {}", path.display(), e);
                HashMap::new()
            }
        };

        Self {
            path,
            entries: RwLock::new(entries),
        }
    }

    /// Number of stored routes.
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    /// Whether the store holds no routes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn persist(&self, entries: &HashMap<String, StoredPath>) -> Result<(), PathStoreError> {
        let json = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

impl PathStore for JsonPathStore {
    fn recall(&self, key: &str, registry: &FormatRegistry) -> Option<Chain> {
        let entries = self.entries.read().ok()?;
        let stored = entries.get(key)?;
        match stored.resolve(registry) {
            Some(chain) => Some(chain),
            None => {
                debug!("Stored path for {} no longer resolvable", key);
                None
            }
        }
    }

    fn store(&self, key: &str, chain: &[ConversionOption]) -> Result<(), PathStoreError> {
        let Some(stored) = StoredPath::from_chain(chain) else {
            warn!("Refusing to store chain with MIME-less node for {}", key);
            return Ok(());
        };

        let mut entries = match self.entries.write() {
            Ok(entries) => entries,
            Err(poisoned) => poisoned.into_inner(),
        };
        entries.insert(key.to_string(), stored);
        self.persist(&entries)
    }

    fn evict(&self, key: &str) -> Result<(), PathStoreError> {
        let mut entries = match self.entries.write() {
            Ok(entries) => entries,
            Err(poisoned) => poisoned.into_inner(),
        };
        if entries.remove(key).is_some() {
            debug!("Evicted stored path for {}", key);
            self.persist(&entries)?;
        }
        Ok(())
    }
}
