//! Persistent cache of declared handler formats.

use std::collections::HashMap;
use std::path::Path;

use tracing::warn;

use crate::handler::Format;

use super::registry::RegistryError;

/// Format lists keyed by handler name, persisted as a JSON array of
/// `[handler_name, formats]` pairs so handlers need not be initialised on
/// every startup just to learn what they support.
#[derive(Debug, Clone, Default)]
pub struct FormatCache {
    entries: HashMap<String, Vec<Format>>,
}

impl FormatCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the cache from a JSON file. A missing or unreadable file is
    /// tolerated as an empty cache with a warning.
    pub fn load(path: &Path) -> Self {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Format cache {} not loaded: {}", path.display(), e);
                return Self::new();
            }
        };

        match serde_json::from_str::<Vec<(String, Vec<Format>)>>(&raw) {
            Ok(pairs) => Self {
                entries: pairs.into_iter().collect(),
            },
            Err(e) => {
                warn!("Format cache {} is corrupt: {}", path.display(), e);
                Self::new()
            }
        }
    }

    /// Writes the cache back to disk, sorted by handler name so the file
    /// is stable across runs.
    pub fn save(&self, path: &Path) -> Result<(), RegistryError> {
        let mut pairs: Vec<(&String, &Vec<Format>)> = self.entries.iter().collect();
        pairs.sort_by(|a, b| a.0.cmp(b.0));

        let json = serde_json::to_string_pretty(&pairs)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// The cached formats for a handler, if present.
    pub fn get(&self, handler_name: &str) -> Option<&[Format]> {
        self.entries.get(handler_name).map(|f| f.as_slice())
    }

    /// Records the declared formats of a handler.
    pub fn insert(&mut self, handler_name: impl Into<String>, formats: Vec<Format>) {
        self.entries.insert(handler_name.into(), formats);
    }

    /// Number of handlers with cached formats.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    #[test]
    fn test_missing_file_is_empty_cache() {
        let cache = FormatCache::load(Path::new("/nonexistent/formats.json"));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_corrupt_file_is_empty_cache() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("formats.json");
        std::fs::write(&path, "{not json").unwrap();

        let cache = FormatCache::load(&path);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("formats.json");

        let mut cache = FormatCache::new();
        cache.insert(
            "images",
            vec![
                fixtures::format("png", "image/png"),
                fixtures::format("jpeg", "image/jpeg"),
            ],
        );
        cache.save(&path).unwrap();

        let loaded = FormatCache::load(&path);
        assert_eq!(loaded.len(), 1);
        let formats = loaded.get("images").unwrap();
        assert_eq!(formats.len(), 2);
        assert_eq!(formats[0].format, "png");
    }

    #[test]
    fn test_file_is_array_of_pairs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("formats.json");

        let mut cache = FormatCache::new();
        cache.insert("vector", vec![fixtures::format("svg", "image/svg+xml")]);
        cache.save(&path).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value[0][0], "vector");
        assert_eq!(value[0][1][0]["format"], "svg");
    }
}
