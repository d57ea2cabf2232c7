//! Path store trait and persisted chain representation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::registry::{Chain, ConversionOption, FormatRegistry};

/// Errors raised by path store backends.
#[derive(Debug, Error)]
pub enum PathStoreError {
    /// I/O error while persisting.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The store could not be serialised.
    #[error("serialisation error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// One persisted chain node. Enough to re-locate the live option in the
/// current registry: handler name, format MIME, and format code must all
/// match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredNode {
    pub handler_name: String,
    pub format_mime: String,
    pub format_code: String,
}

/// A persisted chain plus when it was recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredPath {
    pub nodes: Vec<StoredNode>,
    pub stored_at: DateTime<Utc>,
}

impl StoredPath {
    /// Serialises a live chain. Returns `None` if any node lacks a MIME,
    /// which registry construction makes impossible for search-produced
    /// chains.
    pub fn from_chain(chain: &[ConversionOption]) -> Option<Self> {
        let nodes = chain
            .iter()
            .map(|node| {
                Some(StoredNode {
                    handler_name: node.handler_name().to_string(),
                    format_mime: node.mime()?.to_string(),
                    format_code: node.format.format.clone(),
                })
            })
            .collect::<Option<Vec<_>>>()?;

        Some(Self {
            nodes,
            stored_at: Utc::now(),
        })
    }

    /// Reconstructs a live chain against the current registry. Any
    /// unresolvable node invalidates the whole entry.
    pub fn resolve(&self, registry: &FormatRegistry) -> Option<Chain> {
        self.nodes
            .iter()
            .map(|node| {
                registry
                    .resolve(&node.handler_name, &node.format_mime, &node.format_code)
                    .cloned()
            })
            .collect()
    }
}

/// Builds the store key for a conversion request.
///
/// Simple mode keys on the MIME pair alone; advanced mode additionally
/// pins the producing handler.
pub fn route_key(input_mime: &str, output_mime: &str, output_handler: Option<&str>) -> String {
    match output_handler {
        Some(handler) => format!("{input_mime}→{output_mime}:{handler}"),
        None => format!("{input_mime}→{output_mime}"),
    }
}

/// Persistent mapping from conversion endpoints to known-good chains.
pub trait PathStore: Send + Sync {
    /// Reconstructs the stored chain for `key` against the live registry,
    /// or `None` when the key is absent or no longer resolvable.
    fn recall(&self, key: &str, registry: &FormatRegistry) -> Option<Chain>;

    /// Records a chain for `key`, overwriting any previous entry.
    fn store(&self, key: &str, chain: &[ConversionOption]) -> Result<(), PathStoreError>;

    /// Removes the entry for `key`, if present.
    fn evict(&self, key: &str) -> Result<(), PathStoreError>;
}
