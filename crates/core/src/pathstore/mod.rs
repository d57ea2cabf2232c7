//! Persistent path recall.
//!
//! Chains that worked once are remembered across sessions, keyed by the
//! conversion endpoints, so a repeat request replays the known chain
//! instead of searching. Entries are evicted only when a replay fails.

mod json_store;
mod store;

pub use json_store::JsonPathStore;
pub use store::{route_key, PathStore, PathStoreError, StoredNode, StoredPath};
