//! Format registry.
//!
//! Builds the canonical pool of `(handler, format)` options from a set of
//! handlers, consulting a persistent format cache so handlers whose
//! declared formats are already known are not initialised eagerly. Derives
//! the `by_from_mime` index used for neighbour expansion during path
//! search, and the flattened set of any-input writer options used as a
//! one-shot search fallback.

mod format_cache;
mod registry;
mod types;

pub use format_cache::FormatCache;
pub use registry::{FormatRegistry, RegistryError};
pub use types::{describe_chain, Chain, ConversionOption};
