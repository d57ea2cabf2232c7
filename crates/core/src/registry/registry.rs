//! Registry construction and lookup.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use crate::handler::Handler;

use super::format_cache::FormatCache;
use super::types::ConversionOption;

/// Errors raised while building or persisting registry state.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// I/O error while reading or writing the format cache.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The format cache could not be serialised.
    #[error("serialisation error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// The canonical pool of `(handler, format)` options plus the derived
/// indexes the path searcher needs.
pub struct FormatRegistry {
    options: Vec<ConversionOption>,
    by_from_mime: HashMap<String, Vec<Arc<dyn Handler>>>,
    any_input_writers: Vec<ConversionOption>,
}

impl FormatRegistry {
    /// Builds the registry from a handler list.
    ///
    /// Handlers whose formats are already in the cache are not initialised
    /// here (the executor initialises them lazily before their first
    /// convert). Handlers missing from the cache get `init()` invoked;
    /// on failure the handler is skipped with a warning. Freshly learned
    /// format lists are written back into the cache keyed by handler name.
    ///
    /// Only formats with a MIME and at least one of `from`/`to` enter the
    /// option pool; the iteration order of `handlers` and of each format
    /// list is preserved, which fixes the search enumeration order.
    pub async fn build(handlers: Vec<Arc<dyn Handler>>, cache: &mut FormatCache) -> Self {
        let mut options = Vec::new();
        let mut by_from_mime: HashMap<String, Vec<Arc<dyn Handler>>> = HashMap::new();
        let mut any_input_writers = Vec::new();

        for handler in handlers {
            let formats = match cache.get(handler.name()) {
                Some(cached) => cached.to_vec(),
                None => {
                    if let Err(e) = handler.init().await {
                        warn!("Skipping handler {}: {}", handler.name(), e);
                        continue;
                    }
                    let fresh = handler.supported_formats();
                    cache.insert(handler.name(), fresh.clone());
                    fresh
                }
            };

            for format in formats {
                let Some(mime) = format.mime.clone() else {
                    continue;
                };
                if !format.from && !format.to {
                    continue;
                }

                if format.from {
                    let readers = by_from_mime.entry(mime).or_default();
                    if !readers.iter().any(|h| h.name() == handler.name()) {
                        readers.push(Arc::clone(&handler));
                    }
                }

                let option = ConversionOption::new(Arc::clone(&handler), format);
                if handler.supports_any_input() && option.format.to {
                    any_input_writers.push(option.clone());
                }
                options.push(option);
            }
        }

        debug!(
            "Registry built: {} options, {} readable MIMEs, {} any-input writers",
            options.len(),
            by_from_mime.len(),
            any_input_writers.len()
        );

        Self {
            options,
            by_from_mime,
            any_input_writers,
        }
    }

    /// The full option pool, in construction order.
    pub fn options(&self) -> &[ConversionOption] {
        &self.options
    }

    /// Handlers declaring a `from`-enabled format at the given MIME.
    pub fn handlers_reading(&self, mime: &str) -> &[Arc<dyn Handler>] {
        self.by_from_mime
            .get(mime)
            .map(|handlers| handlers.as_slice())
            .unwrap_or(&[])
    }

    /// Writer options of handlers that accept any input MIME.
    pub fn any_input_writers(&self) -> &[ConversionOption] {
        &self.any_input_writers
    }

    /// Locates the option matching a persisted chain node: handler name,
    /// format MIME, and format code must all agree.
    pub fn resolve(&self, handler_name: &str, mime: &str, format_code: &str) -> Option<&ConversionOption> {
        self.options.iter().find(|option| {
            option.handler_name() == handler_name
                && option.mime() == Some(mime)
                && option.format.format == format_code
        })
    }

    /// Writer options belonging to one handler, in declaration order.
    pub fn writer_options_for<'a>(&'a self, handler_name: &'a str) -> impl Iterator<Item = &'a ConversionOption> + 'a {
        self.options
            .iter()
            .filter(move |option| option.handler_name() == handler_name && option.format.to)
    }
}
