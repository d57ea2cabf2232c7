//! Router implementation.

use std::sync::Arc;

use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::config::{Config, RouterConfig};
use crate::executor::AttemptExecutor;
use crate::handler::Handler;
use crate::metrics;
use crate::pathstore::{route_key, JsonPathStore, PathStore};
use crate::progress::ProgressObserver;
use crate::registry::{describe_chain, FormatCache, FormatRegistry};
use crate::searcher::{PathSearcher, RouteOutcome, SearchMode};

use super::types::{ConvertRequest, RouterError};

/// Drives one conversion request from recall through search to
/// persistence.
pub struct ConversionRouter {
    registry: Arc<FormatRegistry>,
    path_store: Arc<dyn PathStore>,
    config: RouterConfig,
}

impl ConversionRouter {
    /// Creates a router over a built registry and an opened path store.
    pub fn new(
        registry: Arc<FormatRegistry>,
        path_store: Arc<dyn PathStore>,
        config: RouterConfig,
    ) -> Self {
        Self {
            registry,
            path_store,
            config,
        }
    }

    /// Bootstraps a router from configuration.
    ///
    /// Loads the format cache and path store from their configured
    /// locations, builds the registry (initialising only handlers the
    /// cache does not cover), and writes freshly-learned format lists
    /// back to disk so the next process skips those inits too.
    pub async fn from_config(
        config: &Config,
        handlers: Vec<Arc<dyn Handler>>,
    ) -> Result<Self, RouterError> {
        let cache_path = &config.storage.format_cache_path;
        let mut cache = FormatCache::load(cache_path);
        let registry = Arc::new(FormatRegistry::build(handlers, &mut cache).await);
        cache.save(cache_path)?;

        let path_store = Arc::new(JsonPathStore::open(&config.storage.path_store_path));
        Ok(Self::new(registry, path_store, config.router.clone()))
    }

    /// The registry backing this router.
    pub fn registry(&self) -> &FormatRegistry {
        &self.registry
    }

    /// Converts the request's files into the requested output format.
    ///
    /// Recall is tried before search; a stored chain that no longer
    /// replays is evicted and the request falls through to a fresh
    /// search. Successful chains (and usable timeout prefixes) are
    /// persisted before returning.
    pub async fn convert(
        &self,
        request: ConvertRequest,
        progress: &dyn ProgressObserver,
    ) -> Result<RouteOutcome, RouterError> {
        let input_mime = request
            .input
            .mime()
            .map(str::to_string)
            .ok_or(RouterError::MissingInputMime)?;
        let output_mime = request
            .output
            .mime()
            .map(str::to_string)
            .ok_or(RouterError::MissingOutputMime)?;

        // Same MIME in and out: hand the bytes straight back.
        if input_mime == output_mime {
            debug!("Passthrough for {}", input_mime);
            return Ok(RouteOutcome::Converted {
                files: request.files,
                chain: Vec::new(),
            });
        }

        let key = route_key(
            &input_mime,
            &output_mime,
            (!request.simple_mode).then(|| request.output.handler_name()),
        );

        if let Some(chain) = self.path_store.recall(&key, &self.registry) {
            info!("Replaying stored path for {}", key);
            progress.on_path_attempt(&chain);

            let mut replay = AttemptExecutor::new();
            match replay.attempt(&request.files, &chain, progress).await {
                Ok(files) => {
                    metrics::PATH_RECALLS.with_label_values(&["hit"]).inc();
                    return Ok(RouteOutcome::Converted { files, chain });
                }
                Err(e) => {
                    warn!("Stored path for {} went stale: {}", key, e);
                    metrics::PATH_RECALLS.with_label_values(&["stale"]).inc();
                    self.path_store.evict(&key)?;
                }
            }
        } else {
            metrics::PATH_RECALLS.with_label_values(&["miss"]).inc();
        }

        let mode = if request.simple_mode {
            SearchMode::Simple
        } else {
            SearchMode::Advanced
        };
        let deadline = Instant::now() + self.config.search_timeout();

        // The prefix cache lives and dies with this search.
        let mut executor = AttemptExecutor::new();
        let searcher = PathSearcher::new(&self.registry, mode);
        let outcome = searcher
            .find_path(
                &mut executor,
                &request.files,
                &request.output,
                vec![vec![request.input.clone()]],
                progress,
                deadline,
            )
            .await;

        metrics::SEARCH_OUTCOMES
            .with_label_values(&[outcome.label()])
            .inc();

        match &outcome {
            RouteOutcome::Converted { chain, .. } => {
                info!("Route found for {}: {}", key, describe_chain(chain));
                self.path_store.store(&key, chain)?;
            }
            RouteOutcome::Partial { chain, .. } => {
                // A partial ends at a different MIME than requested, so it
                // is stored under its actual endpoints where a future
                // request for that pair can reuse it.
                if let Some(last_mime) = chain.last().and_then(|node| node.mime()) {
                    let partial_key = route_key(&input_mime, last_mime, None);
                    info!(
                        "Search for {} timed out; keeping partial {}",
                        key,
                        describe_chain(chain)
                    );
                    self.path_store.store(&partial_key, chain)?;
                }
            }
            RouteOutcome::Timeout => warn!("Search for {} timed out with no progress", key),
            RouteOutcome::NoRoute => info!("No route for {}", key),
        }

        Ok(outcome)
    }
}
