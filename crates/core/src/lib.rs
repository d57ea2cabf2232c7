//! Convoy core: a conversion routing engine.
//!
//! No single codec backend covers every pair of media formats a user
//! might request. Convoy models backends as [`handler::Handler`]s that
//! each declare readable and writable formats, searches breadth-first
//! for a chain of handlers connecting the input MIME to the requested
//! output MIME, executes candidate chains step by step with prefix
//! reuse, and remembers working chains across sessions.

pub mod config;
pub mod executor;
pub mod handler;
pub mod metrics;
pub mod pathstore;
pub mod progress;
pub mod registry;
pub mod router;
pub mod searcher;
pub mod testing;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, RouterConfig,
    StorageConfig,
};
pub use executor::{AttemptExecutor, AttemptError};
pub use handler::{FileData, Format, Handler, HandlerError};
pub use pathstore::{route_key, JsonPathStore, PathStore, PathStoreError};
pub use progress::{ChannelProgress, NoopProgress, ProgressEvent, ProgressObserver};
pub use registry::{Chain, ConversionOption, FormatCache, FormatRegistry};
pub use router::{ConversionRouter, ConvertRequest, RouterError};
pub use searcher::{PathSearcher, RouteOutcome, SearchMode, MAX_CHAIN_LEN};
