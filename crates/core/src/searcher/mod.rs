//! Path search.
//!
//! A bounded breadth-first search over the handler-format graph. Partial
//! chains grow from the user's input option; each dequeued chain first
//! tries to close directly onto the target, then falls back (once per
//! search) to any-input writers, then expands one hop in every readable
//! direction. The first candidate that executes end-to-end wins.

mod bfs;
mod types;

pub use bfs::PathSearcher;
pub use types::{RouteOutcome, SearchMode, MAX_CHAIN_LEN};
