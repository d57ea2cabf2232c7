//! Conversion routing facade.
//!
//! Ties the pieces together for one user-initiated conversion: fast-path
//! passthrough when input and output MIME agree, recall and replay of a
//! previously stored chain, eviction of stale entries, breadth-first
//! search for new chains, and persistence of whatever worked.
//!
//! [`ConversionRouter::from_config`] bootstraps the whole stack at the
//! locations named in [`crate::config::StorageConfig`], writing the
//! format cache back after registry construction so declared formats
//! survive across processes.

mod engine;
mod types;

pub use engine::ConversionRouter;
pub use types::{ConvertRequest, RouterError};
