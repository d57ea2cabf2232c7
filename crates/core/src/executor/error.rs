//! Error types for chain execution.

use thiserror::Error;

use crate::handler::HandlerError;

/// Why a candidate chain failed to execute.
///
/// These are expected outcomes during a search; the searcher logs them
/// and moves on to the next candidate.
#[derive(Debug, Error)]
pub enum AttemptError {
    /// The handler for an upcoming hop failed to initialise.
    #[error("handler {handler} failed to initialise: {source}")]
    InitFailed {
        handler: String,
        #[source]
        source: HandlerError,
    },

    /// A hop's convert call failed.
    #[error("hop {step} ({handler}) failed: {source}")]
    HopFailed {
        step: usize,
        handler: String,
        #[source]
        source: HandlerError,
    },

    /// A hop returned a file with no content.
    #[error("hop {step} ({handler}) produced empty output for {file}")]
    EmptyOutput {
        step: usize,
        handler: String,
        file: String,
    },

    /// The chain violates its own construction invariants. This is a bug
    /// in chain construction, not an expected per-hop failure.
    #[error("chain node {step} declares no readable format for MIME {mime}")]
    BrokenChain { step: usize, mime: String },
}
