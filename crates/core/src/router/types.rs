//! Request and error types for the routing facade.

use thiserror::Error;

use crate::handler::FileData;
use crate::pathstore::PathStoreError;
use crate::registry::{ConversionOption, RegistryError};

/// One user-initiated conversion.
#[derive(Debug)]
pub struct ConvertRequest {
    /// Input files, owned by the request.
    pub files: Vec<FileData>,
    /// The user-selected input option; becomes the first node of every
    /// candidate chain.
    pub input: ConversionOption,
    /// The user-selected output option. In simple mode only its MIME
    /// matters; in advanced mode the exact handler is required.
    pub output: ConversionOption,
    /// Simple mode folds together all handlers able to produce the target
    /// MIME; advanced mode asks for the selected producer specifically.
    pub simple_mode: bool,
}

/// Failures of the router itself, as opposed to expected per-hop failures
/// the search absorbs.
#[derive(Debug, Error)]
pub enum RouterError {
    /// The selected input option has no MIME identity.
    #[error("input option declares no MIME")]
    MissingInputMime,

    /// The selected output option has no MIME identity.
    #[error("output option declares no MIME")]
    MissingOutputMime,

    /// The path store could not be updated.
    #[error(transparent)]
    PathStore(#[from] PathStoreError),

    /// The format cache could not be written back at startup.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}
