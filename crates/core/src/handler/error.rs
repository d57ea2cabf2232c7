//! Error types for format handlers.

use thiserror::Error;

/// Errors a handler can produce.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The handler backend failed to load.
    #[error("initialisation failed: {reason}")]
    InitFailed { reason: String },

    /// A conversion could not be carried out.
    #[error("conversion failed: {reason}")]
    ConversionFailed { reason: String },

    /// The handler does not support the requested direction.
    #[error("unsupported conversion: {from} -> {to}")]
    UnsupportedConversion { from: String, to: String },

    /// I/O error inside the handler.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl HandlerError {
    /// Creates a new initialisation failure.
    pub fn init_failed(reason: impl Into<String>) -> Self {
        Self::InitFailed {
            reason: reason.into(),
        }
    }

    /// Creates a new conversion failure.
    pub fn conversion_failed(reason: impl Into<String>) -> Self {
        Self::ConversionFailed {
            reason: reason.into(),
        }
    }

    /// Creates a new unsupported-conversion error.
    pub fn unsupported(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::UnsupportedConversion {
            from: from.into(),
            to: to.into(),
        }
    }
}
