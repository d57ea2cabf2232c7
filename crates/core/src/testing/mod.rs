//! Testing utilities and mock implementations.
//!
//! This module provides a scriptable [`MockHandler`] so routing behavior
//! can be tested end-to-end without real codec backends.
//!
//! # Example
//!
//! ```rust,ignore
//! use convoy_core::testing::{fixtures, MockHandler};
//!
//! let images = MockHandler::new("images").with_formats(vec![
//!     fixtures::format("png", "image/png"),
//!     fixtures::format("jpeg", "image/jpeg"),
//! ]);
//!
//! // Script a failure, then assert on what was converted.
//! images.fail_next_convert();
//! // ... run a conversion ...
//! assert_eq!(images.conversion_count(), 1);
//! ```

mod mock_handler;

pub use mock_handler::{MockHandler, RecordedConversion};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::handler::Format;

    /// Create a read/write format with a reasonable name and extension
    /// derived from the code.
    pub fn format(code: &str, mime: &str) -> Format {
        Format::new(code.to_uppercase(), code, code, mime)
    }

    /// Create a read-only (decodable, not encodable) format.
    pub fn read_only(code: &str, mime: &str) -> Format {
        format(code, mime).read_only()
    }

    /// Create a write-only (encodable, not decodable) format.
    pub fn write_only(code: &str, mime: &str) -> Format {
        format(code, mime).write_only()
    }
}
