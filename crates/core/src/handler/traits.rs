//! Trait definition for format handlers.

use async_trait::async_trait;

use super::error::HandlerError;
use super::types::{FileData, Format};

/// A codec backend that can convert file sets between its declared formats.
///
/// Handlers initialise lazily: `supported_formats` may be empty until a
/// successful `init`, and is immutable afterwards. `init` is invoked at
/// most once per process; callers check `ready` first.
#[async_trait]
pub trait Handler: Send + Sync {
    /// Unique handler name, used as identity and cache key.
    fn name(&self) -> &str;

    /// True iff `init` has completed successfully.
    fn ready(&self) -> bool;

    /// The formats this handler declares. Possibly empty until `init`,
    /// stable thereafter.
    fn supported_formats(&self) -> Vec<Format>;

    /// Whether this handler accepts any input MIME (e.g. a renamer or a
    /// universal rasteriser).
    fn supports_any_input(&self) -> bool {
        false
    }

    /// Loads the backend and populates `supported_formats`. May fail; a
    /// failed handler is skipped by the registry and retried never.
    async fn init(&self) -> Result<(), HandlerError>;

    /// Converts a file set from one declared format to another.
    ///
    /// Input files are immutable; the returned buffers are newly owned.
    /// Fails by returning an error; returning any entry with empty bytes
    /// is treated as a failure by the executor.
    async fn convert(
        &self,
        files: &[FileData],
        from: &Format,
        to: &Format,
    ) -> Result<Vec<FileData>, HandlerError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct UppercaseHandler;

    #[async_trait]
    impl Handler for UppercaseHandler {
        fn name(&self) -> &str {
            "uppercase"
        }

        fn ready(&self) -> bool {
            true
        }

        fn supported_formats(&self) -> Vec<Format> {
            vec![
                Format::new("Plain text", "txt", "txt", "text/plain").read_only(),
                Format::new("Shouting text", "shout", "txt", "text/x-shout").write_only(),
            ]
        }

        async fn init(&self) -> Result<(), HandlerError> {
            Ok(())
        }

        async fn convert(
            &self,
            files: &[FileData],
            _from: &Format,
            _to: &Format,
        ) -> Result<Vec<FileData>, HandlerError> {
            Ok(files
                .iter()
                .map(|f| FileData::new(f.name.clone(), f.bytes.to_ascii_uppercase()))
                .collect())
        }
    }

    #[tokio::test]
    async fn test_handler_convert() {
        let handler = UppercaseHandler;
        let formats = handler.supported_formats();
        let files = vec![FileData::new("a.txt", b"hello".to_vec())];

        let out = handler
            .convert(&files, &formats[0], &formats[1])
            .await
            .unwrap();
        assert_eq!(out[0].bytes, b"HELLO");
    }

    #[test]
    fn test_any_input_defaults_to_false() {
        assert!(!UppercaseHandler.supports_any_input());
    }
}
