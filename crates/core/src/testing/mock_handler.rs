//! Mock handler for testing.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::handler::{FileData, Format, Handler, HandlerError};

/// A recorded convert call for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedConversion {
    /// MIME read from.
    pub from_mime: Option<String>,
    /// MIME written to.
    pub to_mime: Option<String>,
    /// Format code written to.
    pub to_format: String,
    /// Names of the input files.
    pub file_names: Vec<String>,
    /// Whether the call returned output.
    pub success: bool,
}

/// Mock implementation of the [`Handler`] trait.
///
/// Provides controllable behavior for testing:
/// - Declared formats stay hidden until `init`, like a real lazy backend
/// - Track convert calls for assertions
/// - Script init and convert failures
/// - Simulate slow conversions for deadline tests
#[derive(Debug)]
pub struct MockHandler {
    name: String,
    declared_formats: Vec<Format>,
    any_input: bool,
    ready: AtomicBool,
    init_calls: AtomicUsize,
    fail_init: AtomicBool,
    fail_next_convert: AtomicBool,
    failing_pairs: Mutex<HashSet<(String, String)>>,
    output_bytes: Mutex<Option<Vec<u8>>>,
    convert_delay: Mutex<Duration>,
    recorded: Mutex<Vec<RecordedConversion>>,
}

impl MockHandler {
    /// Create a new mock handler with no declared formats.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_formats: Vec::new(),
            any_input: false,
            ready: AtomicBool::new(false),
            init_calls: AtomicUsize::new(0),
            fail_init: AtomicBool::new(false),
            fail_next_convert: AtomicBool::new(false),
            failing_pairs: Mutex::new(HashSet::new()),
            output_bytes: Mutex::new(None),
            convert_delay: Mutex::new(Duration::ZERO),
            recorded: Mutex::new(Vec::new()),
        }
    }

    /// Adds one declared format.
    pub fn with_format(mut self, format: Format) -> Self {
        self.declared_formats.push(format);
        self
    }

    /// Replaces the declared formats.
    pub fn with_formats(mut self, formats: Vec<Format>) -> Self {
        self.declared_formats = formats;
        self
    }

    /// Marks the handler as accepting any input MIME.
    pub fn accepting_any_input(mut self) -> Self {
        self.any_input = true;
        self
    }

    /// Scripts `init` to fail.
    pub fn failing_init(self) -> Self {
        self.fail_init.store(true, Ordering::SeqCst);
        self
    }

    /// Fixes the bytes of every produced file (empty bytes simulate a
    /// backend that silently produced nothing).
    pub fn with_output_bytes(self, bytes: Vec<u8>) -> Self {
        *self.output_bytes.lock().unwrap() = Some(bytes);
        self
    }

    /// Simulates conversion time.
    pub fn with_convert_delay(self, delay: Duration) -> Self {
        *self.convert_delay.lock().unwrap() = delay;
        self
    }

    /// Makes the next convert call fail, then clears.
    pub fn fail_next_convert(&self) {
        self.fail_next_convert.store(true, Ordering::SeqCst);
    }

    /// Makes every convert between the given MIMEs fail.
    pub fn fail_conversion(&self, from_mime: impl Into<String>, to_mime: impl Into<String>) {
        self.failing_pairs
            .lock()
            .unwrap()
            .insert((from_mime.into(), to_mime.into()));
    }

    /// Number of times `init` was invoked.
    pub fn init_calls(&self) -> usize {
        self.init_calls.load(Ordering::SeqCst)
    }

    /// Number of convert calls, failed ones included.
    pub fn conversion_count(&self) -> usize {
        self.recorded.lock().unwrap().len()
    }

    /// All recorded convert calls.
    pub fn recorded_conversions(&self) -> Vec<RecordedConversion> {
        self.recorded.lock().unwrap().clone()
    }

    /// Clear recorded convert calls.
    pub fn clear_recorded(&self) {
        self.recorded.lock().unwrap().clear();
    }

    fn record(&self, from: &Format, to: &Format, files: &[FileData], success: bool) {
        self.recorded.lock().unwrap().push(RecordedConversion {
            from_mime: from.mime.clone(),
            to_mime: to.mime.clone(),
            to_format: to.format.clone(),
            file_names: files.iter().map(|f| f.name.clone()).collect(),
            success,
        });
    }

    fn should_fail(&self, from: &Format, to: &Format) -> bool {
        if self.fail_next_convert.swap(false, Ordering::SeqCst) {
            return true;
        }
        match (from.mime.as_ref(), to.mime.as_ref()) {
            (Some(from_mime), Some(to_mime)) => self
                .failing_pairs
                .lock()
                .unwrap()
                .contains(&(from_mime.clone(), to_mime.clone())),
            _ => false,
        }
    }
}

#[async_trait]
impl Handler for MockHandler {
    fn name(&self) -> &str {
        &self.name
    }

    fn ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    fn supported_formats(&self) -> Vec<Format> {
        if self.ready() {
            self.declared_formats.clone()
        } else {
            Vec::new()
        }
    }

    fn supports_any_input(&self) -> bool {
        self.any_input
    }

    async fn init(&self) -> Result<(), HandlerError> {
        self.init_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_init.load(Ordering::SeqCst) {
            return Err(HandlerError::init_failed("scripted init failure"));
        }
        self.ready.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn convert(
        &self,
        files: &[FileData],
        from: &Format,
        to: &Format,
    ) -> Result<Vec<FileData>, HandlerError> {
        let delay = *self.convert_delay.lock().unwrap();
        if delay > Duration::ZERO {
            tokio::time::sleep(delay).await;
        }

        if self.should_fail(from, to) {
            self.record(from, to, files, false);
            return Err(HandlerError::conversion_failed("scripted convert failure"));
        }

        self.record(from, to, files, true);

        let override_bytes = self.output_bytes.lock().unwrap().clone();
        let output = files
            .iter()
            .map(|file| {
                let stem = file.name.split('.').next().unwrap_or(&file.name);
                let bytes = override_bytes
                    .clone()
                    .unwrap_or_else(|| format!("{}:{}", to.format, file.bytes.len()).into_bytes());
                FileData::new(format!("{}.{}", stem, to.extension), bytes)
            })
            .collect();

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    fn mock() -> MockHandler {
        MockHandler::new("images").with_formats(vec![
            fixtures::format("png", "image/png"),
            fixtures::format("jpeg", "image/jpeg"),
        ])
    }

    #[tokio::test]
    async fn test_formats_hidden_until_init() {
        let handler = mock();
        assert!(handler.supported_formats().is_empty());

        handler.init().await.unwrap();
        assert!(handler.ready());
        assert_eq!(handler.supported_formats().len(), 2);
    }

    #[tokio::test]
    async fn test_scripted_init_failure() {
        let handler = mock().failing_init();
        assert!(handler.init().await.is_err());
        assert!(!handler.ready());
        assert_eq!(handler.init_calls(), 1);
    }

    #[tokio::test]
    async fn test_convert_records_and_renames() {
        let handler = mock();
        handler.init().await.unwrap();
        let formats = handler.supported_formats();

        let files = vec![FileData::new("photo.png", vec![1, 2, 3])];
        let out = handler
            .convert(&files, &formats[0], &formats[1])
            .await
            .unwrap();

        assert_eq!(out[0].name, "photo.jpeg");
        assert!(!out[0].is_empty());

        let recorded = handler.recorded_conversions();
        assert_eq!(recorded.len(), 1);
        assert!(recorded[0].success);
        assert_eq!(recorded[0].to_format, "jpeg");
        assert_eq!(recorded[0].file_names, vec!["photo.png"]);
    }

    #[tokio::test]
    async fn test_fail_next_convert_is_one_shot() {
        let handler = mock();
        handler.init().await.unwrap();
        let formats = handler.supported_formats();
        let files = vec![FileData::new("photo.png", vec![1])];

        handler.fail_next_convert();
        assert!(handler.convert(&files, &formats[0], &formats[1]).await.is_err());
        assert!(handler.convert(&files, &formats[0], &formats[1]).await.is_ok());

        let recorded = handler.recorded_conversions();
        assert!(!recorded[0].success);
        assert!(recorded[1].success);
    }

    #[tokio::test]
    async fn test_scripted_pair_failure_persists() {
        let handler = mock();
        handler.init().await.unwrap();
        let formats = handler.supported_formats();
        let files = vec![FileData::new("photo.png", vec![1])];

        handler.fail_conversion("image/png", "image/jpeg");
        assert!(handler.convert(&files, &formats[0], &formats[1]).await.is_err());
        assert!(handler.convert(&files, &formats[0], &formats[1]).await.is_err());
        // The reverse direction still works.
        assert!(handler.convert(&files, &formats[1], &formats[0]).await.is_ok());
    }
}
