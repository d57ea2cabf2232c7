//! Stepwise chain execution with prefix reuse.

use tracing::{debug, warn};

use crate::handler::{FileData, Format};
use crate::metrics;
use crate::progress::ProgressObserver;
use crate::registry::{describe_chain, ConversionOption};

use super::error::AttemptError;
use super::prefix_cache::PrefixCache;

/// Executes candidate chains for one search.
///
/// The prefix cache inside is shared across all attempts of that search
/// and never escapes it; the router creates a fresh executor per
/// conversion request.
#[derive(Debug, Default)]
pub struct AttemptExecutor {
    cache: PrefixCache,
}

impl AttemptExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Realigns the prefix cache against the chain about to be tried, so
    /// the next [`attempt`](Self::attempt) re-executes from the first
    /// position not covered by the previous candidate.
    pub fn realign(&mut self, chain: &[ConversionOption]) -> usize {
        self.cache.realign(chain)
    }

    /// The longest successfully executed prefix, as `(files, nodes)`.
    /// Used to salvage a partial result when the search deadline fires.
    pub fn executed_prefix(&self) -> Option<(Vec<FileData>, Vec<ConversionOption>)> {
        let files = self.cache.last_files()?.to_vec();
        Some((files, self.cache.executed_nodes()))
    }

    /// Runs `chain` over `files`, hop by hop.
    ///
    /// Any per-hop failure (init, convert, empty output) aborts the
    /// attempt with an error the searcher absorbs. On success the
    /// returned files are the final hop's output.
    pub async fn attempt(
        &mut self,
        files: &[FileData],
        chain: &[ConversionOption],
        progress: &dyn ProgressObserver,
    ) -> Result<Vec<FileData>, AttemptError> {
        let resume = self.cache.realign(chain);
        if resume > 0 {
            metrics::PREFIX_HOPS_REUSED.inc_by(resume as u64);
            debug!("Resuming chain at hop {}: {}", resume, describe_chain(chain));
        }

        let mut working: Vec<FileData> = match self.cache.last_files() {
            Some(cached) if resume > 0 => cached.to_vec(),
            _ => files.to_vec(),
        };

        for step in resume..chain.len().saturating_sub(1) {
            // Let the host repaint before the CPU-heavy hop starts.
            progress.on_step_start(chain, step).await;

            let next = &chain[step + 1];
            if !next.handler.ready() {
                if let Err(e) = next.handler.init().await {
                    warn!("Handler {} failed to initialise: {}", next.handler_name(), e);
                    return Err(AttemptError::InitFailed {
                        handler: next.handler_name().to_string(),
                        source: e,
                    });
                }
            }

            let prev_mime = chain[step].mime().unwrap_or_default();
            let input_format = match Self::readable_format(next, prev_mime) {
                Some(format) => format,
                // Any-input handlers take whatever the previous hop
                // produced without declaring it.
                None if next.handler.supports_any_input() => chain[step].format.clone(),
                None => {
                    return Err(AttemptError::BrokenChain {
                        step: step + 1,
                        mime: prev_mime.to_string(),
                    })
                }
            };

            match next.handler.convert(&working, &input_format, &next.format).await {
                Ok(output) => {
                    if let Some(empty) = output.iter().find(|f| f.is_empty()) {
                        warn!(
                            "Hop {} ({}) produced empty output for {}",
                            step,
                            next.handler_name(),
                            empty.name
                        );
                        return Err(AttemptError::EmptyOutput {
                            step,
                            handler: next.handler_name().to_string(),
                            file: empty.name.clone(),
                        });
                    }
                    metrics::HOPS_EXECUTED.inc();
                    working = output;
                    self.cache.push(working.clone(), next.clone());
                }
                Err(e) => {
                    warn!("Hop {} ({}) failed: {}", step, next.handler_name(), e);
                    return Err(AttemptError::HopFailed {
                        step,
                        handler: next.handler_name().to_string(),
                        source: e,
                    });
                }
            }
        }

        Ok(working)
    }

    /// The handler's `from`-enabled format at the given MIME. Guaranteed
    /// to exist by chain construction; the handler is ready by the time
    /// this runs, so its live format list is populated.
    fn readable_format(node: &ConversionOption, mime: &str) -> Option<Format> {
        node.handler
            .supported_formats()
            .into_iter()
            .find(|f| f.from && f.mime() == Some(mime))
    }
}
