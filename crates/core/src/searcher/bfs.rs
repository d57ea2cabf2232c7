//! Breadth-first chain discovery.

use std::collections::VecDeque;
use std::sync::Arc;

use tokio::time::Instant;
use tracing::{debug, trace};

use crate::executor::AttemptExecutor;
use crate::handler::FileData;
use crate::metrics;
use crate::progress::ProgressObserver;
use crate::registry::{describe_chain, Chain, ConversionOption, FormatRegistry};

use super::types::{RouteOutcome, SearchMode, MAX_CHAIN_LEN};

/// Bounded BFS over partial chains.
///
/// Enumeration order is fixed by the registry's construction order, so
/// repeated searches over the same registry try candidates in the same
/// sequence.
pub struct PathSearcher<'a> {
    registry: &'a FormatRegistry,
    mode: SearchMode,
    max_chain_len: usize,
}

impl<'a> PathSearcher<'a> {
    pub fn new(registry: &'a FormatRegistry, mode: SearchMode) -> Self {
        Self {
            registry,
            mode,
            max_chain_len: MAX_CHAIN_LEN,
        }
    }

    /// Overrides the chain-length bound (mainly for tests).
    pub fn with_max_chain_len(mut self, max_chain_len: usize) -> Self {
        self.max_chain_len = max_chain_len;
        self
    }

    /// Searches for a chain from the head of each initial partial chain to
    /// `target`, executing candidates as they are found.
    ///
    /// Returns on the first end-to-end success. The deadline is polled at
    /// the top of every iteration, never mid-convert; on expiry the
    /// longest executed prefix (if any) is returned as a partial result.
    pub async fn find_path(
        &self,
        executor: &mut AttemptExecutor,
        files: &[FileData],
        target: &ConversionOption,
        initial: Vec<Chain>,
        progress: &dyn ProgressObserver,
        deadline: Instant,
    ) -> RouteOutcome {
        let Some(target_mime) = target.mime().map(str::to_string) else {
            return RouteOutcome::NoRoute;
        };
        let origin = initial.first().and_then(|chain| chain.first()).cloned();

        let mut queue: VecDeque<Chain> = initial.into();
        let mut any_input_tried = false;

        loop {
            if Instant::now() > deadline {
                return self.salvage_partial(executor, origin.as_ref());
            }

            let Some(chain) = queue.pop_front() else {
                debug!("Search queue drained, no route to {}", target_mime);
                return RouteOutcome::NoRoute;
            };
            if chain.len() >= self.max_chain_len {
                continue;
            }

            // Drop cached hops the new frontier chain no longer shares.
            executor.realign(&chain);

            let Some(prev) = chain.last() else {
                continue;
            };
            let Some(prev_mime) = prev.mime().map(str::to_string) else {
                continue;
            };
            let readers = self.registry.handlers_reading(&prev_mime);

            // Close onto the target from here if any reader can finish.
            for closer in self.closing_options(readers, target, &target_mime) {
                if chain.iter().any(|node| node.format == closer.format) {
                    continue;
                }
                let mut candidate = chain.clone();
                candidate.push(closer);
                if let Some(out) = self.try_candidate(executor, files, candidate, progress).await {
                    return out;
                }
            }

            // One-shot fallback for handlers that accept any input MIME.
            if !any_input_tried {
                any_input_tried = true;
                let writers: Vec<ConversionOption> = self
                    .registry
                    .any_input_writers()
                    .iter()
                    .filter(|w| w.mime() == Some(target_mime.as_str()))
                    .cloned()
                    .collect();
                for writer in writers {
                    if chain.iter().any(|node| node.format == writer.format) {
                        continue;
                    }
                    let mut candidate = chain.clone();
                    candidate.push(writer);
                    if let Some(out) = self.try_candidate(executor, files, candidate, progress).await {
                        return out;
                    }
                }
            }

            // Expand one hop in every readable direction.
            for handler in readers {
                for option in self.registry.writer_options_for(handler.name()) {
                    if chain.iter().any(|node| node.format == option.format) {
                        continue;
                    }
                    let mut next = chain.clone();
                    next.push(ConversionOption::new(
                        Arc::clone(&option.handler),
                        option.format.clone(),
                    ));
                    queue.push_back(next);
                }
            }
        }
    }

    /// The options allowed to end a chain whose last MIME is readable by
    /// `readers`.
    fn closing_options(
        &self,
        readers: &[Arc<dyn crate::handler::Handler>],
        target: &ConversionOption,
        target_mime: &str,
    ) -> Vec<ConversionOption> {
        match self.mode {
            SearchMode::Simple => self
                .registry
                .options()
                .iter()
                .filter(|option| {
                    option.format.to
                        && option.mime() == Some(target_mime)
                        && readers.iter().any(|h| h.name() == option.handler_name())
                })
                .cloned()
                .collect(),
            SearchMode::Advanced => {
                if readers.iter().any(|h| h.name() == target.handler_name()) {
                    vec![target.clone()]
                } else {
                    Vec::new()
                }
            }
        }
    }

    /// Executes one candidate chain. `Some` ends the search.
    async fn try_candidate(
        &self,
        executor: &mut AttemptExecutor,
        files: &[FileData],
        candidate: Chain,
        progress: &dyn ProgressObserver,
    ) -> Option<RouteOutcome> {
        progress.on_path_attempt(&candidate);
        metrics::CANDIDATE_ATTEMPTS.inc();
        trace!("Trying {}", describe_chain(&candidate));

        match executor.attempt(files, &candidate, progress).await {
            Ok(out) => {
                debug!("Chain succeeded: {}", describe_chain(&candidate));
                Some(RouteOutcome::Converted {
                    files: out,
                    chain: candidate,
                })
            }
            Err(e) => {
                debug!("Candidate rejected: {}", e);
                None
            }
        }
    }

    /// Builds the partial outcome from whatever the executor managed to
    /// run before the deadline fired.
    fn salvage_partial(
        &self,
        executor: &AttemptExecutor,
        origin: Option<&ConversionOption>,
    ) -> RouteOutcome {
        match (executor.executed_prefix(), origin) {
            (Some((files, executed)), Some(origin)) => {
                let mut chain = Vec::with_capacity(executed.len() + 1);
                chain.push(origin.clone());
                chain.extend(executed);
                debug!(
                    "Deadline hit, returning partial prefix: {}",
                    describe_chain(&chain)
                );
                RouteOutcome::Partial { files, chain }
            }
            _ => RouteOutcome::Timeout,
        }
    }
}
