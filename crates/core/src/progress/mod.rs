//! Progress reporting surface.
//!
//! The searcher and executor report the path currently under trial and the
//! step currently executing through a [`ProgressObserver`]. Observers are
//! purely informational: they may not cancel or modify the search. The
//! step callback awaits a host repaint barrier so a UI can render before
//! CPU-heavy work begins; outside a browser host that barrier is a
//! cooperative scheduler yield.

mod channel;

pub use channel::{ChannelProgress, ChainStepInfo, ProgressEvent};

use async_trait::async_trait;

use crate::registry::ConversionOption;

/// Observer callbacks invoked by the searcher and executor.
#[async_trait]
pub trait ProgressObserver: Send + Sync {
    /// Invoked once per candidate chain before execution begins.
    fn on_path_attempt(&self, chain: &[ConversionOption]);

    /// Invoked once per hop, before the hop's convert call. Awaits the
    /// host repaint barrier before returning.
    async fn on_step_start(&self, chain: &[ConversionOption], step: usize);
}

/// Observer that reports nothing but still honours the repaint barrier.
#[derive(Debug, Default)]
pub struct NoopProgress;

#[async_trait]
impl ProgressObserver for NoopProgress {
    fn on_path_attempt(&self, _chain: &[ConversionOption]) {}

    async fn on_step_start(&self, _chain: &[ConversionOption], _step: usize) {
        tokio::task::yield_now().await;
    }
}
