//! Channel-backed progress observer.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::registry::ConversionOption;

use super::ProgressObserver;

/// A chain node flattened for host consumption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainStepInfo {
    /// Handler name.
    pub handler: String,
    /// Format code.
    pub format: String,
    /// Format MIME, if declared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime: Option<String>,
}

/// Progress updates emitted during a search.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProgressEvent {
    /// A candidate chain is about to be executed.
    PathAttempt { chain: Vec<ChainStepInfo> },
    /// One hop of the current chain is about to run.
    StepStart {
        chain: Vec<ChainStepInfo>,
        step: usize,
    },
}

fn chain_info(chain: &[ConversionOption]) -> Vec<ChainStepInfo> {
    chain
        .iter()
        .map(|node| ChainStepInfo {
            handler: node.handler_name().to_string(),
            format: node.format.format.clone(),
            mime: node.format.mime.clone(),
        })
        .collect()
}

/// Forwards progress events over a bounded channel.
///
/// Sends never block the search: path attempts use `try_send`, and a
/// dropped or full receiver is ignored.
pub struct ChannelProgress {
    tx: mpsc::Sender<ProgressEvent>,
}

impl ChannelProgress {
    /// Creates an observer writing to the given sender.
    pub fn new(tx: mpsc::Sender<ProgressEvent>) -> Self {
        Self { tx }
    }
}

#[async_trait]
impl ProgressObserver for ChannelProgress {
    fn on_path_attempt(&self, chain: &[ConversionOption]) {
        let _ = self.tx.try_send(ProgressEvent::PathAttempt {
            chain: chain_info(chain),
        });
    }

    async fn on_step_start(&self, chain: &[ConversionOption], step: usize) {
        let _ = self.tx.try_send(ProgressEvent::StepStart {
            chain: chain_info(chain),
            step,
        });
        tokio::task::yield_now().await;
    }
}
