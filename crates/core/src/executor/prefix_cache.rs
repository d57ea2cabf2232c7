//! Forward prefix cache over the chain currently under trial.

use crate::handler::FileData;
use crate::registry::ConversionOption;

/// One completed hop: the node that produced the files and the files
/// themselves.
#[derive(Debug, Clone)]
pub(crate) struct PrefixEntry {
    pub files: Vec<FileData>,
    pub node: ConversionOption,
}

/// Files remembered after each completed hop of the previous attempt.
///
/// Entry `i` corresponds to chain position `i + 1` (the chain's first node
/// is the input and produces nothing). The cache is always a strict prefix
/// of the chain currently under trial.
#[derive(Debug, Default)]
pub(crate) struct PrefixCache {
    entries: Vec<PrefixEntry>,
}

impl PrefixCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached hops.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Realigns the cache against a new candidate chain and returns the
    /// resume position: the longest prefix of `chain[1..]` covered by
    /// cached hops. Entries from the first divergence onward are
    /// discarded.
    ///
    /// When two consecutive attempts share `p` executed hops, the next
    /// attempt runs exactly `chain.len() - 1 - p` hops.
    pub fn realign(&mut self, chain: &[ConversionOption]) -> usize {
        let mut keep = self.entries.len();
        for (i, entry) in self.entries.iter().enumerate() {
            match chain.get(i + 1) {
                Some(node) if *node == entry.node => {}
                _ => {
                    keep = i;
                    break;
                }
            }
        }

        self.entries.truncate(keep);
        self.entries.len()
    }

    /// Records a completed hop.
    pub fn push(&mut self, files: Vec<FileData>, node: ConversionOption) {
        self.entries.push(PrefixEntry { files, node });
    }

    /// The files produced by the deepest cached hop.
    pub fn last_files(&self) -> Option<&[FileData]> {
        self.entries.last().map(|entry| entry.files.as_slice())
    }

    /// The executed nodes, in chain order.
    pub fn executed_nodes(&self) -> Vec<ConversionOption> {
        self.entries.iter().map(|entry| entry.node.clone()).collect()
    }
}
