//! Search modes and outcomes.

use crate::handler::FileData;
use crate::registry::Chain;

/// Upper bound on chain length, in nodes (6 nodes = 5 hops).
pub const MAX_CHAIN_LEN: usize = 6;

/// How the target-close phase selects finishing handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Any handler able to produce the target MIME may end the chain.
    Simple,
    /// Only the exact user-selected `(handler, format)` may end the chain.
    Advanced,
}

/// What a conversion request produced.
#[derive(Debug)]
pub enum RouteOutcome {
    /// A chain executed end-to-end; the final MIME equals the request.
    Converted { files: Vec<FileData>, chain: Chain },

    /// The deadline expired after some hops executed. The final MIME of
    /// `chain` disagrees with the request; the host decides whether the
    /// intermediate bytes are worth keeping.
    Partial { files: Vec<FileData>, chain: Chain },

    /// The deadline expired before any hop executed.
    Timeout,

    /// The queue drained without a working chain.
    NoRoute,
}

impl RouteOutcome {
    /// Whether the outcome carries usable bytes.
    pub fn has_files(&self) -> bool {
        matches!(self, Self::Converted { .. } | Self::Partial { .. })
    }

    /// Metric label for this outcome.
    pub(crate) fn label(&self) -> &'static str {
        match self {
            Self::Converted { .. } => "converted",
            Self::Partial { .. } => "partial",
            Self::Timeout => "timeout",
            Self::NoRoute => "no_route",
        }
    }
}
