//! Node types for the handler-format graph.

use std::fmt;
use std::sync::Arc;

use crate::handler::{Format, Handler};

/// A `(handler, format)` pair: one participant in a conversion chain.
///
/// Two options from different handlers with the same MIME are distinct
/// nodes; equality is handler name plus format value.
#[derive(Clone)]
pub struct ConversionOption {
    /// The handler providing this format.
    pub handler: Arc<dyn Handler>,
    /// The declared format.
    pub format: Format,
}

/// An ordered sequence of options describing a multi-step conversion. The
/// first node is the input option; adjacent nodes are connected by the
/// next node's handler declaring a `from`-enabled format at the previous
/// node's MIME.
pub type Chain = Vec<ConversionOption>;

impl ConversionOption {
    /// Creates an option from a handler and one of its formats.
    pub fn new(handler: Arc<dyn Handler>, format: Format) -> Self {
        Self { handler, format }
    }

    /// The handler's unique name.
    pub fn handler_name(&self) -> &str {
        self.handler.name()
    }

    /// The format's MIME identity, if declared.
    pub fn mime(&self) -> Option<&str> {
        self.format.mime()
    }
}

impl PartialEq for ConversionOption {
    fn eq(&self, other: &Self) -> bool {
        self.handler.name() == other.handler.name() && self.format == other.format
    }
}

impl fmt::Debug for ConversionOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionOption")
            .field("handler", &self.handler.name())
            .field("format", &self.format.format)
            .field("mime", &self.format.mime)
            .finish()
    }
}

/// Renders a chain as `handler(mime) -> handler(mime)` for log lines.
pub fn describe_chain(chain: &[ConversionOption]) -> String {
    chain
        .iter()
        .map(|node| {
            format!(
                "{}({})",
                node.handler_name(),
                node.mime().unwrap_or("<none>")
            )
        })
        .collect::<Vec<_>>()
        .join(" -> ")
}
