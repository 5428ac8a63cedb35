//! # Trace Link Interface

use crate::trace::SpanContext;
use crate::KeyValue;

/// A link to a causally-related span in the same or a different trace.
#[derive(Clone, Debug, PartialEq)]
pub struct Link {
    /// Span context of the linked span.
    pub span_context: SpanContext,
    /// Attributes describing the link.
    pub attributes: Vec<KeyValue>,
}

impl Link {
    /// Create new `Link`
    pub fn new(span_context: SpanContext, attributes: Vec<KeyValue>) -> Self {
        Link {
            span_context,
            attributes,
        }
    }
}
