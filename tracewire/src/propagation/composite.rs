//! # Composite Propagator
//!
//! A utility over multiple propagators to group propagators from different
//! cross-cutting concerns and leverage them as a single entity, merging
//! their carrier field lists.

use crate::propagation::{text_map_propagator::FieldIter, Extractor, Injector, TextMapPropagator};
use crate::trace::{SpanContext, TraceResult};
use std::collections::HashSet;

/// Composite propagator for [`TextMapPropagator`]s.
///
/// Injection and extraction preserve the order of the propagators passed in
/// during initialization.
#[derive(Debug)]
pub struct TextMapCompositePropagator {
    propagators: Vec<Box<dyn TextMapPropagator + Send + Sync>>,
    fields: Vec<String>,
}

impl TextMapCompositePropagator {
    /// Constructs a new propagator out of instances of [`TextMapPropagator`].
    pub fn new(propagators: Vec<Box<dyn TextMapPropagator + Send + Sync>>) -> Self {
        let mut fields = HashSet::new();
        for propagator in &propagators {
            for field in propagator.fields() {
                fields.insert(field.to_string());
            }
        }

        TextMapCompositePropagator {
            propagators,
            fields: fields.into_iter().collect(),
        }
    }
}

impl TextMapPropagator for TextMapCompositePropagator {
    /// Runs each member propagator's injection in order.
    fn inject(&self, cx: &SpanContext, injector: &mut dyn Injector) {
        for propagator in &self.propagators {
            propagator.inject(cx, injector)
        }
    }

    /// Returns the first valid context a member extracts. A member reporting
    /// a malformed header stops the chain; members whose headers are simply
    /// absent are skipped.
    fn extract(&self, extractor: &dyn Extractor) -> TraceResult<SpanContext> {
        for propagator in &self.propagators {
            let cx = propagator.extract(extractor)?;
            if cx.is_valid() {
                return Ok(cx);
            }
        }

        Ok(SpanContext::NONE)
    }

    fn fields(&self) -> FieldIter<'_> {
        FieldIter::new(self.fields.as_slice())
    }
}
