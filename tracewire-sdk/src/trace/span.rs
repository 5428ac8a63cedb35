//! Read access to live spans and the snapshot adapter.

use crate::resource::Resource;
use crate::trace::{SpanData, TimedEvent, Timestamp};
use std::borrow::Cow;
use tracewire::trace::{Event, Link, SpanContext, SpanKind, Status};
use tracewire::{KeyValue, SpanId};

/// An event recorded by a live span: the monotonic instant it happened plus
/// the event payload.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordedEvent {
    /// Monotonic nanosecond instant at which the event was recorded.
    pub nanos: u64,
    /// The event payload.
    pub event: Event,
}

impl RecordedEvent {
    /// Create a new `RecordedEvent`.
    pub fn new(nanos: u64, event: Event) -> Self {
        RecordedEvent { nanos, event }
    }
}

/// Read access to a span, as consumed by processor hooks and the snapshot
/// adapter.
///
/// Implemented by whichever component owns span lifecycles; this crate only
/// reads through it. Instants are monotonic nanosecond readings, converted
/// to wall-style timestamps only when a span is snapshotted.
pub trait ReadableSpan {
    /// The span name. It can change while the span is live, so it is read
    /// fresh rather than cached.
    fn name(&self) -> Cow<'static, str>;
    /// The span's context.
    fn span_context(&self) -> &SpanContext;
    /// Id of the parent span, `SpanId::INVALID` for root spans.
    fn parent_span_id(&self) -> SpanId;
    /// The kind of work the span describes.
    fn span_kind(&self) -> SpanKind;
    /// Monotonic instant at which the span started.
    fn start_nanos(&self) -> u64;
    /// Monotonic instant at which the span ended.
    fn end_nanos(&self) -> u64;
    /// Attributes set on the span.
    fn attributes(&self) -> &[KeyValue];
    /// Links recorded on the span.
    fn links(&self) -> &[Link];
    /// Events recorded on the span, in recording order.
    fn events(&self) -> &[RecordedEvent];
    /// The span status.
    fn status(&self) -> Status;
    /// The entity that produced the span.
    fn resource(&self) -> &Resource;
}

/// Snapshot a live span into an immutable [`SpanData`].
///
/// Start, end and event instants are converted with
/// [`Timestamp::from_nanos`]; event order is carried over unchanged, so
/// recording order stays chronological order.
pub fn span_data(span: &dyn ReadableSpan) -> SpanData {
    SpanData {
        span_context: span.span_context().clone(),
        parent_span_id: span.parent_span_id(),
        span_kind: span.span_kind(),
        name: span.name(),
        start_time: Timestamp::from_nanos(span.start_nanos()),
        end_time: Timestamp::from_nanos(span.end_nanos()),
        attributes: span.attributes().to_vec(),
        events: span
            .events()
            .iter()
            .map(|recorded| TimedEvent {
                timestamp: Timestamp::from_nanos(recorded.nanos),
                event: recorded.event.clone(),
            })
            .collect(),
        links: span.links().to_vec(),
        status: span.status(),
        resource: span.resource().clone(),
    }
}
