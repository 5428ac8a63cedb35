//! Test doubles for the span export pipeline.

use crate::resource::Resource;
use crate::trace::{ReadableSpan, RecordedEvent, SpanData, Timestamp};
use std::borrow::Cow;
use tracewire::trace::{Link, SpanContext, SpanKind, Status, TraceFlags, TraceState};
use tracewire::{KeyValue, SpanId, TraceId};

/// A fully in-memory [`ReadableSpan`] for driving processors in tests.
///
/// All fields are public; construct one with [`TestReadableSpan::sampled`]
/// or [`TestReadableSpan::with_context`] and overwrite what the test cares
/// about.
#[derive(Clone, Debug)]
pub struct TestReadableSpan {
    /// Span name.
    pub name: Cow<'static, str>,
    /// Span context.
    pub span_context: SpanContext,
    /// Parent span id.
    pub parent_span_id: SpanId,
    /// Span kind.
    pub span_kind: SpanKind,
    /// Monotonic start instant in nanoseconds.
    pub start_nanos: u64,
    /// Monotonic end instant in nanoseconds.
    pub end_nanos: u64,
    /// Span attributes.
    pub attributes: Vec<KeyValue>,
    /// Span links.
    pub links: Vec<Link>,
    /// Recorded events, in recording order.
    pub events: Vec<RecordedEvent>,
    /// Span status.
    pub status: Status,
    /// Producing entity.
    pub resource: Resource,
}

impl TestReadableSpan {
    /// A span with the given context and defaults everywhere else.
    pub fn with_context(span_context: SpanContext) -> Self {
        TestReadableSpan {
            name: "test-span".into(),
            span_context,
            parent_span_id: SpanId::INVALID,
            span_kind: SpanKind::Internal,
            start_nanos: 0,
            end_nanos: 0,
            attributes: Vec::new(),
            links: Vec::new(),
            events: Vec::new(),
            status: Status::Unset,
            resource: Resource::empty(),
        }
    }

    /// A sampled span with fixed, valid ids.
    pub fn sampled() -> Self {
        Self::with_context(SpanContext::new(
            TraceId::from(0x4bf9_2f35_77b3_4da6_a3ce_929d_0e0e_4736),
            SpanId::from(0x00f0_67aa_0ba9_02b7),
            TraceFlags::SAMPLED,
            false,
            TraceState::NONE,
        ))
    }

    /// An unsampled span with fixed, valid ids.
    pub fn unsampled() -> Self {
        Self::with_context(SpanContext::new(
            TraceId::from(0x4bf9_2f35_77b3_4da6_a3ce_929d_0e0e_4736),
            SpanId::from(0x00f0_67aa_0ba9_02b7),
            TraceFlags::NOT_SAMPLED,
            false,
            TraceState::NONE,
        ))
    }
}

impl ReadableSpan for TestReadableSpan {
    fn name(&self) -> Cow<'static, str> {
        self.name.clone()
    }

    fn span_context(&self) -> &SpanContext {
        &self.span_context
    }

    fn parent_span_id(&self) -> SpanId {
        self.parent_span_id
    }

    fn span_kind(&self) -> SpanKind {
        self.span_kind.clone()
    }

    fn start_nanos(&self) -> u64 {
        self.start_nanos
    }

    fn end_nanos(&self) -> u64 {
        self.end_nanos
    }

    fn attributes(&self) -> &[KeyValue] {
        &self.attributes
    }

    fn links(&self) -> &[Link] {
        &self.links
    }

    fn events(&self) -> &[RecordedEvent] {
        &self.events
    }

    fn status(&self) -> Status {
        self.status.clone()
    }

    fn resource(&self) -> &Resource {
        &self.resource
    }
}

/// Span data with placeholder values for exporter tests.
pub fn new_test_span_data() -> SpanData {
    SpanData {
        span_context: SpanContext::new(
            TraceId::from(0x4bf9_2f35_77b3_4da6_a3ce_929d_0e0e_4736),
            SpanId::from(0x00f0_67aa_0ba9_02b7),
            TraceFlags::SAMPLED,
            false,
            TraceState::NONE,
        ),
        parent_span_id: SpanId::INVALID,
        span_kind: SpanKind::Internal,
        name: "test-span".into(),
        start_time: Timestamp::from_nanos(1_000_000_000),
        end_time: Timestamp::from_nanos(2_000_000_000),
        attributes: Vec::new(),
        events: Vec::new(),
        links: Vec::new(),
        status: Status::Unset,
        resource: Resource::empty(),
    }
}
