//! Span export contract and snapshot types.

use crate::resource::Resource;
use std::borrow::Cow;
use std::fmt::Debug;
use tracewire::trace::{Event, Link, SpanContext, SpanKind, Status};
use tracewire::{KeyValue, SpanId};

/// The result of a single export call.
///
/// `Success` means the batch was fully accepted for delivery, not that it
/// was delivered — delivery guarantees belong to the concrete backend. The
/// failed codes classify whether resubmitting the same batch can help;
/// resubmission itself belongs to a batching layer above this one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportResult {
    /// The batch was accepted for delivery.
    Success,
    /// A transient condition; resubmitting the same batch is expected to
    /// help.
    FailedRetryable,
    /// A permanent rejection (malformed data, stopped exporter, terminal
    /// backend error); resubmitting is pointless.
    FailedNotRetryable,
}

/// `SpanExporter` defines the interface that protocol-specific exporters
/// must implement so they can be plugged into the SDK and support sending
/// span data to a backend.
///
/// The goal of the interface is to minimize the burden of implementation:
/// an exporter is expected to be a simple encoder and transmitter.
pub trait SpanExporter: Send + Sync + Debug {
    /// Exports a batch of spans.
    ///
    /// This function is never called concurrently for the same exporter
    /// instance; the processor serializes calls. The exporter may retain
    /// the batch only for the duration of the call.
    fn export(&mut self, batch: Vec<SpanData>) -> ExportResult;

    /// Shuts down the exporter. Best effort: it must not panic, and after
    /// it returns, further `export` calls should report
    /// [`ExportResult::FailedNotRetryable`].
    fn shutdown(&mut self) {}
}

/// A point in time as whole seconds plus a nanosecond remainder.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp {
    /// Whole seconds.
    pub seconds: u64,
    /// Nanoseconds past the second, always below one billion.
    pub nanos: u32,
}

impl Timestamp {
    /// Split a monotonic nanosecond instant into seconds and remainder.
    ///
    /// Integer division truncates toward zero, so the conversion is
    /// reproducible bit for bit.
    pub const fn from_nanos(nanos: u64) -> Self {
        const NANOS_PER_SECOND: u64 = 1_000_000_000;
        Timestamp {
            seconds: nanos / NANOS_PER_SECOND,
            nanos: (nanos % NANOS_PER_SECOND) as u32,
        }
    }
}

/// An event paired with the timestamp at which the owning span recorded it.
#[derive(Clone, Debug, PartialEq)]
pub struct TimedEvent {
    /// When the event was recorded.
    pub timestamp: Timestamp,
    /// The recorded event.
    pub event: Event,
}

/// `SpanData` contains all the information collected by a completed span
/// and is the standard input handed to exporters.
///
/// Built exactly once per completed span, never mutated afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct SpanData {
    /// Exportable `SpanContext`.
    pub span_context: SpanContext,
    /// Span parent id, `SpanId::INVALID` for root spans.
    pub parent_span_id: SpanId,
    /// Span kind.
    pub span_kind: SpanKind,
    /// Span name.
    pub name: Cow<'static, str>,
    /// Span start time.
    pub start_time: Timestamp,
    /// Span end time.
    pub end_time: Timestamp,
    /// Span attributes.
    pub attributes: Vec<KeyValue>,
    /// Events recorded by the span, in recording order.
    pub events: Vec<TimedEvent>,
    /// Links to related spans.
    pub links: Vec<Link>,
    /// Span status.
    pub status: Status,
    /// Attributes of the entity that produced this span.
    pub resource: Resource,
}
