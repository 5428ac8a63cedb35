//! # Trace SDK
//!
//! The span export pipeline. A span's owner invokes the processor hooks as
//! spans start and end; the processor gates on the sampled flag, snapshots
//! the span, and forwards it to an exporter:
//!
//! ```ascii
//!   +------------------+   +-----------------------+   +----------------+
//!   | span owner       |   |                       |   |                |
//!   |   on_start/on_end+--->  SimpleSpanProcessor  +--->  SpanExporter  |
//!   |                  |   |                       |   |                |
//!   +------------------+   +-----------------------+   +----------------+
//! ```
//!
//! Everything here is synchronous and thread-free; the exporter is the
//! serialization point for state of its own.

mod export;
mod in_memory_exporter;
mod span;
mod span_processor;

pub use export::{ExportResult, SpanData, SpanExporter, TimedEvent, Timestamp};
pub use in_memory_exporter::{InMemorySpanExporter, InMemorySpanExporterBuilder};
pub use span::{span_data, ReadableSpan, RecordedEvent};
pub use span_processor::{SimpleSpanProcessor, SpanProcessor};
