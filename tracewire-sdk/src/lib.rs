//! # Tracewire SDK
//!
//! The SDK half of the tracewire toolkit: a W3C-style trace-context
//! propagator that carries span identity across process boundaries in text
//! headers, and the synchronous span export pipeline that delivers finished
//! span data to pluggable exporter backends.
//!
//! The pipeline introduces no threads of its own. A span's owner calls
//! [`SpanProcessor::on_end`] when a span completes; the processor gates on
//! the sampled flag, snapshots the span into an immutable
//! [`SpanData`], and hands it to the configured [`SpanExporter`]. Exporter
//! failures are contained at that boundary — telemetry delivery never fails
//! a caller's request path.
//!
//! [`SpanProcessor::on_end`]: crate::trace::SpanProcessor::on_end
//! [`SpanData`]: crate::trace::SpanData
//! [`SpanExporter`]: crate::trace::SpanExporter
#![warn(
    future_incompatible,
    missing_debug_implementations,
    missing_docs,
    nonstandard_style,
    rust_2018_idioms,
    unreachable_pub,
    unused
)]
#![cfg_attr(test, deny(warnings))]

pub mod propagation;
pub mod resource;
#[cfg(any(test, feature = "testing"))]
#[doc(hidden)]
pub mod testing;
pub mod trace;

pub use resource::Resource;
