//! # Tracewire API
//!
//! Core types for carrying trace identity inside a process and across
//! process boundaries: fixed-width trace and span identifiers with a
//! lowercase-hex wire form, the immutable [`SpanContext`] bundle, the
//! vendor-extensible [`TraceState`] entry list, and the carrier-agnostic
//! propagation traits ([`Injector`], [`Extractor`],
//! [`TextMapPropagator`]).
//!
//! The SDK crate (`tracewire-sdk`) builds the W3C-style trace-context
//! propagator and the span export pipeline on top of these types.
//!
//! [`SpanContext`]: crate::trace::SpanContext
//! [`TraceState`]: crate::trace::TraceState
//! [`Injector`]: crate::propagation::Injector
//! [`Extractor`]: crate::propagation::Extractor
//! [`TextMapPropagator`]: crate::propagation::TextMapPropagator
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

mod common;
mod internal_logging;
pub mod propagation;
pub mod trace;
mod trace_context;

pub use common::{Key, KeyValue, Value};
pub use trace_context::{SpanId, TraceFlags, TraceId};

#[cfg(feature = "internal-logs")]
#[doc(hidden)]
pub mod _private {
    pub use tracing::{debug, error, info, warn};
}
