//! Propagators provided by the SDK.

mod trace_context;

pub use trace_context::TraceContextPropagator;
