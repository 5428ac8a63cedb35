//! # Trace API
//!
//! Identity and metadata for units of work: span contexts, vendor trace
//! state, events, links, and the error taxonomy shared with the SDK.
//!
//! A [`SpanContext`] is the immutable, propagatable portion of a span. It is
//! produced locally when a span starts, or remotely by a propagator parsing
//! incoming headers, and is the only piece of a span that crosses process
//! boundaries.

use std::borrow::Cow;
use thiserror::Error;

mod event;
mod link;
mod span_context;

pub use self::{
    event::Event,
    link::Link,
    span_context::{SpanContext, TraceState},
};
pub use crate::trace_context::{SpanId, TraceFlags, TraceId};

/// Describe the result of operations in the tracing API.
pub type TraceResult<T> = Result<T, TraceError>;

/// Errors returned by the trace API.
///
/// Callers are expected to branch on the variant, never on the message
/// text; each variant carries the offending input or the violated bound.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TraceError {
    /// A wire value was present but does not follow the expected grammar.
    #[error("{name} value {value:?} is malformed")]
    InvalidFormat {
        /// The field whose grammar was violated.
        name: &'static str,
        /// The offending input.
        value: String,
    },

    /// A buffer was too short to read or write a fixed-width value.
    #[error("{name} needs {needed} bytes at offset {offset}, buffer holds {len}")]
    InvalidLength {
        /// The field being read or written.
        name: &'static str,
        /// Width of the fixed value in bytes.
        needed: usize,
        /// Offset the caller asked for.
        offset: usize,
        /// Total length of the buffer.
        len: usize,
    },

    /// An argument violated the caller contract.
    #[error("invalid argument: {0}")]
    InvalidArgument(Cow<'static, str>),

    /// A downstream exporter call failed.
    #[error("exporter failure: {0}")]
    ExporterFailure(Cow<'static, str>),

    /// Other errors not covered by the variants above.
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync + 'static>),
}

/// The kind of work a span describes, from the point of view of its owner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SpanKind {
    /// A request to some remote service, usually the parent of a remote
    /// `Server` span.
    Client,
    /// Server-side handling of a remote request, often the child of a remote
    /// `Client` span.
    Server,
    /// The initiator of an asynchronous request, which may end before the
    /// corresponding `Consumer` span starts.
    Producer,
    /// The handler of an asynchronous `Producer` request.
    Consumer,
    /// An operation internal to an application, with no remote parent or
    /// child.
    Internal,
}

/// The status of a finished span.
///
/// Instrumentation should leave the status unset unless there is an error;
/// operators may mark spans `Ok` to suppress downstream error analysis.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Status {
    /// The default status.
    #[default]
    Unset,

    /// The operation contains an error.
    Error {
        /// The description of the error
        description: Cow<'static, str>,
    },

    /// The operation has been validated by an application developer or
    /// operator to have completed successfully.
    Ok,
}

impl Status {
    /// Create a new error status with a given description.
    ///
    /// # Examples
    ///
    /// ```
    /// use tracewire::trace::Status;
    ///
    /// let status = Status::error("connection reset");
    /// # drop(status);
    /// ```
    pub fn error(description: impl Into<Cow<'static, str>>) -> Self {
        Status::Error {
            description: description.into(),
        }
    }
}
