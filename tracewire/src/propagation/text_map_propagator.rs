//! # Text Propagator
//!
//! [`TextMapPropagator`] performs the injection and extraction of a span
//! context as text into carriers that travel in-band across process
//! boundaries.

use crate::propagation::{Extractor, Injector};
use crate::trace::{SpanContext, TraceResult};
use std::fmt::Debug;
use std::slice;

/// Methods to inject and extract a span context as text into carriers that
/// travel in-band across process boundaries.
pub trait TextMapPropagator: Debug {
    /// Encode the values of the given `SpanContext` into the injector.
    ///
    /// Implementations are expected to write nothing for a context that is
    /// not valid, rather than emitting placeholder values a receiver would
    /// then have to reject.
    fn inject(&self, cx: &SpanContext, injector: &mut dyn Injector);

    /// Retrieve an encoded `SpanContext` from the extractor.
    ///
    /// A carrier that simply has no relevant fields yields the invalid
    /// context — "no parent" is a normal case, not an error. A carrier
    /// whose fields are present but malformed is an error, so the caller
    /// decides whether running without a usable parent is acceptable.
    fn extract(&self, extractor: &dyn Extractor) -> TraceResult<SpanContext>;

    /// The carrier fields this propagator reads and writes.
    ///
    /// Composition layers use this to merge the field sets of several
    /// propagators into one.
    fn fields(&self) -> FieldIter<'_>;
}

/// An iterator over the fields of a [`TextMapPropagator`].
#[derive(Debug)]
pub struct FieldIter<'a>(slice::Iter<'a, String>);

impl<'a> FieldIter<'a> {
    /// Create a new `FieldIter` from a slice of propagator fields
    pub fn new(fields: &'a [String]) -> Self {
        FieldIter(fields.iter())
    }
}

impl<'a> Iterator for FieldIter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|field| field.as_str())
    }
}
