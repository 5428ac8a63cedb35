use crate::trace::{ExportResult, SpanData, SpanExporter};
use std::sync::{Arc, Mutex};
use tracewire::trace::{TraceError, TraceResult};

/// An in-memory span exporter that stores accepted span data in a buffer.
///
/// The reference exporter implementation: useful for verifying pipeline
/// behavior in tests, and as a template for real backends. Clones share the
/// same buffer, so a test can hand one clone to a processor and read the
/// results through another.
///
/// # Example
///
/// ```
/// use tracewire_sdk::trace::{InMemorySpanExporter, SimpleSpanProcessor};
///
/// let exporter = InMemorySpanExporter::default();
/// let processor = SimpleSpanProcessor::new(Box::new(exporter.clone()));
///
/// // ... end spans through the processor ...
///
/// let finished = exporter.finished_spans().unwrap();
/// # drop((processor, finished));
/// ```
#[derive(Clone, Debug)]
pub struct InMemorySpanExporter {
    inner: Arc<Mutex<Inner>>,
}

/// Buffer and lifecycle flag, guarded by one mutex so export, reset,
/// shutdown and reads are linearizable with respect to each other.
#[derive(Debug, Default)]
struct Inner {
    spans: Vec<SpanData>,
    stopped: bool,
}

impl Default for InMemorySpanExporter {
    fn default() -> Self {
        InMemorySpanExporterBuilder::new().build()
    }
}

/// Builder for [`InMemorySpanExporter`].
///
/// # Example
///
/// ```
/// use tracewire_sdk::trace::InMemorySpanExporterBuilder;
///
/// let exporter = InMemorySpanExporterBuilder::new().build();
/// # drop(exporter);
/// ```
#[derive(Clone, Debug, Default)]
pub struct InMemorySpanExporterBuilder {}

impl InMemorySpanExporterBuilder {
    /// Creates a new instance of the `InMemorySpanExporterBuilder`.
    pub fn new() -> Self {
        Self {}
    }

    /// Creates a new instance of the `InMemorySpanExporter`.
    pub fn build(&self) -> InMemorySpanExporter {
        InMemorySpanExporter {
            inner: Arc::new(Mutex::new(Inner::default())),
        }
    }
}

impl InMemorySpanExporter {
    /// Returns an independent copy of the accepted spans, in acceptance
    /// order.
    ///
    /// # Errors
    ///
    /// Returns an error if the internal lock cannot be acquired.
    pub fn finished_spans(&self) -> TraceResult<Vec<SpanData>> {
        self.inner
            .lock()
            .map(|inner| inner.spans.clone())
            .map_err(|err| TraceError::ExporterFailure(err.to_string().into()))
    }

    /// Clears the buffered spans.
    ///
    /// Does not restart the exporter if it has already been shut down.
    pub fn reset(&self) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.spans.clear();
        }
    }
}

impl SpanExporter for InMemorySpanExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> ExportResult {
        match self.inner.lock() {
            Ok(mut inner) => {
                if inner.stopped {
                    return ExportResult::FailedNotRetryable;
                }
                inner.spans.extend(batch);
                ExportResult::Success
            }
            Err(_) => ExportResult::FailedNotRetryable,
        }
    }

    fn shutdown(&mut self) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.spans.clear();
            inner.stopped = true;
        }
    }
}
