//! # Span Processor Interface
//!
//! Span processors hook span start and end invocations. The built-in
//! [`SimpleSpanProcessor`] converts each sampled span to its exportable
//! representation and hands it to the configured exporter as soon as it
//! ends.
//!
//! Processors are invoked on whichever thread starts or ends the span and
//! must never let a telemetry failure reach the caller: a user request path
//! must not fail because span export did.

use crate::trace::{span_data, ExportResult, ReadableSpan, SpanExporter};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Mutex;
use tracewire::wire_warn;

/// `SpanProcessor` allows hooks for span start and end invocations.
pub trait SpanProcessor: Send + Sync + std::fmt::Debug {
    /// `on_start` is called when a span is started. This method is called
    /// synchronously on the thread that started the span, therefore it
    /// should not block.
    fn on_start(&self, span: &dyn ReadableSpan);
    /// `on_end` is called once, after a span is ended, synchronously on the
    /// thread that ended it. It must not block and must not propagate
    /// failures to its caller.
    fn on_end(&self, span: &dyn ReadableSpan);
    /// Releases downstream resources. Implementations must tolerate being
    /// called more than once.
    fn shutdown(&self);
}

/// A [`SpanProcessor`] that passes each finished, sampled span to the
/// configured exporter as soon as it ends, without batching.
///
/// Useful for debugging and testing; scenarios needing throughput should
/// wrap the exporter in a batching layer instead.
#[derive(Debug)]
pub struct SimpleSpanProcessor {
    exporter: Mutex<Box<dyn SpanExporter>>,
}

impl SimpleSpanProcessor {
    /// Create a new [`SimpleSpanProcessor`] using the provided exporter.
    pub fn new(exporter: Box<dyn SpanExporter>) -> Self {
        Self {
            exporter: Mutex::new(exporter),
        }
    }
}

impl SpanProcessor for SimpleSpanProcessor {
    fn on_start(&self, _span: &dyn ReadableSpan) {
        // Ignored
    }

    fn on_end(&self, span: &dyn ReadableSpan) {
        // The sampled flag is read once, here: flags may change while the
        // span is live, but export gates on their value at end time.
        if !span.span_context().is_sampled() {
            return;
        }

        let data = span_data(span);
        let span_id = data.span_context.span_id();

        let mut exporter = match self.exporter.lock() {
            Ok(exporter) => exporter,
            Err(_) => {
                wire_warn!(
                    name: "SimpleSpanProcessor.OnEnd.LockPoisoned",
                    span_id = format!("{span_id}")
                );
                return;
            }
        };

        // A panicking exporter must not unwind into the span owner.
        match panic::catch_unwind(AssertUnwindSafe(|| exporter.export(vec![data]))) {
            Ok(ExportResult::Success) => {}
            Ok(code) => {
                wire_warn!(
                    name: "SimpleSpanProcessor.OnEnd.ExportFailed",
                    span_id = format!("{span_id}"),
                    result = format!("{code:?}")
                );
            }
            Err(_) => {
                wire_warn!(
                    name: "SimpleSpanProcessor.OnEnd.ExportPanicked",
                    span_id = format!("{span_id}")
                );
            }
        }
    }

    fn shutdown(&self) {
        match self.exporter.lock() {
            Ok(mut exporter) => exporter.shutdown(),
            Err(_) => {
                wire_warn!(name: "SimpleSpanProcessor.Shutdown.LockPoisoned");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::trace::TestReadableSpan;
    use crate::trace::{InMemorySpanExporter, SpanData};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Debug)]
    struct CountingExporter {
        export_calls: Arc<AtomicUsize>,
        shutdown_calls: Arc<AtomicUsize>,
        result: ExportResult,
    }

    impl Default for CountingExporter {
        fn default() -> Self {
            CountingExporter {
                export_calls: Arc::new(AtomicUsize::new(0)),
                shutdown_calls: Arc::new(AtomicUsize::new(0)),
                result: ExportResult::Success,
            }
        }
    }

    impl SpanExporter for CountingExporter {
        fn export(&mut self, _batch: Vec<SpanData>) -> ExportResult {
            self.export_calls.fetch_add(1, Ordering::SeqCst);
            self.result
        }

        fn shutdown(&mut self) {
            self.shutdown_calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[derive(Debug)]
    struct PanickingExporter;

    impl SpanExporter for PanickingExporter {
        fn export(&mut self, _batch: Vec<SpanData>) -> ExportResult {
            panic!("exporter blew up")
        }
    }

    #[test]
    fn unsampled_span_never_touches_exporter() {
        let calls = Arc::new(AtomicUsize::new(0));
        let exporter = CountingExporter {
            export_calls: calls.clone(),
            ..Default::default()
        };
        let processor = SimpleSpanProcessor::new(Box::new(exporter));

        processor.on_end(&TestReadableSpan::unsampled());

        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn sampled_span_is_exported_as_singleton_batch() {
        let exporter = InMemorySpanExporter::default();
        let processor = SimpleSpanProcessor::new(Box::new(exporter.clone()));

        let span = TestReadableSpan::sampled();
        processor.on_start(&span);
        processor.on_end(&span);

        let finished = exporter.finished_spans().unwrap();
        assert_eq!(finished.len(), 1);
        assert_eq!(finished[0].span_context, *span.span_context());
    }

    #[test]
    fn failed_result_code_is_contained() {
        let calls = Arc::new(AtomicUsize::new(0));
        let exporter = CountingExporter {
            export_calls: calls.clone(),
            result: ExportResult::FailedRetryable,
            ..Default::default()
        };
        let processor = SimpleSpanProcessor::new(Box::new(exporter));

        processor.on_end(&TestReadableSpan::sampled());

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn panicking_exporter_is_contained() {
        let processor = SimpleSpanProcessor::new(Box::new(PanickingExporter));

        // must complete normally, and keep working for later spans
        processor.on_end(&TestReadableSpan::sampled());
        processor.on_end(&TestReadableSpan::sampled());
    }

    #[test]
    fn shutdown_delegates_to_exporter_and_is_repeatable() {
        let shutdowns = Arc::new(AtomicUsize::new(0));
        let exporter = CountingExporter {
            shutdown_calls: shutdowns.clone(),
            ..Default::default()
        };
        let processor = SimpleSpanProcessor::new(Box::new(exporter));

        processor.shutdown();
        processor.shutdown();

        assert_eq!(shutdowns.load(Ordering::SeqCst), 2);
    }
}
