//! # W3C-style Trace Context Propagator
//!

use std::str::FromStr;
use std::sync::OnceLock;
use tracewire::propagation::{text_map_propagator::FieldIter, Extractor, Injector, TextMapPropagator};
use tracewire::trace::{SpanContext, TraceError, TraceResult, TraceState};
use tracewire::{SpanId, TraceFlags, TraceId};

const SUPPORTED_VERSION: u8 = 0;
const TRACEPARENT_HEADER: &str = "traceparent";
const TRACESTATE_HEADER: &str = "tracestate";

// Byte offsets of the fields inside a version-00 traceparent value:
// `00-{trace id:32}-{span id:16}-{flags:2}`, 55 bytes total.
const TRACE_ID_OFFSET: usize = 3;
const SPAN_ID_OFFSET: usize = TRACE_ID_OFFSET + 2 * TraceId::SIZE + 1;
const FLAGS_OFFSET: usize = SPAN_ID_OFFSET + 2 * SpanId::SIZE + 1;
const TRACEPARENT_HEADER_SIZE: usize = FLAGS_OFFSET + 2;

static TRACE_CONTEXT_HEADER_FIELDS: OnceLock<[String; 2]> = OnceLock::new();

fn trace_context_header_fields() -> &'static [String; 2] {
    TRACE_CONTEXT_HEADER_FIELDS
        .get_or_init(|| [TRACEPARENT_HEADER.to_owned(), TRACESTATE_HEADER.to_owned()])
}

/// Propagates `SpanContext`s under `traceparent` and `tracestate` headers.
///
/// The `traceparent` header carries the identity of the request in a common
/// format understood by all vendors:
///
/// `traceparent: 00-0af7651916cd43dd8448eb211c80319c-b7ad6b7169203331-01`
///
/// It has four fields: version, trace-id, parent-id and trace-flags. The
/// `tracestate` header carries additional vendor-specific identification
/// data across different tracing systems:
///
/// `tracestate: vendorname1=opaqueValue1,vendorname2=opaqueValue2`
#[derive(Clone, Debug, Default)]
pub struct TraceContextPropagator {
    _private: (),
}

impl TraceContextPropagator {
    /// Create a new `TraceContextPropagator`.
    pub fn new() -> Self {
        TraceContextPropagator { _private: () }
    }

    fn malformed(header: &str) -> TraceError {
        TraceError::InvalidFormat {
            name: TRACEPARENT_HEADER,
            value: header.to_string(),
        }
    }

    /// Parse the fixed-layout portion of a `traceparent` value.
    ///
    /// The delimiters must sit at their exact offsets and the value must be
    /// either exactly the fixed width, or longer with a further `-`
    /// immediately after it; such a trailing extension is ignored so values
    /// from future protocol versions still parse. The two version chars are
    /// deliberately not themselves validated.
    fn parse_trace_parent(header: &str) -> TraceResult<SpanContext> {
        let bytes = header.as_bytes();
        let delimited = bytes.len() >= TRACEPARENT_HEADER_SIZE
            && bytes[TRACE_ID_OFFSET - 1] == b'-'
            && bytes[SPAN_ID_OFFSET - 1] == b'-'
            && bytes[FLAGS_OFFSET - 1] == b'-'
            && (bytes.len() == TRACEPARENT_HEADER_SIZE
                || bytes[TRACEPARENT_HEADER_SIZE] == b'-');
        if !delimited {
            return Err(Self::malformed(header));
        }

        let trace_id = header
            .get(TRACE_ID_OFFSET..SPAN_ID_OFFSET - 1)
            .and_then(|field| TraceId::from_hex(field).ok())
            .ok_or_else(|| Self::malformed(header))?;
        let span_id = header
            .get(SPAN_ID_OFFSET..FLAGS_OFFSET - 1)
            .and_then(|field| SpanId::from_hex(field).ok())
            .ok_or_else(|| Self::malformed(header))?;
        let trace_flags = header
            .get(FLAGS_OFFSET..TRACEPARENT_HEADER_SIZE)
            .and_then(|field| TraceFlags::from_hex(field).ok())
            .ok_or_else(|| Self::malformed(header))?;

        Ok(SpanContext::new(
            trace_id,
            span_id,
            trace_flags,
            true,
            TraceState::NONE,
        ))
    }

    fn extract_span_context(&self, extractor: &dyn Extractor) -> TraceResult<SpanContext> {
        let header = match extractor.get(TRACEPARENT_HEADER) {
            Some(header) => header,
            // A missing header is the normal "no parent" case.
            None => return Ok(SpanContext::NONE),
        };

        let parsed = Self::parse_trace_parent(header)?;

        let trace_state = match extractor.get(TRACESTATE_HEADER) {
            // Entries keep their original left-to-right order; a tracestate
            // that fails to parse is dropped rather than failing the whole
            // extraction.
            Some(header) if !header.is_empty() => {
                TraceState::from_str(header).unwrap_or_default()
            }
            _ => TraceState::NONE,
        };

        Ok(SpanContext::new(
            parsed.trace_id(),
            parsed.span_id(),
            parsed.trace_flags(),
            true,
            trace_state,
        ))
    }
}

impl TextMapPropagator for TraceContextPropagator {
    /// Encodes the span context into `traceparent` and, when there are
    /// entries to carry, `tracestate` values. An empty trace state writes
    /// no `tracestate` key at all.
    fn inject(&self, cx: &SpanContext, injector: &mut dyn Injector) {
        if !cx.is_valid() {
            return;
        }

        let header_value = format!(
            "{:02x}-{}-{}-{:02x}",
            SUPPORTED_VERSION,
            cx.trace_id(),
            cx.span_id(),
            cx.trace_flags(),
        );
        injector.set(TRACEPARENT_HEADER, header_value);

        let trace_state = cx.trace_state();
        if !trace_state.is_empty() {
            injector.set(TRACESTATE_HEADER, trace_state.header());
        }
    }

    /// Decodes a remote span context from the carrier. A carrier without a
    /// `traceparent` yields the invalid context; a malformed `traceparent`
    /// is an error carrying the offending value.
    fn extract(&self, extractor: &dyn Extractor) -> TraceResult<SpanContext> {
        self.extract_span_context(extractor)
    }

    fn fields(&self) -> FieldIter<'_> {
        FieldIter::new(trace_context_header_fields())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn carrier(trace_parent: Option<&str>, trace_state: Option<&str>) -> HashMap<String, String> {
        let mut extractor = HashMap::new();
        if let Some(value) = trace_parent {
            extractor.insert(TRACEPARENT_HEADER.to_string(), value.to_string());
        }
        if let Some(value) = trace_state {
            extractor.insert(TRACESTATE_HEADER.to_string(), value.to_string());
        }
        extractor
    }

    #[rustfmt::skip]
    fn extract_data() -> Vec<(&'static str, &'static str, SpanContext)> {
        vec![
            ("00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-00", "foo=bar", SpanContext::new(TraceId::from(0x4bf9_2f35_77b3_4da6_a3ce_929d_0e0e_4736), SpanId::from(0x00f0_67aa_0ba9_02b7), TraceFlags::default(), true, TraceState::from_str("foo=bar").unwrap())),
            ("00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-01", "foo=bar", SpanContext::new(TraceId::from(0x4bf9_2f35_77b3_4da6_a3ce_929d_0e0e_4736), SpanId::from(0x00f0_67aa_0ba9_02b7), TraceFlags::SAMPLED, true, TraceState::from_str("foo=bar").unwrap())),
            ("02-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-01", "foo=bar", SpanContext::new(TraceId::from(0x4bf9_2f35_77b3_4da6_a3ce_929d_0e0e_4736), SpanId::from(0x00f0_67aa_0ba9_02b7), TraceFlags::SAMPLED, true, TraceState::from_str("foo=bar").unwrap())),
            ("02-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-09", "foo=bar", SpanContext::new(TraceId::from(0x4bf9_2f35_77b3_4da6_a3ce_929d_0e0e_4736), SpanId::from(0x00f0_67aa_0ba9_02b7), TraceFlags::new(0x09), true, TraceState::from_str("foo=bar").unwrap())),
            ("02-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-09-XYZxsf09", "foo=bar", SpanContext::new(TraceId::from(0x4bf9_2f35_77b3_4da6_a3ce_929d_0e0e_4736), SpanId::from(0x00f0_67aa_0ba9_02b7), TraceFlags::new(0x09), true, TraceState::from_str("foo=bar").unwrap())),
            ("00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-01-", "foo=bar", SpanContext::new(TraceId::from(0x4bf9_2f35_77b3_4da6_a3ce_929d_0e0e_4736), SpanId::from(0x00f0_67aa_0ba9_02b7), TraceFlags::SAMPLED, true, TraceState::from_str("foo=bar").unwrap())),
        ]
    }

    #[rustfmt::skip]
    fn extract_data_invalid() -> Vec<(&'static str, &'static str)> {
        vec![
            ("0000-00000000000000000000000000000000-0000000000000000-01", "wrong version length"),
            ("00-ab00000000000000000000000000000000-cd00000000000000-01", "wrong trace ID length"),
            ("00-ab000000000000000000000000000000-cd0000000000000000-01", "wrong span ID length"),
            ("00-ab000000000000000000000000000000-cd00000000000000-0100", "wrong trace flag length"),
            ("00-qw000000000000000000000000000000-cd00000000000000-01",   "bogus trace ID"),
            ("00-ab000000000000000000000000000000-qw00000000000000-01",   "bogus span ID"),
            ("00-ab000000000000000000000000000000-cd00000000000000-qw",   "bogus trace flag"),
            ("00-AB000000000000000000000000000000-cd00000000000000-01",   "upper case trace ID"),
            ("00-ab000000000000000000000000000000-CD00000000000000-01",   "upper case span ID"),
            ("00-ab000000000000000000000000000000-cd00000000000000-A1",   "upper case trace flag"),
            ("00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7",      "missing options"),
            ("00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-",     "empty options"),
            ("00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-01x",  "no delimiter after flags"),
            ("",                                                          "empty header"),
            ("00",                                                        "only version"),
            ("00-4bf92f3577b34da6a3ce929d0e0e4736_00f067aa0ba902b7-01",   "wrong delimiter character"),
            ("00-café2f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-01",   "multi-byte chars in trace ID"),
        ]
    }

    #[rustfmt::skip]
    fn inject_data() -> Vec<(&'static str, &'static str, SpanContext)> {
        vec![
            ("00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-01", "foo=bar", SpanContext::new(TraceId::from(0x4bf9_2f35_77b3_4da6_a3ce_929d_0e0e_4736), SpanId::from(0x00f0_67aa_0ba9_02b7), TraceFlags::SAMPLED, true, TraceState::from_str("foo=bar").unwrap())),
            ("00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-00", "foo=bar", SpanContext::new(TraceId::from(0x4bf9_2f35_77b3_4da6_a3ce_929d_0e0e_4736), SpanId::from(0x00f0_67aa_0ba9_02b7), TraceFlags::default(), true, TraceState::from_str("foo=bar").unwrap())),
            ("00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-ff", "foo=bar", SpanContext::new(TraceId::from(0x4bf9_2f35_77b3_4da6_a3ce_929d_0e0e_4736), SpanId::from(0x00f0_67aa_0ba9_02b7), TraceFlags::new(0xff), true, TraceState::from_str("foo=bar").unwrap())),
        ]
    }

    #[test]
    fn extract_well_formed() {
        let propagator = TraceContextPropagator::new();

        for (trace_parent, trace_state, expected_context) in extract_data() {
            let extractor = carrier(Some(trace_parent), Some(trace_state));
            assert_eq!(
                propagator.extract(&extractor).unwrap(),
                expected_context,
                "{trace_parent}"
            );
        }
    }

    #[test]
    fn extract_missing_header_yields_invalid_context() {
        let propagator = TraceContextPropagator::new();
        let extractor = carrier(None, None);

        assert_eq!(propagator.extract(&extractor).unwrap(), SpanContext::NONE);

        // a tracestate on its own does not create a parent either
        let extractor = carrier(None, Some("foo=bar"));
        assert_eq!(propagator.extract(&extractor).unwrap(), SpanContext::NONE);
    }

    #[test]
    fn extract_marks_context_remote() {
        let propagator = TraceContextPropagator::new();
        let extractor = carrier(
            Some("00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-01"),
            None,
        );

        let cx = propagator.extract(&extractor).unwrap();
        assert!(cx.is_remote());
        assert!(cx.is_sampled());
        assert_eq!(
            cx.trace_id(),
            TraceId::from_hex("4bf92f3577b34da6a3ce929d0e0e4736").unwrap()
        );
        assert_eq!(cx.span_id(), SpanId::from_hex("00f067aa0ba902b7").unwrap());
        assert!(cx.trace_state().is_empty());
    }

    #[test]
    fn extract_rejects_malformed_headers() {
        let propagator = TraceContextPropagator::new();

        for (invalid_header, reason) in extract_data_invalid() {
            let extractor = carrier(Some(invalid_header), None);
            let err = propagator
                .extract(&extractor)
                .expect_err(&format!("accepted {invalid_header:?} ({reason})"));
            assert!(
                matches!(
                    err,
                    TraceError::InvalidFormat { name: TRACEPARENT_HEADER, ref value }
                        if value == invalid_header
                ),
                "wrong error for {invalid_header:?} ({reason}): {err:?}"
            );
        }
    }

    #[test]
    fn extract_preserves_tracestate_order() {
        let propagator = TraceContextPropagator::new();
        let extractor = carrier(
            Some("00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-01"),
            Some("rojo=00,congo=t61"),
        );

        let cx = propagator.extract(&extractor).unwrap();
        assert_eq!(cx.trace_state().header(), "rojo=00,congo=t61");

        // re-injecting reproduces the same wire value in the same order
        let mut injector = HashMap::new();
        propagator.inject(&cx, &mut injector);
        assert_eq!(
            Extractor::get(&injector, TRACESTATE_HEADER),
            Some("rojo=00,congo=t61")
        );
    }

    #[test]
    fn extract_ignores_unparsable_tracestate() {
        let propagator = TraceContextPropagator::new();
        let extractor = carrier(
            Some("00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-01"),
            Some("no-equals-sign"),
        );

        let cx = propagator.extract(&extractor).unwrap();
        assert!(cx.is_valid());
        assert!(cx.trace_state().is_empty());
    }

    #[test]
    fn inject_well_formed() {
        let propagator = TraceContextPropagator::new();

        for (expected_trace_parent, expected_trace_state, context) in inject_data() {
            let mut injector = HashMap::new();
            propagator.inject(&context, &mut injector);

            assert_eq!(
                Extractor::get(&injector, TRACEPARENT_HEADER).unwrap_or(""),
                expected_trace_parent
            );
            assert_eq!(
                Extractor::get(&injector, TRACESTATE_HEADER).unwrap_or(""),
                expected_trace_state
            );
        }
    }

    #[test]
    fn inject_omits_empty_tracestate() {
        let propagator = TraceContextPropagator::new();
        let cx = SpanContext::new(
            TraceId::from(0x4bf9_2f35_77b3_4da6_a3ce_929d_0e0e_4736),
            SpanId::from(0x00f0_67aa_0ba9_02b7),
            TraceFlags::SAMPLED,
            true,
            TraceState::NONE,
        );

        let mut injector = HashMap::new();
        propagator.inject(&cx, &mut injector);

        assert_eq!(
            Extractor::get(&injector, TRACEPARENT_HEADER),
            Some("00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-01")
        );
        assert!(
            !injector.contains_key(TRACESTATE_HEADER),
            "empty tracestate must not be written at all"
        );
    }

    #[test]
    fn inject_skips_invalid_context() {
        let propagator = TraceContextPropagator::new();

        let mut injector = HashMap::new();
        propagator.inject(&SpanContext::NONE, &mut injector);
        assert!(injector.is_empty());
    }

    #[test]
    fn fields_lists_both_headers() {
        let propagator = TraceContextPropagator::new();
        let fields: Vec<&str> = propagator.fields().collect();
        assert_eq!(fields, vec![TRACEPARENT_HEADER, TRACESTATE_HEADER]);
    }
}
