//! Environment-based resource detection.

use super::{Resource, ResourceDetector};
use std::env;
use tracewire::KeyValue;

/// Environment variable listing resource attributes as comma-separated
/// `key=value` pairs.
const RESOURCE_ATTRIBUTES: &str = "TRACEWIRE_RESOURCE_ATTRIBUTES";

/// Reads resource attributes from the `TRACEWIRE_RESOURCE_ATTRIBUTES`
/// environment variable.
///
/// The value is a comma-separated list of `key=value` pairs:
///
/// ```text
/// TRACEWIRE_RESOURCE_ATTRIBUTES="service.name=checkout,deployment.zone=eu-1"
/// ```
#[derive(Debug, Default)]
pub struct EnvResourceDetector {
    _private: (),
}

impl EnvResourceDetector {
    /// Create a new environment resource detector.
    pub fn new() -> Self {
        EnvResourceDetector { _private: () }
    }
}

impl ResourceDetector for EnvResourceDetector {
    fn detect(&self) -> Resource {
        match env::var(RESOURCE_ATTRIBUTES) {
            Ok(s) if !s.is_empty() => parse_attributes(&s),
            _ => Resource::empty(),
        }
    }
}

/// Parse the comma-separated attribute list; entries without a `=` or with
/// an empty key are skipped.
fn parse_attributes(s: &str) -> Resource {
    Resource::new(s.split_terminator(',').filter_map(|entry| {
        let (key, value) = entry.split_once('=')?;
        let (key, value) = (key.trim(), value.trim());
        if key.is_empty() {
            return None;
        }
        Some(KeyValue::new(key.to_owned(), value.to_owned()))
    }))
}
