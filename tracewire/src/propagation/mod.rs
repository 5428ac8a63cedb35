//! # Propagator interface
//!
//! Cross-cutting concerns send their state to the next process using
//! propagators: objects that read and write context data to and from
//! messages exchanged by applications.
//!
//! Propagators use [`Injector`] and [`Extractor`] as the carrier
//! abstraction, so the same propagator works over HTTP headers, messaging
//! metadata, or any other key to text-value store.

use std::collections::HashMap;

pub mod composite;
pub mod text_map_propagator;

pub use composite::TextMapCompositePropagator;
pub use text_map_propagator::TextMapPropagator;

/// Injector provides an interface for adding fields to an underlying
/// carrier such as an HTTP header map.
pub trait Injector {
    /// Add a key and value to the carrier.
    fn set(&mut self, key: &str, value: String);
}

/// Extractor provides an interface for reading fields from an underlying
/// carrier such as an HTTP header map.
pub trait Extractor {
    /// Get a value for a key from the carrier.
    fn get(&self, key: &str) -> Option<&str>;

    /// Collect all the keys from the carrier.
    fn keys(&self) -> Vec<&str>;
}

impl<S: std::hash::BuildHasher> Injector for HashMap<String, String, S> {
    /// Set a key and value in the HashMap.
    fn set(&mut self, key: &str, value: String) {
        self.insert(key.to_lowercase(), value);
    }
}

impl<S: std::hash::BuildHasher> Extractor for HashMap<String, String, S> {
    /// Get a value for a key from the HashMap.
    fn get(&self, key: &str) -> Option<&str> {
        self.get(&key.to_lowercase()).map(|v| v.as_str())
    }

    /// Collect all the keys from the HashMap.
    fn keys(&self) -> Vec<&str> {
        self.keys().map(|k| k.as_str()).collect::<Vec<_>>()
    }
}
