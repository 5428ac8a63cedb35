//! Representations of entities producing telemetry.
//!
//! A [`Resource`] is an immutable set of attributes describing the entity
//! that produced a span: a process, a host, a service. Every exported
//! [`SpanData`] carries the resource of its producer.
//!
//! [`SpanData`]: crate::trace::SpanData

mod env;

pub use env::EnvResourceDetector;

use std::collections::{btree_map, BTreeMap};
use tracewire::{Key, KeyValue, Value};

/// An immutable representation of the entity producing telemetry as
/// attributes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Resource {
    attrs: BTreeMap<Key, Value>,
}

impl Resource {
    /// Create a new `Resource` from key value pairs.
    ///
    /// Values are de-duplicated by key; the last value supplied wins.
    pub fn new<T: IntoIterator<Item = KeyValue>>(kvs: T) -> Self {
        let mut attrs = BTreeMap::new();
        for kv in kvs {
            attrs.insert(kv.key, kv.value);
        }
        Resource { attrs }
    }

    /// Create a resource with no attributes.
    pub fn empty() -> Self {
        Resource::default()
    }

    /// Create a resource by running each detector, merging results in
    /// declaration order.
    pub fn from_detectors(detectors: &[Box<dyn ResourceDetector>]) -> Self {
        let mut resource = Resource::empty();
        for detector in detectors {
            resource = resource.merge(&detector.detect());
        }
        resource
    }

    /// Create a new `Resource` by combining this one with `other`; on key
    /// collisions the attribute from `other` wins.
    pub fn merge(&self, other: &Self) -> Self {
        let mut attrs = self.attrs.clone();
        for (k, v) in other.attrs.iter() {
            attrs.insert(k.clone(), v.clone());
        }
        Resource { attrs }
    }

    /// The number of attributes.
    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    /// Returns `true` if the resource has no attributes.
    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    /// An iterator over the attributes, ordered by key.
    pub fn iter(&self) -> Iter<'_> {
        Iter(self.attrs.iter())
    }

    /// Retrieve the value for the given key, if it is set.
    pub fn get(&self, key: &Key) -> Option<&Value> {
        self.attrs.get(key)
    }
}

/// An iterator over the attributes of a `Resource`.
#[derive(Debug)]
pub struct Iter<'a>(btree_map::Iter<'a, Key, Value>);

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a Key, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }
}

impl<'a> IntoIterator for &'a Resource {
    type Item = (&'a Key, &'a Value);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Detects attributes describing the running entity from some source of
/// information.
pub trait ResourceDetector {
    /// Detect and return the attributes this source knows about.
    fn detect(&self) -> Resource;
}
