//! # Trace Event Interface

use crate::KeyValue;
use std::borrow::Cow;

/// Something that happened during a span's lifetime, recorded with a name
/// and a set of attributes.
///
/// The instant the event was recorded lives with the span that owns it; the
/// export pipeline pairs events with converted timestamps when a span is
/// snapshotted.
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    /// Event name
    pub name: Cow<'static, str>,
    /// Event attributes
    pub attributes: Vec<KeyValue>,
}

impl Event {
    /// Create new `Event`
    pub fn new<T: Into<Cow<'static, str>>>(name: T, attributes: Vec<KeyValue>) -> Self {
        Event {
            name: name.into(),
            attributes,
        }
    }

    /// Create new `Event` with a given name and no attributes.
    pub fn with_name<T: Into<Cow<'static, str>>>(name: T) -> Self {
        Event {
            name: name.into(),
            attributes: Vec::new(),
        }
    }
}
