//! # Signal instances.
//!
//! A [`Signal`] is one occurrence of a [`SignalType`], carrying named
//! [`Attributes`] set up at construction. Firing never mutates or consumes it,
//! so the same instance may be fired any number of times.
//!
//! ## Example
//! ```rust
//! use greenrocket::{Signal, SignalType, Value};
//!
//! let s = Signal::new(&SignalType::root()).with("a", 1).with("b", "two");
//!
//! assert_eq!(s.get("a"), Some(&Value::Int(1)));
//! assert_eq!(s.to_string(), r#"Signal(a=1, b="two")"#);
//! ```

use std::fmt;

use crate::dispatch;
use crate::signals::{Attributes, SignalType, Value};

/// One occurrence of a signal type.
#[derive(Clone, PartialEq)]
pub struct Signal {
    kind: SignalType,
    attrs: Attributes,
}

impl Signal {
    /// Creates an instance of `kind` without attributes.
    pub fn new(kind: &SignalType) -> Self {
        Self {
            kind: kind.clone(),
            attrs: Attributes::new(),
        }
    }

    /// Sets an attribute. A repeated name keeps its first position.
    #[must_use]
    pub fn with(mut self, name: impl AsRef<str>, value: impl Into<Value>) -> Self {
        self.attrs.insert(name, value);
        self
    }

    /// Sets every attribute of `attrs`, in order.
    #[must_use]
    pub fn with_attrs(mut self, attrs: Attributes) -> Self {
        for (name, value) in attrs {
            self.attrs.insert(name, value);
        }
        self
    }

    /// Type of this instance.
    pub fn kind(&self) -> &SignalType {
        &self.kind
    }

    /// Looks up an attribute by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attrs.get(name)
    }

    /// All attributes in insertion order.
    pub fn attrs(&self) -> &Attributes {
        &self.attrs
    }

    /// True if this instance's type is `kind` or derives from it.
    pub fn is(&self, kind: &SignalType) -> bool {
        self.kind.is_subtype_of(kind)
    }

    /// Dispatches this signal synchronously.
    ///
    /// Handlers of the instance's own type run first, then those of each ancestor
    /// up to the root. A failing or panicking handler is reported and skipped;
    /// it never stops delivery to the others.
    pub fn fire(&self) {
        dispatch::fire(self);
    }

    /// Dispatches this signal, awaiting asynchronous handlers concurrently.
    ///
    /// Resolves once every selected handler has finished, successfully or not.
    pub async fn afire(&self) {
        dispatch::afire(self).await;
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind.name(), self.attrs)
    }
}

impl fmt::Debug for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attributes_readable_by_name() {
        let s = SignalType::root().signal().with("a", 1).with("b", 2);
        assert_eq!(s.get("a").and_then(Value::as_i64), Some(1));
        assert_eq!(s.get("b").and_then(Value::as_i64), Some(2));
        assert_eq!(s.get("c"), None);
    }

    #[test]
    fn test_rendering() {
        let my = SignalType::derive("MySignal", &SignalType::root());
        assert_eq!(my.signal().to_string(), "MySignal()");
        assert_eq!(
            format!("{:?}", my.signal().with("value", "Test").with("n", 2)),
            r#"MySignal(value="Test", n=2)"#
        );
    }

    #[test]
    fn test_equality_is_type_and_attributes() {
        let a = SignalType::derive("A", &SignalType::root());
        let b = SignalType::derive("A", &SignalType::root());

        assert_eq!(a.signal().with("x", 1), a.signal().with("x", 1));
        assert_ne!(a.signal().with("x", 1), a.signal().with("x", 2));
        assert_ne!(a.signal().with("x", 1), b.signal().with("x", 1));
    }

    #[test]
    fn test_with_attrs_merges_in_order() {
        let attrs = Attributes::new().with("y", 2).with("x", 10);
        let s = SignalType::root().signal().with("x", 1).with_attrs(attrs);
        assert_eq!(s.to_string(), "Signal(x=10, y=2)");
    }

    #[test]
    fn test_is_follows_hierarchy() {
        let base = SignalType::derive("Base", &SignalType::root());
        let child = SignalType::derive("Child", &base);
        let s = child.signal();

        assert!(s.is(&base));
        assert!(s.is(&SignalType::root()));
        assert!(!base.signal().is(&child));
    }
}
