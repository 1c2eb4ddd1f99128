//! # Signal types and their hierarchy.
//!
//! A [`SignalType`] is a named, user-declared category of signal. Every type owns
//! exactly one subscriber [`Registry`], created when the type is declared and never
//! shared with any base type. Only the *traversal* links registries together.
//!
//! ## Hierarchy
//! ```text
//!                 Signal (root)
//!                 ▲          ▲
//!                 │          │
//!            Lifecycle    Network
//!             ▲     ▲        ▲
//!             │     │        │
//!        Started  Stopped  Reconnected(Stopped, Network)
//! ```
//!
//! The ancestor chain (MRO) of a type is computed once, at declaration time, using
//! C3 linearization of its bases. For a single base it is simply `base` followed by
//! the base's own chain. The chain always ends at the root.
//!
//! ```text
//! Reconnected.mro() = [Reconnected, Stopped, Lifecycle, Network, Signal]
//! ```

use std::borrow::Cow;
use std::fmt;
use std::sync::{Arc, LazyLock};

use tracing::debug;

use crate::error::HierarchyError;
use crate::handlers::{Handler, Registry};
use crate::signals::Signal;

/// Name of the process-wide root type.
pub const ROOT_NAME: &str = "Signal";

static ROOT: LazyLock<SignalType> = LazyLock::new(|| SignalType {
    inner: Arc::new(TypeInner {
        name: Cow::Borrowed(ROOT_NAME),
        bases: Vec::new(),
        ancestors: Vec::new(),
        registry: Registry::new(),
    }),
});

struct TypeInner {
    name: Cow<'static, str>,
    bases: Vec<SignalType>,
    /// Linearized ancestors, excluding the type itself.
    ancestors: Vec<SignalType>,
    registry: Registry,
}

/// Handle to a declared signal type.
///
/// Cheap to clone; clones refer to the same declaration. Equality is identity:
/// two types declared with the same name are still distinct.
///
/// ## Example
/// ```rust
/// use greenrocket::{Handler, Signal, SignalType};
///
/// let started = SignalType::derive("Started", &SignalType::root());
/// let handler = started.subscribe(Handler::new("print", |s: &Signal| println!("{s}")));
///
/// started.signal().with("task", "db").fire();
/// # drop(handler);
/// ```
#[derive(Clone)]
pub struct SignalType {
    inner: Arc<TypeInner>,
}

impl SignalType {
    /// Returns the process-wide root type, named `Signal`.
    pub fn root() -> SignalType {
        ROOT.clone()
    }

    /// Declares a new type deriving from a single base.
    pub fn derive(name: impl Into<Cow<'static, str>>, base: &SignalType) -> SignalType {
        let mut ancestors = Vec::with_capacity(base.inner.ancestors.len() + 1);
        ancestors.push(base.clone());
        ancestors.extend(base.inner.ancestors.iter().cloned());
        Self::declare(name.into(), vec![base.clone()], ancestors)
    }

    /// Declares a new type deriving from several bases.
    ///
    /// Bases are listed in precedence order. The ancestor chain is the C3
    /// linearization of the bases' chains.
    ///
    /// ### Errors
    /// - [`HierarchyError::NoBases`] when `bases` is empty;
    /// - [`HierarchyError::DuplicateBase`] when a base is listed twice;
    /// - [`HierarchyError::Inconsistent`] when no consistent order exists.
    pub fn derive_from(
        name: impl Into<Cow<'static, str>>,
        bases: &[&SignalType],
    ) -> Result<SignalType, HierarchyError> {
        let name = name.into();
        if bases.is_empty() {
            return Err(HierarchyError::NoBases {
                name: name.into_owned(),
            });
        }
        for (i, base) in bases.iter().enumerate() {
            if bases[..i].contains(base) {
                return Err(HierarchyError::DuplicateBase {
                    name: name.into_owned(),
                    base: base.name().to_string(),
                });
            }
        }

        let ancestors = linearize(bases).ok_or_else(|| HierarchyError::Inconsistent {
            name: name.to_string(),
            bases: bases.iter().map(|b| b.name().to_string()).collect(),
        })?;
        let bases = bases.iter().map(|b| (*b).clone()).collect();
        Ok(Self::declare(name, bases, ancestors))
    }

    fn declare(
        name: Cow<'static, str>,
        bases: Vec<SignalType>,
        ancestors: Vec<SignalType>,
    ) -> SignalType {
        debug!(signal_type = %name, depth = ancestors.len(), "declared signal type");
        SignalType {
            inner: Arc::new(TypeInner {
                name,
                bases,
                ancestors,
                registry: Registry::new(),
            }),
        }
    }

    /// Type name, as used in signal rendering.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Direct bases in declaration order (empty for the root).
    pub fn bases(&self) -> &[SignalType] {
        &self.inner.bases
    }

    /// Iterates the type itself followed by its linearized ancestors, root last.
    pub fn mro(&self) -> impl Iterator<Item = &SignalType> {
        std::iter::once(self).chain(self.inner.ancestors.iter())
    }

    /// True if `other` is this type or one of its ancestors.
    pub fn is_subtype_of(&self, other: &SignalType) -> bool {
        self.mro().any(|t| t == other)
    }

    /// Creates an instance of this type without attributes.
    pub fn signal(&self) -> Signal {
        Signal::new(self)
    }

    /// Subscribes `handler` to this type and returns it unchanged.
    ///
    /// Subscribing twice is a no-op. The registry holds the handler weakly: once
    /// every clone of the returned [`Handler`] is dropped, it is no longer invoked.
    #[must_use = "dropping the returned handler evicts it from the registry"]
    pub fn subscribe(&self, handler: Handler) -> Handler {
        debug!(signal_type = self.name(), handler = handler.name(), "subscribe");
        self.inner.registry.insert(&handler);
        handler
    }

    /// Unsubscribes `handler`. Does nothing if it is not subscribed.
    pub fn unsubscribe(&self, handler: &Handler) {
        debug!(signal_type = self.name(), handler = handler.name(), "unsubscribe");
        self.inner.registry.remove(handler);
    }

    /// Number of live handlers subscribed directly to this type.
    pub fn subscriber_count(&self) -> usize {
        self.inner.registry.len()
    }

    pub(crate) fn registry(&self) -> &Registry {
        &self.inner.registry
    }
}

impl PartialEq for SignalType {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for SignalType {}

impl fmt::Debug for SignalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SignalType").field(&self.name()).finish()
    }
}

impl fmt::Display for SignalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// C3 merge of the bases' chains followed by the base list itself.
///
/// Returns `None` when the hierarchy admits no consistent linearization.
fn linearize(bases: &[&SignalType]) -> Option<Vec<SignalType>> {
    let mut seqs: Vec<Vec<SignalType>> = bases
        .iter()
        .map(|b| b.mro().cloned().collect())
        .collect();
    seqs.push(bases.iter().map(|b| (*b).clone()).collect());

    let mut out = Vec::new();
    loop {
        seqs.retain(|s| !s.is_empty());
        if seqs.is_empty() {
            return Some(out);
        }

        let head = seqs
            .iter()
            .map(|s| &s[0])
            .find(|cand| !seqs.iter().any(|s| s[1..].contains(*cand)))?
            .clone();

        for seq in &mut seqs {
            if seq[0] == head {
                seq.remove(0);
            }
        }
        out.push(head);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(t: &SignalType) -> Vec<&str> {
        t.mro().map(SignalType::name).collect()
    }

    #[test]
    fn test_root_is_shared() {
        assert_eq!(SignalType::root(), SignalType::root());
        assert_eq!(SignalType::root().name(), "Signal");
        assert!(SignalType::root().bases().is_empty());
    }

    #[test]
    fn test_single_base_chain_ends_at_root() {
        let a = SignalType::derive("A", &SignalType::root());
        let b = SignalType::derive("B", &a);

        assert_eq!(names(&b), vec!["B", "A", "Signal"]);
        assert!(b.is_subtype_of(&a));
        assert!(b.is_subtype_of(&SignalType::root()));
        assert!(!a.is_subtype_of(&b));
    }

    #[test]
    fn test_same_name_is_distinct_type() {
        let a1 = SignalType::derive("A", &SignalType::root());
        let a2 = SignalType::derive("A", &SignalType::root());
        assert_ne!(a1, a2);
    }

    #[test]
    fn test_diamond_linearization() {
        let root = SignalType::root();
        let lifecycle = SignalType::derive("Lifecycle", &root);
        let stopped = SignalType::derive("Stopped", &lifecycle);
        let network = SignalType::derive("Network", &root);
        let reconnected = SignalType::derive_from("Reconnected", &[&stopped, &network]).unwrap();

        assert_eq!(
            names(&reconnected),
            vec!["Reconnected", "Stopped", "Lifecycle", "Network", "Signal"]
        );
        assert_eq!(reconnected.bases().len(), 2);
    }

    #[test]
    fn test_shared_base_appears_once() {
        let root = SignalType::root();
        let x = SignalType::derive("X", &root);
        let y = SignalType::derive("Y", &x);
        let z = SignalType::derive("Z", &x);
        let w = SignalType::derive_from("W", &[&y, &z]).unwrap();

        assert_eq!(names(&w), vec!["W", "Y", "Z", "X", "Signal"]);
    }

    #[test]
    fn test_inconsistent_hierarchy_rejected() {
        let root = SignalType::root();
        let x = SignalType::derive("X", &root);
        let y = SignalType::derive("Y", &x);

        // X must precede Y per the base list, but Y precedes X in Y's own chain.
        let err = SignalType::derive_from("Bad", &[&x, &y]).unwrap_err();
        assert_eq!(err.as_label(), "hierarchy_inconsistent");
    }

    #[test]
    fn test_empty_and_duplicate_bases_rejected() {
        let root = SignalType::root();
        let a = SignalType::derive("A", &root);

        let err = SignalType::derive_from("None", &[]).unwrap_err();
        assert!(matches!(err, HierarchyError::NoBases { .. }));

        let err = SignalType::derive_from("Twice", &[&a, &a]).unwrap_err();
        assert!(matches!(err, HierarchyError::DuplicateBase { ref base, .. } if base == "A"));
    }

    #[test]
    fn test_registries_are_not_shared() {
        let a = SignalType::derive("A", &SignalType::root());
        let b = SignalType::derive("B", &a);
        let h = b.subscribe(Handler::new("h", |_| {}));

        assert_eq!(b.subscriber_count(), 1);
        assert_eq!(a.subscriber_count(), 0);
        drop(h);
    }
}
