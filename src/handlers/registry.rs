//! # Per-type subscriber registry.
//!
//! Holds [`WeakHandler`]s only; membership never keeps a handler alive.
//!
//! ## Rules
//! - A handler is stored at most once (identity comparison).
//! - Dead entries are pruned lazily on every mutation and on [`Registry::snapshot`].
//! - Handlers never run while the lock is held: dispatch works on a snapshot, so a
//!   handler may subscribe or unsubscribe during a firing.
//! - Internal order is insertion order; callers must not rely on it.

use std::sync::{PoisonError, RwLock};

use crate::handlers::handler::{Handler, WeakHandler};

pub(crate) struct Registry {
    entries: RwLock<Vec<WeakHandler>>,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Adds `handler` if absent. Returns `true` if it was added.
    pub(crate) fn insert(&self, handler: &Handler) -> bool {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.retain(WeakHandler::is_alive);
        if entries.iter().any(|w| w.points_to(handler)) {
            return false;
        }
        entries.push(handler.downgrade());
        true
    }

    /// Removes `handler` if present. Returns `true` if it was removed.
    pub(crate) fn remove(&self, handler: &Handler) -> bool {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.retain(WeakHandler::is_alive);
        match entries.iter().position(|w| w.points_to(handler)) {
            Some(i) => {
                entries.remove(i);
                true
            }
            None => false,
        }
    }

    /// Live entries at this instant. Entries may still die before they are invoked.
    pub(crate) fn snapshot(&self) -> Vec<WeakHandler> {
        {
            let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
            if entries.iter().all(WeakHandler::is_alive) {
                return entries.clone();
            }
        }
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.retain(WeakHandler::is_alive);
        entries.clone()
    }

    /// Number of live entries.
    pub(crate) fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|w| w.is_alive())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_is_idempotent() {
        let reg = Registry::new();
        let h = Handler::new("h", |_| {});

        assert!(reg.insert(&h));
        assert!(!reg.insert(&h));
        assert!(!reg.insert(&h.clone()));
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.snapshot().len(), 1);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let reg = Registry::new();
        let h = Handler::new("h", |_| {});
        let other = Handler::new("other", |_| {});

        assert!(!reg.remove(&h));
        reg.insert(&other);
        assert!(!reg.remove(&h));
        assert_eq!(reg.len(), 1);

        assert!(reg.remove(&other));
        assert!(!reg.remove(&other));
        assert_eq!(reg.len(), 0);
    }

    #[test]
    fn test_dropped_handler_is_evicted() {
        let reg = Registry::new();
        let keep = Handler::new("keep", |_| {});
        reg.insert(&keep);
        {
            let temp = Handler::new("temp", |_| {});
            reg.insert(&temp);
            assert_eq!(reg.len(), 2);
        }

        assert_eq!(reg.len(), 1);
        let snap = reg.snapshot();
        assert_eq!(snap.len(), 1);
        assert!(snap[0].points_to(&keep));
    }

    #[test]
    fn test_snapshot_keeps_insertion_order() {
        let reg = Registry::new();
        let a = Handler::new("a", |_| {});
        let b = Handler::new("b", |_| {});
        reg.insert(&a);
        reg.insert(&b);

        let names: Vec<String> = reg
            .snapshot()
            .iter()
            .filter_map(WeakHandler::upgrade)
            .map(|h| h.name().to_string())
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
