//! Error types used by greenrocket.
//!
//! This module defines three error enums:
//!
//! - [`HierarchyError`]: a signal type declaration was rejected.
//! - [`DispatchError`]: a handler failed during a firing. Never returned to the
//!   firing caller; it is logged and passed to the configured failure hook.
//! - [`AssertionError`]: a [`Watchman`](crate::Watchman) check did not hold.
//!
//! Each provides `as_label` for logs/metrics.

use thiserror::Error;

use crate::signals::{Signal, Value};

/// Error type a handler may return.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Result type returned by handlers.
pub type HandlerResult = Result<(), HandlerError>;

/// # Rejected signal type declarations.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HierarchyError {
    /// A multi-base declaration listed no bases.
    #[error("signal type {name} needs at least one base")]
    NoBases {
        /// Name of the rejected type.
        name: String,
    },

    /// The same base appears twice in the base list.
    #[error("signal type {name} lists base {base} more than once")]
    DuplicateBase {
        /// Name of the rejected type.
        name: String,
        /// Name of the repeated base.
        base: String,
    },

    /// The bases admit no consistent linearization.
    #[error("cannot linearize signal type {name} with bases {bases:?}")]
    Inconsistent {
        /// Name of the rejected type.
        name: String,
        /// Names of the requested bases, in order.
        bases: Vec<String>,
    },
}

impl HierarchyError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use greenrocket::{HierarchyError, SignalType};
    ///
    /// let err = SignalType::derive_from("Empty", &[]).unwrap_err();
    /// assert_eq!(err.as_label(), "hierarchy_no_bases");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            HierarchyError::NoBases { .. } => "hierarchy_no_bases",
            HierarchyError::DuplicateBase { .. } => "hierarchy_duplicate_base",
            HierarchyError::Inconsistent { .. } => "hierarchy_inconsistent",
        }
    }
}

/// # Isolated handler failures.
///
/// Produced once per failing handler invocation, sync or async.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum DispatchError {
    /// The handler returned an error.
    #[error("handler '{handler}' failed on {signal}: {source}")]
    Failed {
        /// Name of the failing handler.
        handler: String,
        /// The signal being dispatched.
        signal: Signal,
        /// The error returned by the handler.
        source: HandlerError,
    },

    /// The handler panicked.
    #[error("handler '{handler}' panicked on {signal}: {panic}")]
    Panicked {
        /// Name of the failing handler.
        handler: String,
        /// The signal being dispatched.
        signal: Signal,
        /// Panic payload as text.
        panic: String,
    },
}

impl DispatchError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            DispatchError::Failed { .. } => "handler_failed",
            DispatchError::Panicked { .. } => "handler_panicked",
        }
    }

    /// Name of the failing handler.
    pub fn handler(&self) -> &str {
        match self {
            DispatchError::Failed { handler, .. } | DispatchError::Panicked { handler, .. } => {
                handler
            }
        }
    }

    /// The signal being dispatched when the handler failed.
    pub fn signal(&self) -> &Signal {
        match self {
            DispatchError::Failed { signal, .. } | DispatchError::Panicked { signal, .. } => {
                signal
            }
        }
    }
}

/// # Failed [`Watchman`](crate::Watchman) checks.
///
/// `Display` renders the exact assertion message.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssertionError {
    /// No log entry at the requested index.
    #[error("There is no {signal_type} in the log at index {index}")]
    MissingEntry {
        /// Name of the watched type.
        signal_type: String,
        /// Requested index (negative counts from the end).
        index: isize,
    },

    /// The recorded signal lacks an expected attribute.
    #[error("{signal_type} has no attribute {name}")]
    MissingAttribute {
        /// Name of the watched type.
        signal_type: String,
        /// Missing attribute name.
        name: String,
    },

    /// An expected attribute has a different value.
    #[error("Failed assertion on {signal_type}.{name}: {actual} != {expected}")]
    Mismatch {
        /// Name of the watched type.
        signal_type: String,
        /// Attribute name.
        name: String,
        /// Recorded value.
        actual: Value,
        /// Expected value.
        expected: Value,
    },
}

impl AssertionError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            AssertionError::MissingEntry { .. } => "watchman_missing_entry",
            AssertionError::MissingAttribute { .. } => "watchman_missing_attribute",
            AssertionError::Mismatch { .. } => "watchman_mismatch",
        }
    }
}
