//! # Global dispatch configuration.
//!
//! Provides [`Config`] process-wide settings for how isolated handler failures are
//! reported. Signal types are process-wide, so their configuration is too.
//!
//! Config is used in two ways:
//! 1. **Installation**: [`configure`] replaces the active config.
//! 2. **Dispatch**: every `fire()`/`afire()` reads the active config once, at start.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use greenrocket::{Config, DispatchError, configure};
//!
//! configure(Config {
//!     log_failures: false,
//!     on_failure: Some(Arc::new(|err: &DispatchError| eprintln!("[{}] {err}", err.as_label()))),
//! });
//! # configure(Config::default());
//! ```

use std::fmt;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use crate::error::DispatchError;

/// Callback receiving every isolated handler failure.
///
/// Runs inline, in the dispatching context, right after the failure is caught.
pub type FailureHook = Arc<dyn Fn(&DispatchError) + Send + Sync>;

static ACTIVE: LazyLock<RwLock<Config>> = LazyLock::new(|| RwLock::new(Config::default()));

/// Global configuration for signal dispatch.
///
/// ## Field semantics
/// - `log_failures`: emit a `tracing` error record per handler failure
/// - `on_failure`: optional hook called per handler failure (after logging)
#[derive(Clone)]
pub struct Config {
    /// Emit an `error!` record for every handler failure.
    pub log_failures: bool,

    /// Hook called with every handler failure.
    ///
    /// The hook must not panic; a panic here is not isolated.
    pub on_failure: Option<FailureHook>,
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `log_failures = true`
    /// - `on_failure = None`
    fn default() -> Self {
        Self {
            log_failures: true,
            on_failure: None,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("log_failures", &self.log_failures)
            .field("on_failure", &self.on_failure.as_ref().map(|_| "<hook>"))
            .finish()
    }
}

/// Installs `config` as the process-wide dispatch configuration.
///
/// Firings already in progress keep the configuration they started with.
pub fn configure(config: Config) {
    *ACTIVE.write().unwrap_or_else(PoisonError::into_inner) = config;
}

/// Returns a copy of the active configuration.
pub(crate) fn current() -> Config {
    ACTIVE
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}
