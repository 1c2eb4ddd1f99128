//! # Struct-based handler traits.
//!
//! [`Handle`] and [`AsyncHandle`] are the extension points for handlers that carry
//! their own state. Wrap an implementation with [`Handler::from_handle`] or
//! [`Handler::from_async_handle`] to subscribe it.
//!
//! ## Example
//! ```rust
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use greenrocket::{Handle, Handler, HandlerResult, Signal, SignalType};
//!
//! #[derive(Default)]
//! struct Counter(AtomicUsize);
//!
//! impl Handle for Counter {
//!     fn handle(&self, _signal: &Signal) -> HandlerResult {
//!         self.0.fetch_add(1, Ordering::Relaxed);
//!         Ok(())
//!     }
//!
//!     fn name(&self) -> &'static str { "counter" }
//! }
//!
//! let ty = SignalType::derive("Tick", &SignalType::root());
//! let h = ty.subscribe(Handler::from_handle(Counter::default()));
//! assert_eq!(h.name(), "counter");
//! ```
//!
//! [`Handler::from_handle`]: crate::Handler::from_handle
//! [`Handler::from_async_handle`]: crate::Handler::from_async_handle

use async_trait::async_trait;

use crate::error::HandlerResult;
use crate::signals::Signal;

/// Synchronous signal handler.
pub trait Handle: Send + Sync + 'static {
    /// Handles one fired signal.
    ///
    /// An `Err` is reported and does not affect other handlers.
    fn handle(&self, signal: &Signal) -> HandlerResult;

    /// Returns the handler name used in logs and failure reports.
    ///
    /// The default uses `type_name::<Self>()`, which can be verbose.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Asynchronous signal handler, driven by [`Signal::afire`].
#[async_trait]
pub trait AsyncHandle: Send + Sync + 'static {
    /// Handles one fired signal.
    ///
    /// Runs concurrently with the other asynchronous handlers of the same firing.
    async fn handle(&self, signal: &Signal) -> HandlerResult;

    /// Returns the handler name used in logs and failure reports.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
