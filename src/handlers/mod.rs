//! # Signal handlers and per-type registries.
//!
//! ## Architecture
//! ```text
//!   SignalType ──owns──► Registry [Weak, Weak, ...]
//!                                   │
//!                           (non-owning)
//!                                   ▼
//!   caller ──holds──► Handler ──► Arc<name + callback>
//!                                        ├─► Sync:  Fn(&Signal) -> HandlerResult
//!                                        └─► Async: Fn(Signal)  -> BoxFuture<HandlerResult>
//! ```
//!
//! ## Handler kinds
//! - **Closures**: [`Handler::new`], [`Handler::new_async`]
//! - **Stateful structs**: [`Handle`], [`AsyncHandle`] via [`Handler::from_handle`] and
//!   [`Handler::from_async_handle`]

mod handle;
mod handler;
mod registry;

pub use handle::{AsyncHandle, Handle};
pub use handler::{Handler, IntoHandlerResult};

pub(crate) use handler::{AsyncCallback, Callback, SyncCallback};
pub(crate) use registry::Registry;
