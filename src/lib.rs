//! # greenrocket
//!
//! **greenrocket** is a lightweight in-process publish/subscribe library built
//! around typed signals.
//!
//! Declaring a [`SignalType`] creates an independent subscriber registry for it.
//! Firing a [`Signal`] notifies the handlers of its own type and then those of every
//! ancestor type, most specific first. Registries hold handlers weakly, so
//! subscribing never extends a handler's lifetime.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   SignalType::root()  "Signal"  ──owns──► Registry [weak handlers]
//!          ▲
//!          │ derive
//!   SignalType "MySignal"         ──owns──► Registry [weak handlers]
//!          │
//!          │ Signal::new(&my).with("x", 1)
//!          ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  dispatch                                                         │
//! │  - walks my.mro(): MySignal ─► Signal                             │
//! │  - snapshots each registry, skips dead entries                    │
//! │  - isolates every handler (Err and panic) ─► tracing + hook       │
//! └──────┬──────────────────────────────┬─────────────────────────────┘
//!        ▼ fire()                       ▼ afire().await
//!   sync handlers, in order       sync handlers inline, async handlers
//!                                 joined concurrently (join_all)
//! ```
//!
//! ## Features
//! | Area              | Description                                                 | Key types / traits                          |
//! |-------------------|-------------------------------------------------------------|---------------------------------------------|
//! | **Signal types**  | Declare types, single or multiple bases (C3 order).         | [`SignalType`]                              |
//! | **Signals**       | Instances with named, ordered attributes.                   | [`Signal`], [`Attributes`], [`Value`]       |
//! | **Handlers**      | Closures or structs, sync or async, weakly subscribed.      | [`Handler`], [`Handle`], [`AsyncHandle`]    |
//! | **Diagnostics**   | Record fired signals and assert on them.                    | [`Watchman`]                                |
//! | **Errors**        | Typed errors for declarations, dispatch and assertions.     | [`HierarchyError`], [`DispatchError`], [`AssertionError`] |
//! | **Configuration** | How isolated failures are reported.                         | [`Config`], [`configure`]                   |
//!
//! ## Example
//! ```rust
//! use greenrocket::{Handler, Signal, SignalType};
//!
//! let my_signal = SignalType::derive("MySignal", &SignalType::root());
//!
//! let base = SignalType::root().subscribe(Handler::new("base", |s: &Signal| {
//!     println!("base_handler: {s}");
//! }));
//! let handler = my_signal.subscribe(Handler::new("my", |s: &Signal| {
//!     println!("handler: {s}");
//! }));
//!
//! // handler: MySignal(), then base_handler: MySignal()
//! my_signal.signal().fire();
//!
//! my_signal.unsubscribe(&handler);
//! // base_handler: MySignal()
//! my_signal.signal().fire();
//! # drop(base);
//! ```
mod config;
mod dispatch;
mod error;
mod handlers;
mod signals;
mod watchman;

// ---- Public re-exports ----

pub use config::{Config, FailureHook, configure};
pub use error::{AssertionError, DispatchError, HandlerError, HandlerResult, HierarchyError};
pub use handlers::{AsyncHandle, Handle, Handler, IntoHandlerResult};
pub use signals::{Attributes, ROOT_NAME, Signal, SignalType, Value};
pub use watchman::Watchman;
