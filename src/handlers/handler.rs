//! # Function-backed handlers (`Handler`)
//!
//! [`Handler`] wraps a closure invoked with each fired [`Signal`]. Two shapes exist:
//! - **sync**: `Fn(&Signal) -> R`, driven by both `fire()` and `afire()`;
//! - **async**: `Fn(Signal) -> Fut`, driven by `afire()` only.
//!
//! `R` (or `Fut::Output`) is either `()` or `Result<(), E>` with `E` convertible
//! into [`HandlerError`]; see [`IntoHandlerResult`].
//!
//! ## Lifetime
//! Registries keep only a weak reference. The handler stays subscribed for as long
//! as some clone of it is alive somewhere else:
//! ```text
//! let h = ty.subscribe(Handler::new(..));   // registry: Weak ──► inner ◄── Arc: h
//! drop(h);                                  // registry: Weak ──► (dead, skipped)
//! ```
//!
//! ## Example
//! ```rust
//! use greenrocket::{Handler, HandlerResult, Signal, SignalType};
//!
//! let ty = SignalType::derive("Job", &SignalType::root());
//!
//! let plain = ty.subscribe(Handler::new("plain", |s: &Signal| println!("{s}")));
//! let fallible = ty.subscribe(Handler::new("fallible", |_s: &Signal| -> HandlerResult {
//!     Err("not today".into())
//! }));
//! let later = ty.subscribe(Handler::new_async("later", |s: Signal| async move {
//!     println!("async {s}");
//! }));
//!
//! assert!(later.is_async());
//! assert_eq!(ty.subscriber_count(), 3);
//! # drop((plain, fallible));
//! ```

use std::borrow::Cow;
use std::fmt;
use std::future::Future;
use std::sync::{Arc, Weak};

use futures::FutureExt;
use futures::future::BoxFuture;

use crate::error::{HandlerError, HandlerResult};
use crate::handlers::handle::{AsyncHandle, Handle};
use crate::signals::Signal;

/// Conversion of a handler's return value into a [`HandlerResult`].
pub trait IntoHandlerResult {
    /// Performs the conversion.
    fn into_handler_result(self) -> HandlerResult;
}

impl IntoHandlerResult for () {
    fn into_handler_result(self) -> HandlerResult {
        Ok(())
    }
}

impl<E: Into<HandlerError>> IntoHandlerResult for Result<(), E> {
    fn into_handler_result(self) -> HandlerResult {
        self.map_err(Into::into)
    }
}

pub(crate) type SyncCallback = dyn Fn(&Signal) -> HandlerResult + Send + Sync;
pub(crate) type AsyncCallback = dyn Fn(Signal) -> BoxFuture<'static, HandlerResult> + Send + Sync;

pub(crate) enum Callback {
    Sync(Box<SyncCallback>),
    Async(Box<AsyncCallback>),
}

pub(crate) struct HandlerInner {
    name: Cow<'static, str>,
    callback: Callback,
}

/// Named callback invoked with fired signals.
///
/// Cheap to clone. Equality is identity: clones are equal, two handlers built from
/// identical closures are not.
#[derive(Clone)]
pub struct Handler {
    inner: Arc<HandlerInner>,
}

impl Handler {
    /// Creates a synchronous handler.
    pub fn new<F, R>(name: impl Into<Cow<'static, str>>, f: F) -> Self
    where
        F: Fn(&Signal) -> R + Send + Sync + 'static,
        R: IntoHandlerResult,
    {
        let callback = move |signal: &Signal| f(signal).into_handler_result();
        Self::from_callback(name.into(), Callback::Sync(Box::new(callback)))
    }

    /// Creates an asynchronous handler.
    ///
    /// Each firing calls `f` with its own clone of the signal and awaits the
    /// returned future. Synchronous `fire()` skips asynchronous handlers.
    pub fn new_async<F, Fut>(name: impl Into<Cow<'static, str>>, f: F) -> Self
    where
        F: Fn(Signal) -> Fut + Send + Sync + 'static,
        Fut: Future + Send + 'static,
        Fut::Output: IntoHandlerResult,
    {
        let callback = move |signal: Signal| {
            f(signal)
                .map(IntoHandlerResult::into_handler_result)
                .boxed()
        };
        Self::from_callback(name.into(), Callback::Async(Box::new(callback)))
    }

    /// Creates a synchronous handler from a [`Handle`] implementation.
    pub fn from_handle<H: Handle>(handle: H) -> Self {
        let name = handle.name();
        let callback = move |signal: &Signal| handle.handle(signal);
        Self::from_callback(Cow::Borrowed(name), Callback::Sync(Box::new(callback)))
    }

    /// Creates an asynchronous handler from an [`AsyncHandle`] implementation.
    pub fn from_async_handle<H: AsyncHandle>(handle: H) -> Self {
        let name = handle.name();
        let handle = Arc::new(handle);
        let callback = move |signal: Signal| {
            let handle = Arc::clone(&handle);
            async move { handle.handle(&signal).await }.boxed()
        };
        Self::from_callback(Cow::Borrowed(name), Callback::Async(Box::new(callback)))
    }

    fn from_callback(name: Cow<'static, str>, callback: Callback) -> Self {
        Self {
            inner: Arc::new(HandlerInner { name, callback }),
        }
    }

    /// Name used in logs and failure reports.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// True if this handler returns a future.
    pub fn is_async(&self) -> bool {
        matches!(self.inner.callback, Callback::Async(_))
    }

    pub(crate) fn callback(&self) -> &Callback {
        &self.inner.callback
    }

    pub(crate) fn downgrade(&self) -> WeakHandler {
        WeakHandler(Arc::downgrade(&self.inner))
    }
}

impl PartialEq for Handler {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Handler {}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("name", &self.name())
            .field("async", &self.is_async())
            .finish()
    }
}

/// Non-owning reference to a [`Handler`], as stored by registries.
#[derive(Clone)]
pub(crate) struct WeakHandler(Weak<HandlerInner>);

impl WeakHandler {
    pub(crate) fn upgrade(&self) -> Option<Handler> {
        self.0.upgrade().map(|inner| Handler { inner })
    }

    pub(crate) fn is_alive(&self) -> bool {
        self.0.strong_count() > 0
    }

    pub(crate) fn points_to(&self, handler: &Handler) -> bool {
        std::ptr::eq(self.0.as_ptr(), Arc::as_ptr(&handler.inner))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_are_equal_distinct_handlers_are_not() {
        let a = Handler::new("a", |_| {});
        let b = Handler::new("a", |_| {});

        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn test_weak_handler_dies_with_last_clone() {
        let h = Handler::new("h", |_| {});
        let clone = h.clone();
        let weak = h.downgrade();

        drop(h);
        assert!(weak.is_alive());
        assert!(weak.points_to(&clone));

        drop(clone);
        assert!(!weak.is_alive());
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn test_result_conversion() {
        assert!(().into_handler_result().is_ok());
        assert!(Ok::<(), String>(()).into_handler_result().is_ok());

        let err = Err::<(), _>("boom").into_handler_result().unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn test_debug_shows_name_and_shape() {
        let h = Handler::new_async("worker", |_s: Signal| async {});
        assert_eq!(format!("{h:?}"), r#"Handler { name: "worker", async: true }"#);
    }
}
