//! # Synchronous and asynchronous dispatch.
//!
//! ## Algorithm
//! ```text
//! fire(signal)
//!   for type in signal.kind().mro()          (most-derived first, root last)
//!     for entry in type.registry.snapshot()  (lock released before any call)
//!       ├─ dead entry       ─► skip
//!       ├─ sync handler     ─► catch_unwind(f(&signal)) ─► Err/panic ─► report
//!       └─ async handler    ─► skipped (warn): needs afire
//!
//! afire(signal)
//!   same walk; sync handlers run inline, async handlers are started and pushed
//!   join_all(started) ─► each resolves independently ─► Err/panic ─► report
//! ```
//!
//! ## Rules
//! - A failing handler never stops delivery to any other handler or level.
//! - Failures are never returned to the caller; they are logged and passed to the
//!   configured hook.
//! - `afire` never short-circuits: it resolves after every handler future has.

use std::future::Future;
use std::panic::{self, AssertUnwindSafe};

use futures::FutureExt;
use futures::future::join_all;
use tracing::{debug, trace, warn};

use super::report::{panicked, report};
use crate::config;
use crate::error::DispatchError;
use crate::handlers::{AsyncCallback, Callback, Handler, SyncCallback};
use crate::signals::Signal;

pub(crate) fn fire(signal: &Signal) {
    let cfg = config::current();
    debug!(signal = %signal, "fire");

    for kind in signal.kind().mro() {
        trace!(signal = %signal, signal_type = kind.name(), "propagate");
        for entry in kind.registry().snapshot() {
            let Some(handler) = entry.upgrade() else {
                continue;
            };
            match handler.callback() {
                Callback::Sync(f) => {
                    if let Err(failure) = call_sync(&handler, f, signal) {
                        report(&cfg, failure);
                    }
                }
                Callback::Async(_) => {
                    warn!(
                        handler = handler.name(),
                        signal = %signal,
                        "async handler skipped by synchronous fire; use afire"
                    );
                }
            }
        }
    }
}

pub(crate) async fn afire(signal: &Signal) {
    let cfg = config::current();
    debug!(signal = %signal, "afire");

    let mut pending = Vec::new();
    for kind in signal.kind().mro() {
        trace!(signal = %signal, signal_type = kind.name(), "propagate");
        for entry in kind.registry().snapshot() {
            let Some(handler) = entry.upgrade() else {
                continue;
            };
            let outcome = match handler.callback() {
                Callback::Sync(f) => call_sync(&handler, f, signal),
                Callback::Async(f) => start_async(&handler, f, signal).map(|fut| pending.push(fut)),
            };
            if let Err(failure) = outcome {
                report(&cfg, failure);
            }
        }
    }

    trace!(signal = %signal, pending = pending.len(), "awaiting async handlers");
    let cfg = &cfg;
    join_all(pending.into_iter().map(|fut| async move {
        if let Err(failure) = fut.await {
            report(cfg, failure);
        }
    }))
    .await;
}

fn call_sync(handler: &Handler, f: &SyncCallback, signal: &Signal) -> Result<(), DispatchError> {
    trace!(handler = handler.name(), "call");
    match panic::catch_unwind(AssertUnwindSafe(|| f(signal))) {
        Ok(Ok(())) => Ok(()),
        Ok(Err(source)) => Err(DispatchError::Failed {
            handler: handler.name().to_string(),
            signal: signal.clone(),
            source,
        }),
        Err(payload) => Err(panicked(handler, signal, payload)),
    }
}

/// Starts an async handler; creating the future is guarded as well as polling it.
fn start_async(
    handler: &Handler,
    f: &AsyncCallback,
    signal: &Signal,
) -> Result<impl Future<Output = Result<(), DispatchError>> + Send + use<>, DispatchError> {
    trace!(handler = handler.name(), "call");
    let fut = panic::catch_unwind(AssertUnwindSafe(|| f(signal.clone())))
        .map_err(|payload| panicked(handler, signal, payload))?;

    let handler = handler.clone();
    let signal = signal.clone();
    Ok(async move {
        match AssertUnwindSafe(fut).catch_unwind().await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(source)) => Err(DispatchError::Failed {
                handler: handler.name().to_string(),
                signal,
                source,
            }),
            Err(payload) => Err(panicked(&handler, &signal, payload)),
        }
    })
}
