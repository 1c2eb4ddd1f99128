//! # Example: basic
//!
//! Declares a small signal hierarchy and shows propagation, weak subscriptions and
//! failure isolation.
//!
//! ## Flow
//! ```text
//! Lifecycle ──► Started
//!           └─► Stopped
//!
//! Started().fire()
//!     ├─► Started handlers   ("on_started")
//!     ├─► Lifecycle handlers ("audit", "flaky": fails, isolated)
//!     └─► Signal handlers    (none)
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=greenrocket=debug cargo run --example basic
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use greenrocket::{Handler, HandlerResult, Signal, SignalType};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let lifecycle = SignalType::derive("Lifecycle", &SignalType::root());
    let started = SignalType::derive("Started", &lifecycle);
    let stopped = SignalType::derive("Stopped", &lifecycle);

    let audited = Arc::new(AtomicU32::new(0));
    let counter = Arc::clone(&audited);
    let _audit = lifecycle.subscribe(Handler::new("audit", move |s: &Signal| {
        counter.fetch_add(1, Ordering::Relaxed);
        println!("[audit]      {s}");
    }));
    let _flaky = lifecycle.subscribe(Handler::new("flaky", |s: &Signal| -> HandlerResult {
        if s.get("task").and_then(|v| v.as_str()) == Some("db") {
            return Err("db tasks are not audited".into());
        }
        Ok(())
    }));
    let on_started = started.subscribe(Handler::new("on_started", |s: &Signal| {
        println!("[on_started] {s}");
    }));

    started.signal().with("task", "web").with("attempt", 1).fire();
    started.signal().with("task", "db").with("attempt", 1).fire();
    stopped.signal().with("task", "web").fire();

    // Dropping the last clone of a handler evicts it; no unsubscribe needed.
    drop(on_started);
    started.signal().with("task", "web").with("attempt", 2).fire();

    println!();
    println!("Audited: {}", audited.load(Ordering::Relaxed));
    println!(" └─► live handlers on Started: {}", started.subscriber_count());
}
