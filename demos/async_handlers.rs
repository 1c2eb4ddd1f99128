//! # Example: async_handlers
//!
//! Shows `afire()`: asynchronous handlers of a firing run concurrently, and a
//! failing one does not cancel the others.
//!
//! ## Flow
//! ```text
//! Upload().afire()
//!     ├─► "thumbnail" (sync, inline)
//!     ├─► "store"     (async, 300ms)      ┐
//!     ├─► "index"     (async, 100ms)      ├─ join_all
//!     └─► "notify"    (async, fails)      ┘
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example async_handlers
//! ```

use std::time::{Duration, Instant};

use async_trait::async_trait;
use greenrocket::{AsyncHandle, Handler, HandlerResult, Signal, SignalType};
use tracing_subscriber::EnvFilter;

struct Store {
    delay: Duration,
}

#[async_trait]
impl AsyncHandle for Store {
    async fn handle(&self, signal: &Signal) -> HandlerResult {
        tokio::time::sleep(self.delay).await;
        println!("[store]     saved {signal}");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "store"
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let upload = SignalType::derive("Upload", &SignalType::root());

    let _thumbnail = upload.subscribe(Handler::new("thumbnail", |s: &Signal| {
        println!("[thumbnail] {s}");
    }));
    let _store = upload.subscribe(Handler::from_async_handle(Store {
        delay: Duration::from_millis(300),
    }));
    let _index = upload.subscribe(Handler::new_async("index", |s: Signal| async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        println!("[index]     indexed {s}");
    }));
    let _notify = upload.subscribe(Handler::new_async("notify", |_s: Signal| async {
        Err::<(), _>("mail server unreachable")
    }));

    let started = Instant::now();
    upload.signal().with("file", "cat.png").with("size", 48_213).afire().await;
    println!("afire completed in {:?}", started.elapsed());
}
