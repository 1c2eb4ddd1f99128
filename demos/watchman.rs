//! # Example: watchman
//!
//! Records signals with a [`Watchman`] and asserts on what was fired, as a test
//! would. Also installs a failure hook through [`configure`].
//!
//! ## Run
//! ```bash
//! cargo run --example watchman
//! ```

use std::sync::Arc;

use greenrocket::{Config, DispatchError, Handler, HandlerResult, Signal, SignalType, Watchman, configure};

fn main() {
    configure(Config {
        log_failures: false,
        on_failure: Some(Arc::new(|err: &DispatchError| {
            println!("[hook] {}: {err}", err.as_label());
        })),
    });

    let payment = SignalType::derive("Payment", &SignalType::root());
    let refund = SignalType::derive("Refund", &payment);
    let watchman = Watchman::new(&payment);

    let _ledger = payment.subscribe(Handler::new("ledger", |s: &Signal| -> HandlerResult {
        match s.get("amount").and_then(|v| v.as_i64()) {
            Some(amount) if amount > 0 => Ok(()),
            _ => Err(format!("invalid amount in {s}").into()),
        }
    }));

    payment.signal().with("id", 1).with("amount", 250).fire();
    refund.signal().with("id", 1).with("amount", -250).fire();

    println!("recorded {} signals:", watchman.len());
    for (i, s) in watchman.log().iter().enumerate() {
        println!(" ├─► [{i}] {s}");
    }

    watchman.assert_fired_with(-2, [("id", 1), ("amount", 250)]);
    for (index, name, value) in [(-1, "amount", 250), (-1, "currency", 0), (-3, "id", 1)] {
        match watchman.check_fired_with(index, [(name, value)]) {
            Ok(()) => println!(" └─► ok"),
            Err(err) => println!(" └─► {}: {err}", err.as_label()),
        }
    }
}
