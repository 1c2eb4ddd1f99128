//! Scenarios subscribing to the process-wide root `Signal`.
//!
//! Every test here takes `ROOT` so root subscribers never observe another test's
//! signals.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use greenrocket::{Attributes, Handler, HandlerResult, Signal, SignalType, Value, Watchman};

static ROOT: Mutex<()> = Mutex::new(());

fn serial() -> MutexGuard<'static, ()> {
    ROOT.lock().unwrap_or_else(PoisonError::into_inner)
}

type Log = Arc<Mutex<Vec<String>>>;

fn recorder(prefix: &'static str, log: &Log) -> Handler {
    let log = Arc::clone(log);
    Handler::new(prefix, move |s: &Signal| {
        log.lock().unwrap().push(format!("{prefix}: {s}"));
    })
}

fn entries(log: &Log) -> Vec<String> {
    log.lock().unwrap().clone()
}

#[test]
fn signal_attributes() {
    let signal = Signal::new(&SignalType::root()).with("a", 1).with("b", 2);
    assert_eq!(signal.get("a"), Some(&Value::Int(1)));
    assert_eq!(signal.get("b"), Some(&Value::Int(2)));
}

#[test]
fn subscription() {
    let _guard = serial();
    let root = SignalType::root();
    let log = Log::default();
    let handler = root.subscribe(recorder("processed", &log));

    root.signal().with("value", "Test").fire();
    assert_eq!(entries(&log), vec![r#"processed: Signal(value="Test")"#]);

    root.unsubscribe(&handler);
    root.signal().with("value", "Test 2").fire();
    assert_eq!(entries(&log), vec![r#"processed: Signal(value="Test")"#]);
}

#[test]
fn double_subscription() {
    let _guard = serial();
    let root = SignalType::root();
    let log = Log::default();
    let handler = recorder("processed", &log);
    let handler = root.subscribe(root.subscribe(handler));

    root.signal().fire();
    assert_eq!(entries(&log), vec!["processed: Signal()"]);

    root.unsubscribe(&handler);
    root.unsubscribe(&handler);
}

#[test]
fn error_swallow() {
    let _guard = serial();
    let root = SignalType::root();
    let handler = root.subscribe(Handler::new("raise", |_s: &Signal| -> HandlerResult {
        Err("Test".into())
    }));

    root.signal().fire();
    root.unsubscribe(&handler);
}

#[test]
fn propagation() {
    let _guard = serial();
    let root = SignalType::root();
    let my_signal = SignalType::derive("MySignal", &root);
    let log = Log::default();

    let handler = root.subscribe(recorder("processed by handler", &log));
    let _my_handler = my_signal.subscribe(recorder("processed by my_handler", &log));

    my_signal.signal().fire();
    assert_eq!(
        entries(&log),
        vec![
            "processed by my_handler: MySignal()",
            "processed by handler: MySignal()",
        ]
    );
    root.unsubscribe(&handler);
}

#[test]
fn weak_handler() {
    let _guard = serial();
    let root = SignalType::root();
    let log = Log::default();

    let subscribe = || {
        let _handler = root.subscribe(recorder("processed", &log));
        root.signal().fire();
    };
    subscribe();
    root.signal().fire();

    assert_eq!(entries(&log), vec!["processed: Signal()"]);
}

#[test]
fn watchman() {
    let _guard = serial();
    let root = SignalType::root();
    let watchman = Watchman::new(&root);
    assert_eq!(watchman.len(), 0);

    root.signal().with("x", 1).with("y", 2).fire();
    assert_eq!(watchman.len(), 1);
    assert_eq!(watchman.log()[0].get("x"), Some(&Value::Int(1)));
    assert_eq!(watchman.log()[0].get("y"), Some(&Value::Int(2)));
    watchman.assert_fired_with(-1, [("x", 1), ("y", 2)]);

    root.signal().with("z", 3).fire();
    assert_eq!(watchman.len(), 2);
    assert_eq!(watchman.log()[1].get("z"), Some(&Value::Int(3)));
    watchman.assert_fired_with(-1, [("z", 3)]);

    watchman.assert_fired_with(-2, [("x", 1), ("y", 2)]);

    let err = watchman.check_fired_with(-3, Attributes::new()).unwrap_err();
    assert_eq!(err.to_string(), "There is no Signal in the log at index -3");

    let err = watchman.check_fired_with(-1, [("x", 1)]).unwrap_err();
    assert_eq!(err.to_string(), "Signal has no attribute x");

    let err = watchman.check_fired_with(-1, [("z", 4)]).unwrap_err();
    assert_eq!(err.to_string(), "Failed assertion on Signal.z: 3 != 4");
}

#[test]
fn watchman_on_root_sees_every_type() {
    let _guard = serial();
    let root = SignalType::root();
    let a = SignalType::derive("A", &root);
    let b = SignalType::derive("B", &a);
    let watchman = Watchman::new(&root);

    a.signal().with("n", 1).fire();
    b.signal().with("n", 2).fire();
    root.signal().with("n", 3).fire();

    let rendered: Vec<String> = watchman.log().iter().map(ToString::to_string).collect();
    assert_eq!(rendered, vec!["A(n=1)", "B(n=2)", "Signal(n=3)"]);
}

#[tokio::test]
async fn afire() {
    let _guard = serial();
    let root = SignalType::root();
    let log = Log::default();

    let l = Arc::clone(&log);
    let _handler = root.subscribe(Handler::new_async("handler", move |s: Signal| {
        let l = Arc::clone(&l);
        async move {
            l.lock().unwrap().push(format!("processed by handler: {s}"));
        }
    }));
    let l = Arc::clone(&log);
    let _error_handler = root.subscribe(Handler::new_async("error_handler", move |s: Signal| {
        let l = Arc::clone(&l);
        async move {
            l.lock().unwrap().push(format!("processed by error_handler: {s}"));
            Err::<(), _>("Test")
        }
    }));

    root.signal().afire().await;

    let mut got = entries(&log);
    got.sort();
    assert_eq!(
        got,
        vec![
            "processed by error_handler: Signal()",
            "processed by handler: Signal()",
        ]
    );
}
