//! # Diagnostic subscriber that records fired signals.
//!
//! [`Watchman`] subscribes itself to one [`SignalType`] on construction and appends
//! every signal reaching that type's registry to its log: instances of the type
//! itself and of every type deriving from it.
//!
//! ## Architecture
//! ```text
//! Signal::fire() ──► dispatch walks mro() ──► bound type's registry
//!                                                  │
//!                                                  ▼
//!                                    Recorder::handle(&Signal)
//!                                                  │ push(clone)
//!                                                  ▼
//!                                    log: Mutex<Vec<Signal>>  ◄── check_fired_with(index, ..)
//! ```
//!
//! ## Rules
//! - Entries appear in fire order.
//! - Indices may be negative: `-1` is the most recent entry.
//! - Dropping the Watchman drops its recorder, which is then evicted from the
//!   registry like any other handler.
//!
//! ## Example
//! ```rust
//! use greenrocket::{SignalType, Watchman};
//!
//! let ty = SignalType::derive("Job", &SignalType::root());
//! let watchman = Watchman::new(&ty);
//!
//! ty.signal().with("x", 1).with("y", 2).fire();
//! ty.signal().with("z", 3).fire();
//!
//! watchman.assert_fired_with(-1, [("z", 3)]);
//! watchman.assert_fired_with(-2, [("x", 1), ("y", 2)]);
//!
//! let err = watchman.check_fired_with(-1, [("z", 4)]).unwrap_err();
//! assert_eq!(err.to_string(), "Failed assertion on Job.z: 3 != 4");
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::{AssertionError, HandlerResult};
use crate::handlers::{Handle, Handler};
use crate::signals::{Signal, SignalType, Value};

type Log = Arc<Mutex<Vec<Signal>>>;

struct Recorder {
    log: Log,
}

impl Handle for Recorder {
    fn handle(&self, signal: &Signal) -> HandlerResult {
        lock(&self.log).push(signal.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "watchman"
    }
}

/// Records every signal fired into one signal type.
pub struct Watchman {
    signal_type: SignalType,
    log: Log,
    // Sole strong reference; the registry only holds it weakly.
    _recorder: Handler,
}

impl Watchman {
    /// Binds a new Watchman to `signal_type` and subscribes it immediately.
    pub fn new(signal_type: &SignalType) -> Self {
        let log = Log::default();
        let recorder = signal_type.subscribe(Handler::from_handle(Recorder {
            log: Arc::clone(&log),
        }));
        Self {
            signal_type: signal_type.clone(),
            log,
            _recorder: recorder,
        }
    }

    /// The watched type.
    pub fn signal_type(&self) -> &SignalType {
        &self.signal_type
    }

    /// Snapshot of the log in fire order.
    pub fn log(&self) -> Vec<Signal> {
        lock(&self.log).clone()
    }

    /// Number of recorded signals.
    pub fn len(&self) -> usize {
        lock(&self.log).len()
    }

    /// True if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        lock(&self.log).is_empty()
    }

    /// Entry at `index`; negative indices count from the end.
    pub fn get(&self, index: isize) -> Option<Signal> {
        let log = lock(&self.log);
        resolve(log.len(), index).map(|i| log[i].clone())
    }

    /// Most recent entry.
    pub fn last(&self) -> Option<Signal> {
        self.get(-1)
    }

    /// Checks that the entry at `index` carries every `expected` attribute.
    ///
    /// Expectations are checked in order and the first failure is returned.
    /// An empty expectation set only checks that the entry exists.
    ///
    /// ### Errors
    /// - [`AssertionError::MissingEntry`] when `index` is out of range;
    /// - [`AssertionError::MissingAttribute`] when a name is not set on the entry;
    /// - [`AssertionError::Mismatch`] when a value differs.
    pub fn check_fired_with<I, K, V>(&self, index: isize, expected: I) -> Result<(), AssertionError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        let signal = self.get(index).ok_or_else(|| AssertionError::MissingEntry {
            signal_type: self.signal_type.name().to_string(),
            index,
        })?;

        for (name, value) in expected {
            let name = name.as_ref();
            let expected: Value = value.into();
            let Some(actual) = signal.get(name) else {
                return Err(AssertionError::MissingAttribute {
                    signal_type: self.signal_type.name().to_string(),
                    name: name.to_string(),
                });
            };
            if *actual != expected {
                return Err(AssertionError::Mismatch {
                    signal_type: self.signal_type.name().to_string(),
                    name: name.to_string(),
                    actual: actual.clone(),
                    expected,
                });
            }
        }
        Ok(())
    }

    /// Like [`Watchman::check_fired_with`], but panics with the assertion message.
    #[track_caller]
    pub fn assert_fired_with<I, K, V>(&self, index: isize, expected: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        if let Err(err) = self.check_fired_with(index, expected) {
            panic!("{err}");
        }
    }

    /// Shorthand for [`Watchman::assert_fired_with`] on the most recent entry.
    #[track_caller]
    pub fn assert_last_fired_with<I, K, V>(&self, expected: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        self.assert_fired_with(-1, expected);
    }
}

fn lock(log: &Log) -> MutexGuard<'_, Vec<Signal>> {
    log.lock().unwrap_or_else(PoisonError::into_inner)
}

fn resolve(len: usize, index: isize) -> Option<usize> {
    let i = if index < 0 {
        len.checked_sub(index.unsigned_abs())?
    } else {
        index as usize
    };
    (i < len).then_some(i)
}
