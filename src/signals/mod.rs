//! # Signal types, instances and attribute values.
//!
//! ## Contents
//! - [`SignalType`] declared category of signal; owns one subscriber registry
//! - [`Signal`]     one occurrence of a type, carrying [`Attributes`]
//! - [`Value`]      attribute value model
//!
//! ## Quick wiring
//! ```text
//! SignalType::derive("MySignal", &SignalType::root())
//!      └─► Signal::new(&my).with("x", 1)
//!           └─► fire() / afire() ──► dispatch walks my.mro()
//! ```

mod kind;
mod signal;
mod value;

pub use kind::{ROOT_NAME, SignalType};
pub use signal::Signal;
pub use value::{Attributes, Value};
