//! Signal dispatch: hierarchy walk, handler invocation and failure isolation.
//!
//! - [`fire`] synchronous path, behind [`Signal::fire`](crate::Signal::fire)
//! - [`afire`] asynchronous path, behind [`Signal::afire`](crate::Signal::afire)
//! - `report` logging and hook delivery of isolated failures

mod fire;
mod report;

pub(crate) use fire::{afire, fire};
