//! Failure reporting for isolated handler errors.

use std::any::Any;

use tracing::error;

use crate::config::Config;
use crate::error::DispatchError;
use crate::handlers::Handler;
use crate::signals::Signal;

/// Logs `failure` (unless disabled) and passes it to the configured hook.
pub(crate) fn report(cfg: &Config, failure: DispatchError) {
    if cfg.log_failures {
        error!(
            label = failure.as_label(),
            handler = failure.handler(),
            signal = %failure.signal(),
            "{failure}"
        );
    }
    if let Some(hook) = &cfg.on_failure {
        hook(&failure);
    }
}

pub(crate) fn panicked(
    handler: &Handler,
    signal: &Signal,
    payload: Box<dyn Any + Send>,
) -> DispatchError {
    DispatchError::Panicked {
        handler: handler.name().to_string(),
        signal: signal.clone(),
        panic: panic_message(&*payload),
    }
}

/// Extracts readable text from a panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
