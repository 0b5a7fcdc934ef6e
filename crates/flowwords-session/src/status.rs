//! Where status text goes.
//!
//! The session controller doesn't render anything. It pushes short status
//! strings ("Connecting..") into a [`StatusSink`] and lets the UI decide
//! what to do with them.

use std::sync::Arc;

/// Receives human-readable status updates.
///
/// Must be cheap and non-blocking: it is called on every progress tick.
pub trait StatusSink: Send + Sync + 'static {
    fn set_status(&self, text: &str);
}

impl<T: StatusSink + ?Sized> StatusSink for Arc<T> {
    fn set_status(&self, text: &str) {
        (**self).set_status(text);
    }
}

/// A sink that drops every update. For headless hosts.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoStatus;

impl StatusSink for NoStatus {
    fn set_status(&self, _text: &str) {}
}
