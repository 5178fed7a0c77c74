//! Error reporting seam
//!
//! Every failure caught at the gateway boundary is handed to an
//! [`ErrorReporter`]. The default reporter emits a structured `tracing` event
//! on the `error_report` target, which a crash-reporting layer can subscribe
//! to.

use crate::Error;
use std::sync::{Arc, Mutex};

pub trait ErrorReporter: Send + Sync {
    fn capture(&self, error: &Error, context: &str);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn capture(&self, error: &Error, context: &str) {
        tracing::error!(
            target: "error_report",
            context,
            error = %error,
            debug = ?error,
            "Captured exception"
        );
    }
}

/// Reporter that keeps every captured error in memory.
#[derive(Clone, Default)]
pub struct MockErrorReporter {
    captured: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockErrorReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Captured `(context, error message)` pairs, oldest first.
    pub fn get_captured(&self) -> Vec<(String, String)> {
        self.captured.lock().unwrap().clone()
    }

    pub fn get_capture_count(&self) -> usize {
        self.captured.lock().unwrap().len()
    }
}

impl ErrorReporter for MockErrorReporter {
    fn capture(&self, error: &Error, context: &str) {
        self.captured
            .lock()
            .unwrap()
            .push((context.to_string(), error.to_string()));
    }
}
