//! Out-of-band logging used for recoverable conditions (duplicate labels).
//!
//! The crate never installs a global subscriber; it only emits events
//! through the `tracing` facade, matching how library crates in this
//! workspace behave (subscribers are wired up by binaries, not libraries).
//! [`DiagnosticLogger`] is a thin seam over that so tests can substitute a
//! capturing logger without configuring a global subscriber.

/// A single-method logger used only for the duplicate-label-range warning.
pub trait DiagnosticLogger {
    fn warn(&self, message: &str);
}

/// Default logger: forwards to `tracing::warn!`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingLogger;

impl DiagnosticLogger for TracingLogger {
    fn warn(&self, message: &str) {
        tracing::warn!("{message}");
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::DiagnosticLogger;
    use std::cell::RefCell;

    #[derive(Default)]
    pub(crate) struct CapturingLogger {
        pub(crate) messages: RefCell<Vec<String>>,
    }

    impl DiagnosticLogger for CapturingLogger {
        fn warn(&self, message: &str) {
            self.messages.borrow_mut().push(message.to_string());
        }
    }
}
