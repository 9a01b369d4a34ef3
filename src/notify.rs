/*!
 * User-visible notices.
 *
 * The publish flow reports every outcome through a `Notifier`: success,
 * a "nothing to do" warning, or an error with the most specific detail.
 */

use std::fmt;

use log::{error, info, warn};
use parking_lot::Mutex;

/// Severity of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        };
        f.write_str(name)
    }
}

/// Sink for user-facing notices
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, severity: Severity);
}

/// Notifier that writes through the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Success => info!("{}", message),
            Severity::Warning => warn!("{}", message),
            Severity::Error => error!("{}", message),
        }
    }
}

/// Notifier that keeps every notice, for inspection in tests
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<(Severity, String)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// All notices in the order they were raised
    pub fn notices(&self) -> Vec<(Severity, String)> {
        self.notices.lock().clone()
    }

    /// The most recent notice
    pub fn last(&self) -> Option<(Severity, String)> {
        self.notices.lock().last().cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        self.notices.lock().push((severity, message.to_string()));
    }
}
