//! Toast-style notifications
//!
//! Commands report outcomes through a [`Notifier`] instead of printing
//! directly, so tests can substitute a recorder.

use colored::Colorize;

/// Notification severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Warning,
    Error,
}

/// Notification collaborator
pub trait Notifier: Send + Sync {
    /// Show a short message to the user
    fn show_toast(&self, message: &str, severity: Severity);
}

/// Writes notifications to stderr with a coloured marker
#[derive(Debug, Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn show_toast(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Success => eprintln!("{} {}", "✓".green(), message),
            Severity::Warning => eprintln!("{} {}", "⚠".yellow(), message),
            Severity::Error => eprintln!("{} {}", "✗".red(), message),
        }
    }
}

/// Keeps every notification in memory
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    toasts: std::sync::Mutex<Vec<(String, Severity)>>,
}

#[cfg(test)]
impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifications shown so far, oldest first
    pub fn toasts(&self) -> Vec<(String, Severity)> {
        self.toasts
            .lock()
            .map(|t| t.clone())
            .unwrap_or_default()
    }

    /// Number of notifications with the given severity
    pub fn count(&self, severity: Severity) -> usize {
        self.toasts()
            .iter()
            .filter(|(_, s)| *s == severity)
            .count()
    }
}

#[cfg(test)]
impl Notifier for RecordingNotifier {
    fn show_toast(&self, message: &str, severity: Severity) {
        if let Ok(mut toasts) = self.toasts.lock() {
            toasts.push((message.to_string(), severity));
        }
    }
}
