//! User notifications
//!
//! Replaces blocking alert dialogs: a `Notifier` receives each success or
//! failure message before any navigation happens, and the embedding surface
//! decides how to show it.

use std::sync::Mutex;

/// Severity of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Sink for user-facing notices
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);

    fn info(&self, message: &str) {
        self.notify(Notice::info(message));
    }

    fn error(&self, message: &str) {
        self.notify(Notice::error(message));
    }
}

/// Log an error and show the generic message for the failed operation
pub fn show_error(notifier: &dyn Notifier, error: &dyn std::error::Error, message: &str) {
    tracing::error!(error = %error, "{}", message);
    notifier.error(message);
}

/// Writes notices to the log only
#[derive(Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Info => tracing::info!(target: "dogpost::notice", "{}", notice.message),
            NoticeLevel::Error => tracing::warn!(target: "dogpost::notice", "{}", notice.message),
        }
    }
}

/// Prints notices to stderr, for the terminal shell
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Info => eprintln!("[info] {}", notice.message),
            NoticeLevel::Error => eprintln!("[error] {}", notice.message),
        }
    }
}

/// Keeps every notice in memory
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// All notices received so far
    pub fn notices(&self) -> Vec<Notice> {
        self.lock().clone()
    }

    /// Messages only, in arrival order
    pub fn messages(&self) -> Vec<String> {
        self.lock().iter().map(|n| n.message.clone()).collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Notice>> {
        self.notices.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.lock().push(notice);
    }
}
