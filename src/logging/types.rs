//! Core logging types: notifications and the [`Log`] trait.
use std::fmt;

/// Identifies what a [`Notification`] reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationCode {
    /// Net result of a shell-command installation run.
    InstallShellCommandsResult,
}

impl NotificationCode {
    /// Stable, machine-readable name of the code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InstallShellCommandsResult => "INSTALL_SHELL_COMMANDS_RESULT",
        }
    }
}

impl fmt::Display for NotificationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity of a [`Notification`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    /// Something changed.
    Info,
    /// Nothing changed, or something the user should look at.
    Warn,
}

/// A user-facing message with a named code, emitted once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// What the notification is about.
    pub code: NotificationCode,
    /// Severity.
    pub level: NotificationLevel,
    /// Free-text content.
    pub message: String,
}

/// Abstraction over logging backends.
///
/// [`Logger`](super::logger::Logger) is the production implementation;
/// tests substitute recording implementations to assert on what was emitted.
pub trait Log: Send + Sync {
    /// Log a stage header (major section).
    fn stage(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a debug message (may be suppressed on console).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
    /// Log a dry-run action message.
    fn dry_run(&self, msg: &str);
    /// Emit a structured notification.
    fn notify(&self, notification: &Notification);
}
