//! Structured logger with dry-run awareness and notification collection.
use std::path::PathBuf;
use std::sync::Mutex;

use super::types::{Log, Notification, NotificationLevel};
use super::utils::log_file_path;

/// Tracing target for stage headers.
pub(super) const STAGE_TARGET: &str = "shell_commands::stage";
/// Tracing target for dry-run action messages.
pub(super) const DRY_RUN_TARGET: &str = "shell_commands::dry_run";
/// Tracing target for structured notifications.
pub(super) const NOTIFICATION_TARGET: &str = "shell_commands::notification";

/// Implement the display methods of [`Log`] by delegating to inherent methods
/// of the same name on the implementing type.
macro_rules! forward_log_methods {
    ($($method:ident),+ $(,)?) => {
        $(
            fn $method(&self, msg: &str) {
                self.$method(msg);
            }
        )+
    };
}

/// Structured logger backed by [`tracing`].
///
/// All messages are always written to a persistent log file at
/// `$XDG_CACHE_HOME/shell-commands/<command>.log` (default
/// `~/.cache/shell-commands/<command>.log`) with timestamps and ANSI codes
/// stripped, regardless of the verbose flag.
#[derive(Debug)]
pub struct Logger {
    log_file: Option<PathBuf>,
    notifications: Mutex<Vec<Notification>>,
}

impl Logger {
    /// Create a new logger.
    ///
    /// Stores the log file path for display at the end of the run.  The log
    /// file itself is created by [`init_subscriber`](super::subscriber::init_subscriber).
    #[must_use]
    pub fn new(command: &str) -> Self {
        Self {
            log_file: log_file_path(command),
            notifications: Mutex::new(Vec::new()),
        }
    }

    /// Return the log file path, if available.
    #[must_use]
    pub const fn log_path(&self) -> Option<&PathBuf> {
        self.log_file.as_ref()
    }

    /// Return every notification emitted so far, oldest first.
    #[must_use]
    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications
            .lock()
            .map_or_else(|_| vec![], |g| g.clone())
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Log a stage header (major section).
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: STAGE_TARGET, "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message (suppressed on console unless verbose; always
    /// written to the log file).
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Log a dry-run action message.
    pub fn dry_run(&self, msg: &str) {
        tracing::info!(target: DRY_RUN_TARGET, "{msg}");
    }

    /// Emit a structured notification and remember it.
    pub fn notify(&self, notification: &Notification) {
        let code = notification.code.as_str();
        let msg = &notification.message;
        match notification.level {
            NotificationLevel::Info => tracing::info!(target: NOTIFICATION_TARGET, code, "{msg}"),
            NotificationLevel::Warn => tracing::warn!(target: NOTIFICATION_TARGET, code, "{msg}"),
        }
        if let Ok(mut guard) = self.notifications.lock() {
            guard.push(notification.clone());
        }
    }

    /// Print where the full log of this run can be found.
    pub fn print_log_location(&self) {
        if let Some(path) = &self.log_file {
            self.info(&format!("\x1b[2mlog: {}\x1b[0m", path.display()));
        }
    }
}

impl Log for Logger {
    forward_log_methods!(stage, info, debug, warn, error, dry_run);

    fn notify(&self, notification: &Notification) {
        self.notify(notification);
    }
}
