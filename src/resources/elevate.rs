//! Privileged symlink creation.
//!
//! [`Elevator`] is the only path through which the installer obtains
//! administrator rights, and it can do exactly one thing: create a symlink.
use anyhow::{Result, bail};
use std::path::Path;

use crate::config::Elevation;
use crate::exec::Executor;

/// Absolute path of `ln`, so the elevated command never depends on the
/// caller's `PATH`.
const LN: &str = "/bin/ln";

/// Creates a symlink with administrator privileges.
#[cfg_attr(test, mockall::automock)]
pub trait Elevator: Send + Sync {
    /// Create a symlink at `link` pointing to `target`, prompting for
    /// administrator credentials as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the elevation helper is unavailable, the user
    /// declines the prompt, or `ln` exits non-zero.
    fn symlink(&self, target: &Path, link: &Path) -> Result<()>;
}

/// Build the [`Elevator`] for the configured mechanism.
#[must_use]
pub fn for_elevation<'a>(elevation: Elevation, executor: &'a dyn Executor) -> Box<dyn Elevator + 'a> {
    match elevation {
        Elevation::Osascript => Box::new(OsascriptElevator::new(executor)),
        Elevation::Sudo => Box::new(SudoElevator::new(executor)),
    }
}

/// Elevates through `sudo`, prompting on the terminal.
#[derive(Debug)]
pub struct SudoElevator<'a> {
    executor: &'a dyn Executor,
}

impl<'a> SudoElevator<'a> {
    /// Create a new sudo elevator.
    #[must_use]
    pub const fn new(executor: &'a dyn Executor) -> Self {
        Self { executor }
    }
}

impl Elevator for SudoElevator<'_> {
    fn symlink(&self, target: &Path, link: &Path) -> Result<()> {
        if !self.executor.which("sudo") {
            bail!("sudo not found on PATH");
        }
        let target = target.to_string_lossy();
        let link = link.to_string_lossy();
        self.executor.run("sudo", &[LN, "-s", &target, &link])?;
        Ok(())
    }
}

/// Elevates through `osascript ... with administrator privileges`, which
/// shows the standard macOS authentication dialog.
#[derive(Debug)]
pub struct OsascriptElevator<'a> {
    executor: &'a dyn Executor,
}

impl<'a> OsascriptElevator<'a> {
    /// Create a new osascript elevator.
    #[must_use]
    pub const fn new(executor: &'a dyn Executor) -> Self {
        Self { executor }
    }
}

impl Elevator for OsascriptElevator<'_> {
    fn symlink(&self, target: &Path, link: &Path) -> Result<()> {
        if !self.executor.which("osascript") {
            bail!("osascript not found on PATH");
        }
        let script = admin_script(target, link);
        let result = self.executor.run_unchecked("osascript", &["-e", &script])?;
        if !result.success {
            bail!(
                "osascript failed (exit {}): {}",
                result.code.unwrap_or(-1),
                result.stderr.trim()
            );
        }
        Ok(())
    }
}

/// AppleScript that runs `ln -s target link` as administrator.
fn admin_script(target: &Path, link: &Path) -> String {
    let command = format!(
        "{LN} -s {} {}",
        shell_quote(&target.to_string_lossy()),
        shell_quote(&link.to_string_lossy())
    );
    format!(
        "do shell script \"{}\" with administrator privileges",
        applescript_escape(&command)
    )
}

/// Single-quote `s` for `/bin/sh`.
fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}

/// Escape `s` for inclusion in an AppleScript string literal.
fn applescript_escape(s: &str) -> String {
    s.replace('\\', r"\\").replace('"', "\\\"")
}
