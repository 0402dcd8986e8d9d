// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed install layout plus in-memory fakes
// for the executor, elevator and log so each integration test can run the
// installer end to end without touching the real PATH or asking for a
// password.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Result, bail};
use shell_commands::config::{Elevation, InstallerConfig};
use shell_commands::exec::{ExecResult, Executor};
use shell_commands::logging::{Log, Notification};
use shell_commands::resources::elevate::Elevator;

/// A [`Log`] that keeps every message in memory.
#[derive(Debug, Default)]
pub struct RecordingLog {
    lines: Mutex<Vec<String>>,
    notifications: Mutex<Vec<Notification>>,
}

impl RecordingLog {
    /// Every message logged so far, prefixed with its level.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().expect("log lock").clone()
    }

    /// Every notification emitted so far.
    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.lock().expect("log lock").clone()
    }

    fn push(&self, level: &str, msg: &str) {
        self.lines
            .lock()
            .expect("log lock")
            .push(format!("{level}: {msg}"));
    }
}

impl Log for RecordingLog {
    fn stage(&self, msg: &str) {
        self.push("stage", msg);
    }
    fn info(&self, msg: &str) {
        self.push("info", msg);
    }
    fn debug(&self, msg: &str) {
        self.push("debug", msg);
    }
    fn warn(&self, msg: &str) {
        self.push("warn", msg);
    }
    fn error(&self, msg: &str) {
        self.push("error", msg);
    }
    fn dry_run(&self, msg: &str) {
        self.push("dry-run", msg);
    }
    fn notify(&self, notification: &Notification) {
        self.notifications
            .lock()
            .expect("log lock")
            .push(notification.clone());
    }
}

/// An [`Executor`] that answers `which <name>` by looking through a fixed
/// list of directories, standing in for the shell's `PATH`.
///
/// Any other program fails.
#[derive(Debug)]
pub struct PathExecutor {
    path: Vec<PathBuf>,
    calls: Mutex<Vec<String>>,
}

impl PathExecutor {
    /// Resolve names against `path`, searched in order.
    pub fn new(path: Vec<PathBuf>) -> Self {
        Self {
            path,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every command line run so far.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }

    fn lookup(&self, name: &str) -> Option<PathBuf> {
        self.path
            .iter()
            .map(|dir| dir.join(name))
            .find(|candidate| candidate.exists())
    }
}

impl Executor for PathExecutor {
    fn run(&self, program: &str, args: &[&str]) -> Result<ExecResult> {
        let result = self.run_unchecked(program, args)?;
        if !result.success {
            bail!("{program} exited with code 1");
        }
        Ok(result)
    }

    fn run_unchecked(&self, program: &str, args: &[&str]) -> Result<ExecResult> {
        let line = std::iter::once(program)
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ");
        self.calls.lock().expect("calls lock").push(line);
        let found = match (program, args) {
            ("which", [name]) => self.lookup(name),
            _ => None,
        };
        Ok(ExecResult {
            success: found.is_some(),
            code: Some(i32::from(found.is_none())),
            stdout: found
                .map(|p| format!("{}\n", p.display()))
                .unwrap_or_default(),
            stderr: String::new(),
        })
    }

    fn which(&self, program: &str) -> bool {
        self.lookup(program).is_some()
    }
}

/// An [`Elevator`] that creates real symlinks without asking for any
/// credentials, and refuses the names it was told to refuse.
#[derive(Debug, Default)]
pub struct FakeElevator {
    refuse: HashSet<String>,
    links: Mutex<Vec<(PathBuf, PathBuf)>>,
}

impl FakeElevator {
    /// Refuse to link `name`, as if the user dismissed the prompt.
    pub fn refusing(mut self, name: &str) -> Self {
        self.refuse.insert(name.to_string());
        self
    }

    /// Every `(target, link)` pair that was requested, in order.
    pub fn requests(&self) -> Vec<(PathBuf, PathBuf)> {
        self.links.lock().expect("links lock").clone()
    }
}

impl Elevator for FakeElevator {
    fn symlink(&self, target: &Path, link: &Path) -> Result<()> {
        self.links
            .lock()
            .expect("links lock")
            .push((target.to_path_buf(), link.to_path_buf()));
        let name = link
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        if self.refuse.contains(&name) {
            bail!("User canceled. (-128)");
        }
        if let Some(parent) = link.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::os::unix::fs::symlink(target, link)?;
        Ok(())
    }
}

/// An isolated install layout backed by a [`tempfile::TempDir`]:
///
/// - `bundle/`                 source of the bundled binaries
/// - `home/.shell-commands/bin/` user bin dir (created by the installer)
/// - `usr/local/bin/`          system bin dir receiving links
/// - `opt/homebrew/bin/`       another directory on the fake `PATH`
pub struct IntegrationTestContext {
    /// Temporary directory holding the layout.
    pub root: tempfile::TempDir,
    /// Binary names linked by [`config`](Self::config).
    pub candidates: Vec<String>,
}

impl IntegrationTestContext {
    /// Create a layout whose bundle contains `adb` and `watchman`.
    pub fn new() -> Self {
        TestContextBuilder::new()
            .with_bundled("adb", "#!/bin/sh\necho adb\n")
            .with_bundled("watchman", "#!/bin/sh\necho watchman\n")
            .build()
    }

    /// Path to the layout root.
    pub fn root_path(&self) -> &Path {
        self.root.path()
    }

    /// Directory holding the bundled binaries.
    pub fn bundle_dir(&self) -> PathBuf {
        self.root.path().join("bundle")
    }

    /// Directory the fake `PATH` treats as a package manager prefix.
    pub fn homebrew_dir(&self) -> PathBuf {
        self.root.path().join("opt/homebrew/bin")
    }

    /// Resolved configuration pointing at this layout.
    pub fn config(&self) -> InstallerConfig {
        InstallerConfig {
            source_dir: self.bundle_dir(),
            user_bin_dir: self.root.path().join("home/.shell-commands/bin"),
            system_bin_dir: self.root.path().join("usr/local/bin"),
            candidate_names: self.candidates.clone(),
            elevation: Elevation::Sudo,
        }
    }

    /// An executor whose `PATH` is the system bin dir then homebrew.
    pub fn executor(&self) -> PathExecutor {
        let config = self.config();
        PathExecutor::new(vec![config.system_bin_dir, self.homebrew_dir()])
    }
}

/// Fluent builder for [`IntegrationTestContext`].
pub struct TestContextBuilder {
    ctx: IntegrationTestContext,
}

impl TestContextBuilder {
    /// Begin with an empty bundle and the default candidates.
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("create temp dir");
        std::fs::create_dir_all(root.path().join("bundle")).expect("create bundle dir");
        std::fs::create_dir_all(root.path().join("usr/local/bin")).expect("create system bin");
        std::fs::create_dir_all(root.path().join("opt/homebrew/bin")).expect("create homebrew");
        Self {
            ctx: IntegrationTestContext {
                root,
                candidates: vec!["adb".to_string(), "watchman".to_string()],
            },
        }
    }

    /// Add an executable file `name` to the bundle.
    pub fn with_bundled(self, name: &str, content: &str) -> Self {
        use std::os::unix::fs::PermissionsExt as _;
        let path = self.ctx.bundle_dir().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create bundle parent");
        }
        std::fs::write(&path, content).expect("write bundled binary");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("chmod bundled binary");
        self
    }

    /// Pretend `name` is already installed by a package manager.
    pub fn with_preinstalled(self, name: &str) -> Self {
        std::fs::write(self.ctx.homebrew_dir().join(name), "").expect("write preinstalled");
        self
    }

    /// Replace the candidate names.
    pub fn with_candidates(mut self, names: &[&str]) -> Self {
        self.ctx.candidates = names.iter().map(ToString::to_string).collect();
        self
    }

    /// Finish building and return the configured context.
    pub fn build(self) -> IntegrationTestContext {
        self.ctx
    }
}
