//! Shell-command installation: copy the bundled binaries into the user bin
//! dir, then link each candidate into the system bin dir unless it already
//! resolves on `PATH`.
use std::path::PathBuf;

use crate::config::InstallerConfig;
use crate::error::InstallError;
use crate::exec::Executor;
use crate::logging::{Log, Notification, NotificationCode, NotificationLevel};
use crate::platform::Platform;
use crate::resources::elevate::Elevator;
use crate::resources::shell_command::ShellCommandResource;
use crate::resources::{self, InstallOutcome, Resource, ResourceState};

/// Behavioural switches for a run.
#[derive(Debug, Clone, Copy)]
pub struct InstallOptions {
    /// Probe and report only: no copy, no directory creation, no elevation.
    pub dry_run: bool,
    /// Process candidates concurrently.
    pub parallel: bool,
}

impl Default for InstallOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            parallel: true,
        }
    }
}

/// Per-candidate outcomes of a run, in candidate order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    /// `(name, outcome)` for every candidate.
    pub results: Vec<(String, InstallOutcome)>,
    /// Whether this was a dry run.
    pub dry_run: bool,
}

impl InstallReport {
    /// Every candidate name, in configured order.
    #[must_use]
    pub fn candidates(&self) -> Vec<&str> {
        self.results.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Names that were newly linked (or would be, on a dry run).
    #[must_use]
    pub fn installed(&self) -> Vec<&str> {
        self.results
            .iter()
            .filter(|(_, outcome)| outcome.is_installed())
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// The single summary notification for this run.
    #[must_use]
    pub fn notification(&self) -> Notification {
        let installed = self.installed();
        let (level, message) = if installed.is_empty() {
            (
                NotificationLevel::Warn,
                format!(
                    "Shell commands {} are already installed",
                    self.candidates().join(", ")
                ),
            )
        } else if self.dry_run {
            (
                NotificationLevel::Info,
                format!("Would install {} to your shell", installed.join(", ")),
            )
        } else {
            (
                NotificationLevel::Info,
                format!("Installed {} to your shell", installed.join(", ")),
            )
        };
        Notification {
            code: NotificationCode::InstallShellCommandsResult,
            level,
            message,
        }
    }
}

/// Installs the configured shell commands.
///
/// All side effects go through the injected capabilities: processes through
/// the [`Executor`], administrator rights through the [`Elevator`], and
/// output through the [`Log`].
pub struct Installer<'a> {
    config: &'a InstallerConfig,
    platform: &'a Platform,
    executor: &'a dyn Executor,
    elevator: &'a dyn Elevator,
    log: &'a dyn Log,
    opts: InstallOptions,
}

impl std::fmt::Debug for Installer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Installer")
            .field("config", self.config)
            .field("platform", self.platform)
            .field("opts", &self.opts)
            .finish_non_exhaustive()
    }
}

impl<'a> Installer<'a> {
    /// Create a new installer.
    #[must_use]
    pub const fn new(
        config: &'a InstallerConfig,
        platform: &'a Platform,
        executor: &'a dyn Executor,
        elevator: &'a dyn Elevator,
        log: &'a dyn Log,
        opts: InstallOptions,
    ) -> Self {
        Self {
            config,
            platform,
            executor,
            elevator,
            log,
            opts,
        }
    }

    /// Return the user bin dir, creating it and any missing ancestors.
    ///
    /// Idempotent: repeated calls return the same path.
    ///
    /// # Errors
    ///
    /// Returns [`InstallError::CopyFailed`] if the directory cannot be
    /// created, since nothing can be copied without it.
    pub fn resolve_user_bin_dir(&self) -> Result<PathBuf, InstallError> {
        let dir = &self.config.user_bin_dir;
        resources::fs::ensure_dir(dir).map_err(|e| self.copy_failed(e))?;
        Ok(dir.clone())
    }

    /// Copy the bundled binaries into the user bin dir, replacing older copies.
    ///
    /// # Errors
    ///
    /// Returns [`InstallError::CopyFailed`] if any part of the copy fails.
    pub fn copy_bundled_binaries(&self) -> Result<(), InstallError> {
        let dest = self.resolve_user_bin_dir()?;
        self.log.debug(&format!(
            "copying {} to {}",
            self.config.source_dir.display(),
            dest.display()
        ));
        resources::fs::copy_dir_recursive(&self.config.source_dir, &dest)
            .map_err(|e| self.copy_failed(e))
    }

    /// Link one binary into the system bin dir unless it already resolves.
    ///
    /// Never fails: probe and link errors are folded into the outcome.
    #[must_use]
    pub fn install_binary(&self, name: &str) -> InstallOutcome {
        let resource = self.resource(name);
        let outcome = resources::install(&resource, self.opts.dry_run);
        self.log_outcome(&resource, &outcome);
        outcome
    }

    fn resource(&self, name: &str) -> ShellCommandResource<'a> {
        ShellCommandResource::new(
            name.to_string(),
            self.config.user_binary(name),
            self.config.system_link(name),
            self.executor,
            self.elevator,
            self.log,
        )
    }

    fn log_outcome(&self, resource: &ShellCommandResource<'_>, outcome: &InstallOutcome) {
        let name = &resource.name;
        match outcome {
            InstallOutcome::Installed => {
                self.log.info(&format!("linked {}", resource.description()));
            }
            InstallOutcome::WouldInstall => {
                self.log
                    .dry_run(&format!("would link {}", resource.description()));
            }
            InstallOutcome::AlreadyPresent => self.log.debug(&format!("{name} already on PATH")),
            InstallOutcome::Failed { reason } => {
                self.log.debug(&format!("{name} not linked: {reason}"));
            }
        }
    }

    /// Install every configured shell command and emit one summary
    /// notification.
    ///
    /// The platform check runs before any side effect and the copy completes
    /// before any binary is probed.
    ///
    /// # Errors
    ///
    /// Returns [`InstallError::PlatformNotSupported`] on an unsupported host
    /// and [`InstallError::CopyFailed`] if the bundled binaries cannot be
    /// copied.  Per-binary failures are not errors.
    pub fn install_shell_commands(&self) -> Result<InstallReport, InstallError> {
        self.platform.ensure_supported()?;

        self.log.stage("Copying shell commands");
        if self.opts.dry_run {
            self.log.dry_run(&format!(
                "would copy {} to {}",
                self.config.source_dir.display(),
                self.config.user_bin_dir.display()
            ));
        } else {
            self.copy_bundled_binaries()?;
        }

        self.log.stage("Linking shell commands");
        let results = self.install_all();
        let report = InstallReport {
            results,
            dry_run: self.opts.dry_run,
        };
        self.log.notify(&report.notification());
        Ok(report)
    }

    /// Probe every candidate (concurrently when enabled), then link the
    /// missing ones one at a time so at most one credential prompt is ever
    /// on screen.  Results keep candidate order.
    fn install_all(&self) -> Vec<(String, InstallOutcome)> {
        let resources: Vec<ShellCommandResource<'a>> = self
            .config
            .candidate_names
            .iter()
            .map(|name| self.resource(name))
            .collect();

        let states: Vec<ResourceState> = if self.opts.parallel && resources.len() > 1 {
            use rayon::prelude::*;
            resources.par_iter().map(Resource::current_state).collect()
        } else {
            resources.iter().map(Resource::current_state).collect()
        };

        resources
            .into_iter()
            .zip(states)
            .map(|(resource, state)| {
                let outcome = resources::install_with_state(&resource, state, self.opts.dry_run);
                self.log_outcome(&resource, &outcome);
                (resource.name, outcome)
            })
            .collect()
    }

    fn copy_failed(&self, e: anyhow::Error) -> InstallError {
        InstallError::CopyFailed {
            source_dir: self.config.source_dir.clone(),
            dest_dir: self.config.user_bin_dir.clone(),
            source: e.into(),
        }
    }
}
