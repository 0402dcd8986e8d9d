//! Idempotent resource primitives (check + apply pattern).
pub mod elevate;
pub mod fs;
pub mod probe;
pub mod shell_command;

use anyhow::Result;

/// State of a shell command on the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceState {
    /// Nothing by that name resolves on `PATH`.
    Missing,
    /// A command by that name already resolves on `PATH`.
    Present,
}

/// Outcome of installing a single shell command.
///
/// # Examples
///
/// ```
/// use shell_commands::resources::InstallOutcome;
///
/// let done = InstallOutcome::Installed;
/// let failed = InstallOutcome::Failed { reason: "user cancelled".into() };
///
/// assert!(done.is_installed());
/// assert!(!failed.is_installed());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// The symlink was created.
    Installed,
    /// A command by that name already resolved; nothing was done.
    AlreadyPresent,
    /// Dry run: the symlink would have been created.
    WouldInstall,
    /// Creating the symlink failed; the failure was absorbed.
    Failed {
        /// Why the link could not be created.
        reason: String,
    },
}

impl InstallOutcome {
    /// Whether this outcome counts as newly installed for the summary.
    #[must_use]
    pub const fn is_installed(&self) -> bool {
        matches!(self, Self::Installed | Self::WouldInstall)
    }
}

/// Unified interface for resources that can be checked and applied.
pub trait Resource {
    /// Human-readable description of this resource.
    fn description(&self) -> String;

    /// Check the current state of the resource.
    ///
    /// Implementations absorb their own probe failures and report
    /// [`ResourceState::Missing`] instead.
    fn current_state(&self) -> ResourceState;

    /// Apply the resource change.
    ///
    /// # Errors
    ///
    /// Returns an error if the change could not be made.
    fn apply(&self) -> Result<()>;
}

/// Check `resource` and apply it when missing, folding every failure into
/// the returned [`InstallOutcome`].
pub fn install(resource: &dyn Resource, dry_run: bool) -> InstallOutcome {
    install_with_state(resource, resource.current_state(), dry_run)
}

/// Like [`install`], with a state that was already determined.
pub fn install_with_state(
    resource: &dyn Resource,
    state: ResourceState,
    dry_run: bool,
) -> InstallOutcome {
    match state {
        ResourceState::Present => InstallOutcome::AlreadyPresent,
        ResourceState::Missing if dry_run => InstallOutcome::WouldInstall,
        ResourceState::Missing => match resource.apply() {
            Ok(()) => InstallOutcome::Installed,
            Err(e) => InstallOutcome::Failed {
                reason: format!("{e:#}"),
            },
        },
    }
}
