//! Shell command resource: a system-wide symlink to a copied binary.
use anyhow::{Context as _, Result};
use std::path::PathBuf;

use super::elevate::Elevator;
use super::{Resource, ResourceState, probe};
use crate::exec::Executor;
use crate::logging::Log;

/// A binary to expose on the shell `PATH` through a symlink in the system
/// bin dir.
pub struct ShellCommandResource<'a> {
    /// Command name, e.g. `adb`.
    pub name: String,
    /// Copied binary the link points to.
    pub source: PathBuf,
    /// Symlink location in the system bin dir.
    pub link: PathBuf,
    executor: &'a dyn Executor,
    elevator: &'a dyn Elevator,
    log: &'a dyn Log,
}

impl std::fmt::Debug for ShellCommandResource<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShellCommandResource")
            .field("name", &self.name)
            .field("source", &self.source)
            .field("link", &self.link)
            .finish_non_exhaustive()
    }
}

impl<'a> ShellCommandResource<'a> {
    /// Create a new shell command resource.
    #[must_use]
    pub const fn new(
        name: String,
        source: PathBuf,
        link: PathBuf,
        executor: &'a dyn Executor,
        elevator: &'a dyn Elevator,
        log: &'a dyn Log,
    ) -> Self {
        Self {
            name,
            source,
            link,
            executor,
            elevator,
            log,
        }
    }
}

impl Resource for ShellCommandResource<'_> {
    fn description(&self) -> String {
        format!("{} -> {}", self.link.display(), self.source.display())
    }

    fn current_state(&self) -> ResourceState {
        if probe::binary_exists(self.executor, self.log, &self.name) {
            ResourceState::Present
        } else {
            ResourceState::Missing
        }
    }

    fn apply(&self) -> Result<()> {
        self.elevator
            .symlink(&self.source, &self.link)
            .with_context(|| format!("linking {}", self.description()))
    }
}
