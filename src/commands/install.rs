//! Command: copy the bundled binaries and link them onto the shell `PATH`.
use anyhow::Result;
use std::path::Path;

use crate::cli::GlobalOpts;
use crate::config::InstallerConfig;
use crate::error::InstallError;
use crate::exec::SystemExecutor;
use crate::installer::{InstallOptions, Installer};
use crate::logging::{self, Logger};
use crate::platform::Platform;
use crate::resources::elevate;

/// Check the platform, then load the configuration.
///
/// Nothing is read or written on an unsupported platform.
///
/// # Errors
///
/// Returns [`InstallError::PlatformNotSupported`] before anything else, then
/// [`InstallError::Config`] if the configuration is invalid.
pub fn prepare(platform: &Platform, config: Option<&Path>) -> Result<InstallerConfig, InstallError> {
    platform.ensure_supported()?;
    Ok(InstallerConfig::load(config)?)
}

/// Run the install command.
///
/// The log file and subscriber are only set up once the platform check and
/// configuration load have passed.
///
/// # Errors
///
/// Returns an error if the platform is not supported, the configuration is
/// invalid, or the bundled binaries cannot be copied.
pub fn run(global: &GlobalOpts, verbose: bool) -> Result<()> {
    let platform = Platform::detect();
    let config = prepare(&platform, global.config.as_deref())?;

    logging::init_subscriber(verbose, "install");
    let log = Logger::new("install");
    log.info(&format!("shell-commands {}", super::version::version()));
    log.debug(&format!("source: {}", config.source_dir.display()));
    log.debug(&format!("user bin: {}", config.user_bin_dir.display()));
    log.debug(&format!("system bin: {}", config.system_bin_dir.display()));
    log.debug(&format!("elevation: {}", config.elevation));
    log.info(&format!(
        "{} candidate(s): {}",
        config.candidate_names.len(),
        config.candidate_names.join(", ")
    ));

    let executor = SystemExecutor;
    let elevator = elevate::for_elevation(config.elevation, &executor);
    let opts = InstallOptions {
        dry_run: global.dry_run,
        parallel: global.parallel,
    };

    let installer = Installer::new(&config, &platform, &executor, elevator.as_ref(), &log, opts);
    installer.install_shell_commands()?;

    log.print_log_location();
    Ok(())
}
