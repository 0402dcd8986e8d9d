//! Domain-specific error types for the shell-command installer.
//!
//! Only the fatal conditions cross the public boundary of
//! [`Installer::install_shell_commands`](crate::installer::Installer::install_shell_commands).
//! Per-binary failures are absorbed into
//! [`InstallOutcome::Failed`](crate::resources::InstallOutcome::Failed) and
//! never show up here.  The CLI converts these errors to [`anyhow::Error`]
//! via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! InstallError
//! ├── PlatformNotSupported   — host OS is not the supported one
//! ├── CopyFailed             — bundled binaries could not be copied
//! └── Config(ConfigError)    — configuration file or values are invalid
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors returned by the installer entry point.
#[derive(Error, Debug)]
pub enum InstallError {
    /// The host operating system is not the supported one.
    #[error("Platform not supported. (detected {platform})")]
    PlatformNotSupported {
        /// Name of the detected platform (e.g., `"linux"`).
        platform: String,
    },

    /// The bundled binaries could not be copied into the user directory.
    #[error(
        "Failed to copy shell commands from {} to {}",
        .source_dir.display(),
        .dest_dir.display()
    )]
    CopyFailed {
        /// Directory the binaries are copied from.
        source_dir: PathBuf,
        /// Directory the binaries are copied into.
        dest_dir: PathBuf,
        /// Underlying copy failure.
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The installer configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors that arise from loading or validating the installer configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("IO error reading config file {path}: {source}")]
    Io {
        /// Path to the file that could not be read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The config file is not valid TOML or has unexpected fields.
    #[error("Invalid TOML in {file}: {message}")]
    InvalidSyntax {
        /// Path of the offending file.
        file: String,
        /// Parser message.
        message: String,
    },

    /// A candidate binary name is empty, contains a path separator, or is
    /// listed twice.
    #[error("Invalid binary name '{name}': {reason}")]
    InvalidName {
        /// The rejected name.
        name: String,
        /// Why the name was rejected.
        reason: String,
    },

    /// No home directory could be determined for the default user bin dir.
    #[error("cannot determine home directory: HOME is not set")]
    NoHomeDir,
}
