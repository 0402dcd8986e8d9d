//! Shell-command installer.
//!
//! Copies a bundle of command-line binaries shipped with the application
//! into a per-user bin directory, then exposes each configured binary on the
//! shell `PATH` by symlinking it into a system bin directory.  Binaries that
//! already resolve on `PATH` are left alone, and creating the links asks for
//! administrator rights.
//!
//! The public API is organised into four layers:
//!
//! - **[`config`]**: resolve directories and candidate names from defaults,
//!   environment and an optional TOML file
//! - **[`resources`]**: idempotent `check + apply` primitives (probe, copy, link)
//! - **[`installer`]**: the install sequence and its summary notification
//! - **[`commands`]**: top-level subcommand orchestration (`install`, `version`)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exec;
pub mod installer;
pub mod logging;
pub mod platform;
pub mod resources;
