//! Top-level subcommand entry points.
pub mod install;
pub mod version;
