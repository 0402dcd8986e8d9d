//! Command: print version information.

/// Print the shell-commands version to stdout.
#[allow(clippy::print_stdout)]
pub fn run() {
    println!("shell-commands {}", version());
}

/// Version string baked in at build time, falling back to the crate version.
#[must_use]
pub fn version() -> &'static str {
    option_env!("SHELL_COMMANDS_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}
