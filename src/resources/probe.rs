//! Binary existence probe.
use crate::exec::Executor;
use crate::logging::Log;

/// Whether a command named `name` already resolves on `PATH`.
///
/// Asks `which` and treats output longer than one character as "exists",
/// so a bare newline does not count.  A failure of `which` itself (not
/// found, non-zero exit, spawn error) means "does not exist": the failure
/// text is logged at debug level and never propagated.
pub fn binary_exists(executor: &dyn Executor, log: &dyn Log, name: &str) -> bool {
    match executor.run("which", &[name]) {
        Ok(result) if result.stdout.chars().count() > 1 => {
            log.debug(&format!("{name} resolves to {}", result.stdout.trim()));
            true
        }
        Ok(result) => {
            log.debug(&format!("which {name}: output {:?}", result.stdout));
            false
        }
        Err(e) => {
            log.debug(&format!("which {name}: {e:#}"));
            false
        }
    }
}
