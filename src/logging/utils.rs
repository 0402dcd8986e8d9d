//! Log-file location, ANSI stripping, and UTC timestamps for the file layer.
use std::path::PathBuf;

/// Timestamp layout of the run header written at the top of a log file.
pub(super) const HEADER_TIME: &str = "%Y-%m-%d %H:%M:%S";

/// Timestamp layout prefixed to every log line.
pub(super) const LINE_TIME: &str = "%H:%M:%S";

/// Current UTC time rendered with a `chrono` format string.
pub(super) fn utc_now(layout: &str) -> String {
    chrono::Utc::now().format(layout).to_string()
}

/// Remove ANSI CSI sequences (`ESC [ ... final-byte`) so the log file holds
/// plain text.  A lone `ESC` not followed by `[` is dropped with the next
/// character.
pub(super) fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\x1b' {
            out.push(c);
            continue;
        }
        if chars.next() != Some('[') {
            continue;
        }
        for b in chars.by_ref() {
            if ('@'..='~').contains(&b) {
                break;
            }
        }
    }
    out
}

/// `<cache>/shell-commands/<command>.log`, creating the directory.
///
/// `<cache>` is `$XDG_CACHE_HOME` when set and non-empty, else
/// `$HOME/.cache`.  Returns `None` if the directory cannot be created.
pub(super) fn log_file_path(command: &str) -> Option<PathBuf> {
    let cache = std::env::var_os("XDG_CACHE_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".cache")))?;
    let dir = cache.join("shell-commands");
    std::fs::create_dir_all(&dir).ok()?;
    Some(dir.join(format!("{command}.log")))
}
