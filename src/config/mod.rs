//! Installer configuration: where binaries come from, where they go, and
//! which of them get linked onto the shell `PATH`.
pub mod toml_loader;

use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Binaries linked when the config file does not name any.
pub const DEFAULT_CANDIDATE_NAMES: &[&str] = &["adb", "watchman"];

/// Directory on the default `PATH` that receives the symlinks.
pub const DEFAULT_SYSTEM_BIN_DIR: &str = "/usr/local/bin";

/// Overrides the per-user home directory of the installer.
pub const HOME_ENV: &str = "SHELL_COMMANDS_HOME";

/// Overrides the location of the config file.
pub const CONFIG_ENV: &str = "SHELL_COMMANDS_CONFIG";

/// How the privileged symlink step obtains administrator rights.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Elevation {
    /// Graphical administrator prompt via `osascript`.
    #[default]
    Osascript,
    /// Terminal password prompt via `sudo`.
    Sudo,
}

impl fmt::Display for Elevation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Osascript => write!(f, "osascript"),
            Self::Sudo => write!(f, "sudo"),
        }
    }
}

/// On-disk shape of the config file. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Directory holding the bundled binaries.
    pub source_dir: Option<PathBuf>,
    /// Per-user directory the bundled binaries are copied into.
    pub user_bin_dir: Option<PathBuf>,
    /// System directory receiving the symlinks.
    pub system_bin_dir: Option<PathBuf>,
    /// Names of the binaries to link.
    pub candidate_names: Option<Vec<String>>,
    /// Privilege escalation mechanism.
    pub elevation: Option<Elevation>,
}

/// Fully resolved installer configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallerConfig {
    /// Directory holding the bundled binaries (read-only).
    pub source_dir: PathBuf,
    /// Per-user directory mirroring `source_dir`.
    pub user_bin_dir: PathBuf,
    /// System directory receiving the symlinks.
    pub system_bin_dir: PathBuf,
    /// Names of the binaries to link, in reporting order.
    pub candidate_names: Vec<String>,
    /// Privilege escalation mechanism.
    pub elevation: Elevation,
}

impl InstallerConfig {
    /// Load the config file (`path`, else `$SHELL_COMMANDS_CONFIG`, else
    /// `<home>/config.toml`) and resolve it against the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined, the file
    /// exists but is invalid, or a candidate name is rejected.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let home = home_dir().ok_or(ConfigError::NoHomeDir)?;
        let app_home = app_home_dir(&home);
        let config_path = path.map_or_else(
            || {
                std::env::var_os(CONFIG_ENV)
                    .map_or_else(|| app_home.join("config.toml"), PathBuf::from)
            },
            Path::to_path_buf,
        );
        let file: ConfigFile = toml_loader::load_config(&config_path)?;
        Self::resolve(file, &home, &app_home, &default_source_dir())
    }

    /// Combine a parsed config file with defaults.
    ///
    /// `home` is used for `~` expansion; `app_home` is the installer's own
    /// per-user directory whose `bin` subdirectory is the default
    /// destination.
    ///
    /// # Errors
    ///
    /// Returns an error if a candidate name is empty, contains a path
    /// separator, or appears twice.
    pub fn resolve(
        file: ConfigFile,
        home: &Path,
        app_home: &Path,
        default_source: &Path,
    ) -> Result<Self, ConfigError> {
        let expand = |p: PathBuf| expand_tilde(&p, home);
        let candidate_names = file.candidate_names.unwrap_or_else(|| {
            DEFAULT_CANDIDATE_NAMES
                .iter()
                .map(ToString::to_string)
                .collect()
        });
        validate_names(&candidate_names)?;

        Ok(Self {
            source_dir: file
                .source_dir
                .map_or_else(|| default_source.to_path_buf(), expand),
            user_bin_dir: file
                .user_bin_dir
                .map_or_else(|| app_home.join("bin"), expand),
            system_bin_dir: file
                .system_bin_dir
                .map_or_else(|| PathBuf::from(DEFAULT_SYSTEM_BIN_DIR), expand),
            candidate_names,
            elevation: file.elevation.unwrap_or_default(),
        })
    }

    /// Path of the copied binary `name` inside the user bin dir.
    #[must_use]
    pub fn user_binary(&self, name: &str) -> PathBuf {
        self.user_bin_dir.join(name)
    }

    /// Path of the symlink for `name` inside the system bin dir.
    #[must_use]
    pub fn system_link(&self, name: &str) -> PathBuf {
        self.system_bin_dir.join(name)
    }
}

/// `$HOME`, if set and non-empty.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
}

/// `$SHELL_COMMANDS_HOME`, else `<home>/.shell-commands`.
fn app_home_dir(home: &Path) -> PathBuf {
    std::env::var_os(HOME_ENV)
        .filter(|h| !h.is_empty())
        .map_or_else(|| home.join(".shell-commands"), PathBuf::from)
}

/// Bundled binaries ship next to the executable at `../binaries/osx`.
fn default_source_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .map_or_else(
            || PathBuf::from("binaries").join("osx"),
            |dir| dir.join("..").join("binaries").join("osx"),
        )
}

/// Replace a leading `~` component with `home`.
fn expand_tilde(path: &Path, home: &Path) -> PathBuf {
    path.strip_prefix("~")
        .map_or_else(|_| path.to_path_buf(), |rest| home.join(rest))
}

fn validate_names(names: &[String]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for name in names {
        let reason = if name.trim().is_empty() {
            Some("must not be empty")
        } else if name.contains('/') || name.contains('\\') {
            Some("contains a path separator")
        } else if name == "." || name == ".." {
            Some("is not a file name")
        } else if !seen.insert(name.as_str()) {
            Some("is listed more than once")
        } else {
            None
        };
        if let Some(reason) = reason {
            return Err(ConfigError::InvalidName {
                name: name.clone(),
                reason: reason.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    fn resolve(file: ConfigFile) -> Result<InstallerConfig, ConfigError> {
        InstallerConfig::resolve(
            file,
            Path::new("/Users/dev"),
            Path::new("/Users/dev/.shell-commands"),
            Path::new("/opt/tool/binaries/osx"),
        )
    }

    fn parse(toml_src: &str) -> ConfigFile {
        toml::from_str(toml_src).unwrap()
    }

    #[test]
    fn defaults_when_file_is_empty() {
        let config = resolve(ConfigFile::default()).unwrap();
        assert_eq!(config.source_dir, PathBuf::from("/opt/tool/binaries/osx"));
        assert_eq!(
            config.user_bin_dir,
            PathBuf::from("/Users/dev/.shell-commands/bin")
        );
        assert_eq!(config.system_bin_dir, PathBuf::from("/usr/local/bin"));
        assert_eq!(config.candidate_names, vec!["adb", "watchman"]);
        assert_eq!(config.elevation, Elevation::Osascript);
    }

    #[test]
    fn file_values_override_defaults() {
        let file = parse(
            r#"
source_dir = "/srv/bundle"
user_bin_dir = "~/bin/vendored"
system_bin_dir = "/opt/local/bin"
candidate_names = ["adb", "fastboot", "watchman"]
elevation = "sudo"
"#,
        );
        let config = resolve(file).unwrap();
        assert_eq!(config.source_dir, PathBuf::from("/srv/bundle"));
        assert_eq!(config.user_bin_dir, PathBuf::from("/Users/dev/bin/vendored"));
        assert_eq!(config.system_bin_dir, PathBuf::from("/opt/local/bin"));
        assert_eq!(config.candidate_names, vec!["adb", "fastboot", "watchman"]);
        assert_eq!(config.elevation, Elevation::Sudo);
    }

    #[test]
    fn unknown_elevation_is_rejected() {
        assert!(toml::from_str::<ConfigFile>("elevation = \"runas\"").is_err());
    }

    #[test]
    fn empty_name_is_rejected() {
        let err = resolve(parse("candidate_names = [\"adb\", \"\"]")).unwrap_err();
        assert!(err.to_string().contains("must not be empty"), "{err}");
    }

    #[test]
    fn path_separator_in_name_is_rejected() {
        let err = resolve(parse("candidate_names = [\"../adb\"]")).unwrap_err();
        assert!(err.to_string().contains("path separator"), "{err}");
    }

    #[test]
    fn duplicate_name_is_rejected() {
        let err = resolve(parse("candidate_names = [\"adb\", \"adb\"]")).unwrap_err();
        assert!(err.to_string().contains("more than once"), "{err}");
    }

    #[test]
    fn empty_candidate_list_is_allowed() {
        let config = resolve(parse("candidate_names = []")).unwrap();
        assert!(config.candidate_names.is_empty());
    }

    #[test]
    fn binary_and_link_paths() {
        let config = resolve(ConfigFile::default()).unwrap();
        assert_eq!(
            config.user_binary("adb"),
            PathBuf::from("/Users/dev/.shell-commands/bin/adb")
        );
        assert_eq!(config.system_link("adb"), PathBuf::from("/usr/local/bin/adb"));
    }

    #[test]
    fn tilde_only_expands_leading_component() {
        let home = Path::new("/Users/dev");
        assert_eq!(expand_tilde(Path::new("~"), home), PathBuf::from("/Users/dev"));
        assert_eq!(
            expand_tilde(Path::new("/tmp/~x"), home),
            PathBuf::from("/tmp/~x")
        );
    }

    #[test]
    fn elevation_display() {
        assert_eq!(Elevation::Osascript.to_string(), "osascript");
        assert_eq!(Elevation::Sudo.to_string(), "sudo");
    }
}
