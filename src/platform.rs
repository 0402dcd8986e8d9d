//! Host platform detection and the supported-platform guard.
use std::fmt;

use crate::error::InstallError;

/// Detected operating system platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    /// Apple macOS.
    MacOs,
    /// Any Linux distribution.
    Linux,
    /// Microsoft Windows.
    Windows,
    /// Any other target (BSDs, illumos, ...).
    Other,
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MacOs => write!(f, "macos"),
            Self::Linux => write!(f, "linux"),
            Self::Windows => write!(f, "windows"),
            Self::Other => write!(f, "{}", std::env::consts::OS),
        }
    }
}

/// The only platform shell commands can be installed on.
pub const SUPPORTED_OS: Os = Os::MacOs;

/// Platform information for the current system.
#[derive(Debug, Clone)]
pub struct Platform {
    /// Detected operating system.
    pub os: Os,
}

impl Platform {
    /// Detect the current platform.
    #[must_use]
    pub const fn detect() -> Self {
        Self {
            os: Self::detect_os(),
        }
    }

    /// Create a platform with an explicit OS (for tests and callers that
    /// already know the host).
    #[must_use]
    pub const fn new(os: Os) -> Self {
        Self { os }
    }

    /// Whether this is the platform shell commands can be installed on.
    #[must_use]
    pub fn is_supported(&self) -> bool {
        self.os == SUPPORTED_OS
    }

    /// Fail unless this is the supported platform. Has no side effects.
    ///
    /// # Errors
    ///
    /// Returns [`InstallError::PlatformNotSupported`] on any OS other than
    /// [`SUPPORTED_OS`].
    pub fn ensure_supported(&self) -> Result<(), InstallError> {
        if self.is_supported() {
            return Ok(());
        }
        Err(InstallError::PlatformNotSupported {
            platform: self.os.to_string(),
        })
    }

    const fn detect_os() -> Os {
        if cfg!(target_os = "macos") {
            Os::MacOs
        } else if cfg!(target_os = "linux") {
            Os::Linux
        } else if cfg!(target_os = "windows") {
            Os::Windows
        } else {
            Os::Other
        }
    }
}
