//! Host platform detection and cache directory resolution.
//!
//! Resolution is a pure mapping from an explicit [`OperatingSystem`] tag, an
//! application name and an injected [`Environment`]. Nothing here reads the
//! process environment unless handed a [`SystemEnvironment`].

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::{BuildHasher, Hash};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Roaming application data directory on Windows.
pub const APP_DATA_VAR: &str = "APPDATA";
/// User home directory on Unix-likes.
pub const HOME_VAR: &str = "HOME";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlatformError {
    #[error("unsupported operating system")]
    UnsupportedPlatform,

    #[error("environment variable {0} is not set")]
    MissingEnvVar(&'static str),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperatingSystem {
    Windows,
    Linux,
    MacOs,
    Unknown,
}

impl OperatingSystem {
    /// Classify an OS name such as `std::env::consts::OS` or a Java-style
    /// `os.name` ("Windows 10", "Mac OS X", "Linux").
    pub fn detect(os_name: &str) -> Self {
        let name = os_name.trim().to_ascii_lowercase();
        // "darwin" contains "win", so macOS has to be checked first.
        if name.contains("mac") || name.contains("darwin") {
            OperatingSystem::MacOs
        } else if name.starts_with("win") {
            OperatingSystem::Windows
        } else if name.contains("linux") {
            OperatingSystem::Linux
        } else {
            OperatingSystem::Unknown
        }
    }

    /// The OS this binary was built for.
    pub fn current() -> Self {
        Self::detect(std::env::consts::OS)
    }
}

impl core::fmt::Display for OperatingSystem {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            OperatingSystem::Windows => "windows",
            OperatingSystem::Linux => "linux",
            OperatingSystem::MacOs => "macos",
            OperatingSystem::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Environment variable lookup.
pub trait Environment {
    /// Value of `key`, or `None` when unset or empty.
    fn var(&self, key: &str) -> Option<String>;
}

impl<K, V, S> Environment for HashMap<K, V, S>
where
    K: Borrow<str> + Hash + Eq,
    V: AsRef<str>,
    S: BuildHasher,
{
    fn var(&self, key: &str) -> Option<String> {
        self.get(key)
            .map(|v| v.as_ref().to_string())
            .filter(|v| !v.is_empty())
    }
}

/// Reads the process environment. `HOME` falls back to the platform's notion
/// of the home directory when the variable itself is missing.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default, Copy, Clone)]
pub struct SystemEnvironment;

#[cfg(not(target_arch = "wasm32"))]
impl Environment for SystemEnvironment {
    fn var(&self, key: &str) -> Option<String> {
        match std::env::var(key) {
            Ok(value) if !value.is_empty() => Some(value),
            _ if key == HOME_VAR => {
                dirs::home_dir().map(|home| home.to_string_lossy().into_owned())
            }
            _ => None,
        }
    }
}

/// Cache directory for `application_name` on `os`.
///
/// - Windows: `%APPDATA%/<app>/cache`
/// - Linux: `$HOME/.cache/<app>`
/// - macOS: `$HOME/Library/Caches/<app>`
pub fn resolve(
    os: OperatingSystem,
    application_name: &str,
    env: &impl Environment,
) -> Result<PathBuf, PlatformError> {
    let require = |key: &'static str| env.var(key).ok_or(PlatformError::MissingEnvVar(key));

    let dir = match os {
        OperatingSystem::Windows => PathBuf::from(require(APP_DATA_VAR)?)
            .join(application_name)
            .join("cache"),
        OperatingSystem::Linux => PathBuf::from(require(HOME_VAR)?)
            .join(".cache")
            .join(application_name),
        OperatingSystem::MacOs => PathBuf::from(require(HOME_VAR)?)
            .join("Library")
            .join("Caches")
            .join(application_name),
        OperatingSystem::Unknown => return Err(PlatformError::UnsupportedPlatform),
    };
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&'static str, &'static str)]) -> HashMap<&'static str, &'static str> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn detects_common_os_names() {
        assert_eq!(OperatingSystem::detect("Windows 10"), OperatingSystem::Windows);
        assert_eq!(OperatingSystem::detect("windows"), OperatingSystem::Windows);
        assert_eq!(OperatingSystem::detect("Linux"), OperatingSystem::Linux);
        assert_eq!(OperatingSystem::detect("Mac OS X"), OperatingSystem::MacOs);
        assert_eq!(OperatingSystem::detect("macos"), OperatingSystem::MacOs);
        assert_eq!(OperatingSystem::detect("Darwin"), OperatingSystem::MacOs);
        assert_eq!(OperatingSystem::detect("FreeBSD"), OperatingSystem::Unknown);
        assert_eq!(OperatingSystem::detect(""), OperatingSystem::Unknown);
    }

    #[test]
    fn windows_cache_lives_under_app_data() {
        for app_data in [r"C:\Users\ada\AppData\Roaming", "/tmp/roaming", "x"] {
            let path = resolve(
                OperatingSystem::Windows,
                "KmpApp",
                &env(&[(APP_DATA_VAR, app_data)]),
            )
            .unwrap();
            assert_eq!(path, PathBuf::from(app_data).join("KmpApp").join("cache"));
        }
    }

    #[test]
    fn linux_cache_lives_under_home_dot_cache() {
        let path = resolve(OperatingSystem::Linux, "KmpApp", &env(&[(HOME_VAR, "/home/ada")])).unwrap();
        assert_eq!(path, PathBuf::from("/home/ada/.cache/KmpApp"));
    }

    #[test]
    fn macos_cache_lives_under_library_caches() {
        let path = resolve(OperatingSystem::MacOs, "KmpApp", &env(&[(HOME_VAR, "/Users/ada")])).unwrap();
        assert_eq!(path, PathBuf::from("/Users/ada/Library/Caches/KmpApp"));
    }

    #[test]
    fn unix_branches_do_not_read_app_data() {
        let only_app_data = env(&[(APP_DATA_VAR, "/roaming")]);
        assert_eq!(
            resolve(OperatingSystem::Linux, "KmpApp", &only_app_data),
            Err(PlatformError::MissingEnvVar(HOME_VAR))
        );
        assert_eq!(
            resolve(OperatingSystem::MacOs, "KmpApp", &only_app_data),
            Err(PlatformError::MissingEnvVar(HOME_VAR))
        );
    }

    #[test]
    fn unknown_platform_fails_without_a_path() {
        let everything = env(&[(APP_DATA_VAR, "/roaming"), (HOME_VAR, "/home/ada")]);
        assert_eq!(
            resolve(OperatingSystem::Unknown, "KmpApp", &everything),
            Err(PlatformError::UnsupportedPlatform)
        );
    }

    #[test]
    fn empty_variables_count_as_missing() {
        assert_eq!(
            resolve(OperatingSystem::Windows, "KmpApp", &env(&[(APP_DATA_VAR, "")])),
            Err(PlatformError::MissingEnvVar(APP_DATA_VAR))
        );
    }
}
