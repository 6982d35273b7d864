//! Process configuration, read from the environment at startup.
//!
//! | Variable            | Default   | Meaning                                  |
//! |---------------------|-----------|------------------------------------------|
//! | `KMPAPP_APP_NAME`   | `KmpApp`  | window title and cache subdirectory      |
//! | `KMPAPP_SEED_PATH`  | unset     | JSON product seed loaded into the store  |
//! | `KMPAPP_LOG_FORMAT` | `pretty`  | `pretty` or `json`                       |
//!
//! `RUST_LOG` controls the log filter as usual.

use std::path::PathBuf;

use kmpapp_catalog::Viewport;
use kmpapp_observability::{LogConfig, LogFormat};

use crate::platform::{Environment, SystemEnvironment};

pub const DEFAULT_APP_NAME: &str = "KmpApp";
pub const APP_NAME_VAR: &str = "KMPAPP_APP_NAME";
pub const SEED_PATH_VAR: &str = "KMPAPP_SEED_PATH";
pub const LOG_FORMAT_VAR: &str = "KMPAPP_LOG_FORMAT";

/// Window size used until the webview reports its own.
pub const INITIAL_VIEWPORT: (f32, f32) = (1024.0, 768.0);

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub app_name: String,
    pub seed_path: Option<PathBuf>,
    pub log: LogConfig,
    pub initial_viewport: Viewport,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(&SystemEnvironment)
    }

    pub fn from_lookup(env: &impl Environment) -> Self {
        let log = LogConfig {
            format: env
                .var(LOG_FORMAT_VAR)
                .map(|raw| LogFormat::parse_lossy(&raw))
                .unwrap_or_default(),
            ..LogConfig::default()
        };

        Self {
            app_name: env
                .var(APP_NAME_VAR)
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| DEFAULT_APP_NAME.to_string()),
            seed_path: env.var(SEED_PATH_VAR).map(PathBuf::from),
            log,
            initial_viewport: Viewport::new(INITIAL_VIEWPORT.0, INITIAL_VIEWPORT.1),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(&std::collections::HashMap::<String, String>::new())
    }
}
