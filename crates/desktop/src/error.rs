//! Desktop shell errors.

use std::path::PathBuf;

use kmpapp_catalog::CatalogError;
use thiserror::Error;

use crate::platform::PlatformError;

#[derive(Debug, Error)]
pub enum DesktopError {
    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("failed to read seed file {path:?}: {source}")]
    SeedIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed seed data: {0}")]
    SeedFormat(#[from] serde_json::Error),
}
