/// Error types shared across the crate.

use std::path::PathBuf;

use thiserror::Error;

/// Why an image could not be brought into the cache.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode '{path}': {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("'{path}' has zero width or height")]
    Empty { path: PathBuf },
}

impl AssetError {
    pub fn path(&self) -> &std::path::Path {
        match self {
            AssetError::Io { path, .. }
            | AssetError::Decode { path, .. }
            | AssetError::Empty { path } => path,
        }
    }
}
