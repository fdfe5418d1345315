use thiserror::Error;

use crate::AssetPath;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset {0} not found")]
    NotFound(AssetPath),
    #[error("failed to read asset {path}: {source}")]
    Io {
        path: AssetPath,
        #[source]
        source: std::io::Error,
    },
}
