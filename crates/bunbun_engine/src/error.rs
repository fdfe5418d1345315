use std::path::PathBuf;

use bunbun_assets::{AssetError, AssetPath};
use thiserror::Error;

/// A property bag that cannot build the entity it describes.
#[derive(Debug, Error, PartialEq)]
pub enum PropertyError {
    #[error("property bag is not a JSON object")]
    NotAnObject,
    #[error("missing property `{0}`")]
    Missing(String),
    #[error("property `{key}` should be {expected}")]
    WrongType { key: String, expected: &'static str },
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("unknown entity type `{0}`")]
    UnknownEntityType(String),
    #[error("cannot build `{type_name}`: {source}")]
    Property {
        type_name: String,
        #[source]
        source: PropertyError,
    },
    #[error("level description {0} was never loaded")]
    MissingDescription(AssetPath),
    #[error("level description {path} is invalid: {source}")]
    InvalidDescription {
        path: AssetPath,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Asset(#[from] AssetError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid engine config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("fps must be \"auto\" or a positive number, got `{0}`")]
    Fps(String),
}
