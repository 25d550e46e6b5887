use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArcshimError {
    // Config errors
    #[error("CONFIG_PARSE_ERROR: failed to parse {}: {reason}", path.display())]
    ConfigParse { path: PathBuf, reason: String },

    #[error("CONFIG_INVALID_VALUE: {field}: {reason}")]
    ConfigInvalidValue { field: String, reason: String },

    // Release errors
    #[error("VERSION_INVALID: '{version}' is not a semantic version: {reason}")]
    VersionInvalid { version: String, reason: String },

    #[error("URL_INVALID: {0}")]
    UrlInvalid(String),

    // Layout errors
    #[error("INSTALL_ROOT_UNKNOWN: {0}")]
    InstallRootUnknown(String),

    // IO errors
    #[error("IO_ERROR: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<url::ParseError> for ArcshimError {
    fn from(err: url::ParseError) -> Self {
        ArcshimError::UrlInvalid(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ArcshimError>;
