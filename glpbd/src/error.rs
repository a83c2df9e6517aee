use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The geometry source produced no vertex positions.
    #[error("no geometry data found")]
    NoGeometryData,

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("failed to parse settings file {}: {source}", .path.display())]
    SettingsParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid obj data at line {line}: {message}")]
    Obj { line: usize, message: String },

    #[error("container codec error: {0}")]
    Container(#[from] glpbd_yaz0::Yaz0Error),

    #[error("unsupported geometry container: {0}")]
    UnsupportedContainer(String),

    /// An offset or count does not fit the width of its field in the binary format.
    #[error("document too large: {0}")]
    DocumentTooLarge(String),

    #[error("invalid parameter document: {0}")]
    InvalidDocument(String),

    #[error("unsupported parameter document version {0}")]
    UnsupportedVersion(u32),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
