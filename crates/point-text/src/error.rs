use std::io;
use std::path::PathBuf;

use point_text_core::{InvalidParameterError, RasterizationError};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Rasterization(#[from] RasterizationError),
    #[error(transparent)]
    InvalidParameter(#[from] InvalidParameterError),
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed svg: {0}")]
    Svg(String),
    #[error("invalid settings in {}: {source}", .path.display())]
    Settings {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
