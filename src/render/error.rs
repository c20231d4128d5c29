use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to create figure file '{0}'")]
    FileCreate(PathBuf, #[source] std::io::Error),

    #[error("Failed to encode PNG")]
    Encoding(#[from] png::EncodingError),

    #[error("No RADOLAN grid definition for a {nrows}x{ncols} composite")]
    UnknownGridShape { nrows: usize, ncols: usize },

    #[error("Failed to read font file '{0}'")]
    FontRead(PathBuf, #[source] std::io::Error),

    #[error("'{0}' is not a usable TrueType/OpenType font")]
    InvalidFont(PathBuf),
}
