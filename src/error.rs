use std::path::PathBuf;

use gpucss::GpuCssError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid options file: {0}")]
    Options(#[from] serde_json::Error),

    #[error("{}: {source}", .path.display())]
    Css { path: PathBuf, source: GpuCssError },

    #[error("more than one input would be written to {}", .path.display())]
    DuplicateOutput { path: PathBuf },

    #[error("failed to install logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}

// Create a type alias for convenience
pub type Result<T> = std::result::Result<T, Error>;
