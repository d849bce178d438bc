use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelayoutError {
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
    #[error("Failed to {action} {}: {source}", .path.display())]
    FsError {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Encoding error: {} is not valid UTF-8", .0.display())]
    EncodingError(PathBuf),
    #[error("Path error: {0}")]
    PathError(String),
    #[error("Serialization error: {0}")]
    SerializeError(#[from] serde_json::Error),
}

/// Builds a `map_err` adapter that tags an I/O failure with the operation and path.
pub fn fs_err(action: &'static str, path: &Path) -> impl FnOnce(io::Error) -> RelayoutError {
    let path = path.to_path_buf();
    move |source| RelayoutError::FsError {
        action,
        path,
        source,
    }
}
