use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LoaderError>;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("corpus root is not a directory: {0}")]
    InvalidRoot(PathBuf),
}
