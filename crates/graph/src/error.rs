use thiserror::Error;

pub type Result<T> = std::result::Result<T, GraphError>;

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("invalid orphan exclusion pattern: {0}")]
    Pattern(#[from] globset::Error),
}
