use thiserror::Error;

pub type Result<T> = std::result::Result<T, TokenError>;

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("failed to load tokenizer from {path}: {reason}")]
    TokenizerLoad { path: String, reason: String },
}
