use thiserror::Error;

#[non_exhaustive]
#[derive(Debug, Error, PartialEq)]
pub enum ValueError {
    #[error("unsupported value: {0}")]
    Unsupported(String),
    #[error("malformed value: {0}")]
    Malformed(String),
}
