use thiserror::Error;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Token(#[from] jsonwebtoken::errors::Error),
    #[error(transparent)]
    Rbac(#[from] zxrbac::error::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("misconfiguration: {0}")]
    Misconfiguration(String),
}
