use zxcore::error::ValueError;

#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("policy line {line}: {source}")]
    Policy {
        line: usize,
        source: ValueError,
    },
    #[error("guarded permits granted to no role: {0}")]
    Unreachable(String),
    #[cfg(feature = "casbin")]
    #[error(transparent)]
    Casbin(#[from] casbin::Error),
}
