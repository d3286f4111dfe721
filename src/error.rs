use thiserror::Error;

/// Rejected filter configuration. Raised only at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("filter size must be > 0")]
    ZeroSize,

    #[error("number of hash functions must be > 0")]
    ZeroHashes,

    #[error("exceeded the max number of hash functions: k = {k}, max value = {available}")]
    TooManyHashes { k: usize, available: usize },

    #[error("unknown hash function: {0:?}")]
    UnknownHash(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
