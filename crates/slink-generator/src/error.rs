use thiserror::Error;

/// Errors returned by strategy construction and code generation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("invalid shard prefix '{0}'; expected only 0-9a-zA-Z")]
    InvalidPrefix(String),
    #[error("sequential counter exhausted")]
    CounterExhausted,
    #[error("invalid hmac key: {0}")]
    InvalidKey(String),
    #[error("strategy produced an unusable code '{0}'")]
    InvalidCode(String),
}
