use slink_core::{CodeError, StorageError};
use slink_generator::GeneratorError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum ManagerError {
    #[error("invalid url format: {0}")]
    InvalidUrlFormat(String),
    #[error("url is not reachable: {0}")]
    UnreachableUrl(String),
    #[error("alias must contain only 0-9a-zA-Z: {0}")]
    InvalidAlias(String),
    #[error("alias must be at most {max} characters, got {len}")]
    AliasTooLong { len: usize, max: usize },
    #[error("alias already exists: {0}")]
    AliasConflict(String),
    #[error("failed to persist slink: {0}")]
    PersistenceFailure(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Generator(#[from] GeneratorError),
}

impl From<CodeError> for ManagerError {
    fn from(value: CodeError) -> Self {
        match value {
            CodeError::Empty => Self::InvalidAlias(String::new()),
            CodeError::InvalidCharacter(alias) => Self::InvalidAlias(alias),
            CodeError::TooLong { len, max } => Self::AliasTooLong { len, max },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_errors_map_to_alias_errors() {
        assert!(matches!(
            ManagerError::from(CodeError::InvalidCharacter("a b".into())),
            ManagerError::InvalidAlias(alias) if alias == "a b"
        ));
        assert!(matches!(
            ManagerError::from(CodeError::TooLong { len: 33, max: 32 }),
            ManagerError::AliasTooLong { len: 33, max: 32 }
        ));
    }

    #[test]
    fn messages() {
        assert_eq!(
            ManagerError::AliasConflict("mine".into()).to_string(),
            "alias already exists: mine"
        );
        assert_eq!(
            ManagerError::AliasTooLong { len: 33, max: 32 }.to_string(),
            "alias must be at most 32 characters, got 33"
        );
    }
}
