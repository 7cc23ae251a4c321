use crate::memory::InMemoryRepository;
use slink_core::{SlinkRepository, StorageError};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

/// Storage backends that can be selected by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageBackend {
    #[default]
    Memory,
}

impl FromStr for StorageBackend {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "in-memory" | "inmemory" => Ok(StorageBackend::Memory),
            other => Err(StorageError::UnsupportedBackend(other.to_string())),
        }
    }
}

impl Display for StorageBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackend::Memory => write!(f, "memory"),
        }
    }
}

impl StorageBackend {
    /// Builds a fresh repository for this backend.
    pub fn open(self) -> Arc<dyn SlinkRepository> {
        info!(backend = %self, "opening storage backend");
        match self {
            StorageBackend::Memory => Arc::new(InMemoryRepository::new()),
        }
    }
}

/// Resolves a backend by name and opens it.
pub fn open(name: &str) -> Result<Arc<dyn SlinkRepository>, StorageError> {
    Ok(name.parse::<StorageBackend>()?.open())
}
