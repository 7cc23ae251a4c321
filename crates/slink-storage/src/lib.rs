pub mod factory;
pub mod memory;

pub use factory::{open, StorageBackend};
pub use memory::InMemoryRepository;
pub use slink_core::{SlinkRecord, SlinkRepository, StorageError};
