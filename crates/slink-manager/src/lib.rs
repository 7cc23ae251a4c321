//! Slink creation and lookup.
//!
//! [`SlinkManager`] validates input, dedupes by URL, asks the configured
//! [`CodeStrategy`](slink_generator::CodeStrategy) for a code and resolves
//! collisions before persisting through a
//! [`SlinkRepository`](slink_core::SlinkRepository).

pub mod error;
pub mod manager;
pub mod settings;

pub use error::ManagerError;
pub use manager::{CreateSlink, SlinkManager};
pub use settings::ManagerSettings;

pub type Result<T> = std::result::Result<T, ManagerError>;
