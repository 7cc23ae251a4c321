//! Core types and traits for the slink URL shortener.
//!
//! This crate provides the Base62 encoder, the validated [`ShortCode`], the
//! persisted [`SlinkRecord`] and the [`SlinkRepository`] storage contract, plus
//! the narrow collaborator traits the manager calls out to.

pub mod base62;
pub mod click;
pub mod error;
pub mod reachability;
pub mod record;
pub mod repository;
pub mod shortcode;

pub use click::{ClickLogger, ClickSource, NoopClickLogger, TracingClickLogger};
pub use error::{CodeError, StorageError};
pub use reachability::{AssumeReachable, ReachabilityChecker};
pub use record::SlinkRecord;
pub use repository::SlinkRepository;
pub use shortcode::ShortCode;
