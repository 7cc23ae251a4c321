use crate::shortcode::ShortCode;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A persisted slink: one short code bound to one destination URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlinkRecord {
    /// Primary identity; immutable once created.
    pub code: ShortCode,
    /// The destination URL; never rebound to a different value.
    pub url: String,
    /// The vanity code the caller asked for, if any.
    pub alias: Option<ShortCode>,
    /// Successful lookups so far. Starts at 0 and only increases.
    pub clicks: u64,
    /// When the record was first saved.
    pub created_at: Timestamp,
    /// Administratively disabled records still occupy their code.
    #[serde(default)]
    pub disabled: bool,
}

impl SlinkRecord {
    /// Creates a fresh record with zero clicks, stamped with the current time.
    pub fn new(code: ShortCode, url: impl Into<String>, alias: Option<ShortCode>) -> Self {
        Self {
            code,
            url: url.into(),
            alias,
            clicks: 0,
            created_at: Timestamp::now(),
            disabled: false,
        }
    }

    /// Returns `true` if the record can be resolved by lookups.
    pub fn is_active(&self) -> bool {
        !self.disabled
    }
}
