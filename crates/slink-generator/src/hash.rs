use crate::error::GeneratorError;
use crate::{clamp_length, CodeStrategy, Result, DEFAULT_CODE_LENGTH};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use slink_core::base62;
use tracing::warn;

type HmacSha256 = Hmac<Sha256>;

/// The bytes that get hashed: `url` alone, or `url|counter` when disambiguating.
fn payload(url: &str, counter: u64) -> String {
    if counter == 0 {
        url.to_owned()
    } else {
        format!("{url}|{counter}")
    }
}

/// Base62-encodes a digest and keeps the first `length` digits.
///
/// Truncation is a plain prefix, so shorter requests are prefixes of longer
/// ones for the same input.
fn truncate_digest(digest: &[u8], length: usize) -> String {
    let mut encoded = base62::encode_bytes(digest);
    encoded.truncate(length);
    encoded
}

/// Deterministic `SHA-256(url[|counter])` → Base62 → prefix.
///
/// The same `(url, counter)` always yields the same code, in any process.
#[derive(Debug, Clone)]
pub struct ContentHash {
    default_length: usize,
}

impl ContentHash {
    pub fn new() -> Self {
        Self::with_default_length(DEFAULT_CODE_LENGTH)
    }

    /// Uses `length` (clamped) when callers do not request one.
    pub fn with_default_length(length: usize) -> Self {
        Self {
            default_length: clamp_length(length),
        }
    }
}

impl Default for ContentHash {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeStrategy for ContentHash {
    fn generate(&self, url: &str, length: Option<usize>, counter: u64) -> Result<String> {
        let length = length.map_or(self.default_length, clamp_length);
        let digest = Sha256::digest(payload(url, counter).as_bytes());
        Ok(truncate_digest(&digest, length))
    }
}

/// Deterministic `HMAC-SHA256(secret, url[|counter])` → Base62 → prefix.
///
/// Same contracts as [`ContentHash`], but codes cannot be predicted without
/// the secret.
#[derive(Clone)]
pub struct KeyedHash {
    mac: HmacSha256,
    default_length: usize,
}

impl KeyedHash {
    pub fn new(secret: impl AsRef<[u8]>) -> Result<Self> {
        Self::with_default_length(secret, DEFAULT_CODE_LENGTH)
    }

    pub fn with_default_length(secret: impl AsRef<[u8]>, length: usize) -> Result<Self> {
        let secret = secret.as_ref();
        if secret.is_empty() {
            warn!("keyed-hash strategy configured with an empty secret; codes are predictable");
        }
        let mac = HmacSha256::new_from_slice(secret)
            .map_err(|e| GeneratorError::InvalidKey(e.to_string()))?;
        Ok(Self {
            mac,
            default_length: clamp_length(length),
        })
    }
}

impl std::fmt::Debug for KeyedHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyedHash")
            .field("default_length", &self.default_length)
            .finish_non_exhaustive()
    }
}

impl CodeStrategy for KeyedHash {
    fn generate(&self, url: &str, length: Option<usize>, counter: u64) -> Result<String> {
        let length = length.map_or(self.default_length, clamp_length);
        let mut mac = self.mac.clone();
        mac.update(payload(url, counter).as_bytes());
        let digest = mac.finalize().into_bytes();
        Ok(truncate_digest(&digest, length))
    }
}
