use crate::base62;
use crate::error::CodeError;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::fmt::Display;

/// Upper bound on caller-supplied codes (aliases).
pub const MAX_LENGTH: usize = 32;

/// A short code identifying a slink.
///
/// Codes are restricted to the Base62 alphabet, so they can never contain a
/// path separator or collide with a reserved route segment.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShortCode(SmolStr);

impl ShortCode {
    /// Creates a new `ShortCode` after validating the input.
    ///
    /// Valid codes are 1-32 characters and contain only `[0-9a-zA-Z]`.
    pub fn new(code: impl AsRef<str>) -> Result<Self, CodeError> {
        let code = code.as_ref();
        Self::validate(code)?;
        Ok(Self(SmolStr::new(code)))
    }

    /// Creates a `ShortCode` without validation.
    ///
    /// Use this only for codes produced by trusted internal sources
    /// (e.g. code strategies, which only emit alphabet characters).
    pub fn new_unchecked(code: impl AsRef<str>) -> Self {
        Self(SmolStr::new(code.as_ref()))
    }

    /// Generates the full shortened URL based on the provided base URL.
    pub fn to_url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self)
    }

    /// Returns the short code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the number of characters in the code.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn validate(code: &str) -> Result<(), CodeError> {
        if code.is_empty() {
            return Err(CodeError::Empty);
        }

        if !base62::is_base62(code) {
            return Err(CodeError::InvalidCharacter(code.to_owned()));
        }

        // Only ASCII survives the charset check, so byte length is char length.
        if code.len() > MAX_LENGTH {
            return Err(CodeError::TooLong {
                len: code.len(),
                max: MAX_LENGTH,
            });
        }

        Ok(())
    }
}

impl std::fmt::Debug for ShortCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ShortCode").field(&self.0).finish()
    }
}

impl Display for ShortCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ShortCode {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
