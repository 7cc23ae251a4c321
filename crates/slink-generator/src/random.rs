use crate::{clamp_length, CodeStrategy, Result};
use slink_core::base62::ALPHABET;

/// Length used when a caller does not request one.
///
/// Deliberately shorter than the deterministic strategies' default.
pub const DEFAULT_RANDOM_LENGTH: usize = 6;

/// Draws every character independently and uniformly from the alphabet
/// using the thread-local CSPRNG (`rand::rng`).
///
/// Uniqueness is not guaranteed here; the storage layer rejects duplicates.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomCode;

impl CodeStrategy for RandomCode {
    fn generate(&self, _url: &str, length: Option<usize>, _counter: u64) -> Result<String> {
        let length = length.map_or(DEFAULT_RANDOM_LENGTH, clamp_length);
        Ok(
            std::iter::repeat_with(|| ALPHABET[rand::random_range(0..ALPHABET.len())] as char)
                .take(length)
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slink_core::base62::is_base62;
    use std::collections::HashSet;

    #[test]
    fn default_length_is_six() {
        let code = RandomCode.generate("https://example.com", None, 0).unwrap();
        assert_eq!(code.len(), 6);
    }

    #[test]
    fn requested_length_is_clamped() {
        assert_eq!(RandomCode.generate("u", Some(2), 0).unwrap().len(), 4);
        assert_eq!(RandomCode.generate("u", Some(12), 0).unwrap().len(), 12);
        assert_eq!(RandomCode.generate("u", Some(99), 0).unwrap().len(), 32);
    }

    #[test]
    fn codes_stay_inside_alphabet() {
        for _ in 0..200 {
            let code = RandomCode.generate("u", Some(16), 0).unwrap();
            assert!(is_base62(&code), "{code}");
        }
    }

    #[test]
    fn codes_vary() {
        let codes: HashSet<_> = (0..100)
            .map(|_| RandomCode.generate("u", Some(12), 0).unwrap())
            .collect();
        assert!(codes.len() > 95);
    }
}
