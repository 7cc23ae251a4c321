//! Base62 encoding over the `0-9a-zA-Z` alphabet.
//!
//! Digit values follow the alphabet order, so `0` is zero, `z` is 35 and `Z`
//! is 61. Left-padding to a visible width is left to callers.

/// The 62-symbol alphabet, in digit-value order.
pub const ALPHABET: &[u8; 62] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// The numeric base of the encoding.
pub const BASE: u64 = ALPHABET.len() as u64;

/// The character representing digit value zero.
pub const ZERO: char = '0';

/// Encodes a non-negative integer as its minimal-length Base62 string.
///
/// `0` encodes as `"0"`, never as an empty string.
pub fn encode(mut n: u64) -> String {
    if n == 0 {
        return ZERO.to_string();
    }

    let mut digits = Vec::with_capacity(11);
    while n > 0 {
        digits.push(ALPHABET[(n % BASE) as usize]);
        n /= BASE;
    }
    digits.reverse();

    digits.into_iter().map(char::from).collect()
}

/// Encodes a big-endian byte string, read as one unsigned integer of
/// arbitrary width, as its minimal-length Base62 string.
///
/// Used for hash digests, which are far wider than any machine integer.
/// Empty or all-zero input encodes as `"0"`.
///
/// # Examples
///
/// ```
/// use slink_core::base62;
///
/// assert_eq!(base62::encode_bytes(&62u64.to_be_bytes()), "10");
/// assert_eq!(base62::encode_bytes(&[]), "0");
/// ```
pub fn encode_bytes(bytes: &[u8]) -> String {
    let start = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
    let mut dividend: Vec<u8> = bytes[start..].to_vec();
    if dividend.is_empty() {
        return ZERO.to_string();
    }

    // Schoolbook long division by 62 over base-256 limbs; each pass yields
    // one Base62 digit (least significant first) and shrinks the dividend.
    let mut digits = Vec::with_capacity(dividend.len() * 4 / 3 + 1);
    while !dividend.is_empty() {
        let mut quotient = Vec::with_capacity(dividend.len());
        let mut remainder: u32 = 0;
        for limb in &dividend {
            let acc = (remainder << 8) | u32::from(*limb);
            let q = acc / BASE as u32;
            remainder = acc % BASE as u32;
            if !(quotient.is_empty() && q == 0) {
                quotient.push(q as u8);
            }
        }
        digits.push(ALPHABET[remainder as usize]);
        dividend = quotient;
    }
    digits.reverse();

    digits.into_iter().map(char::from).collect()
}

/// Returns `true` if `c` belongs to the alphabet.
pub fn is_base62_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
}

/// Returns `true` if `s` is non-empty and made only of alphabet characters.
pub fn is_base62(s: &str) -> bool {
    !s.is_empty() && s.chars().all(is_base62_char)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_the_zero_digit() {
        assert_eq!(encode(0), "0");
    }

    #[test]
    fn last_single_digit() {
        assert_eq!(encode(61), "Z");
    }

    #[test]
    fn first_two_digit_value() {
        assert_eq!(encode(62), "10");
        assert_eq!(encode(62 * 62 - 1), "ZZ");
        assert_eq!(encode(62 * 62), "100");
    }

    #[test]
    fn digit_values_follow_alphabet_order() {
        assert_eq!(encode(10), "a");
        assert_eq!(encode(35), "z");
        assert_eq!(encode(36), "A");
    }

    #[test]
    fn max_u64_fits_eleven_digits() {
        assert_eq!(encode(u64::MAX).len(), 11);
    }

    #[test]
    fn bytes_agree_with_integer_encoding() {
        for n in [1u64, 61, 62, 3_500_000, 916_132_831, u64::MAX] {
            assert_eq!(encode_bytes(&n.to_be_bytes()), encode(n), "n = {n}");
        }
    }

    #[test]
    fn bytes_ignore_leading_zeros() {
        assert_eq!(encode_bytes(&[0, 0, 0, 1]), "1");
        assert_eq!(encode_bytes(&[0, 0]), "0");
        assert_eq!(encode_bytes(&[]), "0");
    }

    #[test]
    fn wide_input_encodes_beyond_u64() {
        // u64::MAX % 62 == 15 ('f'), so 2^64 only bumps the last digit to 'g'.
        let mut bytes = [0u8; 9];
        bytes[0] = 1;
        let below = encode(u64::MAX);
        assert!(below.ends_with('f'));
        let expected = format!("{}g", &below[..below.len() - 1]);
        assert_eq!(encode_bytes(&bytes), expected);
    }

    #[test]
    fn full_width_digest_encodes_to_43_digits() {
        // 62^42 < 2^256 - 1 < 62^43
        assert_eq!(encode_bytes(&[0xFF; 32]).len(), 43);
    }

    #[test]
    fn charset_checks() {
        assert!(is_base62("abcXYZ019"));
        assert!(!is_base62(""));
        assert!(!is_base62("has space"));
        assert!(!is_base62("bad-alias"));
        assert!(!is_base62("caf\u{e9}"));
    }
}
