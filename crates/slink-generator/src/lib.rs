//! Short-code strategies.
//!
//! Every strategy turns a URL into a code drawn from the Base62 alphabet.
//! The hash strategies are deterministic and prefix-consistent, the random
//! strategy relies on storage to reject duplicates, and the sequential
//! strategy is collision-free within one counter's lifetime.

pub mod error;
pub mod hash;
pub mod random;
pub mod registry;
pub mod seq;

pub use error::GeneratorError;
pub use hash::{ContentHash, KeyedHash};
pub use random::RandomCode;
pub use registry::{Strategy, StrategyKind, StrategySettings};
pub use seq::{Sequential, SequentialCounter};

pub type Result<T> = std::result::Result<T, GeneratorError>;

/// Shortest code length a caller can request.
pub const MIN_CODE_LENGTH: usize = 4;
/// Longest code length a caller can request.
pub const MAX_CODE_LENGTH: usize = 32;
/// Default length of the deterministic strategies.
pub const DEFAULT_CODE_LENGTH: usize = 8;

/// Clamps a requested length into `[MIN_CODE_LENGTH, MAX_CODE_LENGTH]`.
pub fn clamp_length(length: usize) -> usize {
    length.clamp(MIN_CODE_LENGTH, MAX_CODE_LENGTH)
}

/// Produces a short code for a URL.
///
/// Implementations are pure generators that don't interact with storage;
/// uniqueness is enforced by whoever persists the result.
pub trait CodeStrategy: Send + Sync + 'static {
    /// Generates a code for `url`.
    ///
    /// * `length` - requested code length, clamped to `[4, 32]`; `None` picks
    ///   the strategy's own default. Strategies without a notion of length
    ///   ignore it.
    /// * `counter` - disambiguation counter; deterministic strategies derive a
    ///   different code for each value, others ignore it.
    fn generate(&self, url: &str, length: Option<usize>, counter: u64) -> Result<String>;
}

impl<T: CodeStrategy + ?Sized> CodeStrategy for std::sync::Arc<T> {
    fn generate(&self, url: &str, length: Option<usize>, counter: u64) -> Result<String> {
        (**self).generate(url, length, counter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_into_range() {
        assert_eq!(clamp_length(0), 4);
        assert_eq!(clamp_length(4), 4);
        assert_eq!(clamp_length(8), 8);
        assert_eq!(clamp_length(32), 32);
        assert_eq!(clamp_length(100), 32);
    }
}
