use crate::error::GeneratorError;
use crate::{clamp_length, CodeStrategy, Result};
use slink_core::base62;
use std::sync::atomic::{AtomicU64, Ordering};

/// Default first counter value, high enough to avoid very short demo codes.
pub const DEFAULT_SEQ_START: u64 = 3_500_000;
/// Default minimum visible code length (before the prefix).
pub const DEFAULT_MIN_LENGTH: usize = 6;

/// A process-local, monotonically increasing cursor.
///
/// The only mutation is [`next`](Self::next). The cursor lives in memory;
/// after a restart it starts over from its configured value unless the
/// operator persists [`peek`](Self::peek) somewhere and restarts from there.
#[derive(Debug)]
pub struct SequentialCounter {
    next: AtomicU64,
}

impl SequentialCounter {
    pub fn new(start: u64) -> Self {
        Self {
            next: AtomicU64::new(start),
        }
    }

    /// Atomically takes the next value.
    ///
    /// Fails once the cursor reaches `u64::MAX` instead of wrapping around.
    pub fn next(&self) -> Result<u64> {
        self.next
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_add(1))
            .map_err(|_| GeneratorError::CounterExhausted)
    }

    /// Returns the value the next call to [`next`](Self::next) would hand out.
    pub fn peek(&self) -> u64 {
        self.next.load(Ordering::SeqCst)
    }
}

/// Counter-based codes: `prefix + left_pad(base62(n), min_length, '0')`.
///
/// Collision-free within one counter's lifetime. Codes only grow once the
/// counter passes `62^min_length - 1`. The requested length and the
/// disambiguation counter are ignored.
///
/// For multi-node deployments, give each node its own prefix (e.g. a shard
/// tag) or a disjoint start range.
#[derive(Debug)]
pub struct Sequential {
    counter: SequentialCounter,
    min_length: usize,
    prefix: String,
}

impl Sequential {
    /// Creates a sequential strategy starting at `start`.
    ///
    /// `min_length` is clamped to `[4, 32]`. `prefix` may be empty, otherwise
    /// it must be Base62.
    pub fn new(start: u64, min_length: usize, prefix: impl Into<String>) -> Result<Self> {
        let prefix = prefix.into();
        if !prefix.is_empty() && !base62::is_base62(&prefix) {
            return Err(GeneratorError::InvalidPrefix(prefix));
        }

        Ok(Self {
            counter: SequentialCounter::new(start),
            min_length: clamp_length(min_length),
            prefix,
        })
    }

    pub fn counter(&self) -> &SequentialCounter {
        &self.counter
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn min_length(&self) -> usize {
        self.min_length
    }
}

impl Default for Sequential {
    fn default() -> Self {
        Self {
            counter: SequentialCounter::new(DEFAULT_SEQ_START),
            min_length: DEFAULT_MIN_LENGTH,
            prefix: String::new(),
        }
    }
}

impl CodeStrategy for Sequential {
    fn generate(&self, _url: &str, _length: Option<usize>, _counter: u64) -> Result<String> {
        let n = self.counter.next()?;
        let digits = base62::encode(n);
        Ok(format!(
            "{}{:0>width$}",
            self.prefix,
            digits,
            width = self.min_length
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn next(strategy: &Sequential) -> String {
        strategy.generate("https://example.com", None, 0).unwrap()
    }

    #[test]
    fn pads_to_min_length() {
        let strategy = Sequential::new(3_500_000, 6, "").unwrap();
        assert_eq!(next(&strategy), "00eGvC");
        assert_eq!(next(&strategy), "00eGvD");
    }

    #[test]
    fn default_matches_configured_defaults() {
        let strategy = Sequential::default();
        assert_eq!(next(&strategy), "00eGvC");
    }

    #[test]
    fn five_thousand_distinct_padded_codes() {
        let strategy = Sequential::new(1000, 6, "").unwrap();
        let codes: HashSet<_> = (0..5000).map(|_| next(&strategy)).collect();
        assert_eq!(codes.len(), 5000);
        assert!(codes.iter().all(|c| c.len() >= 6));
        assert!(codes.iter().all(|c| base62::is_base62(c)));
    }

    #[test]
    fn prefix_is_prepended_after_padding() {
        let strategy = Sequential::new(1000, 6, "ap").unwrap();
        let codes: HashSet<_> = (0..5000).map(|_| next(&strategy)).collect();
        assert_eq!(codes.len(), 5000);
        assert!(codes.iter().all(|c| c.starts_with("ap") && c.len() >= 8));
        assert!(codes.contains("ap0000g8"));
    }

    #[test]
    fn grows_past_min_length() {
        let top = 62u64.pow(6) - 1;
        let strategy = Sequential::new(top, 6, "").unwrap();
        assert_eq!(next(&strategy), "ZZZZZZ");
        assert_eq!(next(&strategy), "1000000");
    }

    #[test]
    fn ignores_length_and_counter() {
        let strategy = Sequential::new(1000, 6, "").unwrap();
        assert_eq!(strategy.generate("u", Some(20), 7).unwrap(), "0000g8");
    }

    #[test]
    fn min_length_is_clamped() {
        let strategy = Sequential::new(0, 1, "").unwrap();
        assert_eq!(strategy.min_length(), 4);
        assert_eq!(next(&strategy), "0000");
    }

    #[test]
    fn rejects_non_alphabet_prefix() {
        assert_eq!(
            Sequential::new(0, 6, "node-a").unwrap_err(),
            GeneratorError::InvalidPrefix("node-a".to_string())
        );
    }

    #[test]
    fn counter_never_wraps() {
        let counter = SequentialCounter::new(u64::MAX - 1);
        assert_eq!(counter.next(), Ok(u64::MAX - 1));
        assert_eq!(counter.next(), Err(GeneratorError::CounterExhausted));
        assert_eq!(counter.peek(), u64::MAX);
    }

    #[test]
    fn concurrent_generation_is_unique() {
        let strategy = Sequential::new(1000, 6, "").unwrap();
        let codes = std::sync::Mutex::new(Vec::new());

        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    let local: Vec<_> = (0..500).map(|_| next(&strategy)).collect();
                    codes.lock().unwrap().extend(local);
                });
            }
        });

        let codes = codes.into_inner().unwrap();
        let unique: HashSet<_> = codes.iter().collect();
        assert_eq!(codes.len(), 4000);
        assert_eq!(unique.len(), 4000);
        assert_eq!(strategy.counter().peek(), 5000);
    }

    #[test]
    fn strategy_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Sequential>();
    }
}
