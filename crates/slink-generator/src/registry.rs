use crate::hash::{ContentHash, KeyedHash};
use crate::random::RandomCode;
use crate::seq::{Sequential, DEFAULT_MIN_LENGTH, DEFAULT_SEQ_START};
use crate::{CodeStrategy, Result, DEFAULT_CODE_LENGTH};
use std::fmt::{Display, Formatter};
use tracing::{info, warn};
use typed_builder::TypedBuilder;

/// Name of the strategy used when none is configured.
pub const DEFAULT_STRATEGY: &str = "sha256";

/// The closed set of code strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    ContentHash,
    KeyedHash,
    Random,
    Sequential,
}

impl StrategyKind {
    /// Looks up a strategy by one of its registered names.
    ///
    /// Matching ignores case and surrounding whitespace.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "sha256" | "sha-256" | "deterministic" => Some(Self::ContentHash),
            "hmac" | "hmac-sha256" => Some(Self::KeyedHash),
            "random" | "rand" => Some(Self::Random),
            "sequential" | "seq" | "bitly" => Some(Self::Sequential),
            _ => None,
        }
    }

    /// Like [`from_name`](Self::from_name), but unknown or empty names fall
    /// back to [`StrategyKind::ContentHash`].
    pub fn resolve(name: &str) -> Self {
        Self::from_name(name).unwrap_or_else(|| {
            warn!(
                name,
                fallback = %Self::ContentHash,
                "unknown code strategy, falling back"
            );
            Self::ContentHash
        })
    }
}

impl Display for StrategyKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StrategyKind::ContentHash => write!(f, "sha256"),
            StrategyKind::KeyedHash => write!(f, "hmac-sha256"),
            StrategyKind::Random => write!(f, "random"),
            StrategyKind::Sequential => write!(f, "sequential"),
        }
    }
}

/// Configuration consumed by the code strategies.
#[derive(Debug, Clone, TypedBuilder)]
pub struct StrategySettings {
    /// Active strategy name; see [`StrategyKind::from_name`].
    #[builder(default = DEFAULT_STRATEGY.to_string(), setter(into))]
    pub name: String,
    /// Default length for the hash strategies, clamped to `[4, 32]`.
    #[builder(default = DEFAULT_CODE_LENGTH)]
    pub code_length: usize,
    /// Key for the keyed-hash strategy.
    #[builder(default, setter(into))]
    pub secret: String,
    /// First value handed out by the sequential strategy.
    #[builder(default = DEFAULT_SEQ_START)]
    pub seq_start: u64,
    /// Minimum visible length of sequential codes, clamped to `[4, 32]`.
    #[builder(default = DEFAULT_MIN_LENGTH)]
    pub min_length: usize,
    /// Optional Base62 prefix for sequential codes (e.g. a shard tag).
    #[builder(default, setter(into))]
    pub shard_prefix: String,
}

impl Default for StrategySettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// A constructed strategy, resolved once from [`StrategySettings`].
#[derive(Debug)]
pub enum Strategy {
    ContentHash(ContentHash),
    KeyedHash(KeyedHash),
    Random(RandomCode),
    Sequential(Sequential),
}

impl Strategy {
    pub fn from_settings(settings: &StrategySettings) -> Result<Self> {
        let kind = StrategyKind::resolve(&settings.name);
        let strategy = match kind {
            StrategyKind::ContentHash => {
                Strategy::ContentHash(ContentHash::with_default_length(settings.code_length))
            }
            StrategyKind::KeyedHash => Strategy::KeyedHash(KeyedHash::with_default_length(
                &settings.secret,
                settings.code_length,
            )?),
            StrategyKind::Random => Strategy::Random(RandomCode),
            StrategyKind::Sequential => Strategy::Sequential(Sequential::new(
                settings.seq_start,
                settings.min_length,
                settings.shard_prefix.clone(),
            )?),
        };

        info!(requested = %settings.name, strategy = %kind, "using code strategy");
        Ok(strategy)
    }

    pub fn kind(&self) -> StrategyKind {
        match self {
            Strategy::ContentHash(_) => StrategyKind::ContentHash,
            Strategy::KeyedHash(_) => StrategyKind::KeyedHash,
            Strategy::Random(_) => StrategyKind::Random,
            Strategy::Sequential(_) => StrategyKind::Sequential,
        }
    }
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::ContentHash(ContentHash::new())
    }
}

impl CodeStrategy for Strategy {
    fn generate(&self, url: &str, length: Option<usize>, counter: u64) -> Result<String> {
        match self {
            Strategy::ContentHash(s) => s.generate(url, length, counter),
            Strategy::KeyedHash(s) => s.generate(url, length, counter),
            Strategy::Random(s) => s.generate(url, length, counter),
            Strategy::Sequential(s) => s.generate(url, length, counter),
        }
    }
}
