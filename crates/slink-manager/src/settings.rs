use std::time::Duration;
use typed_builder::TypedBuilder;

pub const DEFAULT_MIN_LENGTH: usize = 8;
pub const DEFAULT_MAX_EXTRA: usize = 4;
pub const DEFAULT_REACHABILITY_TIMEOUT: Duration = Duration::from_secs(5);

/// Extra characters the salted fallback code gets beyond `min_length + max_extra`.
pub const FALLBACK_MARGIN: usize = 2;

#[derive(Debug, Clone, TypedBuilder)]
pub struct ManagerSettings {
    /// Length requested from the strategy on the first attempt.
    #[builder(default = DEFAULT_MIN_LENGTH)]
    pub min_length: usize,
    /// How many one-character extensions to try after a collision.
    #[builder(default = DEFAULT_MAX_EXTRA)]
    pub max_extra: usize,
    #[builder(default = DEFAULT_REACHABILITY_TIMEOUT)]
    pub reachability_timeout: Duration,
}

impl ManagerSettings {
    /// Length of the salted fallback code.
    pub fn fallback_length(&self) -> usize {
        self.min_length + self.max_extra + FALLBACK_MARGIN
    }
}

impl Default for ManagerSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let settings = ManagerSettings::default();
        assert_eq!(settings.min_length, 8);
        assert_eq!(settings.max_extra, 4);
        assert_eq!(settings.reachability_timeout, Duration::from_secs(5));
        assert_eq!(settings.fallback_length(), 14);
    }
}
