use async_trait::async_trait;
use std::time::Duration;

/// Probes whether a destination URL currently answers.
///
/// Only consulted when a creation request asks for it. Implementations
/// should treat any transport failure or timeout as unreachable.
#[async_trait]
pub trait ReachabilityChecker: Send + Sync + 'static {
    async fn is_reachable(&self, url: &str, timeout: Duration) -> bool;
}

/// A checker that never probes and reports every URL as reachable.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeReachable;

#[async_trait]
impl ReachabilityChecker for AssumeReachable {
    async fn is_reachable(&self, _url: &str, _timeout: Duration) -> bool {
        true
    }
}
