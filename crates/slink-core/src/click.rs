use serde::{Deserialize, Serialize};
use std::fmt::Display;
use tracing::info;

/// Where a lookup came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClickSource {
    Browser,
    Api,
}

impl Display for ClickSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClickSource::Browser => f.write_str("browser"),
            ClickSource::Api => f.write_str("api"),
        }
    }
}

/// Receives a notification for every lookup attempt.
///
/// `valid` is `false` when the code was unknown, malformed or disabled. The
/// code is passed as the raw requested string for that reason. Notification
/// is fire-and-forget: implementations must not block the lookup path.
pub trait ClickLogger: Send + Sync + 'static {
    fn log_click(&self, code: &str, source: ClickSource, valid: bool);
}

/// Discards every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopClickLogger;

impl ClickLogger for NoopClickLogger {
    fn log_click(&self, _code: &str, _source: ClickSource, _valid: bool) {}
}

/// Emits each notification as a structured `tracing` event under the
/// `slink::click` target, for a downstream collector to aggregate.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingClickLogger;

impl ClickLogger for TracingClickLogger {
    fn log_click(&self, code: &str, source: ClickSource, valid: bool) {
        info!(target: "slink::click", code, source = %source, valid, "click");
    }
}
