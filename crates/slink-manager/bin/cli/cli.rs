use clap::{Parser, ValueEnum};
use slink_generator::registry::DEFAULT_STRATEGY;
use slink_generator::seq::{DEFAULT_MIN_LENGTH as DEFAULT_CODE_MIN_LENGTH, DEFAULT_SEQ_START};
use slink_generator::{StrategySettings, DEFAULT_CODE_LENGTH};
use slink_manager::settings::{DEFAULT_MAX_EXTRA, DEFAULT_MIN_LENGTH};
use slink_manager::ManagerSettings;
use std::fmt::{Display, Formatter};

pub const STORAGE_BACKEND_ENV: &str = "SLINK_STORAGE_BACKEND";
pub const CODE_STRATEGY_ENV: &str = "SLINK_CODE_STRATEGY";
pub const CODE_LENGTH_ENV: &str = "SLINK_CODE_LENGTH";
pub const CODE_SECRET_ENV: &str = "SLINK_CODE_SECRET";
pub const SEQ_START_ENV: &str = "SLINK_SEQ_START";
pub const CODE_MIN_LENGTH_ENV: &str = "SLINK_CODE_MIN_LENGTH";
pub const SHARD_PREFIX_ENV: &str = "SLINK_SHARD_PREFIX";
pub const MIN_LENGTH_ENV: &str = "SLINK_MIN_LENGTH";
pub const MAX_EXTRA_ENV: &str = "SLINK_MAX_EXTRA";
pub const LOG_FORMAT_ENV: &str = "SLINK_LOG_FORMAT";

pub const DEFAULT_STORAGE_BACKEND: &str = "memory";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[value(name = "text")]
    Text,
    #[value(name = "json")]
    Json,
}

impl Display for LogFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Text => write!(f, "text"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "slink", about = "Create and follow short links from stdin commands")]
pub struct CLI {
    #[arg(long, env = STORAGE_BACKEND_ENV, default_value = DEFAULT_STORAGE_BACKEND)]
    pub storage: String,

    #[arg(long, env = CODE_STRATEGY_ENV, default_value = DEFAULT_STRATEGY)]
    pub strategy: String,

    #[arg(long, env = CODE_LENGTH_ENV, default_value_t = DEFAULT_CODE_LENGTH)]
    pub code_length: usize,

    #[arg(long, env = CODE_SECRET_ENV, default_value = "", hide_env_values = true)]
    pub secret: String,

    #[arg(long, env = SEQ_START_ENV, default_value_t = DEFAULT_SEQ_START)]
    pub seq_start: u64,

    #[arg(long, env = CODE_MIN_LENGTH_ENV, default_value_t = DEFAULT_CODE_MIN_LENGTH)]
    pub code_min_length: usize,

    #[arg(long, env = SHARD_PREFIX_ENV, default_value = "")]
    pub shard_prefix: String,

    #[arg(long, env = MIN_LENGTH_ENV, default_value_t = DEFAULT_MIN_LENGTH)]
    pub min_length: usize,

    #[arg(long, env = MAX_EXTRA_ENV, default_value_t = DEFAULT_MAX_EXTRA)]
    pub max_extra: usize,

    #[arg(long, env = LOG_FORMAT_ENV, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl CLI {
    pub fn strategy_settings(&self) -> StrategySettings {
        StrategySettings::builder()
            .name(self.strategy.as_str())
            .code_length(self.code_length)
            .secret(self.secret.as_str())
            .seq_start(self.seq_start)
            .min_length(self.code_min_length)
            .shard_prefix(self.shard_prefix.as_str())
            .build()
    }

    pub fn manager_settings(&self) -> ManagerSettings {
        ManagerSettings::builder()
            .min_length(self.min_length)
            .max_extra(self.max_extra)
            .build()
    }
}
