mod cli;

use crate::cli::{LogFormat, CLI};
use anyhow::Context;
use clap::Parser;
use serde_json::{json, Value};
use slink_core::{ClickSource, SlinkRepository, TracingClickLogger};
use slink_generator::Strategy;
use slink_manager::{CreateSlink, SlinkManager};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const USAGE: &str =
    "usage: create <url> [alias] | get <code> | open <code> | disable <code> | delete <code>";

type Manager = SlinkManager<Arc<dyn SlinkRepository>, Strategy>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CLI::parse();
    init_tracing(config.log_format);

    info!(
        storage_backend = %config.storage,
        strategy = %config.strategy,
        min_length = config.min_length,
        max_extra = config.max_extra,
        "starting slink"
    );

    let repository = slink_storage::open(&config.storage).context("opening storage backend")?;
    let strategy =
        Strategy::from_settings(&config.strategy_settings()).context("building code strategy")?;
    let manager = SlinkManager::new(repository, strategy)
        .with_settings(config.manager_settings())
        .with_click_logger(TracingClickLogger);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let reply = run_command(&manager, line).await;
        stdout.write_all(format!("{reply}\n").as_bytes()).await?;
        stdout.flush().await?;
    }

    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}

/// Runs one stdin command and renders the outcome as a JSON line.
async fn run_command(manager: &Manager, line: &str) -> Value {
    let mut words = line.split_whitespace();
    let command = words.next().unwrap_or_default();
    let args: Vec<&str> = words.collect();

    let outcome = match (command, args.as_slice()) {
        ("create", [url]) => create(manager, url, None).await,
        ("create", [url, alias]) => create(manager, url, Some(*alias)).await,
        ("get", [code]) => manager
            .get(code)
            .await
            .map(|record| json!({ "record": record })),
        ("open", [code]) => manager
            .resolve(code, ClickSource::Api)
            .await
            .map(|record| json!({ "record": record })),
        ("disable", [code]) => manager
            .disable(code)
            .await
            .map(|disabled| json!({ "disabled": disabled })),
        ("delete", [code]) => manager
            .delete(code)
            .await
            .map(|deleted| json!({ "deleted": deleted })),
        _ => {
            warn!(line, "unrecognised command");
            return json!({ "error": USAGE });
        }
    };

    outcome.unwrap_or_else(|err| json!({ "error": err.to_string() }))
}

async fn create(
    manager: &Manager,
    url: &str,
    alias: Option<&str>,
) -> slink_manager::Result<Value> {
    let request = CreateSlink {
        url: url.to_string(),
        alias: alias.map(str::to_string),
        check_reachable: false,
    };
    let code = manager.create_slink(request).await?;
    Ok(json!({ "code": code }))
}
