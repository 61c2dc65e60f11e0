use std::time::Duration;

use anyhow::Context;
use clap::Parser;

use pokelist::cli::Cli;
use pokelist::config::Config;
use pokelist::{logging, ui};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    cli.apply(&mut config);
    config.validate()?;

    let log_path = logging::init_tracing(&config.logging).context("failed to open log file")?;
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        log = %log_path.display(),
        base_url = %config.api.base_url,
        "Starting pokelist"
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("pokelist-worker")
        .build()
        .context("failed to start async runtime")?;

    let result = {
        let _enter = runtime.enter();
        ui::runtime::run(&config)
    };

    runtime.shutdown_timeout(Duration::from_millis(500));
    result
}
