mod run;

use chrono::Utc;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use carpark_core::CarparkNames;

/// Fetch current carpark availability once, then refresh `latest.csv` and
/// append to `history.csv` in the data directory.
#[derive(Debug, Parser)]
#[command(name = "carpark-collect")]
#[command(version, about)]
struct Cli {}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let _cli = Cli::parse();

    let config = carpark_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::debug!(?config, "loaded configuration");

    let names = CarparkNames::default();
    let summary = run::run_collect(&config, &names, Utc::now()).await?;

    tracing::info!(
        source = %summary.source,
        extracted = summary.extracted,
        latest_rows = summary.persisted.latest_rows,
        history_rows = summary.persisted.history_rows,
        raw = %summary.raw_path.display(),
        "collection run complete"
    );
    Ok(())
}
