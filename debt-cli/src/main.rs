use std::io;

use clap::Parser;
use tracing::debug;

use debt_cli::app::Planner;
use debt_cli::cli::Cli;
use debt_cli::config::Settings;
use debt_cli::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_logging("info");

    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref())?.with_overrides(cli.overrides());

    // RUST_LOG, when set, beats the settings file.
    if std::env::var_os("RUST_LOG").is_none() {
        logging::set_log_level(&settings.log_level)?;
    }
    if let Some(path) = &settings.log_file {
        logging::enable_file_logging(path)?;
    }
    debug!(?settings, "starting");

    let planner = Planner::open(settings).await?;
    let mut stdout = io::stdout().lock();
    planner.run(cli.command, &mut stdout).await
}
