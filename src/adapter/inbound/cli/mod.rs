//! Command-line surface over the portfolio and feed services.

pub mod actions;
pub mod command;
pub mod config;
pub mod health;
pub mod momentum;
pub mod output;
pub mod paths;
pub mod superfans;
pub mod update;
pub mod watch;

use std::sync::Arc;

use tracing::debug;

use self::command::{Cli, Commands};
use crate::adapter::outbound::api::ApiClient;
use crate::application::aggregate::SourceFailure;
use crate::application::PortfolioService;
use crate::domain::Timestamp;
use crate::error::Result;
use crate::infrastructure::config::Config;

/// Run a parsed command line.
///
/// # Errors
///
/// Returns the first error of the command; the caller prints it and exits
/// non-zero.
pub async fn run(cli: Cli) -> Result<()> {
    if let Commands::Config(command) = &cli.command {
        return config::execute(command, &cli.config);
    }

    let mut config = Config::load_or_default(&cli.config)?;
    apply_verbosity(&mut config, cli.verbose);
    config.init_logging();
    debug!(path = %cli.config.display(), token = config.has_token(), "Configuration loaded");

    match &cli.command {
        Commands::Actions(args) => actions::execute(&portfolio(&config)?, args).await,
        Commands::Update(args) => update::execute(&portfolio(&config)?, args).await,
        Commands::Momentum => momentum::execute(&portfolio(&config)?).await,
        Commands::Health => health::execute(&portfolio(&config)?).await,
        Commands::Superfans(args) => superfans::execute(&portfolio(&config)?, args).await,
        Commands::Watch(args) => watch::execute(&config, args).await,
        Commands::Config(_) => Ok(()),
    }
}

fn portfolio(config: &Config) -> Result<PortfolioService<ApiClient>> {
    let client = ApiClient::new(
        &config.api,
        config.token.clone(),
        config.portfolio.superfan_limit,
    )?;
    Ok(PortfolioService::new(Arc::new(client), config.portfolio.top_n))
}

/// `-v` raises the configured level to info, `-vv` to debug.
fn apply_verbosity(config: &mut Config, verbose: u8) {
    match verbose {
        0 => {}
        1 => config.logging.level = "info".into(),
        _ => config.logging.level = "debug".into(),
    }
}

/// Warn about artists missing from a partial result.
pub(crate) fn report_failures(failures: &[SourceFailure]) {
    if failures.is_empty() {
        return;
    }
    output::warning(&format!(
        "Partial data: {} artist(s) could not be loaded",
        failures.len()
    ));
    for failure in failures {
        output::note(&format!("- {}: {}", failure.artist.name, failure.reason));
    }
}

/// Calendar date of a timestamp, for table cells.
pub(crate) fn date(timestamp: &Timestamp) -> String {
    timestamp.as_datetime().format("%Y-%m-%d").to_string()
}
