use clap::Parser;
use fanpulse::adapter::inbound::cli::command::Cli;
use fanpulse::adapter::inbound::cli::output::{self, OutputConfig};
use fanpulse::adapter::inbound::cli::{paths, run};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let _ = dotenvy::from_path(paths::env_file());

    let cli = Cli::parse();
    output::configure(OutputConfig {
        json: cli.json,
        quiet: cli.quiet,
        verbose: cli.verbose,
    });

    if let Err(e) = run(cli).await {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
