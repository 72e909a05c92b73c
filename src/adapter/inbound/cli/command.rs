//! Command-line interface definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::paths;
use crate::application::aggregate::{ActionFilter, Facet};
use crate::domain::{ActionId, ActionStatus, ArtistId, Urgency};

/// Portfolio analytics for artist managers
#[derive(Parser, Debug)]
#[command(name = "fanpulse")]
#[command(version)]
pub struct Cli {
    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to the configuration file
    #[arg(short, long, global = true, default_value_os_t = paths::default_config())]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List recommended actions across all artists, most urgent first
    Actions(ActionsArgs),

    /// Change the status of one action
    Update(UpdateArgs),

    /// Show momentum per artist and portfolio rollups
    Momentum,

    /// Show the portfolio health score
    Health,

    /// List top superfans across all artists
    Superfans(SuperfansArgs),

    /// Stream realtime opportunities
    Watch(WatchArgs),

    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Subcommands for `fanpulse config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Display the effective configuration with defaults applied.
    Show,
    /// Validate the configuration file.
    Check,
}

#[derive(Parser, Debug)]
pub struct ActionsArgs {
    /// Only this urgency (critical, high, medium, low, all)
    #[arg(long, default_value = "all")]
    pub urgency: Facet<Urgency>,

    /// Only this status (pending, in_progress, completed, dismissed, all)
    #[arg(long, default_value = "all")]
    pub status: Facet<ActionStatus>,

    /// Only this artist id
    #[arg(long, default_value = "all")]
    pub artist: Facet<ArtistId>,

    /// Case-insensitive text search over title, description, category and artist
    #[arg(long)]
    pub search: Option<String>,

    /// Also write the listed actions to a CSV file
    #[arg(long, value_name = "PATH")]
    pub csv: Option<PathBuf>,
}

impl ActionsArgs {
    #[must_use]
    pub fn filter(&self) -> ActionFilter {
        ActionFilter {
            urgency: self.urgency.clone(),
            status: self.status.clone(),
            artist: self.artist.clone(),
            search: self.search.clone(),
        }
    }
}

#[derive(Parser, Debug)]
pub struct UpdateArgs {
    /// Action id
    pub action_id: ActionId,

    /// New status (pending, in_progress, completed, dismissed)
    pub status: ActionStatus,
}

#[derive(Parser, Debug)]
pub struct SuperfansArgs {
    /// Also write all superfans to a CSV file
    #[arg(long, value_name = "PATH")]
    pub csv: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct WatchArgs {
    /// Request a full refresh every N seconds while connected
    #[arg(long, value_name = "N")]
    pub refresh_secs: Option<u64>,
}
