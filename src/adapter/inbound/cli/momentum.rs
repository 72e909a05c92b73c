//! Handler for the `momentum` command.

use serde_json::json;

use super::{output, report_failures};
use crate::application::portfolio::MomentumReport;
use crate::application::{PortfolioBackend, PortfolioService};
use crate::error::Result;

const COLUMNS: [(&str, usize); 5] = [
    ("Artist", 20),
    ("Momentum", 9),
    ("Status", 10),
    ("Engagement", 11),
    ("Growth", 8),
];

/// Execute `fanpulse momentum`.
pub async fn execute<B>(service: &PortfolioService<B>) -> Result<()>
where
    B: PortfolioBackend + ?Sized,
{
    let pb = output::spinner("Fetching momentum...");
    let report = match service.momentum().await {
        Ok(report) => {
            output::spinner_success(&pb, "Momentum loaded");
            report
        }
        Err(err) => {
            output::spinner_fail(&pb, "Could not load momentum");
            return Err(err);
        }
    };

    if output::is_json() {
        output::json_output(json!({
            "command": "momentum",
            "stats": report.stats,
            "snapshots": report.snapshots.items(),
            "failures": report.snapshots.failures(),
        }));
        return Ok(());
    }

    display(&report);
    Ok(())
}

fn display(report: &MomentumReport) {
    let stats = &report.stats;

    output::section("Momentum");
    output::field("Artists", stats.total);
    output::field("Average", format!("{:.1} / 10", stats.average_momentum));
    output::field("Engagement", format!("{:.1}", stats.average_engagement));
    output::field("Growing", format!("{} of {}", stats.growing, stats.total));
    if let Some(best) = &stats.strongest {
        output::field("Strongest", format!("{} ({:.1})", best.artist.name, best.score));
    }
    if let Some(worst) = &stats.weakest {
        output::field("Weakest", format!("{} ({:.1})", worst.artist.name, worst.score));
    }
    output::field(
        "Health",
        format!(
            "{} {}",
            output::highlight(stats.health.score()),
            output::health_status(stats.health.status())
        ),
    );
    report_failures(report.snapshots.failures());

    if stats.top.is_empty() {
        return;
    }

    output::section("Top artists");
    output::table_header(&COLUMNS);
    let widths: Vec<usize> = COLUMNS.iter().map(|(_, w)| *w).collect();
    output::table_separator(&widths);
    for entry in &stats.top {
        let snapshot = &entry.item;
        output::table_row(
            &[
                entry.artist.name.clone(),
                format!("{:.1}", snapshot.momentum_score),
                output::momentum_status(snapshot.status),
                format!("{:.1}", snapshot.engagement),
                format!("{:+.1}%", snapshot.growth_rate),
            ],
            &widths,
        );
    }
}
