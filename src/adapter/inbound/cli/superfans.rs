//! Handler for the `superfans` command.

use serde_json::json;

use super::command::SuperfansArgs;
use super::{output, report_failures};
use crate::adapter::outbound::csv;
use crate::application::portfolio::SuperfanReport;
use crate::application::{PortfolioBackend, PortfolioService};
use crate::error::Result;

const COLUMNS: [(&str, usize); 5] = [
    ("Fan", 22),
    ("Artist", 16),
    ("Tier", 9),
    ("Value", 6),
    ("Lifetime", 10),
];

/// Execute `fanpulse superfans`.
pub async fn execute<B>(service: &PortfolioService<B>, args: &SuperfansArgs) -> Result<()>
where
    B: PortfolioBackend + ?Sized,
{
    let pb = output::spinner("Fetching superfans...");
    let report = match service.superfans().await {
        Ok(report) => {
            output::spinner_success(&pb, "Superfans loaded");
            report
        }
        Err(err) => {
            output::spinner_fail(&pb, "Could not load superfans");
            return Err(err);
        }
    };

    if let Some(path) = &args.csv {
        let items = report.superfans.items();
        csv::write_file(path, &csv::export_superfans(items))?;
        output::success(&format!(
            "Wrote {} superfans to {}",
            items.len(),
            path.display()
        ));
    }

    if output::is_json() {
        output::json_output(json!({
            "command": "superfans",
            "stats": report.stats,
            "superfans": report.superfans.items(),
            "failures": report.superfans.failures(),
        }));
        return Ok(());
    }

    display(&report);
    Ok(())
}

fn display(report: &SuperfanReport) {
    let stats = &report.stats;

    output::section("Superfans");
    output::field("Total", stats.total);
    output::field("Avg value", format!("{:.1}", stats.average_fan_value));
    output::field("Lifetime", format!("${:.2}", stats.total_lifetime_value));
    output::field(
        "Tiers",
        format!(
            "{} platinum  {} gold  {} silver  {} bronze",
            stats.by_tier.platinum, stats.by_tier.gold, stats.by_tier.silver, stats.by_tier.bronze
        ),
    );
    report_failures(report.superfans.failures());

    if stats.top.is_empty() {
        return;
    }

    output::section("Top superfans");
    output::table_header(&COLUMNS);
    let widths: Vec<usize> = COLUMNS.iter().map(|(_, w)| *w).collect();
    output::table_separator(&widths);
    for entry in &stats.top {
        let fan = &entry.item;
        output::table_row(
            &[
                fan.name.clone(),
                entry.artist.name.clone(),
                fan.tier.to_string(),
                format!("{:.1}", fan.fan_value_score),
                format!("${:.2}", fan.lifetime_value),
            ],
            &widths,
        );
    }
}
