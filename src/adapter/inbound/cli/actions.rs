//! Handler for the `actions` command.

use serde_json::json;

use super::command::ActionsArgs;
use super::{date, output, report_failures};
use crate::adapter::outbound::csv;
use crate::application::portfolio::ActionsReport;
use crate::application::{PortfolioBackend, PortfolioService};
use crate::domain::Urgency;
use crate::error::Result;

const COLUMNS: [(&str, usize); 5] = [
    ("Urgency", 9),
    ("Artist", 16),
    ("Action", 38),
    ("Status", 12),
    ("Due", 10),
];

/// Execute `fanpulse actions`.
pub async fn execute<B>(service: &PortfolioService<B>, args: &ActionsArgs) -> Result<()>
where
    B: PortfolioBackend + ?Sized,
{
    let pb = output::spinner("Fetching actions...");
    let report = match service.actions(&args.filter()).await {
        Ok(report) => {
            output::spinner_success(&pb, "Actions loaded");
            report
        }
        Err(err) => {
            output::spinner_fail(&pb, "Could not load actions");
            return Err(err);
        }
    };

    if let Some(path) = &args.csv {
        csv::write_file(path, &csv::export_actions(&report.visible))?;
        output::success(&format!(
            "Wrote {} actions to {}",
            report.visible.len(),
            path.display()
        ));
    }

    if output::is_json() {
        output::json_output(json!({
            "command": "actions",
            "total": report.stats.total,
            "stats": report.visible_stats,
            "actions": report.visible,
            "failures": report.all.failures(),
        }));
        return Ok(());
    }

    display(&report);
    Ok(())
}

fn display(report: &ActionsReport) {
    let stats = &report.visible_stats;

    output::section("Actions");
    output::field(
        "Showing",
        format!("{} of {}", report.visible.len(), report.stats.total),
    );
    output::field(
        "Urgency",
        Urgency::ALL
            .iter()
            .map(|u| format!("{} {}", stats.by_urgency.get(*u), u))
            .collect::<Vec<_>>()
            .join("  "),
    );
    output::field("Open", stats.by_status.open());
    report_failures(report.all.failures());

    if report.visible.is_empty() {
        println!();
        output::note("No actions match the current filters.");
        return;
    }

    println!();
    output::table_header(&COLUMNS);
    let widths: Vec<usize> = COLUMNS.iter().map(|(_, w)| *w).collect();
    output::table_separator(&widths);
    for entry in &report.visible {
        let action = &entry.item;
        output::table_row(
            &[
                output::urgency(action.urgency),
                entry.artist.name.clone(),
                action.title.clone(),
                action.status.to_string(),
                action.due_date.as_ref().map_or_else(|| "-".into(), date),
            ],
            &widths,
        );
    }
}
