//! Handler for the `health` command.

use serde_json::json;

use super::output;
use crate::application::{PortfolioBackend, PortfolioService};
use crate::domain::health::{ENGAGEMENT_WEIGHT, GROWTH_WEIGHT, MOMENTUM_WEIGHT};
use crate::error::Result;

/// Execute `fanpulse health`.
pub async fn execute<B>(service: &PortfolioService<B>) -> Result<()>
where
    B: PortfolioBackend + ?Sized,
{
    let pb = output::spinner("Computing portfolio health...");
    let health = match service.health().await {
        Ok(health) => {
            output::spinner_success(&pb, "Health computed");
            health
        }
        Err(err) => {
            output::spinner_fail(&pb, "Could not compute health");
            return Err(err);
        }
    };

    if output::is_json() {
        output::json_output(json!({
            "command": "health",
            "health": health,
        }));
        return Ok(());
    }

    let factors = health.factors();
    output::section("Portfolio Health");
    output::field(
        "Score",
        format!(
            "{} / 100 {}",
            output::highlight(health.score()),
            output::health_status(health.status())
        ),
    );
    output::field(
        "Momentum",
        format!("{:.0} {}", factors.momentum, weight(MOMENTUM_WEIGHT)),
    );
    output::field(
        "Growth",
        format!("{:.0} {}", factors.growth, weight(GROWTH_WEIGHT)),
    );
    output::field(
        "Engagement",
        format!("{:.0} {}", factors.engagement, weight(ENGAGEMENT_WEIGHT)),
    );
    Ok(())
}

fn weight(value: f64) -> String {
    output::muted(format!("(x{value:.1})"))
}
