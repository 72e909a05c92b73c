//! Handler for the `update` command.

use serde_json::json;

use super::command::UpdateArgs;
use super::output;
use crate::application::aggregate::ActionFilter;
use crate::application::{PortfolioBackend, PortfolioService};
use crate::error::Result;

/// Execute `fanpulse update <ACTION_ID> <STATUS>`.
///
/// The action must be present in the current aggregate; the local copy
/// only changes after the backend accepts the update.
pub async fn execute<B>(service: &PortfolioService<B>, args: &UpdateArgs) -> Result<()>
where
    B: PortfolioBackend + ?Sized,
{
    let pb = output::spinner("Updating action...");
    let report = match service.actions(&ActionFilter::default()).await {
        Ok(report) => report,
        Err(err) => {
            output::spinner_fail(&pb, "Could not load actions");
            return Err(err);
        }
    };

    let updated = match service
        .update_action_status(&report.all, &args.action_id, args.status)
        .await
    {
        Ok(updated) => {
            output::spinner_success(&pb, "Action updated");
            updated
        }
        Err(err) => {
            output::spinner_fail(&pb, "Update failed");
            return Err(err);
        }
    };

    let entry = updated
        .items()
        .iter()
        .find(|entry| entry.item.id == args.action_id);

    if output::is_json() {
        output::json_output(json!({
            "command": "update",
            "action_id": args.action_id,
            "status": args.status,
            "action": entry,
        }));
        return Ok(());
    }

    if let Some(entry) = entry {
        output::field("Action", &entry.item.title);
        output::field("Artist", &entry.artist.name);
    }
    output::field("Status", args.status);
    Ok(())
}
