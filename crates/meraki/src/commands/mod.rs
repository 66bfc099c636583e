//! Command dispatch: bridges CLI args -> Dashboard calls -> output formatting.

pub mod aps;
pub mod cmx;
pub mod config_cmd;
pub mod ssids;

use meraki_api::DashboardClient;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a Dashboard-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    client: &DashboardClient,
    network_id: &str,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Ssids => ssids::handle(client, network_id, global).await,
        Command::Aps(args) => aps::handle(client, network_id, &args, global).await,
        // Cmx, Config and Completions are handled before dispatch
        Command::Cmx(_) | Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
