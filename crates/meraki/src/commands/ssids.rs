//! SSID command handler.

use tabled::Tabled;

use meraki_api::{DashboardClient, Essid};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct EssidRow {
    #[tabled(rename = "#")]
    number: u32,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Enabled")]
    enabled: String,
    #[tabled(rename = "Auth")]
    auth_mode: String,
}

impl From<&Essid> for EssidRow {
    fn from(e: &Essid) -> Self {
        Self {
            number: e.number,
            name: e.name.clone(),
            enabled: if e.enabled { "yes" } else { "no" }.into(),
            auth_mode: e.auth_mode.clone(),
        }
    }
}

pub async fn handle(
    client: &DashboardClient,
    network_id: &str,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let ssids = client.list_ssids(network_id).await?;
    let out = output::render_list(
        &global.output,
        &ssids,
        |e| EssidRow::from(e),
        |e| e.name.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
