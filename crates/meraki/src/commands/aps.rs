//! Access point command handler.

use tabled::Tabled;

use meraki_api::{DashboardClient, Device};

use crate::cli::{ApsArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "Serial")]
    serial: String,
    #[tabled(rename = "MAC")]
    mac: String,
    #[tabled(rename = "LAN IP")]
    lan_ip: String,
    #[tabled(rename = "Tags")]
    tags: String,
}

impl From<&Device> for DeviceRow {
    fn from(d: &Device) -> Self {
        Self {
            name: d.display_name().to_owned(),
            model: d.model.clone(),
            serial: d.serial.clone(),
            mac: d.mac.clone(),
            lan_ip: d.lan_ip.clone().unwrap_or_else(|| "-".into()),
            tags: d.tags.join(" "),
        }
    }
}

pub async fn handle(
    client: &DashboardClient,
    network_id: &str,
    args: &ApsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let devices = if args.all {
        client.list_devices(network_id).await?
    } else {
        client.list_access_points(network_id).await?
    };

    let out = output::render_list(
        &global.output,
        &devices,
        |d| DeviceRow::from(d),
        |d| d.serial.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
