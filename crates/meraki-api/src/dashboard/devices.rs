// Dashboard device endpoints
//
// One endpoint returns every device in the network; access points are
// picked out client-side by model prefix.

use tracing::{debug, trace};

use crate::dashboard::client::DashboardClient;
use crate::dashboard::models::{AccessPoint, Device};
use crate::error::Error;

impl DashboardClient {
    /// List every device in a network, whatever its family.
    ///
    /// `GET {base}/networks/{network_id}/devices`
    pub async fn list_devices(&self, network_id: &str) -> Result<Vec<Device>, Error> {
        let url = self.network_url(network_id, "devices")?;
        debug!(network_id, "listing devices");
        self.get(url).await
    }

    /// List the network's wireless access points (`MR` models).
    pub async fn list_access_points(&self, network_id: &str) -> Result<Vec<AccessPoint>, Error> {
        let devices = self.list_devices(network_id).await?;
        Ok(retain_access_points(devices))
    }
}

/// Keep only `MR` devices. Models too short to carry a prefix are skipped.
fn retain_access_points(devices: Vec<Device>) -> Vec<AccessPoint> {
    devices
        .into_iter()
        .filter(|d| {
            let keep = d.is_wireless();
            if !keep {
                trace!(serial = %d.serial, model = %d.model, "skipping non-AP device");
            }
            keep
        })
        .collect()
}
