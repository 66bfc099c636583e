// Dashboard SSID endpoints

use tracing::debug;

use crate::dashboard::client::DashboardClient;
use crate::dashboard::models::Essid;
use crate::error::Error;

impl DashboardClient {
    /// List the SSID slots of a wireless network.
    ///
    /// `GET {base}/networks/{network_id}/ssids`
    pub async fn list_ssids(&self, network_id: &str) -> Result<Vec<Essid>, Error> {
        let url = self.network_url(network_id, "ssids")?;
        debug!(network_id, "listing ssids");
        self.get(url).await
    }
}
