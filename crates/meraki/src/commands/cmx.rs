//! CMX scanning payload handlers.

use std::io::Read;
use std::path::Path;

use secrecy::SecretString;
use tabled::Tabled;
use tracing::{debug, warn};

use meraki_api::{Observation, ScanningEnvelope};

use crate::cli::{CmxArgs, CmxCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct ObservationRow {
    #[tabled(rename = "Client MAC")]
    client_mac: String,
    #[tabled(rename = "Seen")]
    seen: String,
    #[tabled(rename = "RSSI")]
    rssi: i32,
    #[tabled(rename = "SSID")]
    ssid: String,
    #[tabled(rename = "Manufacturer")]
    manufacturer: String,
    #[tabled(rename = "Location")]
    location: String,
}

impl From<&Observation> for ObservationRow {
    fn from(o: &Observation) -> Self {
        Self {
            client_mac: o.client_mac.clone(),
            seen: o.seen_time.to_string(),
            rssi: o.rssi,
            ssid: o.ssid.clone().unwrap_or_else(|| "-".into()),
            manufacturer: o.manufacturer.clone().unwrap_or_else(|| "-".into()),
            location: o.location.as_ref().map_or_else(
                || "-".into(),
                |l| format!("{:.6}, {:.6} (±{:.1}m)", l.lat, l.lng, l.unc),
            ),
        }
    }
}

pub fn handle(args: &CmxArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        CmxCommand::Decode {
            ref file,
            ref zone,
            verify,
        } => decode(file, zone.as_deref(), verify, global),
    }
}

fn decode(
    file: &Path,
    zone: Option<&str>,
    verify: bool,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let cfg = config::load()?;
    let (profile_name, profile) = config::active_profile(global, &cfg)?;

    let raw = read_payload(file)?;
    let mut envelope: ScanningEnvelope = serde_json::from_str(&raw)?;
    debug!(
        ap_mac = %envelope.data.ap_mac,
        message_type = %envelope.message_type,
        observations = envelope.data.observations.len(),
        "decoded scanning payload"
    );

    if !envelope.is_wifi() {
        debug!("bluetooth scanning payload");
    }

    if verify {
        let expected = profile
            .cmx_secret
            .clone()
            .map(SecretString::from)
            .ok_or_else(|| CliError::Validation {
                field: "cmx_secret".into(),
                reason: format!("not configured for profile '{profile_name}'"),
            })?;
        if !envelope.verify_secret(&expected) {
            return Err(CliError::SecretMismatch);
        }
    }

    for obs in &envelope.data.observations {
        if !obs.seen_time.is_fallback() && !obs.times_agree() {
            warn!(client_mac = %obs.client_mac, "seenTime and seenEpoch disagree");
        }
    }

    let codec = config::resolve_codec(zone, &profile, &cfg)?;
    envelope.rezone(&codec);

    let out = output::render_list(
        &global.output,
        &envelope.data.observations,
        |o| ObservationRow::from(o),
        |o| o.client_mac.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

/// Read the payload from `file`, or stdin when it is `-`.
fn read_payload(file: &Path) -> Result<String, CliError> {
    if file.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        Ok(std::fs::read_to_string(file)?)
    }
}
