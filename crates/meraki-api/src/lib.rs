// meraki-api: Async Rust client for the Meraki Dashboard API and CMX scanning payloads

pub mod auth;
pub mod cmx;
pub mod compat;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod transport;

pub use cmx::{
    Location, Observation, ScanningData, ScanningEnvelope, Timestamp, TimestampCodec,
};
pub use compat::{fetch_access_points, fetch_essids};
pub use config::Config;
pub use dashboard::{AccessPoint, DashboardClient, Device, DeviceFamily, Essid};
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
