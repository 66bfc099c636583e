// Meraki Dashboard API client
//
// Hand-written client for the network-scoped inventory endpoints,
// authenticated with the `X-Cisco-Meraki-API-Key` header.

pub mod client;
pub mod devices;
pub mod models;
pub mod ssids;

pub use client::DashboardClient;
pub use models::{AccessPoint, Device, DeviceFamily, Essid};
