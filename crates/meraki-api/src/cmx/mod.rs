// CMX location-analytics payloads
//
// Decode/encode contract for the scanning feed Meraki POSTs to a
// receiver. Nothing here talks to the network.

pub mod models;
pub mod timestamp;

pub use models::{Location, Observation, ScanningData, ScanningEnvelope};
pub use timestamp::{Timestamp, TimestampCodec};
