// checkr-api: Async client for the occupancy status endpoint

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

pub use client::OccupancyClient;
pub use error::Error;
pub use models::OccupancyReport;
pub use transport::TransportConfig;
