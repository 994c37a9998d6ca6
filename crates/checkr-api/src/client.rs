// Occupancy endpoint HTTP client
//
// A single GET against a fixed URL. Non-success statuses and bodies that do
// not decode into `OccupancyReport` are reported as errors; the caller
// decides what a failed poll means.

use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::models::OccupancyReport;
use crate::transport::TransportConfig;

/// HTTP client for the occupancy status endpoint.
///
/// Cheap to clone: the inner `reqwest::Client` is reference counted.
#[derive(Debug, Clone)]
pub struct OccupancyClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl OccupancyClient {
    /// Create a client for `endpoint` from a `TransportConfig`.
    pub fn new(endpoint: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, endpoint })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, endpoint: Url) -> Self {
        Self { http, endpoint }
    }

    /// Parse `endpoint` and build a client with default transport settings.
    pub fn from_url(endpoint: &str) -> Result<Self, Error> {
        let endpoint = Url::parse(endpoint)?;
        Self::new(endpoint, &TransportConfig::default())
    }

    /// The endpoint this client polls.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Fetch the current occupancy report.
    pub async fn fetch(&self) -> Result<OccupancyReport, Error> {
        debug!(url = %self.endpoint, "GET occupancy");

        let resp = self.http.get(self.endpoint.clone()).send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        trace!(status = status.as_u16(), len = body.len(), "occupancy response");

        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }
}
