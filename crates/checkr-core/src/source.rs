// ── Occupancy sources ──
//
// The poll loop only needs "fetch one report". The HTTP client is the real
// implementation; tests plug in scripted ones.

use std::future::Future;
use std::sync::Arc;

use checkr_api::{OccupancyClient, OccupancyReport};

/// Something the poller can fetch an occupancy report from.
pub trait OccupancySource: Send + Sync + 'static {
    fn fetch(&self) -> impl Future<Output = Result<OccupancyReport, checkr_api::Error>> + Send;
}

impl OccupancySource for OccupancyClient {
    fn fetch(&self) -> impl Future<Output = Result<OccupancyReport, checkr_api::Error>> + Send {
        OccupancyClient::fetch(self)
    }
}

impl<S: OccupancySource> OccupancySource for Arc<S> {
    fn fetch(&self) -> impl Future<Output = Result<OccupancyReport, checkr_api::Error>> + Send {
        S::fetch(self)
    }
}
