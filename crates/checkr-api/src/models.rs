// Wire types for the occupancy endpoint.
//
// Field names mirror the JSON body exactly. Identifiers are kept as raw
// JSON values because the endpoint sends them as either strings or numbers.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body returned by a GET on the occupancy endpoint.
///
/// Every field is optional: an absent key and an explicit `null` both
/// decode as `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OccupancyReport {
    /// Status label, normally `"red"`, `"yellow"` or `"green"`.
    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub room_number: Option<Value>,

    #[serde(default)]
    pub building_number: Option<Value>,

    /// Room capacity.
    #[serde(default)]
    pub max_capacity: Option<u64>,

    /// Current number of occupants.
    #[serde(default)]
    pub curr_capacity: Option<u64>,
}
