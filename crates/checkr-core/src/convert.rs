// ── Wire → domain conversion ──
//
// Turns an `OccupancyReport` into the `DisplayState` the view renders.
// Every field is taken from the report; absent fields become `None`.

use checkr_api::OccupancyReport;
use serde_json::Value;

use crate::error::CoreError;
use crate::model::{DisplayState, Identifier, Occupancy, Status};

fn identifier(value: Option<Value>) -> Option<Identifier> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(Identifier::Text(s)),
        Value::Number(n) => Some(Identifier::Number(n)),
        other => Some(Identifier::Text(other.to_string())),
    }
}

fn occupancy(current: Option<u64>, max: Option<u64>) -> Result<Option<Occupancy>, CoreError> {
    match (current, max) {
        (Some(current), Some(max)) => Ok(Some(Occupancy { current, max })),
        (None, None) => Ok(None),
        _ => Err(CoreError::IncompleteOccupancy),
    }
}

impl TryFrom<OccupancyReport> for DisplayState {
    type Error = CoreError;

    fn try_from(report: OccupancyReport) -> Result<Self, Self::Error> {
        Ok(Self {
            occupancy: occupancy(report.curr_capacity, report.max_capacity)?,
            status: report.status.map(Status::from),
            room_number: identifier(report.room_number),
            building_number: identifier(report.building_number),
        })
    }
}
