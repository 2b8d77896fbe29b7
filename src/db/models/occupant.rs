//! Vehicles currently holding a slot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{allocation::SlotId, billing::VehicleCategory};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Occupant {
    /// Trimmed, uppercased vehicle number.
    pub vehicle_id: String,
    pub category: VehicleCategory,
    pub entered_at: DateTime<Utc>,
    pub priority: bool,
}

/// A slot together with its occupant, as shown on the status board.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ParkedVehicle {
    pub slot: SlotId,
    #[serde(flatten)]
    pub occupant: Occupant,
}
