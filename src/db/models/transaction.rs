//! Billing records written when a vehicle leaves.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::billing::VehicleCategory;

/// Immutable once written; the table is append-only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub vehicle_id: String,
    pub category: VehicleCategory,
    pub entered_at: DateTime<Utc>,
    pub exited_at: DateTime<Utc>,
    pub duration_hours: u64,
    pub amount: u64,
    /// Local calendar date of the exit, used for daily totals.
    pub exit_date: NaiveDate,
}
