use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{RateSchedule, VehicleCategory};

const SECS_PER_HOUR: u64 = 3600;
const FLAT_FEE_HOURS: u64 = 2;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub amount: u64,
    pub duration_hours: u64,
}

/// Whole hours between `entered_at` and `exited_at`, rounded up.
///
/// Any started hour counts, down to a fraction of a second. A stay whose exit
/// precedes its entry is billed as zero hours.
pub fn billable_hours(entered_at: DateTime<Utc>, exited_at: DateTime<Utc>) -> u64 {
    let elapsed = exited_at - entered_at;
    if elapsed <= chrono::Duration::zero() {
        return 0;
    }

    // num_seconds truncates, so a partial second rounds the count up first.
    let mut secs = elapsed.num_seconds() as u64;
    if elapsed.subsec_nanos() > 0 {
        secs += 1;
    }
    secs.div_ceil(SECS_PER_HOUR)
}

/// Compute the fee for a stay under `rates`.
pub fn bill(
    category: VehicleCategory,
    entered_at: DateTime<Utc>,
    exited_at: DateTime<Utc>,
    rates: &RateSchedule,
) -> Bill {
    let duration_hours = billable_hours(entered_at, exited_at);
    let rate = rates.rate(category);

    let amount = if duration_hours <= FLAT_FEE_HOURS {
        rate.first_two_hours
    } else {
        rate.first_two_hours + (duration_hours - FLAT_FEE_HOURS) * rate.per_extra_hour
    };

    Bill {
        amount,
        duration_hours,
    }
}
