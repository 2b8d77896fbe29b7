use serde::{Deserialize, Serialize};

use super::VehicleCategory;

/// Tiered price for one category: a flat fee covering the first two hours,
/// then a charge for every started hour after that.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Rate {
    pub first_two_hours: u64,
    pub per_extra_hour: u64,
}

impl Rate {
    pub const fn new(first_two_hours: u64, per_extra_hour: u64) -> Self {
        Self {
            first_two_hours,
            per_extra_hour,
        }
    }
}

/// One rate per vehicle category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RateSchedule {
    pub bike: Rate,
    pub car: Rate,
    pub ev: Rate,
    pub heavy: Rate,
}

impl Default for RateSchedule {
    fn default() -> Self {
        Self {
            bike: Rate::new(20, 10),
            car: Rate::new(50, 20),
            ev: Rate::new(60, 25),
            heavy: Rate::new(100, 40),
        }
    }
}

impl RateSchedule {
    pub fn rate(&self, category: VehicleCategory) -> Rate {
        match category {
            VehicleCategory::Bike => self.bike,
            VehicleCategory::Car => self.car,
            VehicleCategory::Ev => self.ev,
            VehicleCategory::Heavy => self.heavy,
        }
    }
}
