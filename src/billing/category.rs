use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::ParkingError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "camelCase")]
pub enum VehicleCategory {
    Bike,
    Car,
    Ev,
    Heavy,
}

impl VehicleCategory {
    pub const ALL: [VehicleCategory; 4] = [
        VehicleCategory::Bike,
        VehicleCategory::Car,
        VehicleCategory::Ev,
        VehicleCategory::Heavy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleCategory::Bike => "bike",
            VehicleCategory::Car => "car",
            VehicleCategory::Ev => "ev",
            VehicleCategory::Heavy => "heavy",
        }
    }
}

impl fmt::Display for VehicleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleCategory {
    type Err = ParkingError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "bike" => Ok(VehicleCategory::Bike),
            "car" => Ok(VehicleCategory::Car),
            "ev" => Ok(VehicleCategory::Ev),
            "heavy" => Ok(VehicleCategory::Heavy),
            _ => Err(ParkingError::UnknownCategory(value.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("Car".parse::<VehicleCategory>(), Ok(VehicleCategory::Car));
        assert_eq!(" ev ".parse::<VehicleCategory>(), Ok(VehicleCategory::Ev));
        for category in VehicleCategory::ALL {
            assert_eq!(category.as_str().parse::<VehicleCategory>(), Ok(category));
        }
    }

    #[test]
    fn rejects_unknown_category() {
        assert_eq!(
            "truck".parse::<VehicleCategory>(),
            Err(ParkingError::UnknownCategory("truck".into()))
        );
    }
}
