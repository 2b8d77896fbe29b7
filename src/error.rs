use thiserror::Error;

/// Operator-correctable failures. None of these change lot state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParkingError {
    #[error("vehicle number is required")]
    EmptyVehicleId,

    #[error("vehicle {0} is already parked")]
    AlreadyParked(String),

    #[error("parking lot is full")]
    LotFull,

    #[error("vehicle {0} is not parked here")]
    NotParked(String),

    #[error("unknown vehicle category '{0}' (expected bike, car, ev or heavy)")]
    UnknownCategory(String),

    #[error("invalid lot layout: {0}")]
    InvalidLayout(String),
}
