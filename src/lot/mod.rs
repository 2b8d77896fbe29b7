pub mod commands;
pub mod controller;

pub use controller::{
    normalize_vehicle_id, ExitReceipt, LotController, LotStatus, ParkReceipt, SlotStatus,
};
