pub mod calculator;
pub mod category;
pub mod rates;

pub use calculator::{bill, billable_hours, Bill};
pub use category::VehicleCategory;
pub use rates::{Rate, RateSchedule};
