pub mod occupant;
pub mod transaction;

pub use occupant::{Occupant, ParkedVehicle};
pub use transaction::Transaction;
