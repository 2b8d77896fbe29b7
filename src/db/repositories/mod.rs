pub mod occupancy;
pub mod transactions;
