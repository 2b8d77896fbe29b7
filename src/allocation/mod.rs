pub mod algorithm;
pub mod layout;
pub mod snapshot;

pub use algorithm::allocate;
pub use layout::{LotLayout, SlotId};
pub use snapshot::OccupancySnapshot;
