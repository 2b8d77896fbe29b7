use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::ParkingError;

pub type SlotId = u32;

/// Fixed shape of the lot: slots `1..=total_slots`, some reserved for
/// priority vehicles.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LotLayout {
    total_slots: SlotId,
    priority_slots: BTreeSet<SlotId>,
}

impl Default for LotLayout {
    fn default() -> Self {
        Self {
            total_slots: 10,
            priority_slots: BTreeSet::from([1, 2]),
        }
    }
}

impl LotLayout {
    pub fn new(
        total_slots: SlotId,
        priority_slots: impl IntoIterator<Item = SlotId>,
    ) -> Result<Self, ParkingError> {
        let layout = Self {
            total_slots,
            priority_slots: priority_slots.into_iter().collect(),
        };
        layout.validate()?;
        Ok(layout)
    }

    /// Checks the invariants a deserialized layout cannot enforce on its own.
    pub fn validate(&self) -> Result<(), ParkingError> {
        if self.total_slots == 0 {
            return Err(ParkingError::InvalidLayout(
                "lot must have at least one slot".into(),
            ));
        }
        if let Some(slot) = self.priority_slots.iter().find(|s| !self.contains(**s)) {
            return Err(ParkingError::InvalidLayout(format!(
                "priority slot {slot} is outside 1..={}",
                self.total_slots
            )));
        }
        Ok(())
    }

    pub fn total_slots(&self) -> SlotId {
        self.total_slots
    }

    pub fn contains(&self, slot: SlotId) -> bool {
        (1..=self.total_slots).contains(&slot)
    }

    pub fn is_priority(&self, slot: SlotId) -> bool {
        self.priority_slots.contains(&slot)
    }

    /// All slots in ascending order.
    pub fn slots(&self) -> impl Iterator<Item = SlotId> {
        1..=self.total_slots
    }

    /// Priority slots in ascending order.
    pub fn priority_slots(&self) -> impl Iterator<Item = SlotId> + '_ {
        self.priority_slots.iter().copied()
    }

    /// Non-priority slots in ascending order.
    pub fn standard_slots(&self) -> impl Iterator<Item = SlotId> + '_ {
        self.slots().filter(|slot| !self.is_priority(*slot))
    }
}
