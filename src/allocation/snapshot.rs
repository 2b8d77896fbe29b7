use std::collections::BTreeMap;

use anyhow::{bail, Result};

use super::{LotLayout, SlotId};
use crate::db::models::Occupant;

/// Occupancy of every slot in a layout at one point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct OccupancySnapshot {
    slots: BTreeMap<SlotId, Option<Occupant>>,
}

impl OccupancySnapshot {
    pub fn empty(layout: &LotLayout) -> Self {
        Self {
            slots: layout.slots().map(|slot| (slot, None)).collect(),
        }
    }

    /// Build a snapshot from stored occupants. Fails when an occupant sits in
    /// a slot the layout does not have or two occupants share a slot.
    pub fn from_occupants(
        layout: &LotLayout,
        occupants: impl IntoIterator<Item = (SlotId, Occupant)>,
    ) -> Result<Self> {
        let mut snapshot = Self::empty(layout);
        for (slot, occupant) in occupants {
            match snapshot.slots.get_mut(&slot) {
                None => bail!(
                    "slot {slot} is occupied by {} but the lot only has {} slots",
                    occupant.vehicle_id,
                    layout.total_slots()
                ),
                Some(Some(existing)) => bail!(
                    "slot {slot} holds both {} and {}",
                    existing.vehicle_id,
                    occupant.vehicle_id
                ),
                Some(entry) => *entry = Some(occupant),
            }
        }
        Ok(snapshot)
    }

    pub fn occupy(&mut self, slot: SlotId, occupant: Occupant) -> Option<Occupant> {
        self.slots.get_mut(&slot).and_then(|entry| entry.replace(occupant))
    }

    pub fn is_empty(&self, slot: SlotId) -> bool {
        matches!(self.slots.get(&slot), Some(None))
    }

    pub fn occupant(&self, slot: SlotId) -> Option<&Occupant> {
        self.slots.get(&slot).and_then(Option::as_ref)
    }

    /// First slot (ascending) holding `vehicle_id`.
    pub fn find_vehicle(&self, vehicle_id: &str) -> Option<(SlotId, &Occupant)> {
        self.iter().find_map(|(slot, occupant)| {
            occupant
                .filter(|o| o.vehicle_id == vehicle_id)
                .map(|o| (slot, o))
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (SlotId, Option<&Occupant>)> + '_ {
        self.slots.iter().map(|(slot, occupant)| (*slot, occupant.as_ref()))
    }

    pub fn occupied_count(&self) -> usize {
        self.slots.values().filter(|o| o.is_some()).count()
    }

    pub fn free_count(&self) -> usize {
        self.slots.len() - self.occupied_count()
    }
}
