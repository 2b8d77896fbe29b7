use super::{LotLayout, OccupancySnapshot, SlotId};

/// Pick the slot an arriving vehicle should take.
///
/// Priority requests are confined to priority slots. Other vehicles take the
/// lowest free standard slot and only spill into priority slots once every
/// standard slot is taken. Returns `None` when no eligible slot is free.
pub fn allocate(
    snapshot: &OccupancySnapshot,
    wants_priority: bool,
    layout: &LotLayout,
) -> Option<SlotId> {
    if wants_priority {
        return first_free(snapshot, layout.priority_slots());
    }

    first_free(snapshot, layout.standard_slots())
        .or_else(|| first_free(snapshot, layout.priority_slots()))
}

fn first_free(
    snapshot: &OccupancySnapshot,
    mut slots: impl Iterator<Item = SlotId>,
) -> Option<SlotId> {
    slots.find(|slot| snapshot.is_empty(*slot))
}
