use anyhow::{Context, Result};
use rusqlite::{params, Connection, Row};

use crate::{
    allocation::{LotLayout, OccupancySnapshot, SlotId},
    db::{
        helpers::{parse_category, parse_datetime, to_slot},
        models::{Occupant, ParkedVehicle},
        Database,
    },
};

fn row_to_parked(row: &Row) -> Result<ParkedVehicle> {
    let slot: i64 = row.get("slot")?;
    let category: String = row.get("category")?;
    let entered_at: String = row.get("entered_at")?;
    let priority: i64 = row.get("priority")?;

    Ok(ParkedVehicle {
        slot: to_slot(slot)?,
        occupant: Occupant {
            vehicle_id: row.get("vehicle_id")?,
            category: parse_category(&category)?,
            entered_at: parse_datetime(&entered_at, "entered_at")?,
            priority: priority != 0,
        },
    })
}

pub fn load_parked(conn: &Connection) -> Result<Vec<ParkedVehicle>> {
    let mut stmt = conn.prepare(
        "SELECT slot, vehicle_id, category, entered_at, priority
         FROM parked_vehicles
         ORDER BY slot ASC",
    )?;

    let mut rows = stmt.query([])?;
    let mut parked = Vec::new();
    while let Some(row) = rows.next()? {
        parked.push(row_to_parked(row)?);
    }

    Ok(parked)
}

pub fn load_snapshot(conn: &Connection, layout: &LotLayout) -> Result<OccupancySnapshot> {
    let parked = load_parked(conn)?;
    OccupancySnapshot::from_occupants(
        layout,
        parked.into_iter().map(|p| (p.slot, p.occupant)),
    )
    .context("stored occupancy does not fit the configured lot")
}

pub fn insert_occupant(conn: &Connection, slot: SlotId, occupant: &Occupant) -> Result<()> {
    conn.execute(
        "INSERT INTO parked_vehicles (slot, vehicle_id, category, entered_at, priority)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            slot,
            occupant.vehicle_id,
            occupant.category.as_str(),
            occupant.entered_at.to_rfc3339(),
            occupant.priority,
        ],
    )
    .with_context(|| format!("failed to insert occupant into slot {slot}"))?;
    Ok(())
}

/// Returns whether a row was removed.
pub fn delete_occupant(conn: &Connection, slot: SlotId) -> Result<bool> {
    let rows_affected = conn
        .execute(
            "DELETE FROM parked_vehicles WHERE slot = ?1",
            params![slot],
        )
        .with_context(|| format!("failed to free slot {slot}"))?;
    Ok(rows_affected > 0)
}

impl Database {
    pub async fn occupancy_snapshot(&self, layout: &LotLayout) -> Result<OccupancySnapshot> {
        let layout = layout.clone();
        self.execute(move |conn| load_snapshot(conn, &layout)).await
    }

    pub async fn parked_vehicles(&self) -> Result<Vec<ParkedVehicle>> {
        self.execute(|conn| load_parked(conn)).await
    }
}
