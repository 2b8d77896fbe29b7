use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    allocation::{allocate, LotLayout, SlotId},
    billing::{bill, RateSchedule, VehicleCategory},
    clock::Clock,
    db::{
        models::{Occupant, ParkedVehicle, Transaction},
        repositories::{occupancy, transactions},
        Database,
    },
    error::ParkingError,
    report::DailyReport,
};

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ParkReceipt {
    pub slot: SlotId,
    pub vehicle_id: String,
    pub category: VehicleCategory,
    pub entered_at: DateTime<Utc>,
    pub priority: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExitReceipt {
    pub slot: SlotId,
    pub transaction: Transaction,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SlotStatus {
    pub slot: SlotId,
    pub priority: bool,
    pub occupant: Option<Occupant>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LotStatus {
    pub slots: Vec<SlotStatus>,
    pub free: usize,
    pub occupied: usize,
}

impl LotStatus {
    pub fn parked(&self) -> impl Iterator<Item = ParkedVehicle> + '_ {
        self.slots.iter().filter_map(|s| {
            s.occupant.clone().map(|occupant| ParkedVehicle {
                slot: s.slot,
                occupant,
            })
        })
    }
}

/// Trim and uppercase a vehicle number as typed by the operator.
pub fn normalize_vehicle_id(raw: &str) -> Result<String, ParkingError> {
    let normalized = raw.trim().to_uppercase();
    if normalized.is_empty() {
        return Err(ParkingError::EmptyVehicleId);
    }
    Ok(normalized)
}

/// Park, exit and reporting on top of the store. Each park or exit runs as a
/// single database task inside one SQLite transaction, so a rejected request
/// writes nothing and two requests never pick the same slot.
#[derive(Clone)]
pub struct LotController {
    db: Database,
    layout: Arc<LotLayout>,
    rates: Arc<RateSchedule>,
    clock: Arc<dyn Clock>,
}

impl LotController {
    pub fn new(
        db: Database,
        layout: LotLayout,
        rates: RateSchedule,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            db,
            layout: Arc::new(layout),
            rates: Arc::new(rates),
            clock,
        }
    }

    pub fn layout(&self) -> &LotLayout {
        &self.layout
    }

    pub async fn park(
        &self,
        raw_vehicle_id: &str,
        category: VehicleCategory,
        priority: bool,
    ) -> Result<ParkReceipt> {
        let vehicle_id = normalize_vehicle_id(raw_vehicle_id)?;
        let entered_at = self.clock.now();
        let layout = Arc::clone(&self.layout);

        let occupant = Occupant {
            vehicle_id: vehicle_id.clone(),
            category,
            entered_at,
            priority,
        };

        let result = self
            .db
            .execute(move |conn| {
                let tx = conn.transaction()?;
                let snapshot = occupancy::load_snapshot(&tx, &layout)?;

                if snapshot.find_vehicle(&occupant.vehicle_id).is_some() {
                    return Err(ParkingError::AlreadyParked(occupant.vehicle_id).into());
                }
                let slot = allocate(&snapshot, occupant.priority, &layout)
                    .ok_or(ParkingError::LotFull)?;

                occupancy::insert_occupant(&tx, slot, &occupant)?;
                tx.commit().context("failed to commit park")?;
                Ok(slot)
            })
            .await;

        let slot = match result {
            Ok(slot) => slot,
            Err(err) => {
                warn!("Rejected park for {vehicle_id}: {err}");
                return Err(err);
            }
        };

        info!(
            "Parked {vehicle_id} ({category}{}) in slot {slot}",
            if priority { ", priority" } else { "" }
        );

        Ok(ParkReceipt {
            slot,
            vehicle_id,
            category,
            entered_at,
            priority,
        })
    }

    pub async fn exit(&self, raw_vehicle_id: &str) -> Result<ExitReceipt> {
        let vehicle_id = normalize_vehicle_id(raw_vehicle_id)?;
        let exited_at = self.clock.now();
        let exit_date = self.clock.date_of(exited_at);
        let layout = Arc::clone(&self.layout);
        let rates = Arc::clone(&self.rates);
        let lookup_id = vehicle_id.clone();

        let result = self
            .db
            .execute(move |conn| {
                let tx = conn.transaction()?;
                let snapshot = occupancy::load_snapshot(&tx, &layout)?;

                let (slot, occupant) = snapshot
                    .find_vehicle(&lookup_id)
                    .ok_or_else(|| ParkingError::NotParked(lookup_id.clone()))?;

                if exited_at < occupant.entered_at {
                    warn!(
                        "Exit time {exited_at} precedes entry {} for {lookup_id}; billing as zero hours",
                        occupant.entered_at
                    );
                }
                let charge = bill(occupant.category, occupant.entered_at, exited_at, &rates);

                let record = Transaction {
                    id: Uuid::new_v4().to_string(),
                    vehicle_id: occupant.vehicle_id.clone(),
                    category: occupant.category,
                    entered_at: occupant.entered_at,
                    exited_at,
                    duration_hours: charge.duration_hours,
                    amount: charge.amount,
                    exit_date,
                };

                transactions::insert_transaction(&tx, &record)?;
                occupancy::delete_occupant(&tx, slot)?;
                tx.commit().context("failed to commit exit")?;
                Ok(ExitReceipt {
                    slot,
                    transaction: record,
                })
            })
            .await;

        match result {
            Ok(receipt) => {
                info!(
                    "{vehicle_id} left slot {} after {}h, billed {}",
                    receipt.slot, receipt.transaction.duration_hours, receipt.transaction.amount
                );
                Ok(receipt)
            }
            Err(err) => {
                warn!("Rejected exit for {vehicle_id}: {err}");
                Err(err)
            }
        }
    }

    pub async fn status(&self) -> Result<LotStatus> {
        let snapshot = self.db.occupancy_snapshot(&self.layout).await?;

        let slots = snapshot
            .iter()
            .map(|(slot, occupant)| SlotStatus {
                slot,
                priority: self.layout.is_priority(slot),
                occupant: occupant.cloned(),
            })
            .collect();

        Ok(LotStatus {
            slots,
            free: snapshot.free_count(),
            occupied: snapshot.occupied_count(),
        })
    }

    /// Report for the clock's current day.
    pub async fn daily_report(&self) -> Result<DailyReport> {
        let today = self.clock.today();
        let records = self.db.transactions_on(today).await?;
        let parked_now = self.db.parked_vehicles().await?.len();
        Ok(DailyReport::build(today, records, parked_now))
    }
}
