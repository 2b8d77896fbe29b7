//! End-to-end park/exit/report flows against a real SQLite file.

use std::sync::Arc;

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use parklot_lib::{
    allocation::LotLayout,
    billing::{RateSchedule, VehicleCategory},
    clock::ManualClock,
    db::Database,
    lot::LotController,
    open_lot, ParkingError,
};
use tempfile::TempDir;

struct Lot {
    _dir: TempDir,
    clock: Arc<ManualClock>,
    controller: LotController,
}

fn lot() -> Lot {
    let dir = tempfile::tempdir().expect("tempdir");
    let db = Database::new(dir.path().join("lot.sqlite3")).expect("open database");
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 6, 10, 8, 0, 0).unwrap(),
    ));
    let controller = LotController::new(
        db,
        LotLayout::default(),
        RateSchedule::default(),
        clock.clone(),
    );
    Lot {
        _dir: dir,
        clock,
        controller,
    }
}

fn parking_error(err: &anyhow::Error) -> Option<&ParkingError> {
    err.downcast_ref::<ParkingError>()
}

#[tokio::test]
async fn park_then_exit_bills_with_ceiling_hours() {
    let lot = lot();

    let parked = lot
        .controller
        .park("  ts09ab1234 ", VehicleCategory::Car, false)
        .await
        .unwrap();
    assert_eq!(parked.slot, 3);
    assert_eq!(parked.vehicle_id, "TS09AB1234");

    lot.clock.advance(Duration::hours(5) + Duration::minutes(30));
    let receipt = lot.controller.exit("ts09ab1234").await.unwrap();

    assert_eq!(receipt.slot, 3);
    assert_eq!(receipt.transaction.duration_hours, 6);
    assert_eq!(receipt.transaction.amount, 130);
    assert_eq!(
        receipt.transaction.exit_date,
        NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
    );

    let status = lot.controller.status().await.unwrap();
    assert_eq!(status.occupied, 0);
    assert_eq!(status.free, 10);
}

#[tokio::test]
async fn ordinary_vehicles_fill_standard_slots_before_priority() {
    let lot = lot();

    for n in 3..=10 {
        let receipt = lot
            .controller
            .park(&format!("CAR{n}"), VehicleCategory::Car, false)
            .await
            .unwrap();
        assert_eq!(receipt.slot, n);
    }

    let spill = lot
        .controller
        .park("LATE1", VehicleCategory::Bike, false)
        .await
        .unwrap();
    assert_eq!(spill.slot, 1);

    let vip = lot
        .controller
        .park("VIP1", VehicleCategory::Ev, true)
        .await
        .unwrap();
    assert_eq!(vip.slot, 2);

    let err = lot
        .controller
        .park("VIP2", VehicleCategory::Ev, true)
        .await
        .unwrap_err();
    assert_eq!(parking_error(&err), Some(&ParkingError::LotFull));
}

#[tokio::test]
async fn priority_request_is_refused_when_priority_slots_are_taken() {
    let lot = lot();
    lot.controller
        .park("P1", VehicleCategory::Car, true)
        .await
        .unwrap();
    lot.controller
        .park("P2", VehicleCategory::Car, true)
        .await
        .unwrap();

    let err = lot
        .controller
        .park("P3", VehicleCategory::Car, true)
        .await
        .unwrap_err();
    assert_eq!(parking_error(&err), Some(&ParkingError::LotFull));

    let status = lot.controller.status().await.unwrap();
    assert_eq!(status.occupied, 2);
    assert!(status.slots[2..].iter().all(|s| s.occupant.is_none()));
}

#[tokio::test]
async fn duplicate_entry_leaves_lot_unchanged() {
    let lot = lot();
    lot.controller
        .park("KA01", VehicleCategory::Car, false)
        .await
        .unwrap();
    let before = lot.controller.status().await.unwrap();

    let err = lot
        .controller
        .park(" ka01", VehicleCategory::Heavy, true)
        .await
        .unwrap_err();
    assert_eq!(
        parking_error(&err),
        Some(&ParkingError::AlreadyParked("KA01".into()))
    );
    assert_eq!(lot.controller.status().await.unwrap(), before);
}

#[tokio::test]
async fn empty_and_unknown_vehicles_are_rejected() {
    let lot = lot();

    let err = lot
        .controller
        .park("   ", VehicleCategory::Car, false)
        .await
        .unwrap_err();
    assert_eq!(parking_error(&err), Some(&ParkingError::EmptyVehicleId));

    let err = lot.controller.exit("NOPE").await.unwrap_err();
    assert_eq!(
        parking_error(&err),
        Some(&ParkingError::NotParked("NOPE".into()))
    );

    let report = lot.controller.daily_report().await.unwrap();
    assert_eq!(report.transaction_count, 0);
    assert_eq!(report.parked_now, 0);
}

#[tokio::test]
async fn daily_report_only_counts_today() {
    let lot = lot();

    lot.controller
        .park("OLD1", VehicleCategory::Heavy, false)
        .await
        .unwrap();
    lot.clock.advance(Duration::hours(1));
    lot.controller.exit("OLD1").await.unwrap();

    lot.clock.advance(Duration::days(1));
    lot.controller
        .park("NEW1", VehicleCategory::Bike, false)
        .await
        .unwrap();
    lot.controller
        .park("NEW2", VehicleCategory::Car, false)
        .await
        .unwrap();
    lot.controller
        .park("STAY", VehicleCategory::Ev, false)
        .await
        .unwrap();
    lot.clock.advance(Duration::seconds(7201));
    lot.controller.exit("NEW1").await.unwrap();
    lot.controller.exit("NEW2").await.unwrap();

    let report = lot.controller.daily_report().await.unwrap();
    assert_eq!(report.date, NaiveDate::from_ymd_opt(2024, 6, 11).unwrap());
    assert_eq!(report.transaction_count, 2);
    // bike 20 + 10, car 50 + 20 for a three-hour stay
    assert_eq!(report.total_revenue, 100);
    assert_eq!(report.parked_now, 1);
    assert_eq!(report.category_counts.get(&VehicleCategory::Car), Some(&1));
    assert_eq!(report.category_counts.get(&VehicleCategory::Heavy), None);
}

#[tokio::test]
async fn concurrent_entries_get_distinct_slots() {
    let lot = lot();

    let tasks: Vec<_> = (0..10)
        .map(|n| {
            let controller = lot.controller.clone();
            tokio::spawn(async move {
                controller
                    .park(&format!("RUSH{n}"), VehicleCategory::Car, false)
                    .await
            })
        })
        .collect();

    let mut slots = Vec::new();
    for task in tasks {
        slots.push(task.await.unwrap().unwrap().slot);
    }
    slots.sort_unstable();
    assert_eq!(slots, (1..=10).collect::<Vec<_>>());
}

#[tokio::test]
async fn state_survives_reopening_the_data_dir() {
    let dir = tempfile::tempdir().expect("tempdir");

    {
        let controller = open_lot(dir.path()).unwrap();
        controller
            .park("KEEP1", VehicleCategory::Car, false)
            .await
            .unwrap();
    }

    let controller = open_lot(dir.path()).unwrap();
    let status = controller.status().await.unwrap();
    let parked: Vec<_> = status.parked().collect();
    assert_eq!(parked.len(), 1);
    assert_eq!(parked[0].slot, 3);
    assert_eq!(parked[0].occupant.vehicle_id, "KEEP1");
    assert!(dir.path().join("settings.json").exists());
}
