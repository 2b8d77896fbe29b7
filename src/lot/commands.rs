use std::fmt::Write;

use anyhow::Result;
use serde::Serialize;

use crate::{cli::Command, lot::LotController};

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Run one operator command and return what should be printed.
pub async fn run_command(
    controller: &LotController,
    command: Command,
    json: bool,
) -> Result<String> {
    match command {
        Command::Park {
            vehicle,
            category,
            priority,
        } => {
            let receipt = controller.park(&vehicle, category, priority).await?;
            if json {
                return to_json(&receipt);
            }
            Ok(format!(
                "Parked {} in slot {}\nEntry time: {}",
                receipt.vehicle_id,
                receipt.slot,
                receipt.entered_at.format("%Y-%m-%d %H:%M:%S")
            ))
        }
        Command::Exit { vehicle } => {
            let receipt = controller.exit(&vehicle).await?;
            if json {
                return to_json(&receipt);
            }
            Ok(format!(
                "Exit successful\nSlot freed: {}\nDuration: {} hour(s)\nBill amount: {}",
                receipt.slot, receipt.transaction.duration_hours, receipt.transaction.amount
            ))
        }
        Command::Status => {
            let status = controller.status().await?;
            if json {
                return to_json(&status);
            }

            let mut out = String::new();
            let _ = writeln!(out, "Available slots ({}):", status.free);
            for slot in status.slots.iter().filter(|s| s.occupant.is_none()) {
                let tag = if slot.priority { " (priority)" } else { "" };
                let _ = writeln!(out, "  Slot {}{tag}", slot.slot);
            }
            if status.free == 0 {
                let _ = writeln!(out, "  No slots available!");
            }

            let _ = writeln!(out, "\nParked vehicles ({}):", status.occupied);
            for parked in status.parked() {
                let occupant = &parked.occupant;
                let _ = writeln!(
                    out,
                    "  Slot {:<3} {:<14} {:<6} {:<8} {}",
                    parked.slot,
                    occupant.vehicle_id,
                    occupant.category.as_str(),
                    if occupant.priority { "PRIORITY" } else { "NORMAL" },
                    occupant.entered_at.format("%Y-%m-%d %H:%M:%S"),
                );
            }
            if status.occupied == 0 {
                let _ = writeln!(out, "  No parked vehicles.");
            }
            Ok(out)
        }
        Command::Report => {
            let report = controller.daily_report().await?;
            if json {
                return to_json(&report);
            }
            Ok(report.render_text())
        }
    }
}
