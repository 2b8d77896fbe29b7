//! Daily revenue summary built from the day's transaction records.

use std::{collections::BTreeMap, fmt::Write};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{billing::VehicleCategory, db::models::Transaction};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DailyReport {
    pub date: NaiveDate,
    pub transaction_count: usize,
    pub total_revenue: u64,
    /// Exits per category; categories without exits are omitted.
    pub category_counts: BTreeMap<VehicleCategory, usize>,
    /// Vehicles still in the lot when the report was taken.
    pub parked_now: usize,
    pub transactions: Vec<Transaction>,
}

impl DailyReport {
    pub fn build(date: NaiveDate, transactions: Vec<Transaction>, parked_now: usize) -> Self {
        let mut category_counts = BTreeMap::new();
        for record in &transactions {
            *category_counts.entry(record.category).or_insert(0) += 1;
        }

        Self {
            date,
            transaction_count: transactions.len(),
            total_revenue: transactions.iter().map(|t| t.amount).sum(),
            category_counts,
            parked_now,
            transactions,
        }
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Daily Parking Report");
        let _ = writeln!(out, "Date: {}", self.date);
        let _ = writeln!(out, "Total Transactions: {}", self.transaction_count);
        let _ = writeln!(out, "Total Revenue: {}", self.total_revenue);
        let _ = writeln!(out, "Vehicles Parked (Live): {}", self.parked_now);

        if self.transactions.is_empty() {
            let _ = writeln!(out, "\nNo transactions today.");
            return out;
        }

        let _ = writeln!(out, "\nBy category:");
        for (category, count) in &self.category_counts {
            let _ = writeln!(out, "  {:<6} {count}", category.as_str());
        }

        let _ = writeln!(
            out,
            "\n{:<14} {:<6} {:>5} {:>7}  {}",
            "Vehicle No", "Type", "Hours", "Bill", "Exit Time"
        );
        for record in &self.transactions {
            let _ = writeln!(
                out,
                "{:<14} {:<6} {:>5} {:>7}  {}",
                record.vehicle_id,
                record.category.as_str(),
                record.duration_hours,
                record.amount,
                record.exited_at.format("%Y-%m-%d %H:%M:%S"),
            );
        }
        out
    }
}
