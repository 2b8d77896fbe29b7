use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};

use crate::db::{
    helpers::{format_date, parse_category, parse_date, parse_datetime, to_i64, to_u64},
    models::Transaction,
    Database,
};

fn row_to_transaction(row: &Row) -> Result<Transaction> {
    let category: String = row.get("category")?;
    let entered_at: String = row.get("entered_at")?;
    let exited_at: String = row.get("exited_at")?;
    let duration_hours: i64 = row.get("duration_hours")?;
    let amount: i64 = row.get("amount")?;
    let exit_date: String = row.get("exit_date")?;

    Ok(Transaction {
        id: row.get("id")?,
        vehicle_id: row.get("vehicle_id")?,
        category: parse_category(&category)?,
        entered_at: parse_datetime(&entered_at, "entered_at")?,
        exited_at: parse_datetime(&exited_at, "exited_at")?,
        duration_hours: to_u64(duration_hours, "duration_hours")?,
        amount: to_u64(amount, "amount")?,
        exit_date: parse_date(&exit_date, "exit_date")?,
    })
}

pub fn insert_transaction(conn: &Connection, record: &Transaction) -> Result<()> {
    conn.execute(
        "INSERT INTO transactions (id, vehicle_id, category, entered_at, exited_at, duration_hours, amount, exit_date)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            record.id,
            record.vehicle_id,
            record.category.as_str(),
            record.entered_at.to_rfc3339(),
            record.exited_at.to_rfc3339(),
            to_i64(record.duration_hours)?,
            to_i64(record.amount)?,
            format_date(record.exit_date),
        ],
    )
    .with_context(|| format!("failed to record transaction for {}", record.vehicle_id))?;
    Ok(())
}

/// Transactions whose exit fell on `date`, oldest exit first.
pub fn transactions_on(conn: &Connection, date: NaiveDate) -> Result<Vec<Transaction>> {
    let mut stmt = conn.prepare(
        "SELECT id, vehicle_id, category, entered_at, exited_at, duration_hours, amount, exit_date
         FROM transactions
         WHERE exit_date = ?1
         ORDER BY exited_at ASC, rowid ASC",
    )?;

    let mut rows = stmt.query(params![format_date(date)])?;
    let mut transactions = Vec::new();
    while let Some(row) = rows.next()? {
        transactions.push(row_to_transaction(row)?);
    }

    Ok(transactions)
}

impl Database {
    pub async fn transactions_on(&self, date: NaiveDate) -> Result<Vec<Transaction>> {
        self.execute(move |conn| transactions_on(conn, date)).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::*;
    use crate::{billing::VehicleCategory, db::migrations::run_migrations};

    fn migrated() -> Connection {
        let mut conn = Connection::open_in_memory().unwrap();
        run_migrations(&mut conn).unwrap();
        conn
    }

    fn record(id: &str, exit_date: NaiveDate, exit_hour: u32) -> Transaction {
        let exited_at = Utc.from_utc_datetime(&exit_date.and_hms_opt(exit_hour, 0, 0).unwrap());
        Transaction {
            id: id.into(),
            vehicle_id: format!("V-{id}"),
            category: VehicleCategory::Heavy,
            entered_at: exited_at - Duration::hours(3),
            exited_at,
            duration_hours: 3,
            amount: 140,
            exit_date,
        }
    }

    #[test]
    fn filters_by_exit_date_in_exit_order() {
        let conn = migrated();
        let day = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
        let next_day = day.succ_opt().unwrap();

        insert_transaction(&conn, &record("b", day, 15)).unwrap();
        insert_transaction(&conn, &record("a", day, 9)).unwrap();
        insert_transaction(&conn, &record("c", next_day, 9)).unwrap();

        let found = transactions_on(&conn, day).unwrap();
        let ids: Vec<_> = found.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(found[0], record("a", day, 9));
    }

    #[test]
    fn records_cannot_be_changed_or_removed() {
        let conn = migrated();
        let day = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
        insert_transaction(&conn, &record("a", day, 9)).unwrap();

        assert!(conn
            .execute("UPDATE transactions SET amount = 0 WHERE id = 'a'", [])
            .is_err());
        assert!(conn
            .execute("DELETE FROM transactions WHERE id = 'a'", [])
            .is_err());
        assert_eq!(transactions_on(&conn, day).unwrap().len(), 1);
    }
}
