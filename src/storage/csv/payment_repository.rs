//! CSV-backed payment repository.

use anyhow::Result;
use chrono::{DateTime, Utc};
use csv::{Reader, Writer};
use log::warn;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter};

use super::connection::CsvConnection;
use crate::domain::membership;
use crate::domain::models::{Payment, PaymentStatus};
use crate::storage::traits::PaymentStorage;

#[derive(Clone)]
pub struct PaymentRepository {
    connection: CsvConnection,
}

impl PaymentRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn read_payments(&self) -> Result<Vec<Payment>> {
        self.connection.ensure_payments_file_exists()?;

        let file = File::open(self.connection.payments_file_path())?;
        let reader = BufReader::new(file);
        let mut csv_reader = Reader::from_reader(reader);

        let mut payments = Vec::new();
        for result in csv_reader.records() {
            let record = result?;

            let id = match record.get(0).unwrap_or("").parse::<u64>() {
                Ok(id) => id,
                Err(_) => {
                    warn!("Skipping payment row with unparsable id: {:?}", record.get(0));
                    continue;
                }
            };
            let dates = (
                membership::parse_date(record.get(6).unwrap_or("")),
                membership::parse_date(record.get(7).unwrap_or("")),
                membership::parse_date(record.get(8).unwrap_or("")),
            );
            let (payment_date, start_date, end_date) = match dates {
                (Some(p), Some(s), Some(e)) => (p, s, e),
                _ => {
                    warn!("Skipping payment {} with unparsable dates", id);
                    continue;
                }
            };

            payments.push(Payment {
                id,
                member_id: record.get(1).unwrap_or("0").parse().unwrap_or(0),
                name: record.get(2).unwrap_or("").to_string(),
                plan: record.get(3).unwrap_or("").to_string(),
                duration: record.get(4).unwrap_or("").to_string(),
                amount: record.get(5).unwrap_or("0").parse().unwrap_or(0),
                payment_date,
                start_date,
                end_date,
                status: record
                    .get(9)
                    .unwrap_or("")
                    .parse::<PaymentStatus>()
                    .unwrap_or_default(),
                created_at: record
                    .get(10)
                    .unwrap_or("")
                    .parse::<DateTime<Utc>>()
                    .unwrap_or_default(),
            });
        }
        Ok(payments)
    }

    fn write_payments(&self, payments: &[Payment]) -> Result<()> {
        let file_path = self.connection.payments_file_path();
        let temp_path = file_path.with_extension("tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)?;
            let writer = BufWriter::new(file);
            let mut csv_writer = Writer::from_writer(writer);

            csv_writer.write_record([
                "id", "member_id", "name", "plan", "duration", "amount",
                "payment_date", "start_date", "end_date", "status", "created_at",
            ])?;

            for payment in payments {
                csv_writer.write_record([
                    payment.id.to_string().as_str(),
                    payment.member_id.to_string().as_str(),
                    payment.name.as_str(),
                    payment.plan.as_str(),
                    payment.duration.as_str(),
                    payment.amount.to_string().as_str(),
                    payment.payment_date.to_string().as_str(),
                    payment.start_date.to_string().as_str(),
                    payment.end_date.to_string().as_str(),
                    payment.status.to_string().as_str(),
                    payment.created_at.to_rfc3339().as_str(),
                ])?;
            }
            csv_writer.flush()?;
        }

        std::fs::rename(&temp_path, &file_path)?;
        Ok(())
    }
}

impl PaymentStorage for PaymentRepository {
    fn store_payment(&self, payment: &Payment) -> Result<u64> {
        let mut payments = self.read_payments()?;
        let assigned_id = payments.iter().map(|p| p.id).max().unwrap_or(0) + 1;

        let mut stored = payment.clone();
        stored.id = assigned_id;
        payments.push(stored);

        self.write_payments(&payments)?;
        Ok(assigned_id)
    }

    fn get_payment(&self, payment_id: u64) -> Result<Option<Payment>> {
        let payments = self.read_payments()?;
        Ok(payments.into_iter().find(|p| p.id == payment_id))
    }

    fn list_payments(&self) -> Result<Vec<Payment>> {
        self.read_payments()
    }

    fn list_payments_for_member(&self, member_id: u32) -> Result<Vec<Payment>> {
        let mut payments: Vec<Payment> = self
            .read_payments()?
            .into_iter()
            .filter(|p| p.member_id == member_id)
            .collect();
        // Newest first; same-day entries fall back to insertion order.
        payments.sort_by(|a, b| {
            b.payment_date
                .cmp(&a.payment_date)
                .then(b.id.cmp(&a.id))
        });
        Ok(payments)
    }

    fn delete_payment(&self, payment_id: u64) -> Result<bool> {
        let mut payments = self.read_payments()?;
        let before = payments.len();
        payments.retain(|p| p.id != payment_id);
        if payments.len() == before {
            return Ok(false);
        }
        self.write_payments(&payments)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::csv::test_utils::{test_connection, test_payment};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn ids_are_assigned_monotonically() -> Result<()> {
        let (connection, _temp_dir) = test_connection()?;
        let repo = PaymentRepository::new(connection);

        let first = repo.store_payment(&test_payment(1, date(2025, 1, 1)))?;
        let second = repo.store_payment(&test_payment(1, date(2025, 2, 1)))?;
        assert_eq!(first, 1);
        assert_eq!(second, 2);

        // Deleting the newest does not cause id reuse relative to survivors.
        repo.delete_payment(second)?;
        let third = repo.store_payment(&test_payment(1, date(2025, 3, 1)))?;
        assert_eq!(third, 2);
        Ok(())
    }

    #[test]
    fn member_ledger_is_newest_first_with_id_tiebreak() -> Result<()> {
        let (connection, _temp_dir) = test_connection()?;
        let repo = PaymentRepository::new(connection);

        let a = repo.store_payment(&test_payment(4, date(2025, 1, 1)))?;
        let b = repo.store_payment(&test_payment(4, date(2025, 3, 1)))?;
        // Same attributed date as `b`: later insertion wins the tie.
        let c = repo.store_payment(&test_payment(4, date(2025, 3, 1)))?;
        repo.store_payment(&test_payment(9, date(2025, 4, 1)))?;

        let ledger = repo.list_payments_for_member(4)?;
        let ids: Vec<u64> = ledger.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![c, b, a]);
        Ok(())
    }

    #[test]
    fn round_trip_preserves_fields() -> Result<()> {
        let (connection, _temp_dir) = test_connection()?;
        let repo = PaymentRepository::new(connection);

        let mut payment = test_payment(2, date(2025, 6, 1));
        payment.plan = "3+2 Months".to_string();
        payment.duration = "3+2 Months - ₹2999".to_string();
        payment.amount = 2999;
        let id = repo.store_payment(&payment)?;

        let loaded = repo.get_payment(id)?.unwrap();
        assert_eq!(loaded.plan, "3+2 Months");
        assert_eq!(loaded.duration, "3+2 Months - ₹2999");
        assert_eq!(loaded.amount, 2999);
        assert_eq!(loaded.payment_date, date(2025, 6, 1));
        assert_eq!(loaded.status, PaymentStatus::Completed);
        Ok(())
    }

    #[test]
    fn delete_reports_whether_anything_was_removed() -> Result<()> {
        let (connection, _temp_dir) = test_connection()?;
        let repo = PaymentRepository::new(connection);

        let id = repo.store_payment(&test_payment(1, date(2025, 1, 1)))?;
        assert!(repo.delete_payment(id)?);
        assert!(!repo.delete_payment(id)?);
        assert!(repo.get_payment(id)?.is_none());
        Ok(())
    }
}
