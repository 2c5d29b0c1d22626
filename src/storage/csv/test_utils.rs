//! Shared helpers for the CSV repository tests.

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use tempfile::TempDir;

use super::connection::CsvConnection;
use crate::domain::models::{Member, Payment, PaymentStatus};

/// A connection backed by a fresh temporary directory. Keep the `TempDir`
/// alive for the duration of the test.
pub fn test_connection() -> Result<(CsvConnection, TempDir)> {
    let temp_dir = TempDir::new()?;
    let connection = CsvConnection::new(temp_dir.path())?;
    Ok((connection, temp_dir))
}

pub fn test_member(member_id: u32) -> Member {
    Member {
        member_id,
        name: format!("Member {}", member_id),
        age: 30,
        gender: "male".to_string(),
        mobile: "9876543210".to_string(),
        address: "42 Market Street".to_string(),
        plan: "1 Month".to_string(),
        start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2025, 2, 1),
        amount: 600,
        is_active: None,
        created_at: Utc::now(),
    }
}

pub fn test_payment(member_id: u32, payment_date: NaiveDate) -> Payment {
    Payment {
        id: 0,
        member_id,
        name: format!("Member {}", member_id),
        plan: "1 Month".to_string(),
        duration: "1 Month - ₹600".to_string(),
        amount: 600,
        payment_date,
        start_date: payment_date,
        end_date: payment_date,
        status: PaymentStatus::Completed,
        created_at: Utc::now(),
    }
}
