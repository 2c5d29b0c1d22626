//! Domain model for a payment ledger entry.
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Settlement status of a payment. Payments are recorded as completed; the
/// field exists so imported or in-flight records can be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Completed,
    Pending,
}

impl Default for PaymentStatus {
    fn default() -> Self {
        PaymentStatus::Completed
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentStatus::Completed => write!(f, "completed"),
            PaymentStatus::Pending => write!(f, "pending"),
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "completed" => Ok(PaymentStatus::Completed),
            "pending" => Ok(PaymentStatus::Pending),
            other => Err(format!("unknown payment status: {}", other)),
        }
    }
}

/// One entry in a member's payment ledger.
///
/// Never updated in place: a payment is inserted by the application engine
/// and only ever removed by the reversal engine. Ordered by `payment_date`
/// descending (ties broken by `id` descending, i.e. insertion order) the
/// ledger reads newest first; the oldest entry is the founding payment that
/// establishes the membership and cannot be deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    /// Storage-assigned, monotonically increasing. 0 until persisted.
    pub id: u64,
    pub member_id: u32,
    /// Member name snapshot at payment time.
    pub name: String,
    /// Plan this payment purchased or renewed into.
    pub plan: String,
    /// Human-readable duration label, e.g. "2 Months - ₹1200".
    pub duration: String,
    pub amount: i64,
    /// Attributed accounting period, pinned to the 1st of the attributed
    /// month. May differ from the wall-clock day the entry was made.
    pub payment_date: NaiveDate,
    /// Coverage window this payment produced.
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}
