//! Domain model for a gym member.
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A member of the gym.
///
/// `member_id` is assigned by the caller (front-desk staff hand out the
/// number), not generated here. `end_date` is `None` only while the member is
/// still on the admission-pending plan; every paid plan produces a coverage
/// end date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub member_id: u32,
    pub name: String,
    pub age: u32,
    pub gender: String,
    /// Exactly 10 digits; validated before any write.
    pub mobile: String,
    pub address: String,
    /// Plan catalog value, e.g. "1 Month" or "Admission Fee Pending".
    pub plan: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    /// Price of the last plan purchased, in whole rupees.
    pub amount: i64,
    /// Advisory flag set by staff; activity checks derive from `end_date`.
    pub is_active: Option<bool>,
    pub created_at: DateTime<Utc>,
}
