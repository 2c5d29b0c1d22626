//! Date and status calculations for memberships.
//!
//! Everything here is a pure function of its inputs: callers pass the
//! reference date explicitly, so results never depend on when the code runs.
//! Dates are `NaiveDate` (whole calendar days), which makes the
//! midnight-normalization the original rules demand true by construction.

use chrono::{Datelike, NaiveDate};

use crate::domain::models::Member;
use crate::domain::plan_catalog;

/// Whole days between the reference date and the membership end date.
///
/// Negative when the membership has already lapsed, zero when it ends today.
pub fn days_remaining(end: NaiveDate, reference: NaiveDate) -> i64 {
    end.signed_duration_since(reference).num_days()
}

/// Fail-soft ISO `YYYY-MM-DD` parsing. Malformed input is treated as
/// "no date"; it never produces an error.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// A member is active when they have a coverage end date that has not passed.
pub fn is_active(member: &Member, reference: NaiveDate) -> bool {
    match member.end_date {
        Some(end) => days_remaining(end, reference) >= 0,
        None => false,
    }
}

/// Whether a member owes a renewal for the given calendar month.
///
/// True when the member is on a paid plan and their coverage either ends
/// within `(month, year)` or already ended before `today`. The second arm
/// keeps lapsed members due in every later month until they renew.
pub fn is_due_for_payment(member: &Member, month: u32, year: i32, today: NaiveDate) -> bool {
    if plan_catalog::is_admission_pending(&member.plan) {
        return false;
    }
    let end = match member.end_date {
        Some(end) => end,
        None => return false,
    };
    (end.month() == month && end.year() == year) || end < today
}

/// Urgency bucket for an approaching (or passed) expiry date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryBucket {
    Expired,
    Today,
    OneDay,
    TwoDays,
    Later,
}

impl ExpiryBucket {
    pub fn classify(days: i64) -> Self {
        match days {
            d if d < 0 => ExpiryBucket::Expired,
            0 => ExpiryBucket::Today,
            1 => ExpiryBucket::OneDay,
            2 => ExpiryBucket::TwoDays,
            _ => ExpiryBucket::Later,
        }
    }

    /// Short status label for lists and reminder text.
    pub fn label(&self, days: i64) -> String {
        match self {
            ExpiryBucket::Expired => format!("Expired {} days ago", -days),
            ExpiryBucket::Today => "Expires today".to_string(),
            ExpiryBucket::OneDay => "Expires tomorrow".to_string(),
            ExpiryBucket::TwoDays => "Expires in 2 days".to_string(),
            ExpiryBucket::Later => format!("Expires in {} days", days),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn member_with(plan: &str, end: Option<NaiveDate>) -> Member {
        Member {
            member_id: 1,
            name: "Asha".to_string(),
            age: 29,
            gender: "female".to_string(),
            mobile: "9876543210".to_string(),
            address: "12 Lake Road".to_string(),
            plan: plan.to_string(),
            start_date: date(2025, 1, 1),
            end_date: end,
            amount: 600,
            is_active: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn days_remaining_is_zero_on_the_end_date() {
        let d = date(2025, 3, 15);
        assert_eq!(days_remaining(d, d), 0);
    }

    #[test]
    fn days_remaining_is_nonnegative_when_end_is_not_before_reference() {
        let a = date(2025, 1, 1);
        let b = date(2025, 2, 14);
        assert_eq!(days_remaining(b, a), 44);
        assert!(days_remaining(b, a) >= 0);
        assert_eq!(days_remaining(a, b), -44);
    }

    #[test]
    fn parse_date_is_fail_soft() {
        assert_eq!(parse_date("2025-03-01"), Some(date(2025, 3, 1)));
        assert_eq!(parse_date(" 2025-03-01 "), Some(date(2025, 3, 1)));
        assert_eq!(parse_date("01/03/2025"), None);
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("2025-02-30"), None);
    }

    #[test]
    fn active_requires_an_unexpired_end_date() {
        let today = date(2025, 6, 1);
        assert!(is_active(&member_with("1 Month", Some(date(2025, 6, 1))), today));
        assert!(is_active(&member_with("1 Month", Some(date(2025, 7, 1))), today));
        assert!(!is_active(&member_with("1 Month", Some(date(2025, 5, 31))), today));
        assert!(!is_active(&member_with("Admission Fee Pending", None), today));
    }

    #[test]
    fn due_when_end_date_falls_in_the_month() {
        let today = date(2025, 6, 10);
        let m = member_with("1 Month", Some(date(2025, 6, 25)));
        assert!(is_due_for_payment(&m, 6, 2025, today));
        assert!(!is_due_for_payment(&m, 7, 2025, today));
    }

    #[test]
    fn due_when_lapsed_regardless_of_month() {
        let today = date(2025, 6, 10);
        let m = member_with("2 Months", Some(date(2025, 3, 1)));
        assert!(is_due_for_payment(&m, 6, 2025, today));
    }

    #[test]
    fn admission_pending_members_are_never_due() {
        let today = date(2025, 6, 10);
        let m = member_with("Admission Fee Pending", Some(date(2025, 6, 15)));
        assert!(!is_due_for_payment(&m, 6, 2025, today));
        let m = member_with("Admission Fee Pending", None);
        assert!(!is_due_for_payment(&m, 6, 2025, today));
    }

    #[test]
    fn expiry_buckets() {
        assert_eq!(ExpiryBucket::classify(-5), ExpiryBucket::Expired);
        assert_eq!(ExpiryBucket::classify(0), ExpiryBucket::Today);
        assert_eq!(ExpiryBucket::classify(1), ExpiryBucket::OneDay);
        assert_eq!(ExpiryBucket::classify(2), ExpiryBucket::TwoDays);
        assert_eq!(ExpiryBucket::classify(3), ExpiryBucket::Later);
        assert_eq!(ExpiryBucket::classify(30), ExpiryBucket::Later);
    }

    #[test]
    fn expiry_labels() {
        assert_eq!(ExpiryBucket::Expired.label(-3), "Expired 3 days ago");
        assert_eq!(ExpiryBucket::Today.label(0), "Expires today");
        assert_eq!(ExpiryBucket::Later.label(12), "Expires in 12 days");
    }
}
