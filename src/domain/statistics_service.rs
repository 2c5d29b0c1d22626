//! Membership and revenue statistics.

use chrono::{Datelike, NaiveDate, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::domain::errors::DomainResult;
use crate::domain::membership;
use crate::domain::models::{Member, Payment};
use crate::domain::plan_catalog::{self, ADMISSION_FEE};
use crate::storage::traits::{Connection, MemberStorage, PaymentStorage};

/// The dashboard numbers: received revenue plus two disjoint pending buckets
/// and their derived totals. Every leaf figure is exposed, nothing collapsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipStats {
    pub total_members: usize,
    pub active_members: usize,
    /// Sum of every payment ever recorded.
    pub total_received: i64,
    /// Sum of payments attributed to the reference calendar month.
    pub monthly_received: i64,
    /// One admission fee per member still on the admission-pending plan.
    pub admission_pending_amount: i64,
    pub admission_pending_count: usize,
    /// Renewals due this month with no payment attributed to this month.
    pub monthly_pending_amount: i64,
    pub monthly_pending_count: usize,
    /// Derived: the two pending buckets summed.
    pub pending_amount: i64,
    pub pending_members_count: usize,
}

/// Fold the member and payment lists into the dashboard numbers for the
/// calendar month containing `reference`.
pub fn compute_statistics(
    members: &[Member],
    payments: &[Payment],
    reference: NaiveDate,
) -> MembershipStats {
    let month = reference.month();
    let year = reference.year();

    let total_received = payments.iter().map(|p| p.amount).sum();
    let monthly_received = payments
        .iter()
        .filter(|p| p.payment_date.month() == month && p.payment_date.year() == year)
        .map(|p| p.amount)
        .sum();

    let mut stats = MembershipStats {
        total_members: members.len(),
        active_members: members
            .iter()
            .filter(|m| membership::is_active(m, reference))
            .count(),
        total_received,
        monthly_received,
        ..MembershipStats::default()
    };

    for member in members {
        if plan_catalog::is_admission_pending(&member.plan) {
            stats.admission_pending_count += 1;
            stats.admission_pending_amount += ADMISSION_FEE;
            continue;
        }
        if !membership::is_due_for_payment(member, month, year, reference) {
            continue;
        }
        let paid_this_month = payments.iter().any(|p| {
            p.member_id == member.member_id
                && p.payment_date.month() == month
                && p.payment_date.year() == year
        });
        if !paid_this_month {
            stats.monthly_pending_count += 1;
            stats.monthly_pending_amount += plan_catalog::renewal_price(&member.plan);
        }
    }

    stats.pending_amount = stats.admission_pending_amount + stats.monthly_pending_amount;
    stats.pending_members_count = stats.admission_pending_count + stats.monthly_pending_count;
    stats
}

#[derive(Clone)]
pub struct StatisticsService<C: Connection> {
    member_repository: Arc<C::MemberRepository>,
    payment_repository: Arc<C::PaymentRepository>,
}

impl<C: Connection> StatisticsService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            member_repository: Arc::new(connection.create_member_repository()),
            payment_repository: Arc::new(connection.create_payment_repository()),
        }
    }

    /// Statistics for the month containing today.
    pub fn get_statistics(&self) -> DomainResult<MembershipStats> {
        self.get_statistics_at(Utc::now().date_naive())
    }

    pub fn get_statistics_at(&self, reference: NaiveDate) -> DomainResult<MembershipStats> {
        let members = self.member_repository.list_members()?;
        let payments = self.payment_repository.list_payments()?;
        let stats = compute_statistics(&members, &payments, reference);
        info!(
            "Statistics for {}: {} members, {} active, pending ₹{}",
            reference.format("%Y-%m"),
            stats.total_members,
            stats.active_members,
            stats.pending_amount
        );
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::PaymentStatus;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn member(member_id: u32, plan: &str, end_date: Option<NaiveDate>) -> Member {
        Member {
            member_id,
            name: format!("Member {}", member_id),
            age: 30,
            gender: "male".to_string(),
            mobile: "9876543210".to_string(),
            address: "Main Road".to_string(),
            plan: plan.to_string(),
            start_date: date(2024, 12, 1),
            end_date,
            amount: 600,
            is_active: None,
            created_at: Utc::now(),
        }
    }

    fn payment(member_id: u32, amount: i64, payment_date: NaiveDate) -> Payment {
        Payment {
            id: 0,
            member_id,
            name: format!("Member {}", member_id),
            plan: "1 Month".to_string(),
            duration: "1 Month - ₹600".to_string(),
            amount,
            payment_date,
            start_date: payment_date,
            end_date: payment_date,
            status: PaymentStatus::Completed,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn received_totals_split_by_month() {
        let payments = vec![
            payment(1, 600, date(2025, 5, 1)),
            payment(2, 1200, date(2025, 6, 1)),
            payment(3, 800, date(2025, 6, 1)),
            payment(4, 600, date(2024, 6, 1)),
        ];
        let stats = compute_statistics(&[], &payments, date(2025, 6, 15));
        assert_eq!(stats.total_received, 3200);
        // Exact calendar month and year, not a rolling window.
        assert_eq!(stats.monthly_received, 2000);
    }

    #[test]
    fn admission_pending_charges_the_admission_fee_per_member() {
        let members = vec![
            member(1, "Admission Fee Pending", None),
            member(2, "Admission Fee Pending", None),
            member(3, "1 Month", Some(date(2025, 12, 1))),
        ];
        let stats = compute_statistics(&members, &[], date(2025, 6, 15));
        assert_eq!(stats.admission_pending_count, 2);
        assert_eq!(stats.admission_pending_amount, 1600);
        assert_eq!(stats.monthly_pending_count, 0);
    }

    #[test]
    fn monthly_pending_uses_catalog_prices_with_base_fallback() {
        let members = vec![
            member(1, "2 Months", Some(date(2025, 6, 20))),
            member(2, "mystery plan", Some(date(2025, 6, 25))),
            // Lapsed months ago, still owed.
            member(3, "3 Months", Some(date(2025, 2, 1))),
        ];
        let stats = compute_statistics(&members, &[], date(2025, 6, 15));
        assert_eq!(stats.monthly_pending_count, 3);
        assert_eq!(stats.monthly_pending_amount, 1200 + 600 + 1800);
    }

    #[test]
    fn a_payment_this_month_clears_the_pending_entry() {
        let members = vec![member(1, "1 Month", Some(date(2025, 6, 20)))];
        let paid = [payment(1, 600, date(2025, 6, 1))];

        let stats = compute_statistics(&members, &paid, date(2025, 6, 15));
        assert_eq!(stats.monthly_pending_count, 0);

        // A payment attributed to another month does not clear it.
        let paid_elsewhere = [payment(1, 600, date(2025, 5, 1))];
        let stats = compute_statistics(&members, &paid_elsewhere, date(2025, 6, 15));
        assert_eq!(stats.monthly_pending_count, 1);
    }

    #[test]
    fn derived_totals_are_the_sum_of_the_buckets() {
        let members = vec![
            member(1, "Admission Fee Pending", None),
            member(2, "1 Month", Some(date(2025, 6, 20))),
            member(3, "2 Months", Some(date(2025, 1, 5))),
            member(4, "1 Month", Some(date(2025, 9, 1))),
        ];
        let payments = vec![payment(3, 1200, date(2025, 6, 2))];

        let stats = compute_statistics(&members, &payments, date(2025, 6, 15));
        assert_eq!(
            stats.pending_amount,
            stats.admission_pending_amount + stats.monthly_pending_amount
        );
        assert_eq!(
            stats.pending_members_count,
            stats.admission_pending_count + stats.monthly_pending_count
        );
        assert_eq!(stats.admission_pending_count, 1);
        assert_eq!(stats.monthly_pending_count, 1);
        assert_eq!(stats.pending_amount, 800 + 600);
    }

    #[test]
    fn active_count_follows_end_dates() {
        let members = vec![
            member(1, "1 Month", Some(date(2025, 6, 15))),
            member(2, "1 Month", Some(date(2025, 6, 14))),
            member(3, "Admission Fee Pending", None),
        ];
        let stats = compute_statistics(&members, &[], date(2025, 6, 15));
        assert_eq!(stats.total_members, 3);
        assert_eq!(stats.active_members, 1);
    }
}
