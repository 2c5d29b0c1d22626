//! Expiry reminder policy.
//!
//! Decides whether a reminder should fire and how urgent it is. Message
//! composition and delivery belong to the caller; this module only supplies
//! the decision and the data a sender needs.

use chrono::{NaiveDate, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::sync::Arc;

use crate::domain::errors::DomainResult;
use crate::domain::member_service::is_valid_mobile;
use crate::domain::membership;
use crate::storage::traits::{Connection, MemberStorage};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReminderTier {
    Critical,
    High,
    Medium,
    Low,
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderDecision {
    pub tier: Option<ReminderTier>,
    pub should_notify: bool,
}

/// Map days-remaining to an urgency tier.
///
/// Day 7 gets its own Low tier (the weekly heads-up) ahead of the general
/// 3-30 day Info window; beyond 30 days nothing fires.
pub fn classify(days_remaining: i64) -> ReminderDecision {
    let tier = match days_remaining {
        d if d < 0 => Some(ReminderTier::Critical),
        0 | 1 => Some(ReminderTier::High),
        2 => Some(ReminderTier::Medium),
        7 => Some(ReminderTier::Low),
        3..=30 => Some(ReminderTier::Info),
        _ => None,
    };
    ReminderDecision {
        tier,
        should_notify: tier.is_some(),
    }
}

/// Everything a delivery collaborator needs to send one reminder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReminderRequest {
    pub member_id: u32,
    pub name: String,
    pub plan: String,
    pub end_date: NaiveDate,
    pub mobile: String,
    pub tier: ReminderTier,
    pub days_remaining: i64,
}

#[derive(Clone)]
pub struct NotificationService<C: Connection> {
    member_repository: Arc<C::MemberRepository>,
}

impl<C: Connection> NotificationService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            member_repository: Arc::new(connection.create_member_repository()),
        }
    }

    /// Reminders for members expiring within the next week.
    pub fn due_reminders(&self) -> DomainResult<Vec<ReminderRequest>> {
        self.due_reminders_in_window(0..=7, Utc::now().date_naive())
    }

    /// Reminders for members whose days-remaining falls in `window`.
    ///
    /// Members without an end date or without a deliverable 10-digit mobile
    /// number are skipped; they cannot be reached anyway.
    pub fn due_reminders_in_window(
        &self,
        window: RangeInclusive<i64>,
        today: NaiveDate,
    ) -> DomainResult<Vec<ReminderRequest>> {
        let members = self.member_repository.list_members()?;
        let mut requests = Vec::new();

        for member in members {
            let end_date = match member.end_date {
                Some(end) => end,
                None => continue,
            };
            if !is_valid_mobile(&member.mobile) {
                continue;
            }
            let days = membership::days_remaining(end_date, today);
            if !window.contains(&days) {
                continue;
            }
            if let Some(tier) = classify(days).tier {
                requests.push(ReminderRequest {
                    member_id: member.member_id,
                    name: member.name,
                    plan: member.plan,
                    end_date,
                    mobile: member.mobile,
                    tier,
                    days_remaining: days,
                });
            }
        }

        info!(
            "{} reminders due in window {:?} as of {}",
            requests.len(),
            window,
            today
        );
        Ok(requests)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Member;
    use crate::storage::csv::test_utils::test_connection;
    use crate::storage::traits::MemberStorage;
    use crate::storage::CsvConnection;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn tier_ladder() {
        assert_eq!(classify(-3).tier, Some(ReminderTier::Critical));
        assert_eq!(classify(-1).tier, Some(ReminderTier::Critical));
        assert_eq!(classify(0).tier, Some(ReminderTier::High));
        assert_eq!(classify(1).tier, Some(ReminderTier::High));
        assert_eq!(classify(2).tier, Some(ReminderTier::Medium));
        assert_eq!(classify(7).tier, Some(ReminderTier::Low));
        assert_eq!(classify(3).tier, Some(ReminderTier::Info));
        assert_eq!(classify(30).tier, Some(ReminderTier::Info));
    }

    #[test]
    fn nothing_fires_beyond_thirty_days() {
        assert!(!classify(31).should_notify);
        assert!(!classify(35).should_notify);
        assert_eq!(classify(35).tier, None);
        assert!(classify(30).should_notify);
    }

    fn store_member(
        repo: &impl MemberStorage,
        member_id: u32,
        mobile: &str,
        end_date: Option<NaiveDate>,
    ) {
        repo.store_member(&Member {
            member_id,
            name: format!("Member {}", member_id),
            age: 30,
            gender: "male".to_string(),
            mobile: mobile.to_string(),
            address: "Park Lane".to_string(),
            plan: "1 Month".to_string(),
            start_date: date(2025, 1, 1),
            end_date,
            amount: 600,
            is_active: None,
            created_at: Utc::now(),
        })
        .unwrap();
    }

    fn service() -> (NotificationService<CsvConnection>, CsvConnection, TempDir) {
        let (connection, temp_dir) = test_connection().unwrap();
        let service = NotificationService::new(Arc::new(connection.clone()));
        (service, connection, temp_dir)
    }

    #[test]
    fn default_window_collects_the_coming_week() {
        let (service, connection, _dir) = service();
        let repo = connection.create_member_repository();
        let today = date(2025, 6, 10);

        store_member(&repo, 1, "9876543210", Some(date(2025, 6, 10)));
        store_member(&repo, 2, "9876543211", Some(date(2025, 6, 17)));
        store_member(&repo, 3, "9876543212", Some(date(2025, 6, 18)));
        store_member(&repo, 4, "9876543213", Some(date(2025, 6, 9)));

        let reminders = service.due_reminders_in_window(0..=7, today).unwrap();
        let ids: Vec<u32> = reminders.iter().map(|r| r.member_id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(reminders[0].tier, ReminderTier::High);
        assert_eq!(reminders[1].tier, ReminderTier::Low);
    }

    #[test]
    fn unreachable_members_are_skipped() {
        let (service, connection, _dir) = service();
        let repo = connection.create_member_repository();
        let today = date(2025, 6, 10);

        store_member(&repo, 1, "12345", Some(date(2025, 6, 12)));
        store_member(&repo, 2, "9876543210", None);

        assert!(service.due_reminders_in_window(0..=7, today).unwrap().is_empty());
    }

    #[test]
    fn a_wider_window_includes_lapsed_members() {
        let (service, connection, _dir) = service();
        let repo = connection.create_member_repository();
        let today = date(2025, 6, 10);

        store_member(&repo, 1, "9876543210", Some(date(2025, 6, 5)));

        let reminders = service.due_reminders_in_window(-30..=7, today).unwrap();
        assert_eq!(reminders.len(), 1);
        assert_eq!(reminders[0].tier, ReminderTier::Critical);
        assert_eq!(reminders[0].days_remaining, -5);
    }
}
