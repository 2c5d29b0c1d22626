//! Member enrollment and profile management.
//!
//! Validation happens before any write reaches storage: a command that fails
//! validation leaves the store untouched.

use chrono::{NaiveDate, Utc};
use log::{info, warn};
use std::sync::Arc;

use crate::domain::commands::{CreateMemberCommand, UpdateMemberCommand};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::membership;
use crate::domain::models::Member;
use crate::domain::plan_catalog;
use crate::storage::traits::{Connection, MemberStorage};

/// True iff the string is exactly 10 ASCII digits.
pub fn is_valid_mobile(mobile: &str) -> bool {
    mobile.len() == 10 && mobile.bytes().all(|b| b.is_ascii_digit())
}

#[derive(Clone)]
pub struct MemberService<C: Connection> {
    member_repository: Arc<C::MemberRepository>,
}

impl<C: Connection> MemberService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            member_repository: Arc::new(connection.create_member_repository()),
        }
    }

    /// Enroll a new member after validating the whole command.
    pub fn create_member(&self, command: CreateMemberCommand) -> DomainResult<Member> {
        Self::validate_create(&command)?;

        if self.member_repository.get_member(command.member_id)?.is_some() {
            return Err(DomainError::Validation(format!(
                "member id {} is already taken",
                command.member_id
            )));
        }

        let member = Member {
            member_id: command.member_id,
            name: command.name,
            age: command.age,
            gender: command.gender,
            mobile: command.mobile,
            address: command.address,
            plan: command.plan,
            start_date: command.start_date,
            end_date: command.end_date,
            amount: command.amount,
            is_active: None,
            created_at: Utc::now(),
        };
        self.member_repository.store_member(&member)?;
        info!("Enrolled member {} on plan {}", member.member_id, member.plan);
        Ok(member)
    }

    pub fn get_member(&self, member_id: u32) -> DomainResult<Member> {
        self.member_repository
            .get_member(member_id)?
            .ok_or_else(|| DomainError::NotFound(format!("member {} not found", member_id)))
    }

    pub fn list_members(&self) -> DomainResult<Vec<Member>> {
        Ok(self.member_repository.list_members()?)
    }

    /// Apply a partial profile update.
    pub fn update_member(&self, command: UpdateMemberCommand) -> DomainResult<Member> {
        if let Some(mobile) = &command.mobile {
            if !is_valid_mobile(mobile) {
                return Err(DomainError::Validation(
                    "mobile number must be exactly 10 digits".to_string(),
                ));
            }
        }

        let mut member = self.get_member(command.member_id)?;
        if let Some(name) = command.name {
            member.name = name;
        }
        if let Some(age) = command.age {
            member.age = age;
        }
        if let Some(gender) = command.gender {
            member.gender = gender;
        }
        if let Some(mobile) = command.mobile {
            member.mobile = mobile;
        }
        if let Some(address) = command.address {
            member.address = address;
        }
        if let Some(is_active) = command.is_active {
            member.is_active = Some(is_active);
        }

        let affected = self.member_repository.update_member(&member)?;
        if affected == 0 {
            // Deleted between the read and the write; report as missing.
            return Err(DomainError::NotFound(format!(
                "member {} not found",
                member.member_id
            )));
        }
        Ok(member)
    }

    /// Remove a member. Independent of payment history: ledger rows for the
    /// member are left in place for the accounting record.
    pub fn delete_member(&self, member_id: u32) -> DomainResult<()> {
        if !self.member_repository.delete_member(member_id)? {
            return Err(DomainError::NotFound(format!(
                "member {} not found",
                member_id
            )));
        }
        warn!("Deleted member {}", member_id);
        Ok(())
    }

    /// Members whose coverage ends within the next `days` days (inclusive,
    /// counting from `today`). Lapsed members are not included.
    pub fn members_expiring_in(&self, days: i64, today: NaiveDate) -> DomainResult<Vec<Member>> {
        let members = self.member_repository.list_members()?;
        Ok(members
            .into_iter()
            .filter(|m| match m.end_date {
                Some(end) => {
                    let remaining = membership::days_remaining(end, today);
                    (0..=days).contains(&remaining)
                }
                None => false,
            })
            .collect())
    }

    fn validate_create(command: &CreateMemberCommand) -> DomainResult<()> {
        if command.member_id == 0 {
            return Err(DomainError::Validation(
                "member id must be a positive integer".to_string(),
            ));
        }
        if command.name.trim().is_empty() {
            return Err(DomainError::Validation("name is required".to_string()));
        }
        if !is_valid_mobile(&command.mobile) {
            return Err(DomainError::Validation(
                "mobile number must be exactly 10 digits".to_string(),
            ));
        }
        if plan_catalog::lookup(&command.plan).is_none() {
            return Err(DomainError::Validation(format!(
                "unknown plan: {}",
                command.plan
            )));
        }
        if let Some(end) = command.end_date {
            if end < command.start_date {
                return Err(DomainError::Validation(
                    "end date cannot be before start date".to_string(),
                ));
            }
        }
        Ok(())
    }
}
