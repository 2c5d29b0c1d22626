//! Payment application and reversal.
//!
//! Applying a payment and reversing one are each two storage writes treated
//! as one logical transaction. The storage layer offers no atomicity across
//! the pair, so a failure after the first write is surfaced as
//! `DomainError::InconsistentState` naming the record that now needs manual
//! reconciliation.

use chrono::{Months, NaiveDate, Utc};
use log::{error, info};
use std::sync::Arc;

use crate::domain::commands::{
    ApplyPaymentCommand, ApplyPaymentResult, ReversePaymentCommand, ReversePaymentResult,
    SelectedPlan,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Payment, PaymentStatus};
use crate::domain::plan_catalog::{self, ADMISSION_FEE, BASE_PLAN};
use crate::storage::traits::{Connection, MemberStorage, PaymentStorage};

#[derive(Clone)]
pub struct PaymentService<C: Connection> {
    member_repository: Arc<C::MemberRepository>,
    payment_repository: Arc<C::PaymentRepository>,
}

impl<C: Connection> PaymentService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            member_repository: Arc::new(connection.create_member_repository()),
            payment_repository: Arc::new(connection.create_payment_repository()),
        }
    }

    /// Record a payment against today's date.
    pub fn apply_payment(&self, command: ApplyPaymentCommand) -> DomainResult<ApplyPaymentResult> {
        self.apply_payment_at(command, Utc::now().date_naive())
    }

    /// Record a payment with an explicit reference date, making the whole
    /// computation a pure function of its inputs.
    pub fn apply_payment_at(
        &self,
        command: ApplyPaymentCommand,
        today: NaiveDate,
    ) -> DomainResult<ApplyPaymentResult> {
        let payment_date = NaiveDate::from_ymd_opt(command.year, command.month, 1)
            .ok_or_else(|| {
                DomainError::Validation(format!(
                    "invalid attributed period: {}-{}",
                    command.year, command.month
                ))
            })?;

        let member = self
            .member_repository
            .get_member(command.member_id)?
            .ok_or_else(|| {
                DomainError::NotFound(format!("member {} not found", command.member_id))
            })?;

        let (new_plan, new_end, amount, coverage_start, duration_label) =
            match &command.selected_plan {
                SelectedPlan::AdmissionFee => {
                    // Admission alone does not extend coverage; it promotes
                    // the member onto the base plan.
                    let new_end = member.end_date.unwrap_or(today);
                    (
                        BASE_PLAN.to_string(),
                        new_end,
                        ADMISSION_FEE,
                        member.start_date,
                        format!("Admission Fee - ₹{}", ADMISSION_FEE),
                    )
                }
                SelectedPlan::Plan(value) => {
                    let entry = plan_catalog::lookup(value)
                        .filter(|e| e.duration_months > 0)
                        .ok_or_else(|| {
                            DomainError::Validation(format!("not a payable plan: {}", value))
                        })?;
                    // Never extend from a stale end date: a lapsed membership
                    // restarts from today rather than compounding missed
                    // months into the past.
                    let anchor = member.end_date.unwrap_or(today).max(today);
                    let new_end = anchor
                        .checked_add_months(Months::new(entry.duration_months))
                        .ok_or_else(|| {
                            DomainError::Validation("end date out of range".to_string())
                        })?;
                    (
                        entry.value.to_string(),
                        new_end,
                        entry.amount,
                        anchor,
                        format!("{} - ₹{}", entry.value, entry.amount),
                    )
                }
            };

        let payment = Payment {
            id: 0,
            member_id: member.member_id,
            name: member.name.clone(),
            plan: new_plan.clone(),
            duration: duration_label,
            amount,
            payment_date,
            start_date: coverage_start,
            end_date: new_end,
            status: PaymentStatus::Completed,
            created_at: Utc::now(),
        };
        let payment_id = self.payment_repository.store_payment(&payment)?;

        let mut updated_member = member;
        updated_member.plan = new_plan;
        updated_member.end_date = Some(new_end);
        updated_member.amount = amount;

        match self.member_repository.update_member(&updated_member) {
            Ok(affected) if affected > 0 => {}
            Ok(_) => {
                error!(
                    "Payment {} recorded but member {} vanished before update",
                    payment_id, updated_member.member_id
                );
                return Err(DomainError::InconsistentState(format!(
                    "payment {} was recorded but member {} could not be updated",
                    payment_id, updated_member.member_id
                )));
            }
            Err(e) => {
                error!(
                    "Payment {} recorded but member {} update failed: {}",
                    payment_id, updated_member.member_id, e
                );
                return Err(DomainError::InconsistentState(format!(
                    "payment {} was recorded but member {} could not be updated: {}",
                    payment_id, updated_member.member_id, e
                )));
            }
        }

        info!(
            "Applied payment {} for member {}: plan {}, coverage to {}",
            payment_id, updated_member.member_id, updated_member.plan, new_end
        );

        let mut stored_payment = payment;
        stored_payment.id = payment_id;
        Ok(ApplyPaymentResult {
            payment: stored_payment,
            updated_member,
        })
    }

    /// Delete a payment and restore the member's plan state from the next
    /// older ledger entry.
    pub fn reverse_payment(
        &self,
        command: ReversePaymentCommand,
    ) -> DomainResult<ReversePaymentResult> {
        let target = self
            .payment_repository
            .get_payment(command.payment_id)?
            .ok_or_else(|| {
                DomainError::NotFound(format!("payment {} not found", command.payment_id))
            })?;

        let ledger = self
            .payment_repository
            .list_payments_for_member(target.member_id)?;
        let position = ledger
            .iter()
            .position(|p| p.id == target.id)
            .ok_or_else(|| {
                DomainError::NotFound(format!("payment {} not found", command.payment_id))
            })?;

        // Ledger is newest first, so the last entry is the founding payment.
        let restore = match ledger.get(position + 1) {
            Some(older) => older,
            None => {
                return Err(DomainError::Validation(format!(
                    "payment {} is the founding payment and cannot be deleted",
                    target.id
                )));
            }
        };

        let mut member = self
            .member_repository
            .get_member(target.member_id)?
            .ok_or_else(|| {
                DomainError::NotFound(format!("member {} not found", target.member_id))
            })?;
        member.plan = restore.plan.clone();
        member.end_date = Some(restore.end_date);
        member.amount = restore.amount;

        if !self.payment_repository.delete_payment(target.id)? {
            return Err(DomainError::NotFound(format!(
                "payment {} not found",
                target.id
            )));
        }

        match self.member_repository.update_member(&member) {
            Ok(affected) if affected > 0 => {}
            Ok(_) => {
                error!(
                    "Payment {} deleted but member {} vanished before restore",
                    target.id, member.member_id
                );
                return Err(DomainError::InconsistentState(format!(
                    "payment {} was deleted but member {} could not be restored",
                    target.id, member.member_id
                )));
            }
            Err(e) => {
                error!(
                    "Payment {} deleted but member {} restore failed: {}",
                    target.id, member.member_id, e
                );
                return Err(DomainError::InconsistentState(format!(
                    "payment {} was deleted but member {} could not be restored: {}",
                    target.id, member.member_id, e
                )));
            }
        }

        info!(
            "Reversed payment {} for member {}: restored plan {} to {}",
            target.id, member.member_id, member.plan, restore.end_date
        );

        Ok(ReversePaymentResult {
            deleted_payment_id: target.id,
            updated_member: member,
        })
    }

    /// A member's ledger, newest first.
    pub fn list_payments_for_member(&self, member_id: u32) -> DomainResult<Vec<Payment>> {
        Ok(self.payment_repository.list_payments_for_member(member_id)?)
    }

    pub fn list_payments(&self) -> DomainResult<Vec<Payment>> {
        Ok(self.payment_repository.list_payments()?)
    }
}
