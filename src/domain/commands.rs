//! Command and result types for the domain services.
//!
//! Services take explicit command structs rather than bags of positional
//! arguments, and return result structs the presentation layer can serialize
//! as-is.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::models::{Member, Payment};

/// What the caller selected when recording a payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectedPlan {
    /// The one-time admission fee. Promotes an admission-pending member onto
    /// the base plan without extending coverage.
    AdmissionFee,
    /// A recurring plan from the catalog, by its plan value.
    Plan(String),
}

/// Record a payment against a member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyPaymentCommand {
    pub member_id: u32,
    pub selected_plan: SelectedPlan,
    /// Accounting period the payment is attributed to (1-12).
    pub month: u32,
    pub year: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplyPaymentResult {
    pub payment: Payment,
    pub updated_member: Member,
}

/// Delete a payment and restore the member's prior plan state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReversePaymentCommand {
    pub payment_id: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReversePaymentResult {
    pub deleted_payment_id: u64,
    pub updated_member: Member,
}

/// Enroll a new member. The id is assigned at the front desk, not generated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateMemberCommand {
    pub member_id: u32,
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub mobile: String,
    pub address: String,
    pub plan: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub amount: i64,
}

/// Partial update of a member's profile fields. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateMemberCommand {
    pub member_id: u32,
    pub name: Option<String>,
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub mobile: Option<String>,
    pub address: Option<String>,
    pub is_active: Option<bool>,
}
