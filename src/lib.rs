//! Gym membership tracking core.
//!
//! Tracks members and their subscription plans, keeps a payment ledger,
//! computes dashboard statistics, and decides expiry reminders. The heart of
//! the crate is the lifecycle engine in [`domain::payment_service`]: applying
//! a payment extends or transitions a member's plan, and reversing one
//! restores the state the prior ledger entry recorded.
//!
//! The domain services are generic over [`storage::Connection`]; the bundled
//! backend is CSV files on disk. [`Backend`] wires everything together and
//! returns [`response::ApiResponse`] envelopes for a presentation layer.

pub mod domain;
pub mod response;
pub mod storage;

use chrono::NaiveDate;
use std::sync::Arc;

use domain::commands::{
    ApplyPaymentCommand, ApplyPaymentResult, CreateMemberCommand, ReversePaymentCommand,
    ReversePaymentResult, UpdateMemberCommand,
};
use domain::models::{Member, Payment};
use domain::notification_service::ReminderRequest;
use domain::{
    MemberService, MembershipStats, NotificationService, PaymentService, StatisticsService,
};
use response::ApiResponse;
use storage::CsvConnection;

/// All services wired over one shared storage connection.
#[derive(Clone)]
pub struct Backend {
    pub member_service: MemberService<CsvConnection>,
    pub payment_service: PaymentService<CsvConnection>,
    pub statistics_service: StatisticsService<CsvConnection>,
    pub notification_service: NotificationService<CsvConnection>,
}

impl Backend {
    pub fn new(connection: CsvConnection) -> Self {
        let connection = Arc::new(connection);
        Self {
            member_service: MemberService::new(connection.clone()),
            payment_service: PaymentService::new(connection.clone()),
            statistics_service: StatisticsService::new(connection.clone()),
            notification_service: NotificationService::new(connection),
        }
    }

    /// Open the default data directory under the user's home.
    pub fn new_default() -> anyhow::Result<Self> {
        Ok(Self::new(CsvConnection::new_default()?))
    }

    pub fn create_member(&self, command: CreateMemberCommand) -> ApiResponse<Member> {
        self.member_service.create_member(command).into()
    }

    pub fn get_member(&self, member_id: u32) -> ApiResponse<Member> {
        self.member_service.get_member(member_id).into()
    }

    pub fn list_members(&self) -> ApiResponse<Vec<Member>> {
        self.member_service.list_members().into()
    }

    pub fn update_member(&self, command: UpdateMemberCommand) -> ApiResponse<Member> {
        self.member_service.update_member(command).into()
    }

    pub fn delete_member(&self, member_id: u32) -> ApiResponse<()> {
        self.member_service.delete_member(member_id).into()
    }

    pub fn members_expiring_in(&self, days: i64, today: NaiveDate) -> ApiResponse<Vec<Member>> {
        self.member_service.members_expiring_in(days, today).into()
    }

    pub fn apply_payment(&self, command: ApplyPaymentCommand) -> ApiResponse<ApplyPaymentResult> {
        self.payment_service.apply_payment(command).into()
    }

    pub fn reverse_payment(
        &self,
        command: ReversePaymentCommand,
    ) -> ApiResponse<ReversePaymentResult> {
        self.payment_service.reverse_payment(command).into()
    }

    pub fn list_payments_for_member(&self, member_id: u32) -> ApiResponse<Vec<Payment>> {
        self.payment_service.list_payments_for_member(member_id).into()
    }

    pub fn get_statistics(&self) -> ApiResponse<MembershipStats> {
        self.statistics_service.get_statistics().into()
    }

    pub fn due_reminders(&self) -> ApiResponse<Vec<ReminderRequest>> {
        self.notification_service.due_reminders().into()
    }
}
