//! Persistence traits the domain services depend on.
//!
//! The domain layer never touches files or a database directly; it asks a
//! `Connection` for repositories and calls these traits. Any backend that can
//! answer them works, which is also what makes the services testable with
//! in-memory doubles.

use anyhow::Result;

use crate::domain::models::{Member, Payment};

/// Member record persistence.
pub trait MemberStorage: Send + Sync {
    /// Persist a new member. Fails if the id is already taken.
    fn store_member(&self, member: &Member) -> Result<()>;

    /// Fetch a member by id.
    fn get_member(&self, member_id: u32) -> Result<Option<Member>>;

    /// All members, in stored order.
    fn list_members(&self) -> Result<Vec<Member>>;

    /// Overwrite an existing member record. Returns the number of rows
    /// affected (0 when the id does not exist).
    fn update_member(&self, member: &Member) -> Result<usize>;

    /// Remove a member. Returns true if a record was deleted.
    fn delete_member(&self, member_id: u32) -> Result<bool>;
}

/// Payment ledger persistence.
pub trait PaymentStorage: Send + Sync {
    /// Persist a new payment, assigning its id. Returns the assigned id.
    fn store_payment(&self, payment: &Payment) -> Result<u64>;

    /// Fetch a payment by id.
    fn get_payment(&self, payment_id: u64) -> Result<Option<Payment>>;

    /// All payments, in stored order.
    fn list_payments(&self) -> Result<Vec<Payment>>;

    /// A member's ledger, newest first: `payment_date` descending, ties
    /// broken by `id` descending (insertion order).
    fn list_payments_for_member(&self, member_id: u32) -> Result<Vec<Payment>>;

    /// Remove a payment. Returns true if a record was deleted.
    fn delete_payment(&self, payment_id: u64) -> Result<bool>;
}

/// A storage backend: hands out repositories sharing one underlying store.
pub trait Connection: Send + Sync {
    type MemberRepository: MemberStorage;
    type PaymentRepository: PaymentStorage;

    fn create_member_repository(&self) -> Self::MemberRepository;
    fn create_payment_repository(&self) -> Self::PaymentRepository;
}
