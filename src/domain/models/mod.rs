//! Domain models for the gym tracker core.

pub mod member;
pub mod payment;

pub use member::Member;
pub use payment::{Payment, PaymentStatus};
