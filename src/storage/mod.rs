//! Persistence layer: traits the domain depends on plus the CSV backend.

pub mod csv;
pub mod traits;

pub use csv::CsvConnection;
pub use traits::{Connection, MemberStorage, PaymentStorage};
