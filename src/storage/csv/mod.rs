//! CSV file storage backend.

pub mod connection;
pub mod member_repository;
pub mod payment_repository;
#[cfg(test)]
pub mod test_utils;

pub use connection::CsvConnection;
pub use member_repository::MemberRepository;
pub use payment_repository::PaymentRepository;
