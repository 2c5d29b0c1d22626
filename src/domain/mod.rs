//! Domain layer: models, services, and the calculations behind them.

pub mod commands;
pub mod errors;
pub mod member_service;
pub mod membership;
pub mod models;
pub mod notification_service;
pub mod payment_service;
pub mod plan_catalog;
pub mod statistics_service;

pub use errors::{DomainError, DomainResult};
pub use member_service::MemberService;
pub use notification_service::NotificationService;
pub use payment_service::PaymentService;
pub use statistics_service::{MembershipStats, StatisticsService};
