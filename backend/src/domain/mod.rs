//! # Domain Module
//!
//! Business rules for the SampleBank demo: who may log in, when money may
//! move, and what counts as a valid payee.
//!
//! ## Module Organization
//!
//! - **session_service**: PIN checks and login rate limiting
//! - **payment_service**: Payments to payees and transfers between own accounts
//! - **payee_service**: Payee validation, creation and edits
//! - **activity_service**: Activity log records for every state change
//! - **currency**: Currency display, lenient parsing and amount input sanitizing
//! - **models**: Domain errors and receipts returned by the services
//!
//! ## Business Rules
//!
//! - A PIN is exactly five ASCII digits; five attempts in five minutes lock login
//! - Balances only change after every check on a draft has passed
//! - A transfer moves both legs in one storage update
//! - Payee names are unique ignoring case; account numbers are unique exactly
//! - Payment and transfer records store the amount negated
//!
//! Services are storage agnostic: each is generic over a
//! [`Connection`](crate::storage::Connection) and never touches the
//! in-memory store directly.

pub mod activity_service;
pub mod currency;
pub mod models;
pub mod payee_service;
pub mod payment_service;
pub mod session_service;

pub use activity_service::ActivityService;
pub use currency::{AmountInputError, CurrencyFormatter};
pub use models::payee::PayeeValidationError;
pub use models::payment::{PaymentError, PaymentReceipt, TransferReceipt};
pub use models::session::LoginError;
pub use payee_service::PayeeService;
pub use payment_service::PaymentService;
pub use session_service::SessionService;
