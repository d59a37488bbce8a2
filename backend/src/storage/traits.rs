//! # Storage Traits
//!
//! Abstractions the domain layer depends on. Implementations decide how the
//! data is held; the services only see these interfaces.

use anyhow::Result;
use rust_decimal::Decimal;
use shared::{Account, ActivityRecord, Payee};
use uuid::Uuid;

/// Interface for account storage operations
pub trait AccountStorage: Send + Sync {
    /// All accounts in display order
    fn list_accounts(&self) -> Result<Vec<Account>>;

    fn get_account(&self, account_id: Uuid) -> Result<Option<Account>>;

    /// The account payment drafts default to
    fn first_account(&self) -> Result<Option<Account>>;

    /// Set several balances atomically.
    ///
    /// Either every id is found and every balance replaced, or nothing
    /// changes and an error is returned. Returns the updated accounts in the
    /// order of `updates`.
    fn update_account_balances(&self, updates: &[(Uuid, Decimal)]) -> Result<Vec<Account>>;
}

/// Interface for payee storage operations
pub trait PayeeStorage: Send + Sync {
    fn list_payees(&self) -> Result<Vec<Payee>>;

    fn get_payee(&self, payee_id: Uuid) -> Result<Option<Payee>>;

    /// Append a new payee
    fn store_payee(&self, payee: &Payee) -> Result<()>;

    /// Replace the payee with the same id in place.
    /// Returns false if no payee has that id.
    fn update_payee(&self, payee: &Payee) -> Result<bool>;
}

/// Interface for the append-only activity log
pub trait ActivityStorage: Send + Sync {
    /// Prepend a record so the log stays newest first
    fn record_activity(&self, activity: &ActivityRecord) -> Result<()>;

    /// Records newest first, optionally truncated to `limit`
    fn list_activities(&self, limit: Option<usize>) -> Result<Vec<ActivityRecord>>;
}

/// Factory for repositories that share one underlying store
pub trait Connection: Send + Sync + Clone {
    type AccountRepository: AccountStorage;
    type PayeeRepository: PayeeStorage;
    type ActivityRepository: ActivityStorage;

    fn create_account_repository(&self) -> Self::AccountRepository;

    fn create_payee_repository(&self) -> Self::PayeeRepository;

    fn create_activity_repository(&self) -> Self::ActivityRepository;
}
