use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use shared::{Account, ActivityRecord, Payee};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::info;

use super::{seed, AccountRepository, ActivityRepository, PayeeRepository};
use crate::storage::traits::Connection;

/// Shared in-memory store. Cloning yields another handle onto the same data.
#[derive(Clone, Default)]
pub struct MemoryConnection {
    accounts: Arc<RwLock<Vec<Account>>>,
    payees: Arc<RwLock<Vec<Payee>>>,
    activities: Arc<RwLock<Vec<ActivityRecord>>>,
}

impl MemoryConnection {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding the demo accounts, payee and activity history, with
    /// history timestamps relative to `now`
    pub fn seeded(now: DateTime<Utc>) -> Self {
        let accounts = seed::accounts();
        let payees = seed::payees();
        let activities = seed::activities(now);
        info!(
            "Seeding memory store with {} accounts, {} payees, {} activities",
            accounts.len(),
            payees.len(),
            activities.len()
        );
        Self::with_data(accounts, payees, activities)
    }

    /// Store holding exactly the given data. `activities` must be newest first.
    pub fn with_data(accounts: Vec<Account>, payees: Vec<Payee>, activities: Vec<ActivityRecord>) -> Self {
        Self {
            accounts: Arc::new(RwLock::new(accounts)),
            payees: Arc::new(RwLock::new(payees)),
            activities: Arc::new(RwLock::new(activities)),
        }
    }
}

impl Connection for MemoryConnection {
    type AccountRepository = AccountRepository;
    type PayeeRepository = PayeeRepository;
    type ActivityRepository = ActivityRepository;

    fn create_account_repository(&self) -> AccountRepository {
        AccountRepository::new(self.accounts.clone())
    }

    fn create_payee_repository(&self) -> PayeeRepository {
        PayeeRepository::new(self.payees.clone())
    }

    fn create_activity_repository(&self) -> ActivityRepository {
        ActivityRepository::new(self.activities.clone())
    }
}

#[cfg(test)]
impl MemoryConnection {
    /// Poison the payee lock by panicking while holding it
    pub(crate) fn poison_payees(&self) {
        let payees = self.payees.clone();
        let _ = std::thread::spawn(move || {
            let _guard = payees.write();
            panic!("poisoning payee store");
        })
        .join();
    }
}

pub(crate) fn read<'a, T>(lock: &'a RwLock<T>, what: &str) -> Result<RwLockReadGuard<'a, T>> {
    lock.read().map_err(|_| anyhow!("{} store lock poisoned", what))
}

pub(crate) fn write<'a, T>(lock: &'a RwLock<T>, what: &str) -> Result<RwLockWriteGuard<'a, T>> {
    lock.write().map_err(|_| anyhow!("{} store lock poisoned", what))
}
