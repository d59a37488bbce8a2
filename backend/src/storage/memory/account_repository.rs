use anyhow::{anyhow, Result};
use rust_decimal::Decimal;
use shared::Account;
use std::sync::{Arc, RwLock};
use tracing::debug;
use uuid::Uuid;

use super::connection::{read, write};
use crate::storage::traits::AccountStorage;

#[derive(Clone)]
pub struct AccountRepository {
    accounts: Arc<RwLock<Vec<Account>>>,
}

impl AccountRepository {
    pub fn new(accounts: Arc<RwLock<Vec<Account>>>) -> Self {
        Self { accounts }
    }
}

impl AccountStorage for AccountRepository {
    fn list_accounts(&self) -> Result<Vec<Account>> {
        Ok(read(&self.accounts, "account")?.clone())
    }

    fn get_account(&self, account_id: Uuid) -> Result<Option<Account>> {
        let accounts = read(&self.accounts, "account")?;
        Ok(accounts.iter().find(|a| a.id == account_id).cloned())
    }

    fn first_account(&self) -> Result<Option<Account>> {
        Ok(read(&self.accounts, "account")?.first().cloned())
    }

    fn update_account_balances(&self, updates: &[(Uuid, Decimal)]) -> Result<Vec<Account>> {
        let mut accounts = write(&self.accounts, "account")?;

        // Resolve every index before touching anything
        let mut indexes = Vec::with_capacity(updates.len());
        for (account_id, _) in updates {
            let index = accounts
                .iter()
                .position(|a| a.id == *account_id)
                .ok_or_else(|| anyhow!("Account {} not found", account_id))?;
            indexes.push(index);
        }

        let mut updated = Vec::with_capacity(updates.len());
        for (index, (_, balance)) in indexes.into_iter().zip(updates) {
            debug!(
                "Balance update: {} {} -> {}",
                accounts[index].name, accounts[index].balance, balance
            );
            let next = accounts[index].with_balance(*balance);
            accounts[index] = next.clone();
            updated.push(next);
        }

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::seed;

    fn repository() -> AccountRepository {
        AccountRepository::new(Arc::new(RwLock::new(seed::accounts())))
    }

    #[test]
    fn test_get_and_first_account() {
        let repo = repository();
        let first = repo.first_account().unwrap().unwrap();
        assert_eq!(first.name, "Rapid Save");
        assert_eq!(repo.get_account(first.id).unwrap(), Some(first));
        assert_eq!(repo.get_account(Uuid::new_v4()).unwrap(), None);
    }

    #[test]
    fn test_update_two_balances() {
        let repo = repository();
        let accounts = repo.list_accounts().unwrap();
        let (a, b) = (&accounts[0], &accounts[1]);

        let updated = repo
            .update_account_balances(&[(a.id, Decimal::new(4900_00, 2)), (b.id, Decimal::new(7600_00, 2))])
            .unwrap();

        assert_eq!(updated.len(), 2);
        assert_eq!(updated[0].balance, Decimal::new(4900_00, 2));
        assert_eq!(updated[1].balance, Decimal::new(7600_00, 2));
        assert_eq!(repo.get_account(b.id).unwrap().unwrap().balance, Decimal::new(7600_00, 2));
    }

    #[test]
    fn test_update_with_unknown_id_changes_nothing() {
        let repo = repository();
        let before = repo.list_accounts().unwrap();

        let result = repo.update_account_balances(&[
            (before[0].id, Decimal::ZERO),
            (Uuid::new_v4(), Decimal::ONE),
        ]);

        assert!(result.is_err());
        assert_eq!(repo.list_accounts().unwrap(), before);
    }
}
