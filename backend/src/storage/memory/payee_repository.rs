use anyhow::Result;
use shared::Payee;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use super::connection::{read, write};
use crate::storage::traits::PayeeStorage;

#[derive(Clone)]
pub struct PayeeRepository {
    payees: Arc<RwLock<Vec<Payee>>>,
}

impl PayeeRepository {
    pub fn new(payees: Arc<RwLock<Vec<Payee>>>) -> Self {
        Self { payees }
    }
}

impl PayeeStorage for PayeeRepository {
    fn list_payees(&self) -> Result<Vec<Payee>> {
        Ok(read(&self.payees, "payee")?.clone())
    }

    fn get_payee(&self, payee_id: Uuid) -> Result<Option<Payee>> {
        let payees = read(&self.payees, "payee")?;
        Ok(payees.iter().find(|p| p.id == payee_id).cloned())
    }

    fn store_payee(&self, payee: &Payee) -> Result<()> {
        write(&self.payees, "payee")?.push(payee.clone());
        Ok(())
    }

    fn update_payee(&self, payee: &Payee) -> Result<bool> {
        let mut payees = write(&self.payees, "payee")?;
        match payees.iter_mut().find(|p| p.id == payee.id) {
            Some(existing) => {
                *existing = payee.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_then_update_in_place() {
        let repo = PayeeRepository::new(Arc::new(RwLock::new(Vec::new())));
        let first = Payee::new("Jo", "12345678");
        let second = Payee::new("Ann", "87654321");
        repo.store_payee(&first).unwrap();
        repo.store_payee(&second).unwrap();

        let mut renamed = first.clone();
        renamed.name = "Joanna".to_string();
        assert!(repo.update_payee(&renamed).unwrap());

        let payees = repo.list_payees().unwrap();
        assert_eq!(payees[0].name, "Joanna");
        assert_eq!(payees[1], second);
    }

    #[test]
    fn test_update_unknown_payee() {
        let repo = PayeeRepository::new(Arc::new(RwLock::new(Vec::new())));
        assert!(!repo.update_payee(&Payee::new("Ghost", "00000000")).unwrap());
        assert!(repo.list_payees().unwrap().is_empty());
    }
}
