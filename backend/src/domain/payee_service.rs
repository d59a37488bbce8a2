//! Payee validation and management.
use anyhow::Result;
use shared::{BankConfig, Payee};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::domain::models::payee::PayeeValidationError;
use crate::storage::{Connection, PayeeStorage};

pub struct PayeeService<C: Connection> {
    payee_repository: C::PayeeRepository,
    min_name_length: usize,
    min_account_number_length: usize,
}

impl<C: Connection> PayeeService<C> {
    /// Create a new PayeeService using the configured length limits
    pub fn new(connection: Arc<C>, config: &BankConfig) -> Self {
        Self {
            payee_repository: connection.create_payee_repository(),
            min_name_length: config.min_payee_name_length,
            min_account_number_length: config.min_account_number_length,
        }
    }

    /// Check a new payee form. Both fields are trimmed before any rule runs,
    /// and nothing is stored.
    pub fn validate_new_payee(&self, name: &str, account_number: &str) -> Result<(), PayeeValidationError> {
        let name = name.trim();
        let account_number = account_number.trim();

        if name.is_empty() {
            return Err(PayeeValidationError::EmptyName);
        }
        if account_number.is_empty() {
            return Err(PayeeValidationError::EmptyAccountNumber);
        }
        if name.chars().count() < self.min_name_length {
            return Err(PayeeValidationError::NameTooShort {
                min: self.min_name_length,
            });
        }
        if account_number.chars().count() < self.min_account_number_length {
            return Err(PayeeValidationError::AccountNumberTooShort {
                min: self.min_account_number_length,
            });
        }

        let lowered = name.to_lowercase();
        let existing = self.payee_repository.list_payees().inspect_err(|e| {
            error!("Could not list payees for duplicate check: {}", e);
        })?;
        if let Some(conflict) = existing
            .iter()
            .find(|p| p.name.to_lowercase() == lowered || p.account_number == account_number)
        {
            return Err(PayeeValidationError::AlreadyExists {
                existing_name: conflict.name.clone(),
            });
        }

        Ok(())
    }

    /// Store a new payee from trimmed input. Callers validate first.
    pub fn add_new_payee(&self, name: &str, account_number: &str) -> Result<Payee> {
        let payee = Payee::new(name.trim(), account_number.trim());
        self.payee_repository.store_payee(&payee)?;
        info!("Added new payee: {}", payee.name);
        Ok(payee)
    }

    /// Replace an existing payee, recomputing its initials from the new name.
    /// Returns the stored payee, or None if the id is unknown.
    pub fn update_payee(&self, payee: &Payee) -> Result<Option<Payee>> {
        let updated = Payee {
            initials: Payee::derive_initials(&payee.name),
            ..payee.clone()
        };
        if self.payee_repository.update_payee(&updated)? {
            info!("Updated payee: {}", updated.name);
            Ok(Some(updated))
        } else {
            warn!("Payee {} not found for update", payee.id);
            Ok(None)
        }
    }

    /// List all payees in the order they were added
    pub fn list_payees(&self) -> Result<Vec<Payee>> {
        self.payee_repository.list_payees()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryConnection;
    use chrono::Utc;

    fn setup_test() -> PayeeService<MemoryConnection> {
        PayeeService::new(Arc::new(MemoryConnection::seeded(Utc::now())), &BankConfig::default())
    }

    #[test]
    fn test_validation_rules_in_order() {
        let service = setup_test();

        assert_eq!(service.validate_new_payee("   ", ""), Err(PayeeValidationError::EmptyName));
        assert_eq!(service.validate_new_payee("J", "  "), Err(PayeeValidationError::EmptyAccountNumber));
        assert_eq!(
            service.validate_new_payee(" J ", "1234"),
            Err(PayeeValidationError::NameTooShort { min: 2 })
        );
        assert_eq!(
            service.validate_new_payee("Jo", "1234567"),
            Err(PayeeValidationError::AccountNumberTooShort { min: 8 })
        );
        assert_eq!(service.validate_new_payee("  Jo  ", " 12345678 "), Ok(()));
    }

    #[test]
    fn test_validation_messages() {
        let service = setup_test();

        let error = service.validate_new_payee("J", "12345678").unwrap_err();
        assert_eq!(error.to_string(), "Payee name must be at least 2 characters");

        let error = service.validate_new_payee("Jo", "123").unwrap_err();
        assert_eq!(error.to_string(), "Account number must be at least 8 characters");
    }

    #[test]
    fn test_duplicate_name_is_case_insensitive() {
        let service = setup_test();
        service.add_new_payee("Jo", "12345678").unwrap();

        let error = service.validate_new_payee("jo", "99999999").unwrap_err();
        assert_eq!(error.to_string(), "Payee with name 'Jo' or account number already exists");

        assert!(service.validate_new_payee("Someone Else", "12345678").is_err());
        assert!(service.validate_new_payee("JOHN SMITH", "87654321").is_err());
    }

    #[test]
    fn test_unreadable_store_fails_validation() {
        let connection = Arc::new(MemoryConnection::seeded(Utc::now()));
        let service: PayeeService<MemoryConnection> = PayeeService::new(connection.clone(), &BankConfig::default());
        connection.poison_payees();

        let result = service.validate_new_payee("John Smith", "02-1234-5678901-002");

        assert!(matches!(result, Err(PayeeValidationError::Storage(_))));
    }

    #[test]
    fn test_add_trims_and_derives_initials() {
        let service = setup_test();

        let payee = service.add_new_payee("  alice brown ", " 01-0001-0000001-00 ").unwrap();

        assert_eq!(payee.name, "alice brown");
        assert_eq!(payee.account_number, "01-0001-0000001-00");
        assert_eq!(payee.initials, "AL");
        assert_eq!(service.list_payees().unwrap().len(), 2);
        assert!(service.list_payees().unwrap().contains(&payee));
    }

    #[test]
    fn test_add_does_not_revalidate() {
        let service = setup_test();
        service.add_new_payee("x", "1").unwrap();
        assert_eq!(service.list_payees().unwrap().len(), 2);
    }

    #[test]
    fn test_update_payee() {
        let service = setup_test();
        let mut payee = service.list_payees().unwrap().remove(0);
        payee.name = "Mary Jones".to_string();

        let updated = service.update_payee(&payee).unwrap().unwrap();

        assert_eq!(updated.initials, "MA");
        assert_eq!(service.list_payees().unwrap()[0].name, "Mary Jones");
        assert_eq!(service.update_payee(&Payee::new("Ghost", "00000000")).unwrap(), None);
    }
}
