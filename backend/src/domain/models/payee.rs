//! Domain errors for payee management.

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PayeeValidationError {
    #[error("Payee name cannot be empty")]
    EmptyName,
    #[error("Account number cannot be empty")]
    EmptyAccountNumber,
    #[error("Payee name must be at least {min} characters")]
    NameTooShort { min: usize },
    #[error("Account number must be at least {min} characters")]
    AccountNumberTooShort { min: usize },
    #[error("Payee with name '{existing_name}' or account number already exists")]
    AlreadyExists { existing_name: String },
    #[error("Payees could not be checked: {0}")]
    Storage(String),
}

impl From<anyhow::Error> for PayeeValidationError {
    fn from(error: anyhow::Error) -> Self {
        PayeeValidationError::Storage(error.to_string())
    }
}
