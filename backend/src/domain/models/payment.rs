//! Domain model for payments and transfers.
use rust_decimal::Decimal;
use shared::{Account, Payee};

/// Outcome of a committed payment
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentReceipt {
    /// Source account after the debit
    pub from_account: Account,
    pub payee: Payee,
    pub amount: Decimal,
}

/// Outcome of a committed transfer
#[derive(Debug, Clone, PartialEq)]
pub struct TransferReceipt {
    /// Source account after the debit
    pub from_account: Account,
    /// Destination account after the credit
    pub to_account: Account,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PaymentError {
    #[error("Please select a source account")]
    NoSourceAccount,
    #[error("Please select a payee")]
    NoPayeeSelected,
    #[error("Please select a destination account")]
    NoDestinationAccount,
    #[error("Please enter a valid amount")]
    InvalidAmount,
    #[error("Cannot transfer to the same account")]
    SameAccountTransfer,
    #[error("Insufficient funds")]
    InsufficientFunds,
    #[error("Payment could not be completed: {0}")]
    Storage(String),
}

impl From<anyhow::Error> for PaymentError {
    fn from(error: anyhow::Error) -> Self {
        PaymentError::Storage(error.to_string())
    }
}
