//! Payments to payees and transfers between the customer's own accounts.
//!
//! Both operations validate the draft in a fixed order and stop at the first
//! failure. Balances are written only after every check has passed, and the
//! two legs of a transfer go to storage as one atomic update.

use rust_decimal::Decimal;
use shared::{Account, PaymentDraft};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{error, info};

use crate::domain::models::payment::{PaymentError, PaymentReceipt, TransferReceipt};
use crate::storage::{AccountStorage, Connection, PayeeStorage};

pub struct PaymentService<C: Connection> {
    account_repository: C::AccountRepository,
    payee_repository: C::PayeeRepository,
}

impl<C: Connection> PaymentService<C> {
    /// Create a new PaymentService
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            account_repository: connection.create_account_repository(),
            payee_repository: connection.create_payee_repository(),
        }
    }

    /// Pay the draft's payee from the draft's source account
    pub fn make_payment(&self, draft: &PaymentDraft) -> Result<PaymentReceipt, PaymentError> {
        let from_account = self.resolve_account(draft.from_account)?.ok_or_else(|| {
            error!("Payment failed: No source account selected");
            PaymentError::NoSourceAccount
        })?;

        let payee = match draft.to_payee {
            Some(payee_id) => self.payee_repository.get_payee(payee_id)?,
            None => None,
        }
        .ok_or_else(|| {
            error!("Payment failed: No payee selected");
            PaymentError::NoPayeeSelected
        })?;

        let amount = Self::parse_amount(&draft.amount).inspect_err(|_| {
            error!("Payment failed: Invalid amount");
        })?;

        if from_account.balance < amount {
            error!("Insufficient funds for payment");
            return Err(PaymentError::InsufficientFunds);
        }

        let from_account = self
            .account_repository
            .update_account_balances(&[(from_account.id, from_account.balance - amount)])?
            .into_iter()
            .next()
            .ok_or_else(|| PaymentError::Storage("payment did not update the source account".to_string()))?;

        info!(
            "Payment successful: {} from {} to {}",
            amount, from_account.name, payee.name
        );
        Ok(PaymentReceipt {
            from_account,
            payee,
            amount,
        })
    }

    /// Move money between two of the customer's accounts
    pub fn transfer_money(&self, draft: &PaymentDraft) -> Result<TransferReceipt, PaymentError> {
        let from_account = self.resolve_account(draft.from_account)?.ok_or_else(|| {
            error!("Transfer failed: No source account selected");
            PaymentError::NoSourceAccount
        })?;

        let to_account = self.resolve_account(draft.to_account)?.ok_or_else(|| {
            error!("Transfer failed: No destination account selected");
            PaymentError::NoDestinationAccount
        })?;

        let amount = Self::parse_amount(&draft.amount).inspect_err(|_| {
            error!("Transfer failed: Invalid amount");
        })?;

        if from_account.id == to_account.id {
            error!("Attempted transfer to same account");
            return Err(PaymentError::SameAccountTransfer);
        }

        if from_account.balance < amount {
            error!("Insufficient funds for transfer");
            return Err(PaymentError::InsufficientFunds);
        }

        let updated = self.account_repository.update_account_balances(&[
            (from_account.id, from_account.balance - amount),
            (to_account.id, to_account.balance + amount),
        ])?;
        let [from_after, to_after]: [Account; 2] = updated
            .try_into()
            .map_err(|_| PaymentError::Storage("transfer did not update both accounts".to_string()))?;

        info!(
            "Transfer balance update: {} {} -> {}, {} {} -> {}",
            from_after.name,
            from_account.balance,
            from_after.balance,
            to_after.name,
            to_account.balance,
            to_after.balance
        );
        info!(
            "Transfer successful: {} from {} to {}",
            amount, from_after.name, to_after.name
        );
        Ok(TransferReceipt {
            from_account: from_after,
            to_account: to_after,
            amount,
        })
    }

    /// Parse a typed amount, accepting only positive decimals
    pub fn parse_amount(input: &str) -> Result<Decimal, PaymentError> {
        // Decimal::from_str tolerates digit-group underscores
        if input.is_empty() || input.contains('_') {
            return Err(PaymentError::InvalidAmount);
        }
        match Decimal::from_str(input) {
            Ok(amount) if amount > Decimal::ZERO => Ok(amount),
            _ => Err(PaymentError::InvalidAmount),
        }
    }

    /// Current state of the referenced account; a stale id counts as unselected
    fn resolve_account(&self, account_id: Option<uuid::Uuid>) -> Result<Option<Account>, PaymentError> {
        match account_id {
            Some(id) => Ok(self.account_repository.get_account(id)?),
            None => Ok(None),
        }
    }
}
