use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    account::{Account, AccountError, AccountNumber, CustomerId},
    command::TransactionAction,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CustomerError {
    #[error("Account number cannot be empty")]
    EmptyAccountNumber,
    #[error("Customer {customer_id} already holds account {account_number}")]
    AccountAlreadyOpen {
        customer_id: CustomerId,
        account_number: AccountNumber,
    },
    #[error(transparent)]
    Account(#[from] AccountError),
}

/// A bank customer, holding at most one account.
#[derive(Debug, Clone)]
pub struct Customer {
    customer_id: CustomerId,
    name: String,
    email: String,
    account: Option<Account>,
}

impl Customer {
    pub fn new(
        customer_id: impl Into<CustomerId>,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            customer_id: customer_id.into(),
            name: name.into(),
            email: email.into(),
            account: None,
        }
    }

    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    pub fn account(&self) -> Option<&Account> {
        self.account.as_ref()
    }

    pub fn account_mut(&mut self) -> Option<&mut Account> {
        self.account.as_mut()
    }

    pub fn create_account(
        &mut self,
        account_number: impl Into<AccountNumber>,
        initial_deposit: Decimal,
    ) -> Result<&mut Account, CustomerError> {
        self.create_account_at(account_number, initial_deposit, Utc::now())
    }

    pub fn create_account_at(
        &mut self,
        account_number: impl Into<AccountNumber>,
        initial_deposit: Decimal,
        at: DateTime<Utc>,
    ) -> Result<&mut Account, CustomerError> {
        let account_number = account_number.into();
        if account_number.trim().is_empty() {
            return Err(CustomerError::EmptyAccountNumber);
        }
        if initial_deposit < Decimal::ZERO {
            return Err(AccountError::InvalidAmount {
                action: TransactionAction::Open,
                amount: initial_deposit,
            }
            .into());
        }
        if let Some(existing) = &self.account {
            return Err(CustomerError::AccountAlreadyOpen {
                customer_id: self.customer_id.clone(),
                account_number: existing.account_number().to_owned(),
            });
        }

        let account = Account::open_at(
            account_number,
            self.customer_id.clone(),
            initial_deposit,
            at,
        )?;
        Ok(self.account.insert(account))
    }
}
