use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    account::{AccountError, AccountNumber, CustomerId, Transaction},
    command::{BankCommand, CommandError},
    customer::CustomerError,
};

pub mod in_memory_processor;

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error(transparent)]
    CommandErr(#[from] CommandError),
    #[error(transparent)]
    CustomerErr(#[from] CustomerError),
    #[error(transparent)]
    AccountErr(#[from] AccountError),
    #[error("Customer {0} is already registered")]
    DuplicateCustomer(CustomerId),
    #[error("Customer {0} is not registered")]
    UnknownCustomer(CustomerId),
    #[error("Customer {0} has no account")]
    NoAccount(CustomerId),
}

impl ProcessError {
    /// The ledger rejection behind this error, if any. Lets callers tell a
    /// bad amount apart from insufficient funds.
    pub fn account_error(&self) -> Option<&AccountError> {
        match self {
            ProcessError::AccountErr(err)
            | ProcessError::CustomerErr(CustomerError::Account(err)) => Some(err),
            _ => None,
        }
    }
}

/// What a successfully processed command produced, for the caller to report.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    Registered {
        customer_id: CustomerId,
        name: String,
    },
    Opened {
        name: String,
        account_number: AccountNumber,
        balance: Decimal,
    },
    Deposited {
        name: String,
        transaction: Transaction,
    },
    Withdrew {
        name: String,
        transaction: Transaction,
    },
    Balance {
        name: String,
        balance: Decimal,
    },
    Statement(String),
}

pub trait BankProcessor {
    fn process_command(&mut self, command: BankCommand) -> Result<StepOutcome, ProcessError>;
}
