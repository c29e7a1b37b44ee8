use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    command::{TransactionAction, TransactionCommand},
    statement::Statement,
};

pub type AccountNumber = String;
pub type CustomerId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Deposit => "DEPOSIT",
            TransactionKind::Withdrawal => "WITHDRAWAL",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A recorded balance change. Only an [`Account`] creates these, and once
/// appended to its history they never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transaction {
    kind: TransactionKind,
    amount: Decimal,
    balance_after: Decimal,
    timestamp: DateTime<Utc>,
}

impl Transaction {
    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    /// Magnitude of the change, always positive.
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn balance_after(&self) -> Decimal {
        self.balance_after
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

#[derive(Debug, PartialEq, Eq)]
enum AccountEventKind {
    Deposited,
    Withdrawn,
}

#[derive(Debug)]
struct AccountEvent {
    amount: Decimal,
    balance_after: Decimal,
    kind: AccountEventKind,
    recorded_at: DateTime<Utc>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccountError {
    #[error("Invalid {action} amount: {amount}")]
    InvalidAmount {
        action: TransactionAction,
        amount: Decimal,
    },
    #[error(
        "Insufficient funds! Attempted to withdraw: ${attempted:.2}, Available balance: ${available:.2}"
    )]
    InsufficientFunds {
        attempted: Decimal,
        available: Decimal,
    },
}

/// Balance and transaction history of a single bank account.
///
/// Every change goes through a command that is validated against the current
/// state first and only then applied, so a rejected command leaves both the
/// balance and the history untouched.
#[derive(Debug, Clone)]
pub struct Account {
    account_number: AccountNumber,
    customer_id: CustomerId,
    balance: Decimal,
    history: Vec<Transaction>,
}

impl Account {
    pub fn open(
        account_number: impl Into<AccountNumber>,
        customer_id: impl Into<CustomerId>,
        initial_amount: Decimal,
    ) -> Result<Self, AccountError> {
        Self::open_at(account_number, customer_id, initial_amount, Utc::now())
    }

    /// Opens an account; a positive `initial_amount` is recorded as the
    /// opening deposit.
    pub fn open_at(
        account_number: impl Into<AccountNumber>,
        customer_id: impl Into<CustomerId>,
        initial_amount: Decimal,
        at: DateTime<Utc>,
    ) -> Result<Self, AccountError> {
        if initial_amount < Decimal::ZERO {
            return Err(AccountError::InvalidAmount {
                action: TransactionAction::Open,
                amount: initial_amount,
            });
        }
        let mut account = Self {
            account_number: account_number.into(),
            customer_id: customer_id.into(),
            balance: Decimal::ZERO,
            history: Vec::new(),
        };
        if initial_amount > Decimal::ZERO {
            account.execute(TransactionCommand {
                action: TransactionAction::Open,
                amount: initial_amount,
                requested_at: at,
            })?;
        }
        Ok(account)
    }

    pub fn account_number(&self) -> &str {
        &self.account_number
    }

    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Transactions in the order they were recorded.
    pub fn history(&self) -> impl ExactSizeIterator<Item = &Transaction> + Clone + '_ {
        self.history.iter()
    }

    pub fn transaction_count(&self) -> usize {
        self.history.len()
    }

    pub fn statement(&self) -> Statement<'_> {
        Statement::new(self)
    }

    pub fn deposit(&mut self, amount: Decimal) -> Result<Transaction, AccountError> {
        self.deposit_at(amount, Utc::now())
    }

    pub fn deposit_at(
        &mut self,
        amount: Decimal,
        at: DateTime<Utc>,
    ) -> Result<Transaction, AccountError> {
        self.execute(TransactionCommand {
            action: TransactionAction::Deposit,
            amount,
            requested_at: at,
        })
    }

    pub fn withdraw(&mut self, amount: Decimal) -> Result<Transaction, AccountError> {
        self.withdraw_at(amount, Utc::now())
    }

    /// Withdrawing the whole balance is allowed and leaves the account at zero.
    pub fn withdraw_at(
        &mut self,
        amount: Decimal,
        at: DateTime<Utc>,
    ) -> Result<Transaction, AccountError> {
        self.execute(TransactionCommand {
            action: TransactionAction::Withdraw,
            amount,
            requested_at: at,
        })
    }

    fn execute(&mut self, command: TransactionCommand) -> Result<Transaction, AccountError> {
        let event = self.handle_transaction(command)?;
        Ok(self.apply(&event))
    }

    fn handle_transaction(
        &self,
        command: TransactionCommand,
    ) -> Result<AccountEvent, AccountError> {
        if command.amount <= Decimal::ZERO {
            return Err(AccountError::InvalidAmount {
                action: command.action,
                amount: command.amount,
            });
        }

        let (kind, balance_after) = match command.action {
            TransactionAction::Open | TransactionAction::Deposit => (
                AccountEventKind::Deposited,
                self.balance.checked_add(command.amount),
            ),
            TransactionAction::Withdraw => {
                if command.amount > self.balance {
                    return Err(AccountError::InsufficientFunds {
                        attempted: command.amount,
                        available: self.balance,
                    });
                }
                (
                    AccountEventKind::Withdrawn,
                    self.balance.checked_sub(command.amount),
                )
            }
        };
        // Decimal rounds once a result needs more than 28 digits; such an
        // amount could not be recorded exactly, so it is refused.
        let balance_after = balance_after
            .filter(|after| {
                after.checked_sub(self.balance).map(|delta| delta.abs()) == Some(command.amount)
            })
            .ok_or(AccountError::InvalidAmount {
                action: command.action,
                amount: command.amount,
            })?;

        Ok(AccountEvent {
            amount: command.amount,
            balance_after,
            kind,
            recorded_at: command.requested_at,
        })
    }

    fn apply(&mut self, event: &AccountEvent) -> Transaction {
        let kind = match event.kind {
            AccountEventKind::Deposited => TransactionKind::Deposit,
            AccountEventKind::Withdrawn => TransactionKind::Withdrawal,
        };
        // history timestamps never go backwards, even if the clock does
        let timestamp = self
            .history
            .last()
            .map_or(event.recorded_at, |last| last.timestamp.max(event.recorded_at));

        let transaction = Transaction {
            kind,
            amount: event.amount,
            balance_after: event.balance_after,
            timestamp,
        };
        self.balance = event.balance_after;
        self.history.push(transaction);
        transaction
    }
}
