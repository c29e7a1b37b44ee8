use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::account::{AccountNumber, CustomerId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionAction {
    Open,
    Deposit,
    Withdraw,
}

impl fmt::Display for TransactionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TransactionAction::Open => "initial deposit",
            TransactionAction::Deposit => "deposit",
            TransactionAction::Withdraw => "withdrawal",
        })
    }
}

/// Balance-affecting request against a single account. The amount is not
/// validated here, [`crate::account::Account`] decides whether it is acceptable.
#[derive(Debug, Clone, Copy)]
pub struct TransactionCommand {
    pub action: TransactionAction,
    pub amount: Decimal,
    pub requested_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    Customer,
    Open,
    Deposit,
    Withdraw,
    Balance,
    Statement,
}

/// One row of a banking script, as read from CSV
#[derive(Debug, Clone, Deserialize)]
pub struct ScriptStep {
    #[serde(rename = "type")]
    pub kind: StepKind,
    pub customer: CustomerId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub account: Option<AccountNumber>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub amount: Option<Decimal>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Field `{field}` is required for {kind:?}")]
    MissingField {
        kind: StepKind,
        field: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum BankCommand {
    RegisterCustomer {
        customer_id: CustomerId,
        name: String,
        email: String,
    },
    OpenAccount {
        customer_id: CustomerId,
        account_number: AccountNumber,
        initial_deposit: Decimal,
    },
    Deposit {
        customer_id: CustomerId,
        amount: Decimal,
    },
    Withdraw {
        customer_id: CustomerId,
        amount: Decimal,
    },
    ShowBalance {
        customer_id: CustomerId,
    },
    PrintStatement {
        customer_id: CustomerId,
    },
}

impl BankCommand {
    pub fn parse_command(step: ScriptStep) -> Result<Self, CommandError> {
        let kind = step.kind;
        let customer_id = required(kind, "customer", Some(step.customer))?;
        match kind {
            StepKind::Customer => Ok(Self::RegisterCustomer {
                customer_id,
                name: required(kind, "name", step.name)?,
                email: required(kind, "email", step.email)?,
            }),
            StepKind::Open => Ok(Self::OpenAccount {
                customer_id,
                // an empty account number is the customer's call to reject
                account_number: step.account.unwrap_or_default(),
                initial_deposit: step.amount.unwrap_or(Decimal::ZERO),
            }),
            StepKind::Deposit => Ok(Self::Deposit {
                customer_id,
                amount: step
                    .amount
                    .ok_or(CommandError::MissingField { kind, field: "amount" })?,
            }),
            StepKind::Withdraw => Ok(Self::Withdraw {
                customer_id,
                amount: step
                    .amount
                    .ok_or(CommandError::MissingField { kind, field: "amount" })?,
            }),
            StepKind::Balance => Ok(Self::ShowBalance { customer_id }),
            StepKind::Statement => Ok(Self::PrintStatement { customer_id }),
        }
    }

    pub fn customer_id(&self) -> &str {
        match self {
            Self::RegisterCustomer { customer_id, .. }
            | Self::OpenAccount { customer_id, .. }
            | Self::Deposit { customer_id, .. }
            | Self::Withdraw { customer_id, .. }
            | Self::ShowBalance { customer_id }
            | Self::PrintStatement { customer_id } => customer_id,
        }
    }
}

fn required(
    kind: StepKind,
    field: &'static str,
    value: Option<String>,
) -> Result<String, CommandError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or(CommandError::MissingField { kind, field })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(kind: StepKind) -> ScriptStep {
        ScriptStep {
            kind,
            customer: "CUST001".to_string(),
            name: None,
            email: None,
            account: None,
            amount: None,
        }
    }

    #[test]
    fn parse_register_customer() {
        let cmd = BankCommand::parse_command(ScriptStep {
            name: Some("John Doe".to_string()),
            email: Some("john@email.com".to_string()),
            ..step(StepKind::Customer)
        })
        .unwrap();
        assert_eq!(
            cmd,
            BankCommand::RegisterCustomer {
                customer_id: "CUST001".to_string(),
                name: "John Doe".to_string(),
                email: "john@email.com".to_string(),
            }
        );

        let err = BankCommand::parse_command(ScriptStep {
            name: Some("John Doe".to_string()),
            ..step(StepKind::Customer)
        })
        .unwrap_err();
        assert_eq!(
            err,
            CommandError::MissingField {
                kind: StepKind::Customer,
                field: "email"
            }
        );
    }

    #[test]
    fn amount_is_required_for_mutations() {
        for kind in [StepKind::Deposit, StepKind::Withdraw] {
            let err = BankCommand::parse_command(step(kind)).unwrap_err();
            assert_eq!(
                err,
                CommandError::MissingField {
                    kind,
                    field: "amount"
                }
            );
        }

        // sign is not checked here, the ledger rejects it
        let cmd = BankCommand::parse_command(ScriptStep {
            amount: Some(Decimal::new(-50000, 2)),
            ..step(StepKind::Deposit)
        })
        .unwrap();
        assert!(matches!(cmd, BankCommand::Deposit { amount, .. } if amount.is_sign_negative()));
    }

    #[test]
    fn customer_is_required() {
        let err = BankCommand::parse_command(ScriptStep {
            customer: "  ".to_string(),
            ..step(StepKind::Balance)
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "Field `customer` is required for Balance");
    }

    #[test]
    fn open_defaults_to_zero_deposit() {
        let cmd = BankCommand::parse_command(ScriptStep {
            account: Some("ACC1".to_string()),
            ..step(StepKind::Open)
        })
        .unwrap();
        assert_eq!(cmd.customer_id(), "CUST001");
        assert_eq!(
            cmd,
            BankCommand::OpenAccount {
                customer_id: "CUST001".to_string(),
                account_number: "ACC1".to_string(),
                initial_deposit: Decimal::ZERO,
            }
        );
    }
}
