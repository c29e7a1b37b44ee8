use std::io::{self, Write};

use crate::{
    account::AccountError,
    processor::{ProcessError, StepOutcome},
    statement::format_money,
};

/// Writes the human-readable report of a processed step.
pub fn print_outcome<W>(output: &mut W, outcome: &StepOutcome) -> io::Result<()>
where
    W: Write,
{
    match outcome {
        StepOutcome::Registered { customer_id, name } => {
            writeln!(output, "Registered customer {customer_id} ({name})")
        }
        StepOutcome::Opened {
            name,
            account_number,
            balance,
        } => writeln!(
            output,
            "Opened account {account_number} for {name} with {}",
            format_money(*balance)
        ),
        StepOutcome::Deposited { name, transaction } => writeln!(
            output,
            "Successfully deposited {} for {name} (balance: {})",
            format_money(transaction.amount()),
            format_money(transaction.balance_after())
        ),
        StepOutcome::Withdrew { name, transaction } => writeln!(
            output,
            "Successfully withdrew {} for {name} (balance: {})",
            format_money(transaction.amount()),
            format_money(transaction.balance_after())
        ),
        StepOutcome::Balance { name, balance } => {
            writeln!(output, "{name}: {}", format_money(*balance))
        }
        StepOutcome::Statement(text) => writeln!(output, "{text}"),
    }
}

/// Writes the report of a rejected step, telling a declined withdrawal apart
/// from an amount that was never acceptable.
pub fn print_rejection<W>(output: &mut W, line: u64, err: &ProcessError) -> io::Result<()>
where
    W: Write,
{
    match err.account_error() {
        Some(AccountError::InsufficientFunds { .. }) => {
            writeln!(output, "Declined at line {line}: {err}")
        }
        Some(AccountError::InvalidAmount { .. }) => {
            writeln!(output, "Invalid amount at line {line}: {err}")
        }
        None => writeln!(output, "Error at line {line}: {err}"),
    }
}
