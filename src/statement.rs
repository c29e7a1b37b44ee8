use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::account::{Account, Transaction};

const RULE_WIDTH: usize = 70;
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Formats an amount as dollars with two decimal places, e.g. `$5500.25`.
/// Half cents round away from zero.
pub fn format_money(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    // precision only pads here, rounding is already done
    format!("${rounded:.2}")
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} | Balance: {} | {}",
            self.kind(),
            format_money(self.amount()),
            format_money(self.balance_after()),
            self.timestamp().format(TIMESTAMP_FORMAT)
        )
    }
}

/// Printable account statement: header with the current balance followed by
/// every transaction in history order.
pub struct Statement<'a> {
    account: &'a Account,
}

impl<'a> Statement<'a> {
    pub(crate) fn new(account: &'a Account) -> Self {
        Self { account }
    }
}

impl fmt::Display for Statement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let heavy_rule = "=".repeat(RULE_WIDTH);
        let light_rule = "-".repeat(RULE_WIDTH);

        writeln!(f, "{heavy_rule}")?;
        writeln!(f, "ACCOUNT STATEMENT")?;
        writeln!(f, "{heavy_rule}")?;
        writeln!(f, "Account Number: {}", self.account.account_number())?;
        writeln!(f, "Customer ID: {}", self.account.customer_id())?;
        writeln!(
            f,
            "Current Balance: {}",
            format_money(self.account.balance())
        )?;
        writeln!(f, "{heavy_rule}")?;
        writeln!(f, "TRANSACTION HISTORY:")?;
        writeln!(f, "{light_rule}")?;
        writeln!(
            f,
            "{:<20} {:<15} {:<15} Timestamp",
            "Type", "Amount", "Balance"
        )?;
        writeln!(f, "{light_rule}")?;
        for tx in self.account.history() {
            writeln!(
                f,
                "{:<20} {:<15} {:<15} {}",
                tx.kind().as_str(),
                format_money(tx.amount()),
                format_money(tx.balance_after()),
                tx.timestamp().format(TIMESTAMP_FORMAT)
            )?;
        }
        writeln!(f, "{heavy_rule}")
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn money_has_two_decimals() {
        assert_eq!(format_money(Decimal::new(550025, 2)), "$5500.25");
        assert_eq!(format_money(Decimal::new(5000, 0)), "$5000.00");
        assert_eq!(format_money(Decimal::ZERO), "$0.00");
        assert_eq!(format_money(Decimal::new(-50000, 2)), "$-500.00");
        assert_eq!(format_money(Decimal::new(125, 3)), "$0.13");
        assert_eq!(format_money(Decimal::new(135, 3)), "$0.14");
        assert_eq!(format_money(Decimal::new(-125, 3)), "$-0.13");
    }

    #[test]
    fn render_statement() {
        let start = Utc.with_ymd_and_hms(2026, 10, 16, 9, 0, 0).unwrap();
        let mut acc = Account::open_at("ACC1", "CUST1", Decimal::new(100, 0), start).unwrap();
        let later = Utc.with_ymd_and_hms(2026, 10, 16, 9, 1, 0).unwrap();
        let tx = acc.withdraw_at(Decimal::new(2550, 2), later).unwrap();

        assert_eq!(
            tx.to_string(),
            "WITHDRAWAL: $25.50 | Balance: $74.50 | 2026-10-16 09:01:00"
        );

        let heavy = "=".repeat(70);
        let light = "-".repeat(70);
        let expected = [
            heavy.as_str(),
            "ACCOUNT STATEMENT",
            heavy.as_str(),
            "Account Number: ACC1",
            "Customer ID: CUST1",
            "Current Balance: $74.50",
            heavy.as_str(),
            "TRANSACTION HISTORY:",
            light.as_str(),
            "Type                 Amount          Balance         Timestamp",
            light.as_str(),
            "DEPOSIT              $100.00         $100.00         2026-10-16 09:00:00",
            "WITHDRAWAL           $25.50          $74.50          2026-10-16 09:01:00",
            heavy.as_str(),
        ]
        .join("\n")
            + "\n";

        let rendered = acc.statement().to_string();
        assert_eq!(rendered, expected);
        // rendering has no side effects
        assert_eq!(acc.statement().to_string(), rendered);
        assert_eq!(acc.transaction_count(), 2);
    }

    #[test]
    fn empty_history_statement() {
        let acc = Account::open("ACC2", "CUST2", Decimal::ZERO).unwrap();
        let rendered = acc.statement().to_string();
        assert!(rendered.contains("Current Balance: $0.00"));
        assert!(!rendered.contains("DEPOSIT"));
    }
}
