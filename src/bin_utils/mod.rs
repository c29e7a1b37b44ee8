//! Drives [`bank_ledger`](crate) from a CSV script. It could live in the
//! binary, but integration tests run scripts through it as well.

use std::io::{Read, Write};

use crate::{
    command::BankCommand,
    processor::{BankProcessor, ProcessError, in_memory_processor::InMemoryBankProcessor},
};
use anyhow::{Context, Result};
use outcome_printer::print_outcome;
use script_parser::ScriptParser;
use tracing::debug;

pub mod logging;
pub mod outcome_printer;
pub mod script_parser;

/// Two customers with one account each, a handful of deposits and
/// withdrawals, statements, and three operations the ledger must refuse.
pub const DEMO_SCRIPT: &str = include_str!("demo.csv");

pub struct Service<'w, R, W: 'w> {
    pub input: R,
    pub output: &'w mut W,
    pub error_printer: Box<dyn FnMut(u64, ProcessError) + 'w>,
}

impl<'w, R, W> Service<'w, R, W>
where
    R: Read,
    W: Write + 'w,
{
    /// Runs every step of the script. Rejected steps go to `error_printer`
    /// and the run carries on; only an unreadable script stops it.
    pub fn run(mut self) -> Result<InMemoryBankProcessor> {
        let parser = ScriptParser::new(self.input).context("Failed to read script header")?;

        let mut processor = InMemoryBankProcessor::default();
        let (mut processed, mut rejected) = (0usize, 0usize);

        for (line, step) in parser {
            let step = step.with_context(|| format!("Malformed script row at line {line}"))?;
            let result = BankCommand::parse_command(step)
                .map_err(ProcessError::from)
                .and_then(|command| processor.process_command(command));
            match result {
                Ok(outcome) => {
                    processed += 1;
                    print_outcome(self.output, &outcome)
                        .context("Failed to write script output")?;
                }
                Err(err) => {
                    rejected += 1;
                    (self.error_printer)(line, err);
                }
            }
        }

        self.output.flush().context("Failed to flush output")?;
        debug!(processed, rejected, "script finished");
        Ok(processor)
    }
}
