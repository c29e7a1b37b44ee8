use std::{fs::File, io::Read, path::PathBuf};

use anyhow::{Context, Result};
use bank_ledger::bin_utils::{DEMO_SCRIPT, Service, logging, outcome_printer::print_rejection};
use clap::Parser;

/// Runs a banking script against an in-memory ledger
#[derive(Parser, Debug)]
#[command(name = "bank-ledger", version)]
struct Cli {
    /// CSV script with `type,customer,name,email,account,amount` columns.
    /// Runs the bundled demo when omitted
    script: Option<PathBuf>,

    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let input: Box<dyn Read> = match &cli.script {
        Some(path) => Box::new(
            File::open(path).with_context(|| format!("Failed to open `{}`", path.display()))?,
        ),
        None => Box::new(DEMO_SCRIPT.as_bytes()),
    };

    let service = Service {
        input,
        output: &mut std::io::stdout(),
        error_printer: Box::new(|line, err| {
            // rejected operations are part of normal operation, report and go on
            if let Err(io_err) = print_rejection(&mut std::io::stdout(), line, &err) {
                tracing::error!("Failed to report rejection at line {line}: {io_err}");
            }
        }),
    };
    service.run()?;
    Ok(())
}
