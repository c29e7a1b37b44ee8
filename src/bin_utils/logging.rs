use tracing_subscriber::EnvFilter;

/// Installs the process-wide `tracing` subscriber, writing to stderr so that
/// stdout only carries script output. `RUST_LOG` takes precedence over
/// `verbose`. Calling this more than once is a no-op.
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
