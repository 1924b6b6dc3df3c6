use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "NOTEKEEP_LOG";

/// Pick the filter directive: `$NOTEKEEP_LOG`, then `$RUST_LOG`, then a
/// default raised to `debug` by `--verbose`.
pub fn filter_directive(verbose: bool, notekeep_log: Option<String>, rust_log: Option<String>) -> String {
    let set = |s: &String| !s.trim().is_empty();
    notekeep_log
        .filter(set)
        .or_else(|| rust_log.filter(set))
        .unwrap_or_else(|| if verbose { "debug" } else { "warn" }.to_string())
}

/// Install the stderr subscriber. Safe to call more than once.
pub fn init_logging(verbose: bool) {
    let directive = filter_directive(
        verbose,
        std::env::var(LOG_ENV).ok(),
        std::env::var("RUST_LOG").ok(),
    );
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
