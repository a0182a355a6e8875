use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Install the stderr log subscriber. Stdout is reserved for JSON reports.
///
/// `RUST_LOG` takes precedence over `verbose` when set.
pub fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));

    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();
}
