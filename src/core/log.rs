use tracing_subscriber::{
    EnvFilter, fmt, prelude::__tracing_subscriber_SubscriberExt, util::SubscriberInitExt,
};

fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "warn,stockcmp=debug,tower_http=debug"
    } else {
        "warn,stockcmp=info,tower_http=info"
    }
}

/// Builds the log filter. A parseable `RUST_LOG` value replaces the defaults
/// entirely, so it can both narrow and widen what gets logged.
pub fn build_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(default_directives(verbose)))
}

/// Installs the global subscriber. Logs go to stderr so `compare --json`
/// output on stdout stays machine readable.
pub fn init_logging(verbose: bool) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .with(build_filter(verbose, rust_log.as_deref()))
        .init();
}
