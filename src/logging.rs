use anyhow::Context as _;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;

/// Per-request lines from the trace layer are kept; sqlx statement logs are not.
const DEFAULT_FILTER: &str = "info,tower_http=debug,sqlx=warn";

/// Installs the global subscriber, writing compact lines to stderr.
pub fn init() -> anyhow::Result<()> {
    let filter = filter_from(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref())?;
    let fmt = tracing_subscriber::fmt::layer()
        .compact()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt)
        .try_init()
        .context("install tracing subscriber")
}

/// A set, non-blank `RUST_LOG` replaces the default filter. Bad directives are an
/// error rather than being silently ignored.
fn filter_from(directives: Option<&str>) -> anyhow::Result<EnvFilter> {
    match directives.map(str::trim).filter(|d| !d.is_empty()) {
        Some(d) => EnvFilter::try_new(d).with_context(|| format!("parse RUST_LOG {d:?}")),
        None => EnvFilter::try_new(DEFAULT_FILTER).context("parse default log filter"),
    }
}
