use tracing::Subscriber;
use tracing::metadata::LevelFilter;
use tracing_subscriber::{EnvFilter, filter::ParseError, layer::SubscriberExt};

/// Picks the log filter: `--verbose` wins, then `RUST_LOG`, then the config file.
#[must_use]
pub fn log_directives(verbose: bool, env: Option<String>, configured: Option<&str>) -> String {
    if verbose {
        return "debug".to_owned();
    }
    env.filter(|e| !e.trim().is_empty())
        .or_else(|| configured.map(str::to_owned))
        .unwrap_or_else(|| "info".to_owned())
}

/// Installs the global subscriber. Returns the parse error if `directives` was invalid, in
/// which case `info` is used instead.
///
/// # Panics
///
/// Panics if a global subscriber was already installed.
pub fn setup_logging(directives: &str) -> Option<ParseError> {
    let (subscriber, parse_err) = parse_log_level(directives);
    tracing::subscriber::set_global_default(subscriber)
        .expect("Couldn't setup global subscriber (logger)");
    parse_err
}

#[must_use]
pub fn parse_log_level(directives: &str) -> (impl Subscriber + use<>, Option<ParseError>) {
    let (filter, parse_err) = build_filter(directives);
    (get_subscribers(filter), parse_err)
}

fn build_filter(directives: &str) -> (EnvFilter, Option<ParseError>) {
    let mut parse_err = None;
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse(directives)
        .unwrap_or_else(|err| {
            parse_err = Some(err);
            EnvFilter::new("info")
        });
    (filter, parse_err)
}

pub fn get_subscribers(filter: EnvFilter) -> impl Subscriber {
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
}
