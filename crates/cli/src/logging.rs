use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// How chatty the CLI should be, from the global flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
}

/// Filter directives for a verbosity level. `RUST_LOG` overrides all of this.
pub fn directives(verbosity: Verbosity, configured: &str) -> String {
    match verbosity {
        Verbosity::Quiet => "manning=warn".to_string(),
        Verbosity::Normal => configured.to_string(),
        Verbosity::Verbose => "manning=debug".to_string(),
    }
}

/// Install the stderr subscriber. Stdout is reserved for tables and JSON.
pub fn init(verbosity: Verbosity, configured: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(directives(verbosity, configured)))
        .unwrap_or_else(|_| EnvFilter::new("manning=info"));

    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();

    // A second init (tests) is harmless
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .try_init();
}
