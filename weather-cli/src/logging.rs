use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber. `RUST_LOG` wins over `-v`.
///
/// Output goes to stderr so it never mixes with the dashboard on stdout.
pub fn init(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "weather_core=info,weather_dash=info",
        2 => "weather_core=debug,weather_dash=debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into());

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
