use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;

/// Installs the global subscriber. `RUST_LOG` wins over the per-mode default;
/// the console stays quiet so log lines do not interleave with replies.
pub fn init(cli: &Cli) {
    let default_directive = if cli.discord {
        "weather_bot=info,serenity=warn"
    } else {
        "weather_bot=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
