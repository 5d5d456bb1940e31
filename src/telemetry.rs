use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging for the command-line front end.
///
/// Configures `tracing-subscriber::fmt` on stderr (stdout carries command
/// output) with an `EnvFilter` read from `RUST_LOG`. Set `json` to emit one
/// JSON object per event instead of the compact format.
pub fn init(json: bool) {
    let filter_layer = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,tmb_admin=info"));

    let registry = tracing_subscriber::registry().with(filter_layer);

    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    }
}
