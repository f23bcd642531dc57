use tracing_subscriber::{EnvFilter, fmt};

/// Install the stderr log subscriber. `RUST_LOG` takes precedence over the `debug` switch.
pub fn init(debug: bool) {
    let default_filter = if debug { "debug" } else { "warn" };
    let env =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // Fails only if a subscriber is already installed, e.g. when embedded or run repeatedly in
    // tests; keep the existing one.
    let _ = fmt()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
