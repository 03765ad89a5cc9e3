//! Tracing setup shared by the binaries

/// Install a fmt subscriber filtered by `RUST_LOG`, falling back to
/// `default_filter`. A second call is a no-op.
pub fn init_tracing(default_filter: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .try_init();
}
