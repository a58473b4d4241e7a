// ============================================================================
// Logging Setup
// fmt subscriber for binaries, benches and tests that want library output
// ============================================================================

use tracing_subscriber::EnvFilter;

/// Installs a global fmt subscriber writing to stderr.
///
/// The filter comes from `RUST_LOG` and defaults to `level`. Installing
/// twice is harmless; the first subscriber stays.
pub fn init(level: &str) {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_else(|_| level.to_owned());
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(env))
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init("debug");
        init("trace");
        tracing::debug!("logging initialised");
    }
}
