// ============================================================
// Logging setup
// ============================================================
// The crate only emits `tracing` events. Binaries or test
// harnesses that want to see them call `init_tracing()` once.
//
// The filter comes from RUST_LOG when set, otherwise
// `summarization_prep=info`.

use tracing_subscriber::EnvFilter;

/// Default directive used when RUST_LOG is unset or invalid.
pub const DEFAULT_DIRECTIVE: &str = "summarization_prep=info";

/// Install a fmt subscriber. Calling it again after a global
/// subscriber exists is a no-op.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_does_not_panic() {
        init_tracing();
        init_tracing();
    }
}
