use tracing_subscriber::{EnvFilter, fmt};

/// Install a global subscriber filtered by `RUST_LOG`, defaults to `warn`
///
/// Returns false when a subscriber was already installed
pub fn init() -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt().with_env_filter(filter).with_target(true).try_init().is_ok()
}

#[uniffi::export]
fn init_logging() -> bool {
    init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        let _first = init();
        assert!(!init());
    }
}
