use std::sync::Once;

use tracing_subscriber::EnvFilter;

/// Process-wide tracing init. Safe to call from every `App::new`; only the
/// first call installs the subscriber.
pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info,chaintalk_core=debug"));
        // try_init: the embedding process may have installed its own subscriber.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .try_init();
    });
}
