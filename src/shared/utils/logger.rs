use std::sync::Once;
use tracing::info;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Initialize the logging system
/// This should be called once at application startup
pub fn init_logger() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            // Default level, more verbose for our crate, less HTTP/runtime noise
            EnvFilter::new("info,sagasu=debug,reqwest=warn,hyper=warn,tokio=warn")
        });

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();

        info!("Logging system initialized");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logger_is_idempotent() {
        // Second call must not panic on double subscriber registration
        init_logger();
        init_logger();
    }
}
