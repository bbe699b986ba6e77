// Environment detection and logger configuration.

use std::sync::OnceLock;

/// Cached environment mode.
static ENV_MODE: OnceLock<EnvMode> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvMode {
    Production,
    Development,
    Test,
}

/// Detect the current environment mode from environment variables.
/// Checks `SERENITY_ENV` then `RUST_ENV`. Cached after the first call.
pub fn detect_env_mode() -> EnvMode {
    *ENV_MODE.get_or_init(|| {
        let env_val = std::env::var("SERENITY_ENV")
            .or_else(|_| std::env::var("RUST_ENV"))
            .unwrap_or_default()
            .to_lowercase();

        match env_val.as_str() {
            "production" | "prod" => EnvMode::Production,
            "test" | "testing" => EnvMode::Test,
            _ => EnvMode::Development,
        }
    })
}

pub fn is_production() -> bool {
    detect_env_mode() == EnvMode::Production
}

pub fn is_development() -> bool {
    detect_env_mode() == EnvMode::Development
}

pub fn is_test() -> bool {
    detect_env_mode() == EnvMode::Test
}

/// Get the remote store URL from `SERENITY_STORE_URL`.
pub fn get_store_url_from_env() -> Option<String> {
    std::env::var("SERENITY_STORE_URL").ok()
}

/// Get the remote store access key from `SERENITY_STORE_KEY`.
pub fn get_store_key_from_env() -> Option<String> {
    std::env::var("SERENITY_STORE_KEY").ok()
}

/// Initialize the `tracing` subscriber with appropriate defaults.
/// `RUST_LOG` wins when set; otherwise info in production, debug elsewhere.
pub fn init_logger() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if is_production() {
            EnvFilter::new("serenity_data=info")
        } else {
            EnvFilter::new("serenity_data=debug")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .init();
}
