use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info",
/// "lumen_engine=debug,glutin=warn"). When unset, `RUST_LOG` is consulted and
/// the fallback is [`DEFAULT_FILTER`].
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

/// Filter used when neither the config nor `RUST_LOG` provide one.
///
/// Windowing crates are noisy at `info` on some platforms.
pub const DEFAULT_FILTER: &str = "info,winit=warn,glutin=warn";

static INIT: Once = Once::new();

/// Installs the global logger once.
///
/// Subsequent calls are ignored. Call this first thing in `main`, before the
/// window is bootstrapped, so context-creation failures are visible.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = resolve_filter(config.env_filter, std::env::var("RUST_LOG").ok());

        env_logger::Builder::new()
            .parse_filters(&filter)
            .write_style(config.write_style)
            .init();

        log::debug!("logging initialized (filter: {filter})");
    });
}

fn resolve_filter(configured: Option<String>, from_env: Option<String>) -> String {
    configured
        .or(from_env)
        .filter(|f| !f.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}
