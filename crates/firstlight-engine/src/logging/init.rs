use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info", "warn",
/// "firstlight_engine=debug,wgpu_core=warn").
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

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// Subsequent calls are ignored. Call this first thing in `main`.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        match filter_source(config.env_filter, std::env::var("RUST_LOG").ok()) {
            Some(filter) => {
                builder.parse_filters(&filter);
            }
            None => {
                // wgpu is chatty at info; keep it at warn unless asked otherwise.
                builder
                    .filter_level(log::LevelFilter::Info)
                    .filter_module("wgpu_core", log::LevelFilter::Warn)
                    .filter_module("wgpu_hal", log::LevelFilter::Warn)
                    .filter_module("naga", log::LevelFilter::Warn);
            }
        }

        builder.write_style(config.write_style);
        builder.init();

        log::debug!("logging initialized");
    });
}

/// Explicit filter first, then `RUST_LOG`. Blank values count as unset.
fn filter_source(explicit: Option<String>, env: Option<String>) -> Option<String> {
    let non_blank = |f: &String| !f.trim().is_empty();
    explicit.filter(non_blank).or_else(|| env.filter(non_blank))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_filter_wins_over_env() {
        let f = filter_source(Some("debug".into()), Some("warn".into()));
        assert_eq!(f.as_deref(), Some("debug"));
    }

    #[test]
    fn env_filter_used_when_no_explicit() {
        let f = filter_source(None, Some("warn".into()));
        assert_eq!(f.as_deref(), Some("warn"));
    }

    #[test]
    fn blank_filter_falls_back_to_default() {
        assert_eq!(filter_source(Some("  ".into()), None), None);
        assert_eq!(filter_source(None, None), None);
    }

    #[test]
    fn blank_explicit_filter_defers_to_env() {
        let f = filter_source(Some(String::new()), Some("warn".into()));
        assert_eq!(f.as_deref(), Some("warn"));
    }
}
