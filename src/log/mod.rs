use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub mod transcript;

/// Logging settings, read from the environment and the `--debug` flag.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Filter directive, e.g. "info" or "neurosong=debug,tower_http=info".
    pub level: String,
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), json_format: false }
    }
}

impl LoggingConfig {
    pub fn from_env(debug: bool) -> Self {
        let mut cfg = Self {
            level: std::env::var("NEUROSONG_LOG").unwrap_or_else(|_| "info".to_string()),
            json_format: std::env::var("NEUROSONG_LOG_JSON").map(|v| v == "true").unwrap_or(false),
        };
        if debug {
            cfg.level = "debug".to_string();
        }
        cfg
    }

    /// Installs the global subscriber. Logs go to stderr so stdout stays
    /// clean for verses and JSON.
    pub fn init(self) -> anyhow::Result<()> {
        let filter = EnvFilter::try_new(&self.level)?;
        let registry = tracing_subscriber::registry().with(filter);
        let res = if self.json_format {
            registry.with(fmt::layer().json().with_writer(std::io::stderr)).try_init()
        } else {
            registry
                .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
                .try_init()
        };
        res.map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_flag_raises_level() {
        assert_eq!(LoggingConfig::from_env(true).level, "debug");
    }

    #[test]
    fn default_is_human_readable_info() {
        let cfg = LoggingConfig::default();
        assert_eq!(cfg.level, "info");
        assert!(!cfg.json_format);
    }
}
