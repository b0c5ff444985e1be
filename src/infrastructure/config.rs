use crate::domain::metric::MetricsMode;
use anyhow::Context;
use serde::Deserialize;
use std::net::SocketAddr;

const DEFAULT_CONFIG_FILE: &str = "config/report";
const ENV_PREFIX: &str = "SALES_REPORT";

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub report: ReportSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl ServerSettings {
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid listen address {}:{}", self.host, self.port))
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReportSettings {
    pub metrics: MetricsMode,
    /// Brotli-compress pages for clients that accept it
    pub compress: bool,
}

/// Defaults, then `config/report.*` if present, then `SALES_REPORT_*` variables
/// (`SALES_REPORT_SERVER__PORT=9000`).
pub fn load_config() -> anyhow::Result<AppConfig> {
    load_config_from(DEFAULT_CONFIG_FILE)
}

pub fn load_config_from(path: &str) -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8080)?
        .set_default("report.metrics", "literal")?
        .set_default("report.compress", true)?
        .add_source(config::File::with_name(path).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .with_context(|| format!("Failed to load configuration from {}", path))?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_defaults_without_file() {
        let config = load_config_from("config/does-not-exist").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.report.metrics, MetricsMode::Literal);
        assert!(config.report.compress);
        assert_eq!(
            config.server.socket_addr().unwrap(),
            "0.0.0.0:8080".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn test_file_overrides_defaults() {
        let path = std::env::temp_dir().join(format!("sales-report-{}.toml", std::process::id()));
        fs::write(
            &path,
            "[server]\nport = 9090\n\n[report]\nmetrics = \"derived\"\ncompress = false\n",
        )
        .unwrap();

        let config = load_config_from(path.to_str().unwrap());
        fs::remove_file(&path).unwrap();

        let config = config.unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.report.metrics, MetricsMode::Derived);
        assert!(!config.report.compress);
    }

    #[test]
    fn test_bad_host_is_reported() {
        let settings = ServerSettings {
            host: "not a host".to_string(),
            port: 80,
        };
        assert!(settings.socket_addr().is_err());
    }
}
