use std::env;
use std::net::{IpAddr, SocketAddr};

/// Runtime stage the service reports itself as running in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Environment-driven configuration; a `.env` file is honored when
    /// present.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let environment = AppEnvironment::parse(
            &lookup("LOANDESK_ENV").unwrap_or_else(|| "development".to_string()),
        );
        let host = lookup("LOANDESK_HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = lookup("LOANDESK_PORT").unwrap_or_else(|| "8080".to_string());
        let port = port
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort { value: port })?;
        let log_filter = lookup("LOANDESK_LOG").unwrap_or_else(|| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_filter },
        })
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost {
                value: self.host.clone(),
                source,
            })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_filter: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("LOANDESK_PORT must be a valid u16, got '{value}'")]
    InvalidPort { value: String },
    #[error("LOANDESK_HOST must be 'localhost' or an IP address, got '{value}'")]
    InvalidHost {
        value: String,
        source: std::net::AddrParseError,
    },
}
