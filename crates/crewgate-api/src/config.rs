use crewgate::CrewgateConfig;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Host address
    pub host: String,

    /// Port number
    pub port: u16,

    /// Debug mode (raises the default log level)
    pub debug: bool,

    /// CORS configuration
    pub cors: CorsConfig,

    /// Log level
    pub log_level: String,

    /// Log output style
    pub log_format: LogFormat,

    /// Enable Swagger UI
    pub enable_swagger: bool,

    /// Features, engine and auth settings
    #[serde(flatten)]
    pub crew: CrewgateConfig,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            debug: false,
            cors: CorsConfig::default(),
            log_level: "info".to_string(),
            log_format: LogFormat::default(),
            enable_swagger: true,
            crew: CrewgateConfig::default(),
        }
    }
}

impl ApiConfig {
    /// Convert to SocketAddr
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse()
            .map_err(|e| anyhow::anyhow!("Invalid address {}: {}", addr, e))
    }

    /// Load from configuration file (TOML, or JSON when the extension is `.json`)
    pub fn load_from_file(path: &std::path::Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))?;

        let config: Self = if crewgate::config::is_json(path) {
            serde_json::from_str(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse config file: {}", e))?
        } else {
            toml::from_str(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse config file: {}", e))?
        };

        config
            .crew
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid config file: {}", e))?;
        Ok(config)
    }

    /// Load `path` when one is given, defaults otherwise
    ///
    /// A file that cannot be read, parsed or validated is an error, never a
    /// fallback to defaults.
    pub fn load(path: Option<&std::path::Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Default tracing filter directive for this configuration
    pub fn log_filter(&self) -> String {
        let level = if self.debug {
            "debug"
        } else {
            self.log_level.as_str()
        };
        format!(
            "crewgate_api={level},crewgate={level},tower_http={level}",
            level = level
        )
    }
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Allowed origins
    pub allowed_origins: Vec<String>,

    /// Allow any origin
    pub allow_any_origin: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![],
            allow_any_origin: true, // Default to true for development
        }
    }
}

/// Log output style
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Full,
    Compact,
    Pretty,
}
