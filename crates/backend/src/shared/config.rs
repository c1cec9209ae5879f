use serde::Deserialize;
use std::net::SocketAddr;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub commentary: CommentaryConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

/// Widget defaults and limits of the hourly sales dashboard
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DashboardConfig {
    /// Closing time used when the request does not carry one ("HH:MM")
    pub closing_time: String,
    pub staff_count: u32,
    pub currency_symbol: String,
    pub max_upload_bytes: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            closing_time: "20:00".to_string(),
            staff_count: 3,
            currency_symbol: "¥".to_string(),
            max_upload_bytes: 1024 * 1024,
        }
    }
}

/// Optional override of the peak-time recommendation table.
/// Rules are evaluated in order; `fallback_message` is the catch-all.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct CommentaryConfig {
    pub rules: Option<Vec<CommentaryRuleConfig>>,
    pub fallback_message: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CommentaryRuleConfig {
    pub name: String,
    pub labels: Vec<String>,
    pub message: String,
}

impl Config {
    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse()
            .map_err(|e| anyhow::anyhow!("invalid server address {addr}: {e}"))
    }
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
host = "0.0.0.0"
port = 3000

[dashboard]
closing_time = "20:00"
staff_count = 3
currency_symbol = "¥"
max_upload_bytes = 1048576
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                let config: Config = toml::from_str(&contents)?;
                return Ok(config);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}
