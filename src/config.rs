//! Configuration for the crappy-http client and server.
//!
//! Supports both command-line arguments and a TOML configuration file.
//! CLI arguments take precedence over config file values. Host and port
//! are explicit configuration on every call path; there are no reachable
//! module-level address globals.

use clap::Parser;
use serde::Deserialize;
use std::path::PathBuf;

/// Command-line arguments for the server binary
#[derive(Parser, Debug)]
#[command(name = "crappy-server")]
#[command(version = "0.0.1")]
#[command(about = "A crude pseudo-HTTP server over blocking TCP", long_about = None)]
pub struct ServerCliArgs {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Address to bind to (e.g., 127.0.0.1)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Response body sent to every connection
    #[arg(short, long)]
    pub response: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// Command-line arguments for the client binary
#[derive(Parser, Debug)]
#[command(name = "crappy-client")]
#[command(version = "0.0.1")]
#[command(about = "A crude pseudo-HTTP client over blocking TCP", long_about = None)]
pub struct ClientCliArgs {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Host to connect to (e.g., 127.0.0.1)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to connect to
    #[arg(short = 'P', long)]
    pub port: Option<u16>,

    /// Request body to send
    #[arg(short, long)]
    pub payload: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// TOML configuration file structure
#[derive(Debug, Deserialize, Default)]
pub struct TomlConfig {
    #[serde(default)]
    pub connection: ConnectionConfig,
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub client: ClientSection,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Shared address configuration
#[derive(Debug, Deserialize)]
pub struct ConnectionConfig {
    /// Host both binaries default to
    #[serde(default = "default_host")]
    pub host: String,
    /// Port both binaries default to
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Server-role configuration
#[derive(Debug, Deserialize)]
pub struct ServerSection {
    /// Response body sent to every connection
    #[serde(default = "default_response")]
    pub response: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            response: default_response(),
        }
    }
}

/// Client-role configuration
#[derive(Debug, Deserialize)]
pub struct ClientSection {
    /// Request body to send
    #[serde(default = "default_payload")]
    pub payload: String,
}

impl Default for ClientSection {
    fn default() -> Self {
        Self {
            payload: default_payload(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_response() -> String {
    "Request received!".to_string()
}

fn default_payload() -> String {
    "Default client request payload".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Final resolved server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub response: Vec<u8>,
    pub log_level: String,
}

impl ServerConfig {
    /// Load configuration from CLI args and optional TOML file.
    /// CLI arguments take precedence over TOML file values.
    pub fn load() -> Result<Self, ConfigError> {
        let cli = ServerCliArgs::parse();
        let toml_config = read_toml(cli.config.as_ref())?;

        Ok(ServerConfig {
            host: cli.host.unwrap_or(toml_config.connection.host),
            port: cli.port.unwrap_or(toml_config.connection.port),
            response: cli
                .response
                .unwrap_or(toml_config.server.response)
                .into_bytes(),
            log_level: resolve_log_level(cli.log_level, toml_config.logging.level),
        })
    }
}

/// Final resolved client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,
    pub payload: Vec<u8>,
    pub log_level: String,
}

impl ClientConfig {
    /// Load configuration from CLI args and optional TOML file.
    /// CLI arguments take precedence over TOML file values.
    pub fn load() -> Result<Self, ConfigError> {
        let cli = ClientCliArgs::parse();
        let toml_config = read_toml(cli.config.as_ref())?;

        Ok(ClientConfig {
            host: cli.host.unwrap_or(toml_config.connection.host),
            port: cli.port.unwrap_or(toml_config.connection.port),
            payload: cli
                .payload
                .unwrap_or(toml_config.client.payload)
                .into_bytes(),
            log_level: resolve_log_level(cli.log_level, toml_config.logging.level),
        })
    }
}

fn read_toml(path: Option<&PathBuf>) -> Result<TomlConfig, ConfigError> {
    match path {
        Some(config_path) => {
            let contents = std::fs::read_to_string(config_path)
                .map_err(|e| ConfigError::FileRead(config_path.clone(), e))?;
            toml::from_str(&contents)
                .map_err(|e| ConfigError::TomlParse(config_path.clone(), e))
        }
        None => Ok(TomlConfig::default()),
    }
}

// A --log-level left at its clap default defers to the TOML value.
fn resolve_log_level(cli_level: String, toml_level: String) -> String {
    if cli_level != "info" {
        cli_level
    } else {
        toml_level
    }
}

/// Configuration loading errors
#[derive(Debug)]
pub enum ConfigError {
    FileRead(PathBuf, std::io::Error),
    TomlParse(PathBuf, toml::de::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::FileRead(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::TomlParse(path, e) => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
