use crate::constants::{
    CONNECT_TIMEOUT_SECS, DEFAULT_HOST, DEFAULT_PORT, IO_TIMEOUT_SECS, TRANSFER_BUFFER_SIZE,
};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,
    pub connect_timeout_secs: u64,
    pub io_timeout_secs: u64,
    pub upload_buffer_size: Option<usize>, // Optional to allow default value
    pub download_buffer_size: Option<usize>, // Optional to allow default value
    /// Abort on a rejected USER/PASS instead of carrying on.
    pub strict_login: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub client: ClientConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: String::from(DEFAULT_HOST),
            port: DEFAULT_PORT,
            connect_timeout_secs: CONNECT_TIMEOUT_SECS,
            io_timeout_secs: IO_TIMEOUT_SECS,
            upload_buffer_size: Some(TRANSFER_BUFFER_SIZE),
            download_buffer_size: Some(TRANSFER_BUFFER_SIZE),
            strict_login: true,
        }
    }
}

impl ClientConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn io_timeout(&self) -> Duration {
        Duration::from_secs(self.io_timeout_secs)
    }

    pub fn upload_buffer_size(&self) -> usize {
        self.upload_buffer_size.unwrap_or(TRANSFER_BUFFER_SIZE)
    }

    pub fn download_buffer_size(&self) -> usize {
        self.download_buffer_size.unwrap_or(TRANSFER_BUFFER_SIZE)
    }
}

impl Config {
    pub fn load_from_file(path: &str) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path))?;
        Self::from_toml_str(&config_str)
            .with_context(|| format!("Failed to parse configuration file: {}", path))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        // Missing keys fall back to ClientConfig::default()
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let client = &self.client;
        if client.host.trim().is_empty() {
            bail!("host cannot be empty");
        }
        if client.port == 0 {
            bail!("port cannot be 0");
        }
        if client.connect_timeout_secs == 0 || client.io_timeout_secs == 0 {
            bail!("timeouts must be at least one second");
        }
        if client.upload_buffer_size() == 0 || client.download_buffer_size() == 0 {
            bail!("transfer buffer sizes must be greater than 0");
        }
        Ok(())
    }
}
