use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::ValueEnum;
use http_api::{DEFAULT_MAX_BODY_BYTES, DEFAULT_REQUEST_TIMEOUT, HttpOptions};
use serde::{Deserialize, Serialize};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8088;
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub filter: String,
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_string(),
            format: LogFormat::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReceiverConfig {
    pub host: String,
    pub port: u16,
    pub max_body_bytes: usize,
    pub request_timeout_secs: u64,
    pub log: LogConfig,
}

impl Default for ReceiverConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT.as_secs(),
            log: LogConfig::default(),
        }
    }
}

impl ReceiverConfig {
    pub fn http_options(&self) -> HttpOptions {
        HttpOptions {
            max_body_bytes: self.max_body_bytes,
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: ReceiverConfig,
    pub file: Option<PathBuf>,
    pub created: bool,
}

impl ConfigLoad {
    pub fn defaults() -> Self {
        Self {
            config: ReceiverConfig::default(),
            file: None,
            created: false,
        }
    }
}

/// Reads the config at `file`, writing the defaults there first if it does
/// not exist yet.
pub fn load_or_create(file: &Path) -> Result<ConfigLoad> {
    if file.exists() {
        let contents = fs::read_to_string(file)
            .with_context(|| format!("read config {}", file.display()))?;
        let config: ReceiverConfig = toml::from_str(&contents)
            .with_context(|| format!("parse config {}", file.display()))?;
        return Ok(ConfigLoad {
            config,
            file: Some(file.to_path_buf()),
            created: false,
        });
    }

    if let Some(dir) = file.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("create config dir {}", dir.display()))?;
    }
    let config = ReceiverConfig::default();
    let contents = toml::to_string_pretty(&config).context("serialize config")?;
    fs::write(file, contents).with_context(|| format!("write config {}", file.display()))?;

    Ok(ConfigLoad {
        config,
        file: Some(file.to_path_buf()),
        created: true,
    })
}
