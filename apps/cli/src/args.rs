use std::path::PathBuf;

use clap::Parser;

use crate::config::{LogFormat, ReceiverConfig};

/// Mock collector endpoint that counts incoming events per source.
#[derive(Debug, Default, Parser)]
#[command(name = "hec-receiver-mock", version)]
pub struct CliArgs {
    /// TOML config file; created with defaults if missing
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Override the configured bind host for this run only
    #[arg(long)]
    pub host: Option<String>,
    /// Override the configured port for this run only
    #[arg(long)]
    pub port: Option<u16>,
    #[arg(long, value_enum)]
    pub log_format: Option<LogFormat>,
}

impl CliArgs {
    pub fn apply(&self, mut config: ReceiverConfig) -> ReceiverConfig {
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(format) = self.log_format {
            config.log.format = format;
        }
        config
    }
}
