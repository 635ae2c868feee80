use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "scripta.config.json";

/// Output format for `scripta export`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Fountain,
    Html,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Fountain => "fountain",
            ExportFormat::Html => "html",
        }
    }
}

/// Scripta configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory holding saved scripts, relative to the config file
    #[serde(default = "default_storage_dir")]
    pub storage_dir: String,

    /// Print a title page in HTML exports
    #[serde(default = "default_true")]
    pub include_title_page: bool,

    #[serde(default = "default_format")]
    pub default_format: ExportFormat,
}

fn default_storage_dir() -> String {
    ".scripta".to_string()
}

fn default_true() -> bool {
    true
}

fn default_format() -> ExportFormat {
    ExportFormat::Fountain
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    /// Get absolute path to the storage directory
    pub fn get_storage_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.storage_dir)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_dir: default_storage_dir(),
            include_title_page: true,
            default_format: default_format(),
        }
    }
}
