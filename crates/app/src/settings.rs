//! Handles settings for the application.
//!
//! Sources, lowest to highest priority: defaults, the TOML config file
//! (`config/finance.toml` unless `--config` is given), `FINANCE_*` environment
//! variables, command line flags.
use std::path::PathBuf;

use serde::Deserialize;

use crate::{cli::Cli, error::Result};

const DEFAULT_CONFIG_PATH: &str = "config/finance.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// JSON file holding every wallet.
    pub data_file: PathBuf,
    /// Log level for the application and the engine.
    pub level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("finance.json"),
            level: "info".to_string(),
        }
    }
}

pub fn load(cli: &Cli) -> Result<Settings> {
    let config_path = cli.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("FINANCE"));
    let mut settings: Settings = builder.build()?.try_deserialize()?;

    if let Some(data_file) = cli.data_file.clone() {
        settings.data_file = data_file;
    }
    if let Some(level) = cli.level.clone() {
        settings.level = level;
    }

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn flags_override_file() {
        let dir = std::env::temp_dir().join(format!("finance-settings-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("finance.toml");
        std::fs::write(&path, "data_file = \"from-file.json\"\nlevel = \"debug\"\n").unwrap();
        let path = path.to_string_lossy().to_string();

        let cli = Cli::parse_from(["finance", "--config", &path, "wallets"]);
        let settings = load(&cli).unwrap();
        assert_eq!(settings.data_file, PathBuf::from("from-file.json"));
        assert_eq!(settings.level, "debug");

        let cli = Cli::parse_from([
            "finance",
            "--config",
            &path,
            "--data-file",
            "from-flag.json",
            "wallets",
        ]);
        let settings = load(&cli).unwrap();
        assert_eq!(settings.data_file, PathBuf::from("from-flag.json"));
        assert_eq!(settings.level, "debug");

        let _ = std::fs::remove_dir_all(&dir);
    }
}
