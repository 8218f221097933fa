//! Implementation of the `cadence init` command.

use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::adapters::sqlite::initialize_database;
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::config::Config;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Force reinitialization even if already initialized
    #[arg(long, short)]
    pub force: bool,

    /// Target directory (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

#[derive(Debug, serde::Serialize)]
pub struct InitOutput {
    pub success: bool,
    pub message: String,
    pub initialized_path: PathBuf,
    pub config_written: bool,
    pub database_initialized: bool,
}

impl CommandOutput for InitOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![self.message.clone()];
        if self.config_written {
            lines.push("Wrote default configuration to .cadence/config.yaml".to_string());
        }
        if self.database_initialized {
            lines.push("Database initialized at .cadence/cadence.db".to_string());
        }
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: InitArgs, json_mode: bool) -> Result<()> {
    let target_path = if args.path.is_absolute() {
        args.path.clone()
    } else {
        std::env::current_dir().context("Failed to get current directory")?.join(&args.path)
    };

    let cadence_dir = target_path.join(".cadence");

    if cadence_dir.exists() && !args.force {
        let out = InitOutput {
            success: false,
            message: "Project already initialized. Use --force to reinitialize.".to_string(),
            initialized_path: target_path,
            config_written: false,
            database_initialized: false,
        };
        output(&out, json_mode);
        return Ok(());
    }

    if args.force && cadence_dir.exists() {
        fs::remove_dir_all(&cadence_dir)
            .await
            .context("Failed to remove existing .cadence directory")?;
    }

    fs::create_dir_all(&cadence_dir)
        .await
        .with_context(|| format!("Failed to create {:?}", cadence_dir))?;

    let config_written = write_default_config(&cadence_dir).await?;

    let db_path = cadence_dir.join("cadence.db");
    let database_url = format!("sqlite:{}", db_path.display());
    initialize_database(&database_url)
        .await
        .context("Failed to initialize database")?;

    let out = InitOutput {
        success: true,
        message: "Initialized cadence project.".to_string(),
        initialized_path: target_path,
        config_written,
        database_initialized: true,
    };
    output(&out, json_mode);
    Ok(())
}

async fn write_default_config(cadence_dir: &Path) -> Result<bool> {
    let config_path = cadence_dir.join("config.yaml");
    if config_path.exists() {
        return Ok(false);
    }

    let yaml = serde_yaml::to_string(&Config::default())
        .context("Failed to serialize default configuration")?;
    fs::write(&config_path, yaml)
        .await
        .with_context(|| format!("Failed to write {:?}", config_path))?;
    Ok(true)
}
