use crate::config::{Config, ExportFormat, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Default export format
    #[arg(short, long, value_enum, default_value = "fountain")]
    pub format: ExportFormat,

    /// Storage directory for saved scripts
    #[arg(short, long, default_value = ".scripta")]
    pub storage_dir: String,

    /// Force overwrite existing config
    #[arg(long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    let config = Config {
        storage_dir: args.storage_dir,
        default_format: args.format,
        ..Config::default()
    };

    let storage_dir = config.get_storage_dir(cwd);
    if !storage_dir.exists() {
        fs::create_dir_all(&storage_dir)?;
        println!("  {} Created {}/", "✓".green(), config.storage_dir);
    }

    let config_json = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, config_json)?;
    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);

    println!();
    println!("Next steps:");
    println!("  1. Run: scripta new --title \"My Screenplay\"");
    println!("  2. Run: scripta export --latest");

    Ok(())
}
