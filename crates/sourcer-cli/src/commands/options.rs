//! Options command - manage citation options.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;

use sourcer_core::Options;

/// Arguments for the options command.
#[derive(Args)]
pub struct OptionsArgs {
    #[command(subcommand)]
    command: OptionsCommand,
}

#[derive(Subcommand)]
enum OptionsCommand {
    /// Show current options
    Show,

    /// Initialize a new options file
    Init(InitArgs),

    /// Get a specific option value
    Get {
        /// Option key (e.g., "table_general_format")
        key: String,
    },

    /// Set an option value
    Set {
        /// Option key
        key: String,
        /// New value
        value: String,
    },

    /// List every option key
    Keys,

    /// Show options file path
    Path,
}

#[derive(Args)]
struct InitArgs {
    /// Output path for options file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Overwrite existing file
    #[arg(long)]
    force: bool,
}

pub async fn run(args: OptionsArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let path = config_path.map(PathBuf::from).unwrap_or_else(default_options_path);
    match args.command {
        OptionsCommand::Show => show_options(&path),
        OptionsCommand::Init(init_args) => init_options(init_args, &path),
        OptionsCommand::Get { key } => get_option(&path, &key),
        OptionsCommand::Set { key, value } => set_option(&path, &key, &value),
        OptionsCommand::Keys => list_keys(),
        OptionsCommand::Path => show_path(&path),
    }
}

pub fn default_options_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sourcer")
        .join("options.json")
}

fn read_options(path: &Path) -> anyhow::Result<Options> {
    if path.exists() {
        Ok(Options::from_file(path)?)
    } else {
        Ok(Options::default())
    }
}

fn show_options(path: &Path) -> anyhow::Result<()> {
    if !path.exists() {
        println!(
            "{} No options file found, showing defaults.",
            style("ℹ").blue()
        );
    }
    let options = read_options(path)?;
    println!("{}", serde_json::to_string_pretty(&options)?);
    Ok(())
}

fn init_options(args: InitArgs, default_path: &Path) -> anyhow::Result<()> {
    let output_path = args.output.unwrap_or_else(|| default_path.to_path_buf());

    if output_path.exists() && !args.force {
        anyhow::bail!(
            "Options file already exists at {}. Use --force to overwrite.",
            output_path.display()
        );
    }

    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }

    Options::default().save(&output_path)?;

    println!(
        "{} Created options file at {}",
        style("✓").green(),
        output_path.display()
    );
    Ok(())
}

fn get_option(path: &Path, key: &str) -> anyhow::Result<()> {
    let options = read_options(path)?;
    let value = options
        .get(key)
        .ok_or_else(|| anyhow::anyhow!("Option key not found: {}", key))?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

fn set_option(path: &Path, key: &str, value: &str) -> anyhow::Result<()> {
    let mut options = read_options(path)?;
    options.set(key, value)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    options.save(path)?;

    println!("{} Set {} = {}", style("✓").green(), key, value);
    Ok(())
}

fn list_keys() -> anyhow::Result<()> {
    for key in Options::keys() {
        println!("{key}");
    }
    Ok(())
}

fn show_path(path: &Path) -> anyhow::Result<()> {
    println!("Options file: {}", path.display());

    if path.exists() {
        println!("Status: {}", style("exists").green());
    } else {
        println!("Status: {}", style("not created").yellow());
        println!();
        println!("Run 'sourcer options init' to create an options file.");
    }
    Ok(())
}
