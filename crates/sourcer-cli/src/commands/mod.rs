//! Subcommands and the helpers they share.

pub mod all_citations;
pub mod batch;
pub mod cite;
pub mod generalize;
pub mod options;
pub mod sharing;
pub mod table;

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::Args;
use tracing::debug;

use sourcer_core::{ExtractedData, Options, Site};

/// The page a command works on.
#[derive(Args, Clone)]
pub struct PageArgs {
    /// JSON file with the extracted data of the page
    #[arg(required = true)]
    pub input: PathBuf,

    /// Site the page was extracted from (freebmd, fs, mh, naie, nzbdm, wiewaswie, wikipedia)
    #[arg(short, long)]
    pub site: Site,
}

/// Read extracted data from a JSON file.
pub fn load_extracted_data(path: &Path) -> anyhow::Result<ExtractedData> {
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }
    let content = fs::read_to_string(path)?;
    match serde_json::from_str::<serde_json::Value>(&content)? {
        serde_json::Value::Object(map) => Ok(map),
        _ => anyhow::bail!("Extracted data in {} is not a JSON object", path.display()),
    }
}

/// Options from the given file, else from the default file if there is one.
pub fn load_options(config_path: Option<&str>) -> anyhow::Result<Options> {
    if let Some(path) = config_path {
        return Ok(Options::from_file(Path::new(path))?);
    }
    let default_path = options::default_options_path();
    if default_path.exists() {
        debug!("Loading options from {}", default_path.display());
        Ok(Options::from_file(&default_path)?)
    } else {
        Ok(Options::default())
    }
}

/// The accessed date for citations, today unless given.
pub fn run_date(date: Option<NaiveDate>) -> NaiveDate {
    date.unwrap_or_else(|| chrono::Local::now().date_naive())
}

/// Write to a file, or to stdout when no file is given.
pub fn write_output(output: Option<&Path>, content: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            fs::write(path, content)?;
            eprintln!(
                "{} Output written to {}",
                console::style("✓").green(),
                path.display()
            );
        }
        None => println!("{content}"),
    }
    Ok(())
}
