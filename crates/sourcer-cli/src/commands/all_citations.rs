//! All-citations command - cite every FamilySearch source attached to a person.

use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use sourcer_core::aggregate::parse_sources;
use sourcer_core::models::options::FsAllCitationsType;
use sourcer_core::{AllCitations, MemoryFetcher, build_all_citations, build_citations_for_sources};

use super::{load_options, run_date, write_output};
use crate::fetcher::HttpFetcher;

/// Arguments for the all-citations command.
#[derive(Args)]
pub struct AllCitationsArgs {
    /// Source ids to fetch, comma separated
    #[arg(long, value_delimiter = ',', required_unless_present = "sources")]
    ids: Vec<String>,

    /// Saved sources response to use instead of fetching
    #[arg(long, conflicts_with = "ids")]
    sources: Option<PathBuf>,

    /// JSON object mapping record URLs to saved records, used with --sources
    #[arg(long, requires = "sources")]
    records: Option<PathBuf>,

    /// Citation style, overriding the options file
    #[arg(short = 't', long = "type", value_enum)]
    citation_type: Option<AllCitationsType>,

    /// Accessed date, e.g. 2024-03-15 (default: today)
    #[arg(short, long)]
    date: Option<NaiveDate>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum AllCitationsType {
    /// FamilySearch's own citation text, inline
    FsPlainInline,
    /// FamilySearch's own citation text, as sources
    FsPlainSource,
    /// A narrative sentence with an inline citation
    Narrative,
    /// Inline citations
    Inline,
    /// Source citations
    Source,
}

impl From<AllCitationsType> for FsAllCitationsType {
    fn from(value: AllCitationsType) -> Self {
        match value {
            AllCitationsType::FsPlainInline => Self::FsPlainInline,
            AllCitationsType::FsPlainSource => Self::FsPlainSource,
            AllCitationsType::Narrative => Self::Narrative,
            AllCitationsType::Inline => Self::Inline,
            AllCitationsType::Source => Self::Source,
        }
    }
}

pub async fn run(args: AllCitationsArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let mut options = load_options(config_path)?;
    if let Some(citation_type) = args.citation_type {
        options.fs_all_citations_type = citation_type.into();
    }
    let run_date = run_date(args.date);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    spinner.enable_steady_tick(std::time::Duration::from_millis(120));

    let all = match &args.sources {
        Some(path) => {
            spinner.set_message("Reading saved sources...");
            let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(path)?)?;
            let sources = parse_sources(&value)?;
            let fetcher = load_records(args.records.as_ref())?;
            info!("Citing {} saved sources", sources.len());
            build_citations_for_sources(&fetcher, sources, &options, run_date).await
        }
        None => {
            spinner.set_message(format!("Fetching {} sources...", args.ids.len()));
            let fetcher = HttpFetcher::new()?;
            build_all_citations(&fetcher, &args.ids, &options, run_date).await?
        }
    };

    spinner.finish_and_clear();
    print_summary(&all);
    write_output(args.output.as_deref(), &all.citations_string)
}

fn load_records(path: Option<&PathBuf>) -> anyhow::Result<MemoryFetcher> {
    let mut fetcher = MemoryFetcher::new();
    let Some(path) = path else {
        return Ok(fetcher);
    };
    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(path)?)?;
    let serde_json::Value::Object(records) = value else {
        anyhow::bail!("Records file {} is not a JSON object", path.display());
    };
    for (url, record) in records {
        fetcher.insert(url, record);
    }
    Ok(fetcher)
}

fn print_summary(all: &AllCitations) {
    let cited = all.sources.iter().filter(|s| s.citation_object.is_some()).count();
    eprintln!(
        "{} {} sources, {} cited from their records",
        style("ℹ").blue(),
        all.sources.len(),
        style(cited).green()
    );
}
