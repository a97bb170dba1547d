//! Cite command - build a citation for a single page.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;
use clap::Args;
use tracing::{debug, info};

use sourcer_core::{CitationType, Options, PopupSession};

use super::{PageArgs, load_extracted_data, load_options, run_date, write_output};
use crate::fetcher::HttpFetcher;

/// Arguments for the cite command.
#[derive(Args)]
pub struct CiteArgs {
    #[command(flatten)]
    page: PageArgs,

    /// Citation style (inline, source, narrative)
    #[arg(short = 't', long = "type", default_value = "inline")]
    citation_type: CitationType,

    /// Accessed date, e.g. 2024-03-15 (default: today)
    #[arg(short, long)]
    date: Option<NaiveDate>,

    /// URL to fetch sharing data for the record image from
    #[arg(long)]
    sharing_data_url: Option<String>,

    /// Append the household table to the citation
    #[arg(long)]
    with_table: bool,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub async fn run(args: CiteArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let mut options = load_options(config_path)?;
    if args.with_table {
        options.add_household_table = true;
    }

    let session = open_session(&args.page, options, args.sharing_data_url.as_deref())?;
    session.prefetch_sharing_data().await;

    info!("Building {} citation", args.citation_type.as_str());
    let citation = session.build_citation(args.citation_type, run_date(args.date)).await?;
    write_output(args.output.as_deref(), &citation.citation)
}

/// Start a session over a page, fetching sharing data from the URL when given.
pub(crate) fn open_session(
    page: &PageArgs,
    options: Options,
    sharing_data_url: Option<&str>,
) -> anyhow::Result<PopupSession> {
    let ed = load_extracted_data(&page.input)?;
    let fetcher = Arc::new(HttpFetcher::new()?);
    let mut session = PopupSession::new(page.site, ed, options, fetcher)?;
    if let Some(url) = sharing_data_url {
        debug!("Sharing data will be fetched from {}", url);
        session = session.with_sharing_data_url(url);
    }
    Ok(session)
}
