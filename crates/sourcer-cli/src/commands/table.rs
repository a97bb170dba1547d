//! Table command - build the household table of a census page.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Args;
use console::style;

use super::cite::open_session;
use super::{PageArgs, load_options, run_date, write_output};

/// Arguments for the table command.
#[derive(Args)]
pub struct TableArgs {
    #[command(flatten)]
    page: PageArgs,

    /// Accessed date for a citation caption (default: today)
    #[arg(short, long)]
    date: Option<NaiveDate>,

    /// URL to fetch sharing data for the record image from
    #[arg(long)]
    sharing_data_url: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub async fn run(args: TableArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let options = load_options(config_path)?;
    let session = open_session(&args.page, options, args.sharing_data_url.as_deref())?;

    if session.generalized_data().household.is_none() {
        anyhow::bail!(
            "{} has no household to build a table from",
            args.page.input.display()
        );
    }

    session.prefetch_sharing_data().await;
    let table = session.build_household_table(run_date(args.date)).await?;
    if table.table_string.is_empty() {
        eprintln!("{} The household table is empty", style("ℹ").blue());
    }
    write_output(args.output.as_deref(), &table.table_string)
}
