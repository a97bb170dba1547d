//! CLI application for genealogy record generalization and WikiTree citations.

mod commands;
mod fetcher;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{all_citations, batch, cite, generalize, options, sharing, table};

/// Sourcer - Build WikiTree citations from extracted genealogy record data
#[derive(Parser)]
#[command(name = "sourcer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to options file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generalize the extracted data of one page
    Generalize(generalize::GeneralizeArgs),

    /// Build a citation for one page
    Cite(cite::CiteArgs),

    /// Build the household table for one page
    Table(table::TableArgs),

    /// Build the sharing template or URL for one page
    Sharing(sharing::SharingArgs),

    /// Build citations for many pages
    Batch(batch::BatchArgs),

    /// Build citations for all FamilySearch sources of a person
    AllCitations(all_citations::AllCitationsArgs),

    /// Manage citation options
    Options(options::OptionsArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config = cli.config.as_deref();
    match cli.command {
        Commands::Generalize(args) => generalize::run(args).await,
        Commands::Cite(args) => cite::run(args, config).await,
        Commands::Table(args) => table::run(args, config).await,
        Commands::Sharing(args) => sharing::run(args, config).await,
        Commands::Batch(args) => batch::run(args, config).await,
        Commands::AllCitations(args) => all_citations::run(args, config).await,
        Commands::Options(args) => options::run(args, config).await,
    }
}
