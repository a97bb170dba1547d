//! Batch command - build citations for many extracted pages.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::NaiveDate;
use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use sourcer_core::{
    CitationInput, CitationType, GeneralizedData, Options, Site, build_citation,
    build_household_table, generalize,
};

use super::{load_extracted_data, load_options, run_date};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern of extracted data JSON files
    #[arg(required = true)]
    input: String,

    /// Site all pages were extracted from
    #[arg(short, long)]
    site: Site,

    /// Citation style (inline, source, narrative)
    #[arg(short = 't', long = "type", default_value = "inline")]
    citation_type: CitationType,

    /// Accessed date, e.g. 2024-03-15 (default: today)
    #[arg(short, long)]
    date: Option<NaiveDate>,

    /// Output directory for one citation file per page
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of citing a single file.
struct CiteResult {
    path: PathBuf,
    gd: Option<GeneralizedData>,
    citation: Option<String>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let options = load_options(config_path)?;
    let run_date = run_date(args.date);

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("json"))
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    eprintln!(
        "{} Found {} files to cite",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let mut results = Vec::with_capacity(files.len());
    for path in files {
        let file_start = Instant::now();
        let result = cite_file(&path, &args, &options, run_date);
        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        match result {
            Ok((gd, citation)) => results.push(CiteResult {
                path,
                gd: Some(gd),
                citation: Some(citation),
                error: None,
                processing_time_ms,
            }),
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to cite {}: {}", path.display(), error_msg);
                    results.push(CiteResult {
                        path,
                        gd: None,
                        citation: None,
                        error: Some(error_msg),
                        processing_time_ms,
                    });
                } else {
                    error!("Failed to cite {}: {}", path.display(), error_msg);
                    anyhow::bail!("Citing failed: {}", error_msg);
                }
            }
        }

        pb.inc(1);
    }

    pb.finish_with_message("Complete");

    let successful: Vec<_> = results.iter().filter(|r| r.citation.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    for result in &successful {
        match (&result.citation, &args.output_dir) {
            (Some(citation), Some(output_dir)) => {
                let output_name = result
                    .path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("citation");
                let output_path = output_dir.join(format!("{output_name}.txt"));
                fs::write(&output_path, citation)?;
                debug!("Wrote citation to {}", output_path.display());
            }
            (Some(citation), None) => println!("{citation}\n"),
            _ => {}
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        eprintln!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    eprintln!();
    eprintln!(
        "{} Cited {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    eprintln!(
        "   {} successful, {} failed",
        style(successful.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        eprintln!();
        eprintln!("{}", style("Failed files:").red());
        for result in &failed {
            eprintln!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn cite_file(
    path: &Path,
    args: &BatchArgs,
    options: &Options,
    run_date: NaiveDate,
) -> anyhow::Result<(GeneralizedData, String)> {
    let ed = load_extracted_data(path)?;
    let gd = generalize(args.site, &ed)?;

    let household_table_string = gd
        .household
        .as_ref()
        .map(|_| build_household_table(&gd, options, None).table_string);

    let input = CitationInput {
        site: args.site,
        ed: &ed,
        gd: &gd,
        citation_type: args.citation_type,
        run_date,
        options,
        household_table_string,
        sharing_link: None,
    };
    let citation = build_citation(&input)?.citation;
    Ok((gd, citation))
}

fn write_summary(path: &Path, results: &[CiteResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "record_type",
        "name",
        "event_year",
        "event_place",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = result.path.file_name().and_then(|s| s.to_str()).unwrap_or("");

        if let Some(gd) = &result.gd {
            wtr.write_record([
                filename,
                "success",
                &format!("{:?}", gd.record_type),
                &gd.full_name().unwrap_or_default(),
                &gd.inferred_event_year().unwrap_or_default(),
                &gd
                    .inferred_event_place()
                    .map(|p| p.place_string.clone())
                    .unwrap_or_default(),
                &result.processing_time_ms.to_string(),
                "",
            ])?;
        } else {
            wtr.write_record([
                filename,
                "error",
                "",
                "",
                "",
                "",
                &result.processing_time_ms.to_string(),
                result.error.as_deref().unwrap_or(""),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
