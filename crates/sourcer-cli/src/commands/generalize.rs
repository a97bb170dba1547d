//! Generalize command - turn extracted page data into generalized data.

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use sourcer_core::{GeneralizedData, generalize};

use super::{PageArgs, load_extracted_data, write_output};

/// Arguments for the generalize command.
#[derive(Args)]
pub struct GeneralizeArgs {
    #[command(flatten)]
    page: PageArgs,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Plain text summary
    Text,
}

pub async fn run(args: GeneralizeArgs) -> anyhow::Result<()> {
    let ed = load_extracted_data(&args.page.input)?;
    info!("Generalizing {}", args.page.input.display());

    let gd = generalize(args.page.site, &ed)?;
    let output = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&gd)?,
        OutputFormat::Text => format_text(&gd),
    };
    write_output(args.output.as_deref(), &output)
}

pub(crate) fn format_text(gd: &GeneralizedData) -> String {
    let mut output = String::new();

    output.push_str(&format!("Source: {}\n", gd.source_of_data));
    output.push_str(&format!("Record type: {:?}\n", gd.record_type));
    if let Some(name) = gd.full_name() {
        output.push_str(&format!("Name: {name}\n"));
    }
    if let Some(gender) = gd.person_gender {
        output.push_str(&format!("Gender: {}\n", gender.as_str()));
    }
    if let Some(date) = gd.inferred_event_date() {
        output.push_str(&format!("Event date: {}\n", date.date_string()));
    }
    if let Some(place) = gd.inferred_event_place() {
        output.push_str(&format!("Event place: {}\n", place.place_string));
    }
    for spouse in &gd.spouses {
        if let Some(name) = spouse.name.as_ref().and_then(|n| n.full_name.as_deref()) {
            output.push_str(&format!("Spouse: {name}\n"));
        }
    }
    if let Some(household) = &gd.household {
        output.push_str(&format!("Household members: {}\n", household.members.len()));
    }

    output
}
