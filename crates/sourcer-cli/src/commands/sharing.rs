//! Sharing command - build the sharing template or URL for a record image.

use clap::Args;
use console::style;

use sourcer_core::{ActionOutcome, run_action};

use super::PageArgs;
use super::cite::open_session;
use super::load_options;

/// Arguments for the sharing command.
#[derive(Args)]
pub struct SharingArgs {
    #[command(flatten)]
    page: PageArgs,

    /// URL to fetch the sharing data from
    #[arg(long, required = true)]
    sharing_data_url: String,

    /// Print the sharing URL instead of the template
    #[arg(long)]
    url: bool,
}

pub async fn run(args: SharingArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let options = load_options(config_path)?;
    let session = open_session(&args.page, options, Some(&args.sharing_data_url))?;
    session.prefetch_sharing_data().await;

    let outcome = if args.url {
        run_action("build sharing URL", session.build_sharing_url()).await
    } else {
        run_action("build sharing template", session.build_sharing_template()).await
    };

    match outcome {
        ActionOutcome::Done(text) => {
            println!("{text}");
            Ok(())
        }
        ActionOutcome::Warning(message) => {
            eprintln!("{} {}", style("⚠").yellow(), message);
            anyhow::bail!("No sharing data is available for {}", args.page.input.display())
        }
    }
}
