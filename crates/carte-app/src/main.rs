use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

pub mod controller;
pub mod io;
pub mod profile;

#[cfg(test)]
mod tests;

/// Command line arguments. Flags override the config profile and `CARTE_*`
/// environment variables.
#[derive(Parser, Debug)]
#[command(name = "carte")]
#[command(about = "Annotate menu documents with vocabulary glosses and gather corpus statistics")]
pub struct Args {
    /// JSON config profile
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory of parsed menu documents (*.json)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Directory for annotated documents and reports
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Vocabulary table (TSV)
    #[arg(long)]
    pub vocabulary: Option<PathBuf>,

    /// Cross-reference name list (TSV)
    #[arg(long)]
    pub cross_reference: Option<PathBuf>,

    /// Noise threshold for n-grams and common dishes
    #[arg(long)]
    pub min_count: Option<usize>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,
}

fn init_logging(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    init_logging(&args.log_level, args.log_json);

    let config = match profile::resolve_config(&args) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::FAILURE;
        }
    };

    match controller::run(&config) {
        Ok(summary) => {
            tracing::info!(
                "Done: {} documents ({} annotated), {} stats issues, {} dishes cataloged",
                summary.documents,
                summary.annotated,
                summary.issues,
                summary.dishes
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
