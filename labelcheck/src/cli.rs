// labelcheck/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "labelcheck")]
#[command(about = "OCR-tolerant compliance checks for beverage label submissions", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Markdown,
}

/// Options shared by every verifying command.
#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Verification policy file (default: labelcheck.yaml in the working directory)
    #[arg(long, env = "LABELCHECK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format on stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Also write the report to this file (Markdown when --format markdown, JSON otherwise)
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Exit with code 1 unless the overall status is PASS
    #[arg(long)]
    pub check: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 🏷️  Verifies one label transcript against the declared application values
    Verify {
        /// Recorded OCR transcript (*.ocr.json)
        #[arg(long)]
        ocr: PathBuf,

        /// Declared brand name
        #[arg(long, conflicts_with = "application", required_unless_present = "application")]
        brand: Option<String>,

        /// Declared alcohol by volume (ex: "12.5%")
        #[arg(long, requires = "brand")]
        abv: Option<String>,

        /// Declared net contents (ex: "750 mL")
        #[arg(long, requires = "brand")]
        net_contents: Option<String>,

        /// Skip the government warning checks
        #[arg(long, requires = "brand")]
        no_gov_warning: bool,

        /// Read the declared values from an application.json instead
        #[arg(long)]
        application: Option<PathBuf>,

        #[command(flatten)]
        report: ReportArgs,
    },

    /// 📦 Verifies every item of a dataset directory
    Batch {
        /// Dataset root: one folder per label with application.json + *.ocr.json
        #[arg(long)]
        dataset: PathBuf,

        /// Labels verified concurrently (default: from config)
        #[arg(long)]
        concurrency: Option<usize>,

        #[command(flatten)]
        report: ReportArgs,
    },

    /// 🔬 Rates how readable a label transcript is
    Quality {
        /// Recorded OCR transcript (*.ocr.json)
        #[arg(long)]
        ocr: PathBuf,

        /// Verification policy file
        #[arg(long, env = "LABELCHECK_CONFIG")]
        config: Option<PathBuf>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}
