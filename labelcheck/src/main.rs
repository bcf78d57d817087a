// labelcheck/src/main.rs

mod cli;
mod commands;
mod output;

use clap::Parser;
use miette::Diagnostic;
use tracing_subscriber::EnvFilter;

use labelcheck_core::LabelCheckError;

use crate::cli::{Cli, Commands};
use crate::commands::verify::InlineDeclaration;

#[tokio::main]
async fn main() {
    // 1. Setup Logging (Tracing)
    // RUST_LOG=debug labelcheck verify ... shows every check decision
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        eprintln!("❌ {:#}", err);
        if let Some(help) = err.downcast_ref::<LabelCheckError>().and_then(|e| e.help()) {
            eprintln!("   help: {}", help);
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        // --- USE CASE: SINGLE LABEL ---
        Commands::Verify {
            ocr,
            brand,
            abv,
            net_contents,
            no_gov_warning,
            application,
            report,
        } => {
            let inline = InlineDeclaration {
                brand,
                abv,
                net_contents,
                no_gov_warning,
            };
            let declared = commands::verify::declared_fields(inline, application.as_deref())?;
            commands::verify::execute(ocr, declared, report).await
        }

        // --- USE CASE: DATASET ---
        Commands::Batch {
            dataset,
            concurrency,
            report,
        } => commands::batch::execute(dataset, concurrency, report).await,

        // --- USE CASE: IMAGE QUALITY ---
        Commands::Quality { ocr, config, json } => commands::quality::execute(ocr, config, json),
    }
}
