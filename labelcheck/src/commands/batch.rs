// labelcheck/src/commands/batch.rs
//
// USE CASE: Verify a whole dataset directory.

use anyhow::{Context, Result};
use std::path::PathBuf;

use labelcheck_core::application::{
    BatchReport, LabelVerifier, load_dataset, render_batch_markdown, run_batch,
};
use labelcheck_core::infrastructure::fs::{atomic_write, write_json};
use labelcheck_core::infrastructure::{JinjaRenderer, TranscriptOcr};

use crate::cli::{OutputFormat, ReportArgs};
use crate::commands::resolve_config;
use crate::output;

pub async fn execute(dataset: PathBuf, concurrency: Option<usize>, report: ReportArgs) -> Result<()> {
    let quiet = report.format == OutputFormat::Json;

    // 1. Policy (a labelcheck.yaml at the dataset root applies to the whole batch)
    let config = resolve_config(report.config.as_deref(), &dataset)?;
    let concurrency = concurrency.unwrap_or(config.batch.concurrency);
    let verifier = LabelVerifier::new(config)?;

    // 2. Discovery
    let items = load_dataset(&dataset)
        .with_context(|| format!("Failed to load dataset {}", dataset.display()))?;
    if !quiet {
        println!(
            "📦 Verifying {} label(s) from {} (concurrency {})...",
            items.len(),
            dataset.display(),
            concurrency
        );
    }

    // 3. Run
    let batch = run_batch(&TranscriptOcr::new(), &verifier, items, concurrency).await;

    // 4. Output
    emit(&batch, &report)?;

    // 5. Gate
    if report.check && !batch.all_passed() {
        eprintln!(
            "\n💥 --check mode: {} of {} label(s) need review.",
            batch.needs_review, batch.count
        );
        std::process::exit(1);
    }

    Ok(())
}

fn emit(batch: &BatchReport, report: &ReportArgs) -> Result<()> {
    match report.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(batch)?),
        OutputFormat::Markdown => {
            println!("{}", render_batch_markdown(&JinjaRenderer::new(), batch)?);
        }
        OutputFormat::Table => {
            println!("{}", output::batch_table(batch));
            println!("\n📊 Batch Summary:");
            println!("   Items: {}", batch.count);
            println!("   ✅ Passed: {}", batch.passed);
            println!("   ⚠️  Needs review: {}", batch.needs_review);
        }
    }

    if let Some(out) = &report.out {
        match report.format {
            OutputFormat::Markdown => {
                atomic_write(out, render_batch_markdown(&JinjaRenderer::new(), batch)?)?;
            }
            _ => write_json(out, batch)?,
        }
        if report.format != OutputFormat::Json {
            println!("📄 Report saved to {}", out.display());
        }
    }

    Ok(())
}
