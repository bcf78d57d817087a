// labelcheck/src/commands/verify.rs
//
// USE CASE: Verify one label against its application.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use labelcheck_core::application::{LabelVerifier, render_verification_markdown, verify_image};
use labelcheck_core::domain::compliance::VerificationResult;
use labelcheck_core::domain::label::DeclaredFields;
use labelcheck_core::infrastructure::fs::{atomic_write, write_json};
use labelcheck_core::infrastructure::{ApplicationRecord, JinjaRenderer, TranscriptOcr};

use crate::cli::{OutputFormat, ReportArgs};
use crate::commands::resolve_config;
use crate::output;

/// Declared values straight from the command line.
pub struct InlineDeclaration {
    pub brand: Option<String>,
    pub abv: Option<String>,
    pub net_contents: Option<String>,
    pub no_gov_warning: bool,
}

pub fn declared_fields(
    inline: InlineDeclaration,
    application: Option<&Path>,
) -> Result<DeclaredFields> {
    if let Some(path) = application {
        let record = ApplicationRecord::load(path)
            .with_context(|| format!("Failed to read application record {}", path.display()))?;
        return Ok(record.into_declared());
    }

    let mut declared = DeclaredFields::new(inline.brand.unwrap_or_default())
        .with_gov_warning(!inline.no_gov_warning);
    if let Some(abv) = inline.abv {
        declared = declared.with_abv(abv);
    }
    if let Some(net) = inline.net_contents {
        declared = declared.with_net_contents(net);
    }
    Ok(declared)
}

pub async fn execute(ocr: PathBuf, declared: DeclaredFields, report: ReportArgs) -> Result<()> {
    let quiet = report.format == OutputFormat::Json;
    if !quiet {
        println!("🏷️  Verifying label: {}", ocr.display());
    }

    // 1. Policy
    let config = resolve_config(report.config.as_deref(), Path::new("."))?;
    let verifier = LabelVerifier::new(config)?;

    // 2. OCR + checks
    let image = std::fs::read(&ocr)
        .with_context(|| format!("Failed to read OCR transcript {}", ocr.display()))?;
    let result = verify_image(&TranscriptOcr::new(), &verifier, &image, &declared)
        .await
        .with_context(|| format!("Verification of {} failed", ocr.display()))?;

    // 3. Output
    let name = ocr
        .file_name()
        .map(|n| n.to_string_lossy().trim_end_matches(".ocr.json").to_string())
        .unwrap_or_else(|| "label".to_string());
    emit(&name, &result, &report)?;

    // 4. Gate
    if report.check && !result.overall_status.is_pass() {
        eprintln!(
            "\n💥 --check mode: overall status is {}.",
            result.overall_status
        );
        std::process::exit(1);
    }

    Ok(())
}

fn emit(name: &str, result: &VerificationResult, report: &ReportArgs) -> Result<()> {
    match report.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(result)?);
        }
        OutputFormat::Markdown => {
            println!("{}", render_verification_markdown(&JinjaRenderer::new(), name, result)?);
        }
        OutputFormat::Table => {
            println!("{}", output::verification_table(result));
            if let Some(quality) = &result.image_quality {
                println!("\n🔬 Image quality");
                println!("{}", output::quality_table(quality));
            }
            let icon = if result.overall_status.is_pass() { "✅" } else { "⚠️ " };
            println!("\n{} Overall status: {}", icon, result.overall_status);
        }
    }

    if let Some(out) = &report.out {
        match report.format {
            OutputFormat::Markdown => {
                let md = render_verification_markdown(&JinjaRenderer::new(), name, result)?;
                atomic_write(out, md)?;
            }
            _ => write_json(out, result)?,
        }
        if report.format != OutputFormat::Json {
            println!("📄 Report saved to {}", out.display());
        }
    }

    Ok(())
}
