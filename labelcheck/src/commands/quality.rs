// labelcheck/src/commands/quality.rs
//
// USE CASE: Image readability only, no field checks.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use labelcheck_core::application::LabelVerifier;
use labelcheck_core::infrastructure::TranscriptOcr;

use crate::commands::resolve_config;
use crate::output;

pub fn execute(ocr: PathBuf, config: Option<PathBuf>, json: bool) -> Result<()> {
    let config = resolve_config(config.as_deref(), Path::new("."))?;
    let verifier = LabelVerifier::new(config)?;

    let page = TranscriptOcr::load(&ocr)
        .with_context(|| format!("Failed to read OCR transcript {}", ocr.display()))?;
    let quality = verifier.assess_quality(&page.lines);

    if json {
        println!("{}", serde_json::to_string_pretty(&quality)?);
    } else {
        println!("🔬 Image quality for {} ({}x{})", ocr.display(), page.width, page.height);
        println!("{}", output::quality_table(&quality));
    }

    Ok(())
}
