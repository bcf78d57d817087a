// labelcheck-core/src/application/report.rs

use serde::Serialize;
use serde_json::json;

use crate::application::batch::BatchReport;
use crate::application::ports::TemplateEngine;
use crate::domain::compliance::verdict::VerificationResult;
use crate::error::LabelCheckError;
use crate::infrastructure::error::InfrastructureError;

pub const VERIFICATION_TEMPLATE: &str = include_str!("../../templates/verification.md.j2");
pub const BATCH_TEMPLATE: &str = include_str!("../../templates/batch.md.j2");

/// Reviewer-facing Markdown for a single label.
pub fn render_verification_markdown<T>(
    engine: &T,
    name: &str,
    result: &VerificationResult,
) -> Result<String, LabelCheckError>
where
    T: TemplateEngine + ?Sized,
{
    let context = json!({ "name": name, "result": to_context(result)? });
    engine.render(VERIFICATION_TEMPLATE, &context)
}

pub fn render_batch_markdown<T>(engine: &T, report: &BatchReport) -> Result<String, LabelCheckError>
where
    T: TemplateEngine + ?Sized,
{
    let context = json!({ "report": to_context(report)? });
    engine.render(BATCH_TEMPLATE, &context)
}

fn to_context<S: Serialize>(value: &S) -> Result<serde_json::Value, LabelCheckError> {
    serde_json::to_value(value).map_err(|e| InfrastructureError::Serialize(e).into())
}
