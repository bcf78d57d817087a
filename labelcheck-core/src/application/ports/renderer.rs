// labelcheck-core/src/application/ports/renderer.rs

use crate::error::LabelCheckError;

/// Renders a report template against a JSON context.
pub trait TemplateEngine: Send + Sync {
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String, LabelCheckError>;
}
