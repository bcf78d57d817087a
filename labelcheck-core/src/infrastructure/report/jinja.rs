// labelcheck-core/src/infrastructure/report/jinja.rs

// Markdown rendering of verification results. Templates receive the serialized
// result, so every field name in a template is the JSON field name.

use minijinja::{Environment, Value};

use crate::application::ports::TemplateEngine;
use crate::error::LabelCheckError;
use crate::infrastructure::error::InfrastructureError;

pub struct JinjaRenderer<'a> {
    env: Environment<'a>,
}

impl<'a> JinjaRenderer<'a> {
    pub fn new() -> Self {
        let mut env = Environment::new();

        // Table cells: missing values render as a dash, pipes are escaped.
        env.add_filter("cell", |value: Value| -> String {
            if value.is_none() || value.is_undefined() {
                return "-".to_string();
            }
            let text = value.to_string();
            if text.is_empty() {
                "-".to_string()
            } else {
                text.replace('|', "\\|").replace('\n', " ")
            }
        });

        // Scores: three decimals, dash when the check was not scored.
        env.add_filter("score", |value: Value| -> String {
            match f64::try_from(value) {
                Ok(v) => format!("{v:.3}"),
                Err(_) => "-".to_string(),
            }
        });

        Self { env }
    }
}

impl Default for JinjaRenderer<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine for JinjaRenderer<'_> {
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String, LabelCheckError> {
        self.env
            .render_str(template, context)
            .map_err(|e| LabelCheckError::Infrastructure(InfrastructureError::TemplateError(e)))
    }
}
