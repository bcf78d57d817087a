// labelcheck-core/src/infrastructure/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(labelcheck::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    // --- CONFIG / YAML ---
    #[error("YAML Parsing Error: {0}")]
    #[diagnostic(
        code(labelcheck::infra::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    YamlError(#[from] serde_yaml::Error),

    #[error("Configuration Error: {0}")]
    #[diagnostic(code(labelcheck::infra::config))]
    ConfigError(String),

    #[error("Configuration not found at '{0}'")]
    #[diagnostic(code(labelcheck::infra::config_missing))]
    ConfigNotFound(String),

    // --- COLLABORATOR PAYLOADS (OCR transcripts, application records) ---
    #[error("Invalid JSON in '{path}': {source}")]
    #[diagnostic(
        code(labelcheck::infra::json),
        help("The file must be a single JSON object matching the documented layout.")
    )]
    JsonError {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Serialization Error: {0}")]
    #[diagnostic(code(labelcheck::infra::serialize))]
    Serialize(#[from] serde_json::Error),

    // --- DATASET ---
    #[error("Dataset Error: {0}")]
    #[diagnostic(
        code(labelcheck::infra::dataset),
        help("Each item folder needs an application.json and a *.ocr.json transcript.")
    )]
    DatasetError(String),

    // --- TEMPLATING ---
    #[error("Template Rendering Error: {0}")]
    #[diagnostic(
        code(labelcheck::infra::template),
        help("Check the Jinja syntax ({{ ... }}) of the report template.")
    )]
    TemplateError(#[from] minijinja::Error),
}
