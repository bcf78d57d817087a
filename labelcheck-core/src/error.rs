// labelcheck-core/src/error.rs

use crate::domain::error::DomainError;
use crate::infrastructure::error::InfrastructureError;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum LabelCheckError {
    // --- DOMAIN ERRORS (Policy configuration, malformed collaborator data) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Domain(#[from] DomainError),

    // --- INFRASTRUCTURE ERRORS (IO, Parsing) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Infrastructure(#[from] InfrastructureError),

    // --- COLLABORATOR ERRORS ---
    #[error("OCR engine failed: {0}")]
    #[diagnostic(
        code(labelcheck::ocr),
        help("The label could not be recognized. Retry with a clearer image.")
    )]
    Ocr(String),

    #[error("Internal Error: {0}")]
    InternalError(String),
}

impl From<std::io::Error> for LabelCheckError {
    fn from(err: std::io::Error) -> Self {
        LabelCheckError::Infrastructure(InfrastructureError::Io(err))
    }
}
