// labelcheck-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("Invalid thresholds for '{field}': pass={pass}, review={review}")]
    #[diagnostic(
        code(labelcheck::domain::thresholds),
        help("Both thresholds must lie in [0, 1] and 'pass' must be >= 'review'.")
    )]
    InvalidThresholds {
        field: String,
        pass: f64,
        review: f64,
    },

    #[error("Malformed text line '{id}': {reason}")]
    #[diagnostic(
        code(labelcheck::domain::text_line),
        help("OCR lines need a unique id and a confidence between 0 and 1.")
    )]
    MalformedTextLine { id: String, reason: String },

    #[error("Invalid image dimensions: {width}x{height}")]
    #[diagnostic(code(labelcheck::domain::image_dimensions))]
    InvalidImageDimensions { width: u32, height: u32 },

    #[error("Policy Error: {0}")]
    #[diagnostic(code(labelcheck::domain::policy))]
    PolicyError(String),
}
