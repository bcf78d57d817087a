// labelcheck-core/src/domain/compliance/quality.rs

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::compliance::policy::QualityPolicy;
use crate::domain::label::model::{CheckStatus, TextLine};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum QualityRating {
    Good,
    Fair,
    Poor,
}

impl QualityRating {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Good => "GOOD",
            Self::Fair => "FAIR",
            Self::Poor => "POOR",
        }
    }

    /// Fixed advisory text shown to reviewers for each rating.
    pub fn advisory(&self) -> &'static str {
        match self {
            Self::Poor => {
                "OCR confidence indicates the image may be unreadable; request clearer image."
            }
            Self::Fair => "Image is borderline; review borderline fields carefully.",
            Self::Good => "Image quality is sufficient for automated checks.",
        }
    }

    /// Anything below GOOD needs a human look.
    pub fn check_status(&self) -> CheckStatus {
        match self {
            Self::Good => CheckStatus::Pass,
            Self::Fair | Self::Poor => CheckStatus::Review,
        }
    }
}

impl fmt::Display for QualityRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageQuality {
    pub rating: QualityRating,
    pub average_confidence: f64,
    pub low_confidence_ratio: f64,
    pub total_text_chars: usize,
    pub recommendation: String,
}

/// Rates how readable the label was, from OCR confidence and text yield alone.
pub fn assess_image_quality(lines: &[TextLine], policy: &QualityPolicy) -> ImageQuality {
    if lines.is_empty() {
        return ImageQuality {
            rating: QualityRating::Poor,
            average_confidence: 0.0,
            low_confidence_ratio: 1.0,
            total_text_chars: 0,
            recommendation: QualityRating::Poor.advisory().to_string(),
        };
    }

    let count = lines.len() as f64;
    let average_confidence = lines.iter().map(|l| l.confidence).sum::<f64>() / count;
    let low_lines = lines
        .iter()
        .filter(|l| l.confidence < policy.low_line_confidence)
        .count();
    let low_confidence_ratio = low_lines as f64 / count;
    let total_text_chars: usize = lines.iter().map(|l| l.text.chars().count()).sum();

    let rating = if average_confidence < policy.poor_avg_confidence
        || total_text_chars < policy.min_text_chars
    {
        QualityRating::Poor
    } else if average_confidence < policy.fair_avg_confidence
        || low_confidence_ratio > policy.fair_low_ratio
    {
        QualityRating::Fair
    } else {
        QualityRating::Good
    };

    ImageQuality {
        rating,
        average_confidence: round3(average_confidence),
        low_confidence_ratio: round3(low_confidence_ratio),
        total_text_chars,
        recommendation: rating.advisory().to_string(),
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
