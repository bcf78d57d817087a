// labelcheck-core/src/domain/compliance/policy.rs
//
// Read-only scoring policy. Defaults are compile-time constants; a config file
// may override them (see infrastructure::config::loader).

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::error::DomainError;
use crate::domain::label::model::CheckStatus;

/// Minimum partial-alignment score (0-100) for fuzzy warning matches.
pub const DEFAULT_WARNING_FUZZ: f64 = 85.0;

/// Header literal; must appear verbatim (uppercase) with a colon.
pub const WARNING_HEADER: &str = "GOVERNMENT WARNING";

/// Body clauses of the U.S. alcohol health warning (27 CFR 16.21),
/// in warning-normalized form.
pub const REQUIRED_WARNING_CLAUSES: [&str; 2] = [
    "ACCORDING TO THE SURGEON GENERAL WOMEN SHOULD NOT DRINK ALCOHOLIC BEVERAGES DURING PREGNANCY",
    "CONSUMPTION OF ALCOHOLIC BEVERAGES IMPAIRS YOUR ABILITY TO DRIVE A CAR OR OPERATE MACHINERY AND MAY CAUSE HEALTH PROBLEMS",
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_threshold_order"))]
pub struct Threshold {
    #[validate(range(min = 0.0, max = 1.0))]
    pub pass: f64,
    #[validate(range(min = 0.0, max = 1.0))]
    pub review: f64,
}

impl Threshold {
    pub const fn new(pass: f64, review: f64) -> Self {
        Self { pass, review }
    }

    /// PASS at or above `pass`, REVIEW at or above `review`, FAIL below.
    pub fn status_for(&self, score: f64) -> CheckStatus {
        if score >= self.pass {
            CheckStatus::Pass
        } else if score >= self.review {
            CheckStatus::Review
        } else {
            CheckStatus::Fail
        }
    }
}

fn validate_threshold_order(threshold: &Threshold) -> Result<(), ValidationError> {
    if threshold.pass < threshold.review {
        return Err(ValidationError::new("pass_below_review"));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct FieldThresholds {
    #[validate(nested)]
    pub brand_name: Threshold,
    #[validate(nested)]
    pub abv: Threshold,
    #[validate(nested)]
    pub net_contents: Threshold,
}

pub const DEFAULT_THRESHOLDS: FieldThresholds = FieldThresholds {
    brand_name: Threshold::new(0.85, 0.70),
    abv: Threshold::new(0.95, 0.80),
    net_contents: Threshold::new(0.90, 0.75),
};

impl Default for FieldThresholds {
    fn default() -> Self {
        DEFAULT_THRESHOLDS
    }
}

impl FieldThresholds {
    fn named(&self) -> [(&'static str, Threshold); 3] {
        [
            ("brand_name", self.brand_name),
            ("abv", self.abv),
            ("net_contents", self.net_contents),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct WarningPolicy {
    #[validate(range(min = 0.0, max = 100.0))]
    pub fuzzy_threshold: f64,
    /// Only the first N warning candidates are inspected for the header.
    #[validate(range(min = 1))]
    pub header_scan_limit: usize,
}

impl Default for WarningPolicy {
    fn default() -> Self {
        Self {
            fuzzy_threshold: DEFAULT_WARNING_FUZZ,
            header_scan_limit: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct BrandPolicy {
    /// Fraction of the image height (from the top) where brand text is searched.
    #[validate(range(min = 0.0, max = 1.0))]
    pub top_region_ratio: f64,
    #[validate(range(min = 1))]
    pub max_candidates: usize,
    #[validate(range(min = 0.0))]
    pub height_weight: f64,
    #[validate(range(min = 0.0))]
    pub confidence_weight: f64,
    pub substring_min_len: usize,
    #[validate(range(min = 0.0, max = 1.0))]
    pub substring_min_ratio: f64,
    #[validate(range(min = 0.0, max = 1.0))]
    pub substring_floor: f64,
}

impl Default for BrandPolicy {
    fn default() -> Self {
        Self {
            top_region_ratio: 0.40,
            max_candidates: 15,
            height_weight: 0.7,
            confidence_weight: 50.0,
            substring_min_len: 5,
            substring_min_ratio: 0.60,
            substring_floor: 0.86,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
#[validate(schema(function = "validate_quality_order"))]
pub struct QualityPolicy {
    #[validate(range(min = 0.0, max = 1.0))]
    pub poor_avg_confidence: f64,
    #[validate(range(min = 0.0, max = 1.0))]
    pub fair_avg_confidence: f64,
    /// A line below this confidence counts as low-confidence.
    #[validate(range(min = 0.0, max = 1.0))]
    pub low_line_confidence: f64,
    #[validate(range(min = 0.0, max = 1.0))]
    pub fair_low_ratio: f64,
    pub min_text_chars: usize,
}

impl Default for QualityPolicy {
    fn default() -> Self {
        Self {
            poor_avg_confidence: 0.50,
            fair_avg_confidence: 0.65,
            low_line_confidence: 0.5,
            fair_low_ratio: 0.35,
            min_text_chars: 80,
        }
    }
}

fn validate_quality_order(policy: &QualityPolicy) -> Result<(), ValidationError> {
    if policy.poor_avg_confidence > policy.fair_avg_confidence {
        return Err(ValidationError::new("poor_above_fair"));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct BatchPolicy {
    /// Upper bound on labels in flight (OCR calls included).
    #[validate(range(min = 1, max = 64))]
    pub concurrency: usize,
}

impl Default for BatchPolicy {
    fn default() -> Self {
        Self { concurrency: 4 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct VerificationConfig {
    #[serde(default)]
    #[validate(nested)]
    pub thresholds: FieldThresholds,
    #[serde(default)]
    #[validate(nested)]
    pub warning: WarningPolicy,
    #[serde(default)]
    #[validate(nested)]
    pub brand: BrandPolicy,
    #[serde(default)]
    #[validate(nested)]
    pub quality: QualityPolicy,
    #[serde(default = "default_assess_image_quality")]
    pub assess_image_quality: bool,
    #[serde(default)]
    #[validate(nested)]
    pub batch: BatchPolicy,
}

fn default_assess_image_quality() -> bool {
    true
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            thresholds: FieldThresholds::default(),
            warning: WarningPolicy::default(),
            brand: BrandPolicy::default(),
            quality: QualityPolicy::default(),
            assess_image_quality: true,
            batch: BatchPolicy::default(),
        }
    }
}

impl VerificationConfig {
    /// Fail-secure check run after every load: a broken policy must never score labels.
    pub fn ensure_valid(&self) -> Result<(), DomainError> {
        for (field, t) in self.thresholds.named() {
            let in_range = (0.0..=1.0).contains(&t.pass) && (0.0..=1.0).contains(&t.review);
            if !in_range || t.pass < t.review {
                return Err(DomainError::InvalidThresholds {
                    field: field.to_string(),
                    pass: t.pass,
                    review: t.review,
                });
            }
        }

        self.validate()
            .map_err(|e| DomainError::PolicyError(e.to_string()))
    }
}
