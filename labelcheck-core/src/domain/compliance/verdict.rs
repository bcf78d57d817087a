// labelcheck-core/src/domain/compliance/verdict.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::domain::compliance::quality::{ImageQuality, QualityRating};
use crate::domain::label::model::{CheckResult, CheckStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OverallStatus {
    Pass,
    NeedsReview,
}

impl OverallStatus {
    /// PASS only when every check passed and the image is not rated POOR.
    /// An empty check list never occurs in practice (the brand check is
    /// always emitted) and is treated as PASS.
    pub fn from_checks(checks: &[CheckResult], quality: Option<&ImageQuality>) -> Self {
        let all_pass = checks.iter().all(|c| c.status == CheckStatus::Pass);
        let poor = quality.is_some_and(|q| q.rating == QualityRating::Poor);

        if all_pass && !poor {
            Self::Pass
        } else {
            Self::NeedsReview
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::NeedsReview => "NEEDS_REVIEW",
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }
}

impl fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub overall_status: OverallStatus,
    pub checks: Vec<CheckResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_quality: Option<ImageQuality>,
    /// Stage durations in milliseconds (`ocr_ms`, `extract_compare_ms`, `total_ms`).
    #[serde(default)]
    pub timings_ms: BTreeMap<String, u64>,
}

impl VerificationResult {
    pub fn new(checks: Vec<CheckResult>, image_quality: Option<ImageQuality>) -> Self {
        Self {
            overall_status: OverallStatus::from_checks(&checks, image_quality.as_ref()),
            checks,
            image_quality,
            timings_ms: BTreeMap::new(),
        }
    }

    pub fn record_timing(&mut self, stage: impl Into<String>, ms: u64) {
        self.timings_ms.insert(stage.into(), ms);
    }

    /// Checks that kept the result from passing.
    pub fn blocking_checks(&self) -> impl Iterator<Item = &CheckResult> {
        self.checks.iter().filter(|c| !c.is_pass())
    }
}
