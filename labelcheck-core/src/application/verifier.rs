// labelcheck-core/src/application/verifier.rs

use std::time::Instant;
use tracing::{debug, info, instrument};

use crate::domain::compliance::comparator::compare;
use crate::domain::compliance::policy::VerificationConfig;
use crate::domain::compliance::quality::{ImageQuality, assess_image_quality};
use crate::domain::compliance::verdict::VerificationResult;
use crate::domain::label::extract::FieldExtractor;
use crate::domain::label::model::{DeclaredFields, TextLine};
use crate::error::LabelCheckError;
use crate::ports::ocr::OcrEngine;

pub const TIMING_OCR: &str = "ocr_ms";
pub const TIMING_EXTRACT_COMPARE: &str = "extract_compare_ms";
pub const TIMING_TOTAL: &str = "total_ms";

/// Synchronous verification core with a validated policy baked in.
/// Shared read-only across concurrent verifications.
#[derive(Debug)]
pub struct LabelVerifier {
    config: VerificationConfig,
    extractor: FieldExtractor,
}

impl LabelVerifier {
    pub fn new(config: VerificationConfig) -> Result<Self, LabelCheckError> {
        config.ensure_valid()?;
        let extractor = FieldExtractor::new(&config);
        Ok(Self { config, extractor })
    }

    pub fn config(&self) -> &VerificationConfig {
        &self.config
    }

    pub fn assess_quality(&self, lines: &[TextLine]) -> ImageQuality {
        assess_image_quality(lines, &self.config.quality)
    }

    /// Extract, rate, compare, decide. Never fails: every business outcome is
    /// a CheckResult.
    pub fn verify_lines(
        &self,
        lines: &[TextLine],
        image_width: u32,
        image_height: u32,
        declared: &DeclaredFields,
    ) -> VerificationResult {
        // 1. Candidate buckets
        let candidates = self.extractor.extract(lines, image_width, image_height);

        // 2. Image quality (optional)
        let quality = self
            .config
            .assess_image_quality
            .then(|| self.assess_quality(lines));

        // 3. Field checks
        let checks = compare(
            declared,
            &candidates,
            quality.as_ref().map(|q| q.rating),
            &self.config,
        );

        // 4. Verdict
        let result = VerificationResult::new(checks, quality);
        debug!(
            status = %result.overall_status,
            checks = result.checks.len(),
            blocking = result.blocking_checks().count(),
            "Verification decided"
        );
        result
    }
}

impl Default for LabelVerifier {
    fn default() -> Self {
        let config = VerificationConfig::default();
        Self {
            extractor: FieldExtractor::new(&config),
            config,
        }
    }
}

/// OCR, then the synchronous core. Only collaborator failures are errors.
#[instrument(skip_all, fields(brand = %declared.brand_name, bytes = image.len()))]
pub async fn verify_image<O>(
    ocr: &O,
    verifier: &LabelVerifier,
    image: &[u8],
    declared: &DeclaredFields,
) -> Result<VerificationResult, LabelCheckError>
where
    O: OcrEngine + ?Sized,
{
    let started = Instant::now();

    let page = ocr.recognize(image).await?;
    let ocr_elapsed = elapsed_ms(started);

    let core_started = Instant::now();
    let mut result = verifier.verify_lines(&page.lines, page.width, page.height, declared);
    let core_elapsed = elapsed_ms(core_started);

    // Engine-reported timings win over our wall clock for the OCR stage.
    result.timings_ms.extend(page.timings_ms);
    result.timings_ms.entry(TIMING_OCR.to_string()).or_insert(ocr_elapsed);
    result.record_timing(TIMING_EXTRACT_COMPARE, core_elapsed);
    result.record_timing(TIMING_TOTAL, elapsed_ms(started));

    info!(status = %result.overall_status, "Label verified");
    Ok(result)
}

fn elapsed_ms(since: Instant) -> u64 {
    u64::try_from(since.elapsed().as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::compliance::policy::Threshold;
    use crate::domain::compliance::quality::QualityRating;
    use crate::domain::compliance::verdict::OverallStatus;
    use crate::domain::error::DomainError;
    use crate::domain::label::model::{BoundingBox, CheckField, CheckStatus};
    use crate::infrastructure::adapters::TranscriptOcr;
    use anyhow::Result;

    const CLAUSE_1: &str = "(1) ACCORDING TO THE SURGEON GENERAL, WOMEN SHOULD NOT DRINK ALCOHOLIC BEVERAGES DURING PREGNANCY BECAUSE OF THE RISK OF BIRTH DEFECTS.";
    const CLAUSE_2: &str = "(2) CONSUMPTION OF ALCOHOLIC BEVERAGES IMPAIRS YOUR ABILITY TO DRIVE A CAR OR OPERATE MACHINERY, AND MAY CAUSE HEALTH PROBLEMS.";

    fn tb(i: usize, text: &str, conf: f64, bbox: (u32, u32, u32, u32)) -> TextLine {
        TextLine::new(
            format!("t{i}"),
            text,
            conf,
            BoundingBox::new(bbox.0, bbox.1, bbox.2, bbox.3),
        )
    }

    fn label(header: &str, conf: f64) -> Vec<TextLine> {
        vec![
            tb(1, "STONE'S THROW", conf, (10, 10, 300, 60)),
            tb(2, "12.5% ABV", conf, (10, 120, 120, 25)),
            tb(3, "750 mL", conf, (10, 150, 120, 25)),
            tb(4, header, conf, (10, 900, 300, 25)),
            tb(5, CLAUSE_1, conf, (10, 930, 900, 25)),
            tb(6, CLAUSE_2, conf, (10, 960, 900, 25)),
        ]
    }

    fn declared() -> DeclaredFields {
        DeclaredFields::new("Stone's Throw")
            .with_abv("12.5%")
            .with_net_contents("750 mL")
    }

    fn status_of(result: &VerificationResult, field: CheckField) -> Option<CheckStatus> {
        result
            .checks
            .iter()
            .find(|c| c.field == field)
            .map(|c| c.status)
    }

    #[test]
    fn test_clean_label_passes() {
        let verifier = LabelVerifier::default();
        let result = verifier.verify_lines(&label("GOVERNMENT WARNING:", 0.95), 1000, 1500, &declared());

        assert_eq!(result.overall_status, OverallStatus::Pass, "{:#?}", result.checks);
        assert_eq!(result.checks.len(), 7);
        assert_eq!(
            result.image_quality.as_ref().map(|q| q.rating),
            Some(QualityRating::Good)
        );
    }

    #[test]
    fn test_title_case_header_needs_review() {
        let verifier = LabelVerifier::default();
        let result = verifier.verify_lines(&label("Government Warning:", 0.95), 1000, 1500, &declared());

        assert_eq!(result.overall_status, OverallStatus::NeedsReview);
        assert_eq!(
            status_of(&result, CheckField::GovernmentWarningHeader),
            Some(CheckStatus::Fail)
        );
        assert_eq!(
            status_of(&result, CheckField::GovernmentWarningText),
            Some(CheckStatus::Pass)
        );
    }

    #[test]
    fn test_low_confidence_image_is_poor() {
        let verifier = LabelVerifier::default();
        let result = verifier.verify_lines(&label("GOVERNMENT WARNING:", 0.3), 1000, 1500, &declared());

        assert_eq!(result.overall_status, OverallStatus::NeedsReview);
        assert_eq!(
            status_of(&result, CheckField::ImageQuality),
            Some(CheckStatus::Review)
        );
    }

    #[test]
    fn test_quality_can_be_disabled() -> Result<()> {
        let config = VerificationConfig {
            assess_image_quality: false,
            ..VerificationConfig::default()
        };
        let verifier = LabelVerifier::new(config)?;
        let result = verifier.verify_lines(&label("GOVERNMENT WARNING:", 0.3), 1000, 1500, &declared());

        assert!(result.image_quality.is_none());
        assert_eq!(status_of(&result, CheckField::ImageQuality), None);
        assert_eq!(result.overall_status, OverallStatus::Pass);
        Ok(())
    }

    #[test]
    fn test_invalid_policy_is_rejected() {
        let mut config = VerificationConfig::default();
        config.thresholds.abv = Threshold::new(0.5, 0.9);
        assert!(matches!(
            LabelVerifier::new(config),
            Err(LabelCheckError::Domain(DomainError::InvalidThresholds { .. }))
        ));
    }

    #[tokio::test]
    async fn test_verify_image_records_timings() -> Result<()> {
        let lines = label("GOVERNMENT WARNING:", 0.95);
        let transcript = serde_json::json!({
            "width": 1000,
            "height": 1500,
            "lines": lines,
            "timings_ms": { "ocr_ms": 840 }
        });
        let bytes = serde_json::to_vec(&transcript)?;

        let result =
            verify_image(&TranscriptOcr::new(), &LabelVerifier::default(), &bytes, &declared())
                .await?;

        assert_eq!(result.overall_status, OverallStatus::Pass);
        assert_eq!(result.timings_ms.get(TIMING_OCR), Some(&840));
        assert!(result.timings_ms.contains_key(TIMING_EXTRACT_COMPARE));
        assert!(result.timings_ms.contains_key(TIMING_TOTAL));
        Ok(())
    }

    #[tokio::test]
    async fn test_ocr_failure_is_an_error() {
        let result = verify_image(
            &TranscriptOcr::new(),
            &LabelVerifier::default(),
            b"not a transcript",
            &declared(),
        )
        .await;
        assert!(matches!(result, Err(LabelCheckError::Ocr(_))));
    }
}
