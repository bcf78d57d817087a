// labelcheck-core/src/application/batch.rs

use futures::StreamExt;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, instrument, warn};

use crate::application::verifier::{LabelVerifier, verify_image};
use crate::domain::compliance::verdict::{OverallStatus, VerificationResult};
use crate::domain::label::model::DeclaredFields;
use crate::error::LabelCheckError;
use crate::infrastructure::adapters::ApplicationRecord;
use crate::infrastructure::dataset::discover_dataset;
use crate::ports::ocr::OcrEngine;

/// One label to verify: the encoded image plus what the applicant declared.
#[derive(Debug, Clone)]
pub struct BatchItem {
    pub name: String,
    pub image: Vec<u8>,
    pub declared: DeclaredFields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchItemResult {
    pub name: String,
    pub overall_status: OverallStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<VerificationResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchItemResult {
    fn verified(name: String, result: VerificationResult) -> Self {
        Self {
            name,
            overall_status: result.overall_status,
            result: Some(result),
            error: None,
        }
    }

    /// A collaborator failure always needs a human.
    fn errored(name: String, error: &LabelCheckError) -> Self {
        Self {
            name,
            overall_status: OverallStatus::NeedsReview,
            result: None,
            error: Some(error.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub generated_at: String,
    pub count: usize,
    pub passed: usize,
    pub needs_review: usize,
    pub results: Vec<BatchItemResult>,
}

impl BatchReport {
    pub fn new(results: Vec<BatchItemResult>) -> Self {
        let passed = results
            .iter()
            .filter(|r| r.overall_status.is_pass())
            .count();
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            count: results.len(),
            passed,
            needs_review: results.len() - passed,
            results,
        }
    }

    pub fn all_passed(&self) -> bool {
        self.passed == self.count
    }
}

/// Verifies every item with at most `concurrency` in flight. Results come back
/// in input order whatever the concurrency, and one failing item never stops
/// the others.
#[instrument(skip_all, fields(items = items.len(), concurrency = concurrency))]
pub async fn run_batch<O>(
    ocr: &O,
    verifier: &LabelVerifier,
    items: Vec<BatchItem>,
    concurrency: usize,
) -> BatchReport
where
    O: OcrEngine + ?Sized,
{
    let futures = items.into_iter().map(|item| async move {
        let outcome = verify_image(ocr, verifier, &item.image, &item.declared).await;
        match outcome {
            Ok(result) => BatchItemResult::verified(item.name, result),
            Err(e) => {
                warn!(item = %item.name, error = %e, "Item could not be verified");
                BatchItemResult::errored(item.name, &e)
            }
        }
    });

    // `buffered` (not `buffer_unordered`) keeps the input order.
    let results: Vec<BatchItemResult> = futures::stream::iter(futures)
        .buffered(concurrency.max(1))
        .collect()
        .await;

    let report = BatchReport::new(results);
    info!(
        count = report.count,
        passed = report.passed,
        needs_review = report.needs_review,
        "Batch finished"
    );
    report
}

/// Reads a dataset directory into batch items (transcript bytes stand in for
/// the image). A malformed application record aborts the load.
#[instrument(skip(root), fields(root = %root.display()))]
pub fn load_dataset(root: &Path) -> Result<Vec<BatchItem>, LabelCheckError> {
    discover_dataset(root)?
        .into_iter()
        .map(|entry| -> Result<BatchItem, LabelCheckError> {
            let declared = ApplicationRecord::load(&entry.application)?.into_declared();
            let image = std::fs::read(&entry.transcript)?;
            Ok(BatchItem {
                name: entry.name,
                image,
                declared,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::label::model::{BoundingBox, TextLine};
    use crate::ports::ocr::OcrPage;
    use anyhow::Result;
    use async_trait::async_trait;
    use std::time::Duration;

    /// Each "image" is `"<delay_ms>:<brand>"`; the page holds one brand line.
    /// An empty brand simulates an engine failure.
    struct ScriptedOcr;

    #[async_trait]
    impl OcrEngine for ScriptedOcr {
        async fn recognize(&self, image: &[u8]) -> Result<OcrPage, LabelCheckError> {
            let script = String::from_utf8_lossy(image).to_string();
            let (delay, brand) = script.split_once(':').unwrap_or(("0", ""));
            tokio::time::sleep(Duration::from_millis(delay.parse().unwrap_or(0))).await;

            if brand.is_empty() {
                return Err(LabelCheckError::Ocr("engine crashed".to_string()));
            }
            Ok(OcrPage::new(
                1000,
                1000,
                vec![TextLine::new("t1", brand, 0.95, BoundingBox::new(10, 10, 400, 80))],
            ))
        }
    }

    fn items() -> Vec<BatchItem> {
        [("slow", "40:ACME"), ("broken", "0:"), ("mismatch", "10:OTHER"), ("fast", "0:ACME")]
            .into_iter()
            .map(|(name, script)| BatchItem {
                name: name.to_string(),
                image: script.as_bytes().to_vec(),
                declared: DeclaredFields::new("Acme").with_gov_warning(false),
            })
            .collect()
    }

    fn verifier() -> Result<LabelVerifier> {
        let mut config = crate::domain::compliance::policy::VerificationConfig::default();
        config.assess_image_quality = false;
        Ok(LabelVerifier::new(config)?)
    }

    fn strip_volatile(report: &BatchReport) -> Vec<(String, OverallStatus, Option<String>)> {
        report
            .results
            .iter()
            .map(|r| (r.name.clone(), r.overall_status, r.error.clone()))
            .collect()
    }

    #[tokio::test]
    async fn test_order_and_outcome_independent_of_concurrency() -> Result<()> {
        let verifier = verifier()?;
        let sequential = run_batch(&ScriptedOcr, &verifier, items(), 1).await;
        let concurrent = run_batch(&ScriptedOcr, &verifier, items(), 4).await;

        let names: Vec<&str> = concurrent.results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["slow", "broken", "mismatch", "fast"]);
        assert_eq!(strip_volatile(&sequential), strip_volatile(&concurrent));

        for (a, b) in sequential.results.iter().zip(&concurrent.results) {
            let checks_a = a.result.as_ref().map(|r| &r.checks);
            let checks_b = b.result.as_ref().map(|r| &r.checks);
            assert_eq!(checks_a, checks_b);
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_item_does_not_abort_batch() -> Result<()> {
        let report = run_batch(&ScriptedOcr, &verifier()?, items(), 2).await;

        assert_eq!(report.count, 4);
        assert_eq!(report.passed, 2);
        assert_eq!(report.needs_review, 2);
        assert!(!report.all_passed());

        let broken = &report.results[1];
        assert_eq!(broken.overall_status, OverallStatus::NeedsReview);
        assert!(broken.result.is_none());
        assert!(broken.error.as_deref().is_some_and(|e| e.contains("engine crashed")));
        Ok(())
    }

    #[tokio::test]
    async fn test_zero_concurrency_is_clamped() -> Result<()> {
        let report = run_batch(&ScriptedOcr, &verifier()?, items(), 0).await;
        assert_eq!(report.count, 4);
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_batch() -> Result<()> {
        let report = run_batch(&ScriptedOcr, &verifier()?, Vec::new(), 4).await;
        assert_eq!((report.count, report.passed, report.needs_review), (0, 0, 0));
        assert!(chrono::DateTime::parse_from_rfc3339(&report.generated_at).is_ok());
        Ok(())
    }

    #[test]
    fn test_load_dataset_reads_pairs() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let item = dir.path().join("acme");
        std::fs::create_dir_all(&item)?;
        std::fs::write(
            item.join("application.json"),
            r#"{ "brand_name": "Acme", "abv": "", "government_warning_required": false }"#,
        )?;
        std::fs::write(item.join("label.ocr.json"), "0:ACME")?;

        let items = load_dataset(dir.path())?;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "acme");
        assert_eq!(items[0].image, b"0:ACME".to_vec());
        assert_eq!(items[0].declared.abv, None);
        assert!(!items[0].declared.require_gov_warning);
        Ok(())
    }
}
