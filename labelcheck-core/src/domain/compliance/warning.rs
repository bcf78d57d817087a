// labelcheck-core/src/domain/compliance/warning.rs
//
// Government warning check as a three-stage sequence:
//   Presence -> Header -> Body
// A failed presence stage ends the sequence: strict text checks are
// meaningless without a detected warning block.

use tracing::debug;

use crate::domain::compliance::policy::{REQUIRED_WARNING_CLAUSES, WARNING_HEADER, WarningPolicy};
use crate::domain::label::model::{CheckField, CheckResult, CheckStatus, FieldCandidates, TextLine};
use crate::domain::label::normalize::normalize_warning;
use crate::domain::label::similarity::partial_ratio;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningStage {
    Presence,
    Header,
    Body,
}

impl WarningStage {
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Presence => Some(Self::Header),
            Self::Header => Some(Self::Body),
            Self::Body => None,
        }
    }

    pub fn field(self) -> CheckField {
        match self {
            Self::Presence => CheckField::GovernmentWarningPresent,
            Self::Header => CheckField::GovernmentWarningHeader,
            Self::Body => CheckField::GovernmentWarningText,
        }
    }

    pub fn evaluate(self, ctx: &WarningContext<'_, '_>) -> CheckResult {
        match self {
            Self::Presence => check_presence(ctx),
            Self::Header => check_header(ctx),
            Self::Body => check_body(ctx),
        }
    }

    /// Only the presence stage can stop the sequence.
    fn halts_on(self, result: &CheckResult) -> bool {
        self == Self::Presence && !result.is_pass()
    }
}

/// Inputs shared by every stage. The full text is normalized once.
pub struct WarningContext<'c, 'a> {
    pub candidates: &'c FieldCandidates<'a>,
    pub normalized_text: String,
    pub policy: &'c WarningPolicy,
}

impl<'c, 'a> WarningContext<'c, 'a> {
    pub fn new(candidates: &'c FieldCandidates<'a>, policy: &'c WarningPolicy) -> Self {
        Self {
            candidates,
            normalized_text: normalize_warning(&candidates.full_text()),
            policy,
        }
    }
}

pub fn check_government_warning(
    candidates: &FieldCandidates<'_>,
    policy: &WarningPolicy,
) -> Vec<CheckResult> {
    let ctx = WarningContext::new(candidates, policy);
    let mut results = Vec::with_capacity(3);

    let mut stage = Some(WarningStage::Presence);
    while let Some(current) = stage {
        let result = current.evaluate(&ctx);
        debug!(stage = ?current, status = %result.status, "Warning stage evaluated");

        stage = if current.halts_on(&result) {
            None
        } else {
            current.next()
        };
        results.push(result);
    }

    results
}

/// Stage 1: any fuzzy warning candidate, or the header phrase anywhere in the text.
pub fn check_presence(ctx: &WarningContext<'_, '_>) -> CheckResult {
    let first = ctx.candidates.warning.first();
    let present = first.is_some() || ctx.normalized_text.contains(WARNING_HEADER);

    if !present {
        return CheckResult::new(WarningStage::Presence.field(), CheckStatus::Fail)
            .expected("present")
            .notes("Government warning not detected.");
    }

    let mut result = CheckResult::new(WarningStage::Presence.field(), CheckStatus::Pass)
        .expected("present")
        .found("present")
        .notes("Detected a government warning block.");
    if let Some(line) = first {
        result = result.confidence(line.confidence).line(line);
    }
    result
}

/// Stage 2: the header must read exactly "GOVERNMENT WARNING" followed by a colon.
pub fn check_header(ctx: &WarningContext<'_, '_>) -> CheckResult {
    let expected = format!("{}:", WARNING_HEADER);
    let mut missing_colon: Option<&TextLine> = None;
    let mut wrong_case: Option<&TextLine> = None;

    for &line in ctx
        .candidates
        .warning
        .iter()
        .take(ctx.policy.header_scan_limit)
    {
        let text = line.text.as_str();
        if text.contains(WARNING_HEADER) {
            if text.contains(':') {
                return CheckResult::new(WarningStage::Header.field(), CheckStatus::Pass)
                    .expected(expected)
                    .found(line.text.as_str())
                    .notes("Header is uppercase with ':' as required.")
                    .line(line);
            }
            if missing_colon.is_none() {
                missing_colon = Some(line);
            }
        } else if wrong_case.is_none() && text.to_uppercase().contains(WARNING_HEADER) {
            wrong_case = Some(line);
        }
    }

    if let Some(line) = missing_colon {
        return CheckResult::new(WarningStage::Header.field(), CheckStatus::Review)
            .expected(expected)
            .found(line.text.as_str())
            .notes("Header found but ':' missing/unclear in OCR. Manual review recommended.")
            .line(line);
    }

    if let Some(line) = wrong_case {
        return CheckResult::new(WarningStage::Header.field(), CheckStatus::Fail)
            .expected(expected)
            .found(line.text.as_str())
            .notes("Header not in all-caps 'GOVERNMENT WARNING:' (case/format mismatch).")
            .line(line);
    }

    CheckResult::new(WarningStage::Header.field(), CheckStatus::Fail)
        .expected(expected)
        .notes("Unable to locate warning header line.")
}

/// Stage 3: both required clauses, word for word after normalization.
/// Near misses are attributed to OCR and sent to review.
pub fn check_body(ctx: &WarningContext<'_, '_>) -> CheckResult {
    let text = &ctx.normalized_text;
    let missing: Vec<&str> = REQUIRED_WARNING_CLAUSES
        .iter()
        .copied()
        .filter(|clause| !text.contains(clause))
        .collect();

    if missing.is_empty() {
        return CheckResult::new(WarningStage::Body.field(), CheckStatus::Pass)
            .expected("exact required clauses")
            .found("all required clauses present")
            .notes("Warning body contains the required clauses (normalized exact match).");
    }

    let scores: Vec<f64> = missing
        .iter()
        .map(|clause| partial_ratio(text, clause))
        .collect();
    let fuzzy_hits = scores
        .iter()
        .filter(|&&s| s >= ctx.policy.fuzzy_threshold)
        .count();
    let weakest = scores.iter().copied().fold(100.0_f64, f64::min);

    let (status, cause) = if fuzzy_hits > 0 {
        (
            CheckStatus::Review,
            "likely OCR degradation; request clearer image or verify manually.",
        )
    } else {
        (CheckStatus::Fail, "wording appears non-compliant.")
    };

    CheckResult::new(WarningStage::Body.field(), status)
        .expected("exact required clauses")
        .found(format!("missing {} clause(s)", missing.len()))
        .confidence(weakest / 100.0)
        .notes(format!(
            "Missing {} required warning clause(s); {}",
            missing.len(),
            cause
        ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::compliance::policy::VerificationConfig;
    use crate::domain::label::extract::FieldExtractor;
    use crate::domain::label::model::BoundingBox;

    const CLAUSE_1: &str = "(1) According to the Surgeon General, women should not drink alcoholic beverages during pregnancy because of the risk of birth defects.";
    const CLAUSE_2: &str = "(2) Consumption of alcoholic beverages impairs your ability to drive a car or operate machinery, and may cause health problems.";

    fn lines(texts: &[&str]) -> Vec<TextLine> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| {
                TextLine::new(
                    format!("w{i}"),
                    *t,
                    0.9,
                    BoundingBox::new(10, 800 + 30 * i as u32, 600, 20),
                )
            })
            .collect()
    }

    fn run(texts: &[&str]) -> Vec<CheckResult> {
        let lines = lines(texts);
        let config = VerificationConfig::default();
        let candidates = FieldExtractor::new(&config).extract(&lines, 1000, 1000);
        check_government_warning(&candidates, &config.warning)
    }

    fn status_of(results: &[CheckResult], field: CheckField) -> Option<CheckStatus> {
        results.iter().find(|r| r.field == field).map(|r| r.status)
    }

    #[test]
    fn test_stage_sequence() {
        assert_eq!(WarningStage::Presence.next(), Some(WarningStage::Header));
        assert_eq!(WarningStage::Header.next(), Some(WarningStage::Body));
        assert_eq!(WarningStage::Body.next(), None);
    }

    #[test]
    fn test_compliant_warning_passes_all_stages() {
        let results = run(&["GOVERNMENT WARNING:", CLAUSE_1, CLAUSE_2]);
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(CheckResult::is_pass), "{results:#?}");
        assert_eq!(results[0].line_ids, vec!["w0".to_string()]);
    }

    #[test]
    fn test_exact_body_match_carries_no_score() {
        let results = run(&["GOVERNMENT WARNING:", CLAUSE_1, CLAUSE_2]);
        let body = results
            .iter()
            .find(|r| r.field == CheckField::GovernmentWarningText);
        assert_eq!(body.map(|r| r.status), Some(CheckStatus::Pass));
        assert_eq!(body.and_then(|r| r.confidence), None);
    }

    #[test]
    fn test_header_is_matched_on_raw_line_text() {
        let results = run(&["GOVERNMENT  WARNING:", CLAUSE_1, CLAUSE_2]);
        assert_eq!(results[0].status, CheckStatus::Pass);
        let header = results
            .iter()
            .find(|r| r.field == CheckField::GovernmentWarningHeader);
        assert_eq!(header.map(|r| r.status), Some(CheckStatus::Fail));
        assert!(header.is_some_and(|r| r.notes.contains("Unable to locate")));
    }

    #[test]
    fn test_missing_warning_short_circuits() {
        let results = run(&["KEEP REFRIGERATED", "PRODUCT OF OREGON"]);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].field, CheckField::GovernmentWarningPresent);
        assert_eq!(results[0].status, CheckStatus::Fail);
        assert_eq!(results[0].confidence, None);
    }

    #[test]
    fn test_title_case_header_never_passes() {
        let results = run(&["Government Warning:", CLAUSE_1, CLAUSE_2]);
        let header = status_of(&results, CheckField::GovernmentWarningHeader);
        assert_eq!(header, Some(CheckStatus::Fail));
    }

    #[test]
    fn test_header_without_colon_goes_to_review() {
        let results = run(&["GOVERNMENT WARNING", CLAUSE_1, CLAUSE_2]);
        assert_eq!(
            status_of(&results, CheckField::GovernmentWarningHeader),
            Some(CheckStatus::Review)
        );
        assert_eq!(
            status_of(&results, CheckField::GovernmentWarningText),
            Some(CheckStatus::Pass)
        );
    }

    #[test]
    fn test_garbled_header_is_present_but_unlocated() {
        let results = run(&["GOVERNRMENT WARNlNG:"]);
        assert_eq!(results[0].status, CheckStatus::Pass);
        assert_eq!(
            status_of(&results, CheckField::GovernmentWarningHeader),
            Some(CheckStatus::Fail)
        );
    }

    #[test]
    fn test_ocr_degraded_clause_goes_to_review() {
        let degraded = CLAUSE_2.replace("machinery", "rnachinery");
        let results = run(&["GOVERNMENT WARNING:", CLAUSE_1, &degraded]);
        let body = results
            .iter()
            .find(|r| r.field == CheckField::GovernmentWarningText);
        let body = body.map(|r| (r.status, r.notes.clone()));
        assert!(matches!(
            body,
            Some((CheckStatus::Review, ref notes)) if notes.contains("missing 1") || notes.contains("Missing 1")
        ));
    }

    #[test]
    fn test_rewritten_clauses_fail() {
        let results = run(&[
            "GOVERNMENT WARNING:",
            "Please enjoy responsibly.",
            "Do not drink and drive.",
        ]);
        let body = results
            .iter()
            .find(|r| r.field == CheckField::GovernmentWarningText);
        assert_eq!(body.map(|r| r.status), Some(CheckStatus::Fail));
        assert!(body.is_some_and(|r| r.notes.contains("non-compliant")));
    }

    #[test]
    fn test_header_scan_respects_limit() {
        let mut texts = vec!["government warning"; 10];
        texts.push("GOVERNMENT WARNING:");
        let lines = lines(&texts);
        let config = VerificationConfig::default();
        let candidates = FieldExtractor::new(&config).extract(&lines, 1000, 1000);
        let ctx = WarningContext::new(&candidates, &config.warning);
        let header = check_header(&ctx);
        // The compliant line is the 11th candidate and is never inspected.
        assert_eq!(header.status, CheckStatus::Fail);
        assert!(header.notes.contains("all-caps"));
    }
}
