// labelcheck-core/src/domain/compliance/comparator.rs
//
// Per-field scoring of declared values against the extracted candidates.

use tracing::debug;

use crate::domain::compliance::policy::{Threshold, VerificationConfig};
use crate::domain::compliance::quality::QualityRating;
use crate::domain::compliance::warning::check_government_warning;
use crate::domain::label::brand::{MatchReason, best_brand_match};
use crate::domain::label::model::{
    CheckField, CheckResult, CheckStatus, DeclaredFields, FieldCandidates, TextLine,
};
use crate::domain::label::normalize::{normalize_abv, normalize_net_contents};
use crate::domain::label::similarity::ratio;

/// Produces the ordered check list: brand, ABV, net contents, the warning
/// stages, then image quality when a rating is supplied.
pub fn compare(
    declared: &DeclaredFields,
    candidates: &FieldCandidates<'_>,
    quality: Option<QualityRating>,
    config: &VerificationConfig,
) -> Vec<CheckResult> {
    let mut items = Vec::with_capacity(7);

    items.push(check_brand(declared, candidates, config));

    if let Some(abv) = declared.declared_abv() {
        items.push(check_abv(abv, &candidates.abv, config.thresholds.abv));
    }

    if let Some(net) = declared.declared_net_contents() {
        items.push(check_net_contents(
            net,
            &candidates.net_contents,
            config.thresholds.net_contents,
        ));
    }

    if declared.require_gov_warning {
        items.extend(check_government_warning(candidates, &config.warning));
    }

    if let Some(rating) = quality {
        items.push(check_image_quality(rating));
    }

    for item in &items {
        debug!(field = %item.field, status = %item.status, confidence = ?item.confidence, "Check decided");
    }

    items
}

pub fn check_brand(
    declared: &DeclaredFields,
    candidates: &FieldCandidates<'_>,
    config: &VerificationConfig,
) -> CheckResult {
    let found = best_brand_match(&declared.brand_name, &candidates.brand, &config.brand);

    let Some(line) = found.line else {
        let notes = match found.reason {
            MatchReason::EmptyExpected => "Declared brand name is empty.",
            _ => "No brand candidates found.",
        };
        return CheckResult::new(CheckField::BrandName, CheckStatus::Missing)
            .expected(declared.brand_name.as_str())
            .notes(notes);
    };

    CheckResult::new(
        CheckField::BrandName,
        config.thresholds.brand_name.status_for(found.score),
    )
    .expected(declared.brand_name.as_str())
    .found(line.text.as_str())
    .confidence(found.score)
    .notes(format!(
        "Brand match via {} (punctuation/case tolerant).",
        found.reason
    ))
    .line(line)
}

pub fn check_abv(declared: &str, candidates: &[&TextLine], threshold: Threshold) -> CheckResult {
    let expected = normalize_abv(declared);
    if expected.is_empty() {
        return CheckResult::new(CheckField::Abv, CheckStatus::Missing)
            .expected(declared)
            .notes("Declared ABV could not be read as a percentage.");
    }

    let best = best_scored(candidates, |text| {
        let found = normalize_abv(text);
        if found.is_empty() {
            0.0
        } else if found == expected {
            1.0
        } else {
            ratio(&expected, &found) / 100.0
        }
    });

    let Some((line, score)) = best else {
        return CheckResult::new(CheckField::Abv, CheckStatus::Missing)
            .expected(declared)
            .notes("No ABV detected.");
    };

    CheckResult::new(CheckField::Abv, threshold.status_for(score))
        .expected(declared)
        .found(line.text.as_str())
        .confidence(score)
        .notes(format!(
            "Normalized expected={}, found={}.",
            expected,
            normalize_abv(&line.text)
        ))
        .line(line)
}

pub fn check_net_contents(
    declared: &str,
    candidates: &[&TextLine],
    threshold: Threshold,
) -> CheckResult {
    let expected = normalize_net_contents(declared);

    let best = best_scored(candidates, |text| {
        let found = normalize_net_contents(text);
        if expected.is_empty() || found.is_empty() {
            0.0
        } else {
            ratio(&expected, &found) / 100.0
        }
    });

    let Some((line, score)) = best else {
        return CheckResult::new(CheckField::NetContents, CheckStatus::Missing)
            .expected(declared)
            .notes("No net contents detected.");
    };

    CheckResult::new(CheckField::NetContents, threshold.status_for(score))
        .expected(declared)
        .found(line.text.as_str())
        .confidence(score)
        .notes(format!(
            "Normalized expected={}, found={}.",
            expected,
            normalize_net_contents(&line.text)
        ))
        .line(line)
}

pub fn check_image_quality(rating: QualityRating) -> CheckResult {
    CheckResult::new(CheckField::ImageQuality, rating.check_status())
        .expected("readable photo")
        .found(rating.as_str().to_lowercase())
        .notes(rating.advisory())
}

/// Highest-scoring candidate; zero scores never count as a match and ties
/// keep the earlier candidate.
fn best_scored<'a>(
    candidates: &[&'a TextLine],
    score: impl Fn(&str) -> f64,
) -> Option<(&'a TextLine, f64)> {
    let mut best: Option<(&'a TextLine, f64)> = None;
    for &line in candidates {
        let s = score(&line.text);
        if s > best.map_or(0.0, |(_, b)| b) {
            best = Some((line, s));
        }
    }
    best
}
