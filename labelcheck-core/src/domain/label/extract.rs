// labelcheck-core/src/domain/label/extract.rs
//
// Classifies OCR lines into per-field candidate buckets.

use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

use crate::domain::compliance::policy::{BrandPolicy, DEFAULT_WARNING_FUZZ, VerificationConfig};
use crate::domain::label::model::{FieldCandidates, TextLine};
use crate::domain::label::normalize::normalize_text;
use crate::domain::label::similarity::partial_ratio;

const WARNING_PHRASE: &str = "government warning";

fn re_abv() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)(\d{1,2}(?:\.\d)?)\s*%(\s*abv)?")
            .unwrap_or_else(|_| Regex::new("$^").unwrap_or_else(|_| unreachable!()))
    })
}

fn re_net_contents() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)(\d+)\s*(ml|l|oz|fl\.?\s*oz|cl)")
            .unwrap_or_else(|_| Regex::new("$^").unwrap_or_else(|_| unreachable!()))
    })
}

pub fn is_abv_line(text: &str) -> bool {
    re_abv().is_match(text)
}

pub fn is_net_contents_line(text: &str) -> bool {
    re_net_contents().is_match(text)
}

/// Fuzzy presence test for the "government warning" phrase, tolerant to
/// single-character OCR confusions such as "GOVERNRMENT WARNlNG".
pub fn is_gov_warning(text: &str) -> bool {
    is_gov_warning_with(text, DEFAULT_WARNING_FUZZ)
}

pub fn is_gov_warning_with(text: &str, min_partial_ratio: f64) -> bool {
    let normalized = normalize_text(text);
    if normalized.is_empty() {
        return false;
    }
    if normalized.contains(WARNING_PHRASE) {
        return true;
    }
    partial_ratio(&normalized, WARNING_PHRASE) >= min_partial_ratio
}

#[derive(Debug, Clone)]
pub struct FieldExtractor {
    brand: BrandPolicy,
    warning_fuzz: f64,
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new(&VerificationConfig::default())
    }
}

impl FieldExtractor {
    pub fn new(config: &VerificationConfig) -> Self {
        Self {
            brand: config.brand.clone(),
            warning_fuzz: config.warning.fuzzy_threshold,
        }
    }

    /// Builds the candidate buckets. Lines are never copied: every bucket
    /// borrows from `lines`.
    pub fn extract<'a>(
        &self,
        lines: &'a [TextLine],
        image_width: u32,
        image_height: u32,
    ) -> FieldCandidates<'a> {
        let mut abv = Vec::new();
        let mut net_contents = Vec::new();
        let mut warning = Vec::new();

        for line in lines {
            if is_abv_line(&line.text) {
                abv.push(line);
            }
            if is_net_contents_line(&line.text) {
                net_contents.push(line);
            }
            if is_gov_warning_with(&line.text, self.warning_fuzz) {
                warning.push(line);
            }
        }

        let brand = self.rank_brand_candidates(lines, image_height);

        debug!(
            image_width,
            image_height,
            lines = lines.len(),
            abv = abv.len(),
            net_contents = net_contents.len(),
            warning = warning.len(),
            brand = brand.len(),
            "Field candidates extracted"
        );

        FieldCandidates {
            abv,
            net_contents,
            warning,
            brand,
            all: lines,
        }
    }

    /// Large, confident text near the top of the label ranks first.
    /// The sort is stable, so equal scores keep OCR order.
    fn rank_brand_candidates<'a>(
        &self,
        lines: &'a [TextLine],
        image_height: u32,
    ) -> Vec<&'a TextLine> {
        let cutoff = self.brand.top_region_ratio * f64::from(image_height);

        let mut scored: Vec<(f64, &TextLine)> = lines
            .iter()
            .filter(|line| f64::from(line.bounding_box.top()) <= cutoff)
            .map(|line| (self.salience(line), line))
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0));
        scored
            .into_iter()
            .take(self.brand.max_candidates)
            .map(|(_, line)| line)
            .collect()
    }

    fn salience(&self, line: &TextLine) -> f64 {
        self.brand.height_weight * f64::from(line.bounding_box.height)
            + self.brand.confidence_weight * line.confidence
    }
}
