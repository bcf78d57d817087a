// labelcheck-core/src/domain/label/brand.rs

use serde::Serialize;
use std::fmt;

use crate::domain::compliance::policy::BrandPolicy;
use crate::domain::label::model::TextLine;
use crate::domain::label::normalize::normalize_text;
use crate::domain::label::similarity::token_set_ratio;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchReason {
    EmptyExpected,
    NoCandidates,
    TokenSetRatio,
    SubstringOverlap,
}

impl MatchReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmptyExpected => "empty_expected",
            Self::NoCandidates => "no_candidates",
            Self::TokenSetRatio => "token_set_ratio",
            Self::SubstringOverlap => "substring_overlap",
        }
    }
}

impl fmt::Display for MatchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BrandMatch<'a> {
    pub line: Option<&'a TextLine>,
    pub score: f64,
    pub reason: MatchReason,
}

/// Picks the candidate that best matches the declared brand.
/// Candidates must arrive in salience order: on equal scores the first one wins.
pub fn best_brand_match<'a>(
    expected: &str,
    candidates: &[&'a TextLine],
    policy: &BrandPolicy,
) -> BrandMatch<'a> {
    let expected = normalize_text(expected);
    if expected.is_empty() {
        return BrandMatch {
            line: None,
            score: 0.0,
            reason: MatchReason::EmptyExpected,
        };
    }

    let mut best = BrandMatch {
        line: None,
        score: 0.0,
        reason: MatchReason::NoCandidates,
    };

    for &line in candidates {
        let found = normalize_text(&line.text);
        if found.is_empty() {
            continue;
        }

        let (score, reason) = score_pair(&expected, &found, policy);
        if score > best.score {
            best = BrandMatch {
                line: Some(line),
                score,
                reason,
            };
        }
    }

    best
}

/// Token-set similarity, raised to the policy floor when one side is a
/// meaningful truncation of the other ("stones" vs "stones throw").
fn score_pair(expected: &str, found: &str, policy: &BrandPolicy) -> (f64, MatchReason) {
    let mut score = token_set_ratio(expected, found) / 100.0;
    let mut reason = MatchReason::TokenSetRatio;

    if expected.contains(found) || found.contains(expected) {
        let (a, b) = (expected.chars().count(), found.chars().count());
        let (min_len, max_len) = (a.min(b), a.max(b));
        if min_len >= policy.substring_min_len
            && min_len as f64 / max_len as f64 >= policy.substring_min_ratio
        {
            score = score.max(policy.substring_floor);
            reason = MatchReason::SubstringOverlap;
        }
    }

    (score, reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::label::model::BoundingBox;

    fn tb(i: usize, text: &str) -> TextLine {
        TextLine::new(format!("t{i}"), text, 0.95, BoundingBox::new(10, 10, 100, 30))
    }

    #[test]
    fn test_brand_punctuation_and_case_match() {
        let lines = [tb(1, "STONE\u{2019}S THROW"), tb(2, "HANDCRAFTED WINE")];
        let candidates: Vec<&TextLine> = lines.iter().collect();

        let m = best_brand_match("Stone's Throw", &candidates, &BrandPolicy::default());
        assert_eq!(m.line.map(|l| l.id.as_str()), Some("t1"));
        assert!(m.score >= 0.85);
    }

    #[test]
    fn test_brand_truncation_substring_overlap() {
        let lines = [tb(1, "STONE'S THROW"), tb(2, "RIVER VALLEY")];
        let candidates: Vec<&TextLine> = lines.iter().collect();

        let m = best_brand_match("Stone's", &candidates, &BrandPolicy::default());
        assert_eq!(m.line.map(|l| l.id.as_str()), Some("t1"));
        assert!(m.score >= 0.70);
        assert!(matches!(
            m.reason,
            MatchReason::SubstringOverlap | MatchReason::TokenSetRatio
        ));
    }

    #[test]
    fn test_substring_overlap_raises_partial_token_match() {
        // OCR cut the last word short: containment still counts as a match.
        let policy = BrandPolicy::default();
        let (score, reason) = score_pair("oldtown distillery", "oldtown distil", &policy);
        assert_eq!(reason, MatchReason::SubstringOverlap);
        assert!(score >= 0.86);
    }

    #[test]
    fn test_short_containment_does_not_inflate() {
        let policy = BrandPolicy::default();
        let (score, reason) = score_pair("ab", "ab cellars reserve", &policy);
        assert_eq!(reason, MatchReason::TokenSetRatio);
        assert!(score <= 1.0);
    }

    #[test]
    fn test_ties_keep_first_candidate() {
        let lines = [tb(1, "ACME"), tb(2, "acme")];
        let candidates: Vec<&TextLine> = lines.iter().collect();
        let m = best_brand_match("Acme", &candidates, &BrandPolicy::default());
        assert_eq!(m.line.map(|l| l.id.as_str()), Some("t1"));
    }

    #[test]
    fn test_empty_expected_and_no_candidates() {
        let policy = BrandPolicy::default();
        let m = best_brand_match("  '' ", &[], &policy);
        assert_eq!(m.reason, MatchReason::EmptyExpected);
        assert_eq!(m.score, 0.0);

        let m = best_brand_match("Acme", &[], &policy);
        assert_eq!(m.reason, MatchReason::NoCandidates);
        assert!(m.line.is_none());
    }
}
