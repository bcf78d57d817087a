// labelcheck-core/src/domain/label/similarity.rs
//
// Fuzzy string similarity on a 0-100 scale, computed on characters (not bytes).
// All scores derive from the Indel distance: only insertions and deletions,
// so `ratio = 200 * LCS / (len(a) + len(b))`. The distance itself comes from
// rapidfuzz; this module only composes windowed and token-set variants.

use rapidfuzz::distance::indel;
use std::collections::BTreeSet;

fn ratio_chars(a: &[char], b: &[char]) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 100.0;
    }
    100.0 * indel::normalized_similarity(a.iter().copied(), b.iter().copied())
}

/// Whole-string similarity. Two empty strings are identical (100).
pub fn ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 100.0;
    }
    100.0 * indel::normalized_similarity(a.chars(), b.chars())
}

/// Best alignment of the shorter string against any window of the longer one.
/// Windows hanging over either end of the longer string are included, so a
/// needle that is only partially present still gets a proportional score.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    if short.is_empty() {
        return if long.is_empty() { 100.0 } else { 0.0 };
    }

    let n = short.len() as isize;
    let mut best = 0.0_f64;
    for start in (1 - n)..(long.len() as isize) {
        let lo = start.max(0) as usize;
        let hi = ((start + n) as usize).min(long.len());
        let score = ratio_chars(&short, &long[lo..hi]);
        if score > best {
            best = score;
            if best >= 100.0 {
                break;
            }
        }
    }
    best
}

/// Order- and duplicate-independent comparison over whitespace tokens.
/// When one token set contains the other the score is 100.
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let intersection = join(tokens_a.intersection(&tokens_b));
    let diff_ab = join(tokens_a.difference(&tokens_b));
    let diff_ba = join(tokens_b.difference(&tokens_a));

    if !intersection.is_empty() && (diff_ab.is_empty() || diff_ba.is_empty()) {
        return 100.0;
    }

    let combined_ab = concat(&intersection, &diff_ab);
    let combined_ba = concat(&intersection, &diff_ba);

    ratio(&intersection, &combined_ab)
        .max(ratio(&intersection, &combined_ba))
        .max(ratio(&combined_ab, &combined_ba))
}

fn join<'a>(tokens: impl Iterator<Item = &'a &'a str>) -> String {
    tokens.copied().collect::<Vec<_>>().join(" ")
}

fn concat(head: &str, tail: &str) -> String {
    match (head.is_empty(), tail.is_empty()) {
        (true, _) => tail.to_string(),
        (_, true) => head.to_string(),
        _ => format!("{} {}", head, tail),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_ratio_basics() {
        assert!(approx(ratio("12.5%", "12.5%"), 100.0));
        assert!(approx(ratio("", ""), 100.0));
        assert!(approx(ratio("abc", ""), 0.0));
        // LCS("12.5%", "12.3%") = 4 -> 2*4/10
        assert!(approx(ratio("12.5%", "12.3%"), 80.0));
        // Scored on chars: one accented letter is one edit, not two bytes.
        assert!(approx(ratio("rosé", "rose"), 75.0));
    }

    #[test]
    fn test_partial_ratio_finds_embedded_phrase() {
        assert!(approx(
            partial_ratio("noise government warning noise", "government warning"),
            100.0
        ));
        // "rn" for "m" and "l" for "i": still above the 85 bar.
        assert!(partial_ratio("governrment warnlng", "government warning") >= 85.0);
        assert!(partial_ratio("warning keep refrigerated", "government warning") < 85.0);
    }

    #[test]
    fn test_partial_ratio_is_symmetric_in_argument_order() {
        let a = "short";
        let b = "a much longer short text";
        assert!(approx(partial_ratio(a, b), partial_ratio(b, a)));
        assert!(approx(partial_ratio("", ""), 100.0));
        assert!(approx(partial_ratio("", "abc"), 0.0));
    }

    #[test]
    fn test_token_set_ratio_ignores_order_and_duplicates() {
        assert!(approx(token_set_ratio("stones throw", "throw stones"), 100.0));
        assert!(approx(token_set_ratio("stones throw throw", "stones throw"), 100.0));
        assert!(approx(token_set_ratio("stones", "stones throw"), 100.0));
        assert!(token_set_ratio("river valley", "stones throw") < 50.0);
        assert!(approx(token_set_ratio("", "stones"), 0.0));
    }
}
