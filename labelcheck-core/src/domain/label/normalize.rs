// labelcheck-core/src/domain/label/normalize.rs
//
// Canonical forms used for comparison. Every function is total: unparseable or
// empty input yields an empty string, never an error.

use regex::Regex;
use std::sync::OnceLock;

const APOSTROPHES: [char; 5] = ['\'', '\u{2019}', '\u{2018}', '`', '\u{02BC}'];
const ABV_NOISE: [&str; 4] = ["abv", "alc/vol", "alc.", "vol."];

fn re_abv_value() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(100(?:\.0{1,3})?|\d{1,2}(?:\.\d{1,3})?)%").unwrap_or_else(|_| {
            // Hardcoded pattern: the fallback never matches.
            Regex::new("$^").unwrap_or_else(|_| unreachable!())
        })
    })
}

/// Brand comparison form: lowercase, apostrophes dropped, punctuation -> space.
pub fn normalize_text(s: &str) -> String {
    let lowered: String = s
        .to_lowercase()
        .chars()
        .filter(|c| !APOSTROPHES.contains(c))
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    collapse_whitespace(&lowered)
}

/// "ALC./VOL. 12.50%" -> "12.5%", " alc/vol 7% " -> "7%".
pub fn normalize_abv(s: &str) -> String {
    let mut t = s.trim().to_lowercase();
    for noise in ABV_NOISE {
        t = t.replace(noise, "");
    }
    let t: String = t.chars().filter(|c| !c.is_whitespace()).collect();

    let Some(value) = re_abv_value()
        .captures(&t)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
    else {
        return String::new();
    };

    let formatted = format!("{:.1}", value);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    format!("{}%", trimmed)
}

/// "750 mL", " 750ML " and "750 milliliters" all become "750ml".
pub fn normalize_net_contents(s: &str) -> String {
    // Plural first, otherwise "milliliters" would become "mls".
    let t = s
        .trim()
        .to_lowercase()
        .replace("milliliters", "ml")
        .replace("milliliter", "ml");
    t.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Uppercase form used only by the government warning checks.
pub fn normalize_warning(s: &str) -> String {
    let upper: String = s
        .to_uppercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();
    collapse_whitespace(&upper)
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
