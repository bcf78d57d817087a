// labelcheck/src/output.rs
//
// Terminal rendering (comfy-table). Machine formats live in labelcheck-core.

use comfy_table::{Cell, Color, ContentArrangement, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};

use labelcheck_core::application::BatchReport;
use labelcheck_core::domain::compliance::{ImageQuality, OverallStatus, QualityRating, VerificationResult};
use labelcheck_core::domain::label::CheckStatus;

fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header.iter().map(|h| Cell::new(h).fg(Color::Cyan)));
    table
}

fn status_color(status: CheckStatus) -> Color {
    match status {
        CheckStatus::Pass => Color::Green,
        CheckStatus::Review => Color::Yellow,
        CheckStatus::Fail | CheckStatus::Missing => Color::Red,
    }
}

fn overall_color(status: OverallStatus) -> Color {
    match status {
        OverallStatus::Pass => Color::Green,
        OverallStatus::NeedsReview => Color::Yellow,
    }
}

pub fn verification_table(result: &VerificationResult) -> Table {
    let mut table = new_table(&["Field", "Status", "Expected", "Found", "Confidence", "Notes"]);
    for check in &result.checks {
        table.add_row(vec![
            Cell::new(check.field.as_str()),
            Cell::new(check.status.as_str()).fg(status_color(check.status)),
            Cell::new(check.expected.as_deref().unwrap_or("-")),
            Cell::new(check.found.as_deref().unwrap_or("-")),
            Cell::new(
                check
                    .confidence
                    .map_or_else(|| "-".to_string(), |c| format!("{c:.3}")),
            ),
            Cell::new(&check.notes),
        ]);
    }
    table
}

pub fn quality_table(quality: &ImageQuality) -> Table {
    let color = match quality.rating {
        QualityRating::Good => Color::Green,
        QualityRating::Fair => Color::Yellow,
        QualityRating::Poor => Color::Red,
    };

    let mut table = new_table(&["Metric", "Value"]);
    table.add_row(vec![
        Cell::new("Rating"),
        Cell::new(quality.rating.as_str()).fg(color),
    ]);
    table.add_row(vec![
        Cell::new("Average confidence"),
        Cell::new(format!("{:.3}", quality.average_confidence)),
    ]);
    table.add_row(vec![
        Cell::new("Low-confidence lines"),
        Cell::new(format!("{:.1}%", quality.low_confidence_ratio * 100.0)),
    ]);
    table.add_row(vec![
        Cell::new("Recognized characters"),
        Cell::new(quality.total_text_chars.to_string()),
    ]);
    table.add_row(vec![Cell::new("Recommendation"), Cell::new(&quality.recommendation)]);
    table
}

pub fn batch_table(report: &BatchReport) -> Table {
    let mut table = new_table(&["Item", "Status", "Blocking checks", "Error"]);
    for item in &report.results {
        let blocking = item
            .result
            .as_ref()
            .map(|r| {
                r.blocking_checks()
                    .map(|c| format!("{} ({})", c.field, c.status))
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_default();

        table.add_row(vec![
            Cell::new(&item.name),
            Cell::new(item.overall_status.as_str()).fg(overall_color(item.overall_status)),
            Cell::new(blocking),
            Cell::new(item.error.as_deref().unwrap_or("-")).fg(if item.error.is_some() {
                Color::Red
            } else {
                Color::Reset
            }),
        ]);
    }
    table
}
