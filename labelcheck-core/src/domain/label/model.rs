// labelcheck-core/src/domain/label/model.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// Pixel-space box of a recognized line, serialized as `[x, y, width, height]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "[u32; 4]", into = "[u32; 4]")]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn top(&self) -> u32 {
        self.y
    }
}

impl From<[u32; 4]> for BoundingBox {
    fn from([x, y, width, height]: [u32; 4]) -> Self {
        Self::new(x, y, width, height)
    }
}

impl From<BoundingBox> for [u32; 4] {
    fn from(b: BoundingBox) -> Self {
        [b.x, b.y, b.width, b.height]
    }
}

/// One line of recognized text, as handed over by the OCR collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLine {
    pub id: String,
    pub text: String,
    #[serde(rename = "conf", alias = "confidence")]
    pub confidence: f64,
    #[serde(rename = "bbox", alias = "bounding_box")]
    pub bounding_box: BoundingBox,
}

impl TextLine {
    pub fn new(
        id: impl Into<String>,
        text: impl Into<String>,
        confidence: f64,
        bounding_box: BoundingBox,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            confidence,
            bounding_box,
        }
    }
}

/// Values the applicant declared for the label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeclaredFields {
    pub brand_name: String,
    #[serde(default)]
    pub abv: Option<String>,
    #[serde(default)]
    pub net_contents: Option<String>,
    #[serde(default = "default_require_gov_warning")]
    pub require_gov_warning: bool,
}

fn default_require_gov_warning() -> bool {
    true
}

impl DeclaredFields {
    pub fn new(brand_name: impl Into<String>) -> Self {
        Self {
            brand_name: brand_name.into(),
            abv: None,
            net_contents: None,
            require_gov_warning: true,
        }
    }

    pub fn with_abv(mut self, abv: impl Into<String>) -> Self {
        self.abv = Some(abv.into());
        self
    }

    pub fn with_net_contents(mut self, net_contents: impl Into<String>) -> Self {
        self.net_contents = Some(net_contents.into());
        self
    }

    pub fn with_gov_warning(mut self, required: bool) -> Self {
        self.require_gov_warning = required;
        self
    }

    /// The declared ABV, if one was given at all. Blank strings count as absent.
    pub fn declared_abv(&self) -> Option<&str> {
        non_blank(self.abv.as_deref())
    }

    pub fn declared_net_contents(&self) -> Option<&str> {
        non_blank(self.net_contents.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Per-run classification of the recognized lines.
/// Zero-copy: every bucket borrows from the same `all` slice, and the order of
/// `brand` is the salience ranking the matcher relies on for tie-breaking.
#[derive(Debug, Clone)]
pub struct FieldCandidates<'a> {
    pub abv: Vec<&'a TextLine>,
    pub net_contents: Vec<&'a TextLine>,
    pub warning: Vec<&'a TextLine>,
    pub brand: Vec<&'a TextLine>,
    pub all: &'a [TextLine],
}

impl FieldCandidates<'_> {
    /// All recognized text joined with single spaces, in OCR order.
    pub fn full_text(&self) -> String {
        self.all
            .iter()
            .map(|line| line.text.as_str())
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckStatus {
    Pass,
    Review,
    Fail,
    Missing,
}

impl CheckStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::Review => "REVIEW",
            Self::Fail => "FAIL",
            Self::Missing => "MISSING",
        }
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckField {
    BrandName,
    Abv,
    NetContents,
    GovernmentWarningPresent,
    GovernmentWarningHeader,
    GovernmentWarningText,
    ImageQuality,
}

impl CheckField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BrandName => "brand_name",
            Self::Abv => "abv",
            Self::NetContents => "net_contents",
            Self::GovernmentWarningPresent => "government_warning_present",
            Self::GovernmentWarningHeader => "government_warning_header",
            Self::GovernmentWarningText => "government_warning_text",
            Self::ImageQuality => "image_quality",
        }
    }
}

impl fmt::Display for CheckField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Verdict for one field. `confidence` is only set when a comparison was scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    pub field: CheckField,
    pub status: CheckStatus,
    pub expected: Option<String>,
    pub found: Option<String>,
    pub confidence: Option<f64>,
    pub notes: String,
    #[serde(default)]
    pub line_ids: Vec<String>,
}

impl CheckResult {
    pub fn new(field: CheckField, status: CheckStatus) -> Self {
        Self {
            field,
            status,
            expected: None,
            found: None,
            confidence: None,
            notes: String::new(),
            line_ids: Vec::new(),
        }
    }

    pub fn expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }

    pub fn found(mut self, found: impl Into<String>) -> Self {
        self.found = Some(found.into());
        self
    }

    /// Scores are reported with three decimals.
    pub fn confidence(mut self, score: f64) -> Self {
        self.confidence = Some((score * 1000.0).round() / 1000.0);
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn line(mut self, line: &TextLine) -> Self {
        self.line_ids.push(line.id.clone());
        self
    }

    pub fn is_pass(&self) -> bool {
        self.status == CheckStatus::Pass
    }
}
