// labelcheck-core/src/infrastructure/adapters/transcript.rs

// OCR adapter that replays a recorded transcript instead of running an engine.
// The "image" bytes are the transcript JSON itself:
//
//   { "width": 1000, "height": 1500,
//     "lines": [ { "id": "t1", "text": "STONE'S THROW", "conf": 0.97, "bbox": [10, 10, 300, 60] } ],
//     "timings_ms": { "ocr_ms": 840 } }

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use tracing::debug;

use crate::domain::error::DomainError;
use crate::domain::label::model::TextLine;
use crate::error::LabelCheckError;
use crate::ports::ocr::{OcrEngine, OcrPage};

#[derive(Debug, Deserialize)]
struct Transcript {
    width: u32,
    height: u32,
    #[serde(default)]
    lines: Vec<TextLine>,
    #[serde(default)]
    timings_ms: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TranscriptOcr;

impl TranscriptOcr {
    pub fn new() -> Self {
        Self
    }

    /// Parses and validates a transcript payload.
    pub fn parse(bytes: &[u8]) -> Result<OcrPage, LabelCheckError> {
        let transcript: Transcript = serde_json::from_slice(bytes)
            .map_err(|e| LabelCheckError::Ocr(format!("unreadable transcript: {e}")))?;

        validate(&transcript)?;
        debug!(
            width = transcript.width,
            height = transcript.height,
            lines = transcript.lines.len(),
            "Transcript parsed"
        );

        Ok(OcrPage {
            width: transcript.width,
            height: transcript.height,
            lines: transcript.lines,
            timings_ms: transcript.timings_ms,
        })
    }

    /// Convenience for callers holding a path rather than bytes.
    pub fn load(path: &Path) -> Result<OcrPage, LabelCheckError> {
        let bytes = std::fs::read(path)?;
        Self::parse(&bytes)
    }
}

fn validate(transcript: &Transcript) -> Result<(), DomainError> {
    if transcript.width == 0 || transcript.height == 0 {
        return Err(DomainError::InvalidImageDimensions {
            width: transcript.width,
            height: transcript.height,
        });
    }

    let mut seen = HashSet::with_capacity(transcript.lines.len());
    for line in &transcript.lines {
        let malformed = |reason: &str| DomainError::MalformedTextLine {
            id: line.id.clone(),
            reason: reason.to_string(),
        };

        if line.id.trim().is_empty() {
            return Err(malformed("empty id"));
        }
        if !seen.insert(line.id.as_str()) {
            return Err(malformed("duplicate id"));
        }
        if !(0.0..=1.0).contains(&line.confidence) {
            return Err(malformed("confidence outside [0, 1]"));
        }
    }
    Ok(())
}

#[async_trait]
impl OcrEngine for TranscriptOcr {
    async fn recognize(&self, image: &[u8]) -> Result<OcrPage, LabelCheckError> {
        Self::parse(image)
    }
}
