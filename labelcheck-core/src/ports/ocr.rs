// labelcheck-core/src/ports/ocr.rs

// What the verifier needs from text recognition, without knowing which engine
// produces it. Image decoding lives behind this trait too, which is why the
// page carries the pixel dimensions.

use async_trait::async_trait;
use std::collections::BTreeMap;

use crate::domain::label::model::TextLine;
use crate::error::LabelCheckError;

/// Recognized text of one label image.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OcrPage {
    pub width: u32,
    pub height: u32,
    pub lines: Vec<TextLine>,
    /// Engine-side durations in milliseconds, if the engine reports them.
    pub timings_ms: BTreeMap<String, u64>,
}

impl OcrPage {
    pub fn new(width: u32, height: u32, lines: Vec<TextLine>) -> Self {
        Self {
            width,
            height,
            lines,
            timings_ms: BTreeMap::new(),
        }
    }
}

#[async_trait]
pub trait OcrEngine: Send + Sync {
    /// Recognizes the text lines of an encoded image. A failure here is a
    /// collaborator error, never a verification outcome.
    async fn recognize(&self, image: &[u8]) -> Result<OcrPage, LabelCheckError>;
}
