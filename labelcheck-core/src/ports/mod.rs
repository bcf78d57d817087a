// labelcheck-core/src/ports/mod.rs

pub mod ocr;

pub use ocr::{OcrEngine, OcrPage};
