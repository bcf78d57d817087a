// labelcheck-core/src/application/mod.rs

pub mod batch;
pub mod ports;
pub mod report;
pub mod verifier;

// --- RE-EXPORTS (FACADE PATTERN) ---
// The CLI imports use cases from here without knowing the file layout.

pub use batch::{BatchItem, BatchItemResult, BatchReport, load_dataset, run_batch};
pub use report::{render_batch_markdown, render_verification_markdown};
pub use verifier::{LabelVerifier, verify_image};
