// labelcheck-core/src/infrastructure/mod.rs

pub mod adapters;
pub mod config;
pub mod dataset;
pub mod error;
pub mod fs;
pub mod report;

pub use adapters::{ApplicationRecord, TranscriptOcr};
pub use config::{load_config, load_config_file};
pub use dataset::{DatasetEntry, discover_dataset};
pub use report::JinjaRenderer;
