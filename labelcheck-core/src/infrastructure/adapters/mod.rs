// labelcheck-core/src/infrastructure/adapters/mod.rs

pub mod application;
pub mod transcript;

pub use application::ApplicationRecord;
pub use transcript::TranscriptOcr;
