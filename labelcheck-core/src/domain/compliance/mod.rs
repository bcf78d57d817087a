// labelcheck-core/src/domain/compliance/mod.rs

pub mod comparator;
pub mod policy;
pub mod quality;
pub mod verdict;
pub mod warning;

// Re-exports
pub use comparator::compare;
pub use policy::{
    BatchPolicy, BrandPolicy, FieldThresholds, QualityPolicy, Threshold, VerificationConfig,
    WarningPolicy,
};
pub use quality::{ImageQuality, QualityRating, assess_image_quality};
pub use verdict::{OverallStatus, VerificationResult};
pub use warning::{WarningStage, check_government_warning};
