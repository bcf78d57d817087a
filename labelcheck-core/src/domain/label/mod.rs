// labelcheck-core/src/domain/label/mod.rs

pub mod brand;
pub mod extract;
pub mod model;
pub mod normalize;
pub mod similarity;

// Re-exports
pub use brand::{BrandMatch, MatchReason, best_brand_match};
pub use extract::{FieldExtractor, is_gov_warning};
pub use model::{
    BoundingBox, CheckField, CheckResult, CheckStatus, DeclaredFields, FieldCandidates, TextLine,
};
