pub mod compliance;
pub mod error;
pub mod label;

pub use error::DomainError;
