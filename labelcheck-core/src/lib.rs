// labelcheck-core/src/lib.rs

// 1. Documentation
#![allow(missing_docs)]
// 2. Memory safety
#![deny(unsafe_code)]
// 3. Robustness
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
// 4. Performance
#![warn(clippy::perf)]

// --- HEXAGONAL MODULES ---

// 1. Ports (Interfaces / Traits)
// Contracts with the outside world (OCR engine).
pub mod ports;

// 2. Domain (Business core)
// Normalization, candidate extraction, fuzzy scoring, compliance decisions.
// Pure and synchronous: depends on nothing else in the crate.
pub mod domain;

// 3. Infrastructure (Adapters)
// Config files, OCR transcripts, dataset discovery, report rendering.
pub mod infrastructure;

// 4. Application (Use Cases)
// Single verification and batch orchestration.
pub mod application;

// --- GLOBAL ERROR HANDLING ---
pub mod error;

// --- RE-EXPORTS (FACADE) ---
pub use error::LabelCheckError;
