//! # Paper Fetcher
//!
//! Finds PubMed papers with at least one author affiliated with a company.
//!
//! ## Architecture
//!
//! - [`sources`]: the [`Source`] trait and the PubMed E-utilities client
//! - [`extract`]: affiliation classification and per-record extraction
//! - [`pipeline`]: one search → fetch → extract run
//! - [`models`]: search results, article records and qualifying papers
//! - [`utils`]: HTTP client and CSV export
//! - [`config`]: configuration management
//! - [`ui`]: terminal output

pub mod config;
pub mod extract;
pub mod models;
pub mod pipeline;
pub mod sources;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use extract::{classify, extract, AffiliationKind};
pub use models::QualifyingPaper;
pub use pipeline::{run, PipelineOutcome};
pub use sources::{PubMedSource, Source, SourceError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
