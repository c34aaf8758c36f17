//! Core data models for search results, fetched articles and qualifying papers.

mod article;
mod paper;

pub use article::{ArticleRecord, AuthorEntry, FetchedRecord, SearchResult};
pub use paper::{QualifyingPaper, NOT_AVAILABLE};
