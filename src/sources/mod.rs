//! Remote article sources.
//!
//! A [`Source`] does two things: turn a free-text query into an ordered list of
//! record identifiers, and turn identifiers into article records. [`PubMedSource`]
//! talks to the NCBI E-utilities; [`MockSource`] serves canned data for tests.
//!
//! Failures come in two sizes. A [`SourceError`] means the whole request failed
//! (transport, status, unreadable document) and ends the run. A [`RecordError`]
//! is confined to one article of an otherwise good response and only causes that
//! article to be skipped.

mod pubmed;
mod xml;

pub mod mock;

pub use mock::MockSource;
pub use pubmed::{PubMedSource, MAX_SEARCH_RESULTS};
pub use xml::{split_elements, XmlElement, XmlNode};

use crate::models::{FetchedRecord, SearchResult};
use async_trait::async_trait;

/// Search and bulk-fetch interface of a bibliographic database.
#[async_trait]
pub trait Source: Send + Sync + std::fmt::Debug {
    /// Unique identifier for this source (e.g., "pubmed")
    fn id(&self) -> &str;

    /// Human-readable name of this source
    fn name(&self) -> &str;

    /// Search for records matching the query, in relevance order.
    ///
    /// An empty result is a normal outcome.
    async fn search(&self, query: &str) -> Result<SearchResult, SourceError>;

    /// Retrieve the records for `ids` in one request.
    ///
    /// Implementations must return `Ok(vec![])` for empty `ids` without
    /// touching the network.
    async fn fetch(&self, ids: &[String]) -> Result<Vec<FetchedRecord>, SourceError>;
}

/// Errors that end a pipeline run
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Network or HTTP error
    #[error("Network error: {0}")]
    Network(String),

    /// Non-success response from the source
    #[error("API error: {0}")]
    Api(String),

    /// Parsing error (XML, JSON)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        SourceError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Parse(format!("JSON: {}", err))
    }
}

impl From<quick_xml::Error> for SourceError {
    fn from(err: quick_xml::Error) -> Self {
        SourceError::Parse(format!("XML: {}", err))
    }
}

/// Errors confined to a single article of a fetch response
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    /// The article sub-tree could not be decoded
    #[error("malformed article XML: {0}")]
    Xml(String),

    /// A structurally required element is absent
    #[error("missing <{0}> element")]
    MissingElement(&'static str),
}

impl From<quick_xml::Error> for RecordError {
    fn from(err: quick_xml::Error) -> Self {
        RecordError::Xml(err.to_string())
    }
}
