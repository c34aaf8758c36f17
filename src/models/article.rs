//! Raw records as returned by the search and fetch endpoints.

use serde::{Deserialize, Serialize};

use crate::sources::RecordError;

/// Identifiers returned by a search, in the relevance order of the API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub ids: Vec<String>,
}

impl SearchResult {
    pub fn new(ids: Vec<String>) -> Self {
        Self { ids }
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }
}

/// A single author of an article.
///
/// Every part is optional; PubMed omits `ForeName` for many authors and
/// `AffiliationInfo` for most older records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorEntry {
    pub fore_name: Option<String>,
    pub last_name: Option<String>,
    /// Free text, may embed a contact email address
    pub affiliation: Option<String>,
}

impl AuthorEntry {
    pub fn new(
        fore_name: Option<&str>,
        last_name: Option<&str>,
        affiliation: Option<&str>,
    ) -> Self {
        Self {
            fore_name: fore_name.map(str::to_string),
            last_name: last_name.map(str::to_string),
            affiliation: affiliation.map(str::to_string),
        }
    }

    /// `fore last`, trimmed. Missing parts contribute nothing.
    pub fn display_name(&self) -> String {
        format!(
            "{} {}",
            self.fore_name.as_deref().unwrap_or(""),
            self.last_name.as_deref().unwrap_or("")
        )
        .trim()
        .to_string()
    }

    /// The affiliation text, or `""` when the author has none.
    pub fn affiliation_text(&self) -> &str {
        self.affiliation.as_deref().unwrap_or("")
    }
}

/// One `PubmedArticle` from a fetch response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub pmid: Option<String>,
    pub title: Option<String>,
    /// `PubDate/Year` of the journal issue
    pub year: Option<String>,
    pub authors: Vec<AuthorEntry>,
}

impl ArticleRecord {
    pub fn new(pmid: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            pmid: Some(pmid.into()),
            title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn year(mut self, year: impl Into<String>) -> Self {
        self.year = Some(year.into());
        self
    }

    pub fn author(mut self, author: AuthorEntry) -> Self {
        self.authors.push(author);
        self
    }
}

/// A fetched article, or the reason its sub-tree could not be read.
pub type FetchedRecord = Result<ArticleRecord, RecordError>;
