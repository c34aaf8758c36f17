//! Mock source for testing purposes.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::models::{ArticleRecord, FetchedRecord, SearchResult};
use crate::sources::{RecordError, Source, SourceError};

/// A mock source that returns predefined responses and counts calls.
#[derive(Debug, Default)]
pub struct MockSource {
    ids: Mutex<Vec<String>>,
    records: Mutex<Vec<FetchedRecord>>,
    search_calls: AtomicUsize,
    fetch_calls: AtomicUsize,
}

impl MockSource {
    /// Create a new mock source with no results.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the identifiers returned by `search`.
    pub fn set_search_ids<I, S>(&self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut guard = self.ids.lock().unwrap();
        *guard = ids.into_iter().map(Into::into).collect();
    }

    /// Queue a well-formed record for `fetch`.
    pub fn push_record(&self, record: ArticleRecord) {
        self.records.lock().unwrap().push(Ok(record));
    }

    /// Queue a record that failed to parse.
    pub fn push_broken_record(&self, error: RecordError) {
        self.records.lock().unwrap().push(Err(error));
    }

    /// Number of `search` calls so far.
    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    /// Number of `fetch` calls so far.
    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Source for MockSource {
    fn id(&self) -> &str {
        "mock"
    }

    fn name(&self) -> &str {
        "Mock Source"
    }

    async fn search(&self, _query: &str) -> Result<SearchResult, SourceError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        let guard = self.ids.lock().unwrap();
        Ok(SearchResult::new(guard.clone()))
    }

    async fn fetch(&self, ids: &[String]) -> Result<Vec<FetchedRecord>, SourceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        let guard = self.records.lock().unwrap();
        Ok(guard.clone())
    }
}
