//! One search → fetch → extract run.

use crate::extract::extract;
use crate::models::QualifyingPaper;
use crate::sources::{Source, SourceError};

/// Result of a pipeline run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome {
    /// The search matched nothing; no fetch was made
    NoResults,
    /// Records were fetched but none has an industry author
    NoQualifyingPapers { fetched: usize },
    /// Qualifying papers in search order
    Papers(Vec<QualifyingPaper>),
}

/// Search `source` for `query`, fetch the hits and keep the qualifying papers.
///
/// Search and fetch failures end the run. Articles that fail to parse are
/// skipped inside [`extract`].
pub async fn run(source: &dyn Source, query: &str) -> Result<PipelineOutcome, SourceError> {
    tracing::debug!("Running query against source '{}'", source.id());
    let result = source.search(query).await?;
    if result.is_empty() {
        tracing::info!("No {} results for query: {}", source.name(), query);
        return Ok(PipelineOutcome::NoResults);
    }

    let records = source.fetch(&result.ids).await?;
    let fetched = records.len();
    let papers = extract(records);

    if papers.is_empty() {
        Ok(PipelineOutcome::NoQualifyingPapers { fetched })
    } else {
        Ok(PipelineOutcome::Papers(papers))
    }
}
