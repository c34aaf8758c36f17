//! CSV export of qualifying papers.

use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::models::QualifyingPaper;

/// Column names, in output order
pub const CSV_HEADERS: [&str; 6] = [
    "PubmedID",
    "Title",
    "Publication Date",
    "Non-academic Author(s)",
    "Company Affiliation(s)",
    "Corresponding Author Email",
];

/// Errors that can occur while writing an export
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Serialize)]
struct PaperRow<'a> {
    pmid: &'a str,
    title: &'a str,
    publication_date: &'a str,
    authors: String,
    affiliations: String,
    email: &'a str,
}

impl<'a> From<&'a QualifyingPaper> for PaperRow<'a> {
    fn from(paper: &'a QualifyingPaper) -> Self {
        Self {
            pmid: &paper.pmid,
            title: &paper.title,
            publication_date: &paper.publication_date,
            authors: paper.authors_joined(),
            affiliations: paper.affiliations_joined(),
            email: &paper.corresponding_email,
        }
    }
}

/// Write `papers` as CSV to `writer`.
///
/// The header row is only written when there is at least one paper, so an
/// empty slice produces no output at all.
pub fn write_csv_to<W: Write>(writer: W, papers: &[QualifyingPaper]) -> Result<(), ExportError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    if !papers.is_empty() {
        csv_writer.write_record(CSV_HEADERS)?;
    }
    for paper in papers {
        csv_writer.serialize(PaperRow::from(paper))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Create (or truncate) `path` and write `papers` to it as CSV.
pub fn write_csv(path: &Path, papers: &[QualifyingPaper]) -> Result<(), ExportError> {
    let file = File::create(path)?;
    write_csv_to(file, papers)?;
    tracing::debug!("Wrote {} rows to {}", papers.len(), path.display());
    Ok(())
}
