//! Turning fetched articles into qualifying papers.
//!
//! Each record is handled on its own: authors are classified with [`classify`],
//! industry authors and their affiliations are collected, and the first email
//! found in any affiliation becomes the corresponding address. A record with no
//! industry author is dropped; a record that could not be parsed is logged and
//! skipped. Neither stops the records after it.

mod classify;
mod email;

pub use classify::{classify, AffiliationKind, ACADEMIC_KEYWORDS};
pub use email::find_email;

use std::collections::HashSet;

use crate::models::{ArticleRecord, FetchedRecord, QualifyingPaper, NOT_AVAILABLE};

/// What became of a single fetched record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    /// At least one industry author
    Emitted(QualifyingPaper),
    /// Every author is academic
    NoIndustryAuthors { pmid: String },
    /// The record could not be read
    Skipped { reason: String },
}

/// Build the qualifying paper for `article`, if it has an industry author.
pub fn extract_article(article: &ArticleRecord) -> Option<QualifyingPaper> {
    let mut non_academic_authors = Vec::new();
    let mut company_affiliations = HashSet::new();
    let mut email: Option<&str> = None;

    for author in &article.authors {
        let affiliation = author.affiliation_text();

        if classify(affiliation).is_industry() {
            non_academic_authors.push(author.display_name());
            company_affiliations.insert(affiliation.to_string());
        }

        if email.is_none() {
            email = find_email(affiliation);
        }
    }

    if non_academic_authors.is_empty() {
        return None;
    }

    Some(QualifyingPaper {
        pmid: article.pmid.clone().unwrap_or_default(),
        title: article.title.clone().unwrap_or_default(),
        publication_date: article
            .year
            .as_deref()
            .filter(|year| !year.is_empty())
            .unwrap_or(NOT_AVAILABLE)
            .to_string(),
        non_academic_authors,
        company_affiliations,
        corresponding_email: email.unwrap_or(NOT_AVAILABLE).to_string(),
    })
}

/// Classify one fetched record.
pub fn extract_record(record: &FetchedRecord) -> RecordOutcome {
    match record {
        Ok(article) => match extract_article(article) {
            Some(paper) => RecordOutcome::Emitted(paper),
            None => RecordOutcome::NoIndustryAuthors {
                pmid: article.pmid.clone().unwrap_or_default(),
            },
        },
        Err(err) => RecordOutcome::Skipped {
            reason: err.to_string(),
        },
    }
}

/// Qualifying papers among `records`, in input order.
pub fn extract<I>(records: I) -> Vec<QualifyingPaper>
where
    I: IntoIterator<Item = FetchedRecord>,
{
    let mut papers = Vec::new();
    let mut total = 0usize;
    let mut skipped = 0usize;

    for record in records {
        total += 1;
        match extract_record(&record) {
            RecordOutcome::Emitted(paper) => papers.push(paper),
            RecordOutcome::NoIndustryAuthors { pmid } => {
                tracing::debug!("No industry authors in {}, dropping", pmid);
            }
            RecordOutcome::Skipped { reason } => {
                skipped += 1;
                tracing::warn!("Skipping paper due to error: {}", reason);
            }
        }
    }

    tracing::info!(
        "{} of {} papers have industry authors ({} skipped)",
        papers.len(),
        total,
        skipped
    );
    papers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AuthorEntry;
    use crate::sources::RecordError;

    fn author(fore: &str, last: &str, affiliation: &str) -> AuthorEntry {
        AuthorEntry::new(Some(fore), Some(last), Some(affiliation))
    }

    #[test]
    fn test_all_academic_is_dropped() {
        let record = ArticleRecord::new("1", "All academic")
            .author(author("A", "One", "Stanford University"))
            .author(author("B", "Two", "Mayo Clinic Hospital"));

        assert_eq!(extract_article(&record), None);
        assert_eq!(
            extract_record(&Ok(record)),
            RecordOutcome::NoIndustryAuthors {
                pmid: "1".to_string()
            }
        );
    }

    #[test]
    fn test_industry_authors_collected_in_order() {
        let record = ArticleRecord::new("2", "Mixed")
            .year("2021")
            .author(author("Zed", "Last", "Roche Diagnostics GmbH"))
            .author(author("Amy", "Mid", "University of Basel"))
            .author(author("Bob", "First", "Novartis AG"));

        let paper = extract_article(&record).unwrap();
        assert_eq!(paper.pmid, "2");
        assert_eq!(paper.publication_date, "2021");
        assert_eq!(paper.non_academic_authors, vec!["Zed Last", "Bob First"]);
        assert_eq!(paper.company_affiliations.len(), 2);
        assert!(paper.company_affiliations.contains("Novartis AG"));
        assert_eq!(paper.corresponding_email, NOT_AVAILABLE);
    }

    #[test]
    fn test_shared_affiliation_deduplicated() {
        let record = ArticleRecord::new("3", "Same company")
            .author(author("A", "One", "Acme Biotech Inc."))
            .author(author("B", "Two", "Acme Biotech Inc."));

        let paper = extract_article(&record).unwrap();
        assert_eq!(paper.non_academic_authors.len(), 2);
        assert_eq!(paper.company_affiliations.len(), 1);
        assert_eq!(paper.affiliations_joined(), "Acme Biotech Inc.");
    }

    #[test]
    fn test_missing_affiliation_counts_as_industry() {
        let record = ArticleRecord::new("4", "No affiliation")
            .author(AuthorEntry::new(Some("Solo"), Some("Author"), None));

        let paper = extract_article(&record).unwrap();
        assert_eq!(paper.non_academic_authors, vec!["Solo Author"]);
        assert!(paper.company_affiliations.contains(""));
    }

    #[test]
    fn test_email_from_third_author() {
        let record = ArticleRecord::new("5", "Email late")
            .author(author("A", "One", "Acme Inc"))
            .author(author("B", "Two", "Beta Corp"))
            .author(author("C", "Three", "Gamma LLC, c.three@gamma.com"))
            .author(author("D", "Four", "Delta Ltd, d.four@delta.com"));

        let paper = extract_article(&record).unwrap();
        assert_eq!(paper.corresponding_email, "c.three@gamma.com");
    }

    #[test]
    fn test_email_taken_from_academic_author() {
        let record = ArticleRecord::new("6", "Academic email")
            .author(author("A", "One", "Harvard University, a.one@harvard.edu"))
            .author(author("B", "Two", "Pfizer Inc, b.two@pfizer.com"));

        let paper = extract_article(&record).unwrap();
        assert_eq!(paper.non_academic_authors, vec!["B Two"]);
        assert_eq!(paper.corresponding_email, "a.one@harvard.edu");
    }

    #[test]
    fn test_missing_fields_defaulted() {
        let record = ArticleRecord {
            pmid: None,
            title: None,
            year: Some(String::new()),
            authors: vec![AuthorEntry::new(None, Some("Doe"), Some("Acme"))],
        };

        let paper = extract_article(&record).unwrap();
        assert_eq!(paper.pmid, "");
        assert_eq!(paper.title, "");
        assert_eq!(paper.publication_date, NOT_AVAILABLE);
        assert_eq!(paper.non_academic_authors, vec!["Doe"]);
    }

    #[test]
    fn test_no_authors_is_dropped() {
        assert_eq!(extract_article(&ArticleRecord::new("7", "No authors")), None);
    }

    #[test]
    fn test_broken_record_skipped_without_stopping() {
        let records = vec![
            Ok(ArticleRecord::new("8", "Before").author(author("A", "A", "Acme Inc"))),
            Err(RecordError::MissingElement("MedlineCitation")),
            Ok(ArticleRecord::new("9", "Academic").author(author("B", "B", "MIT School"))),
            Ok(ArticleRecord::new("10", "After").author(author("C", "C", "Beta Corp"))),
        ];

        assert_eq!(
            extract_record(&records[1]),
            RecordOutcome::Skipped {
                reason: "missing <MedlineCitation> element".to_string()
            }
        );

        let papers = extract(records);
        let ids: Vec<&str> = papers.iter().map(|p| p.pmid.as_str()).collect();
        assert_eq!(ids, vec!["8", "10"]);
    }

    #[test]
    fn test_extract_empty() {
        assert!(extract(Vec::new()).is_empty());
    }
}
