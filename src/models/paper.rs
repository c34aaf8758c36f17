//! The output unit: a paper with at least one industry-affiliated author.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Placeholder for a missing publication year or email.
pub const NOT_AVAILABLE: &str = "N/A";

/// A paper with at least one non-academic author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualifyingPaper {
    /// PubMed identifier, empty when the record had none
    pub pmid: String,

    pub title: String,

    /// Publication year or [`NOT_AVAILABLE`]
    pub publication_date: String,

    /// Non-academic authors in author-list order
    pub non_academic_authors: Vec<String>,

    /// Distinct raw affiliation strings of the non-academic authors
    pub company_affiliations: HashSet<String>,

    /// First email found in any affiliation, or [`NOT_AVAILABLE`]
    pub corresponding_email: String,
}

impl QualifyingPaper {
    /// Authors joined with `"; "`.
    pub fn authors_joined(&self) -> String {
        self.non_academic_authors.join("; ")
    }

    /// Affiliations joined with `"; "`.
    ///
    /// The set has no order of its own; sorting keeps repeated exports identical.
    pub fn affiliations_joined(&self) -> String {
        let mut affiliations: Vec<&str> =
            self.company_affiliations.iter().map(String::as_str).collect();
        affiliations.sort_unstable();
        affiliations.join("; ")
    }

    /// PubMed page for this paper.
    pub fn url(&self) -> String {
        format!("https://pubmed.ncbi.nlm.nih.gov/{}/", self.pmid)
    }
}
