//! Academic vs. industry classification of affiliation strings.

/// Substrings that mark an affiliation as academic, matched case-insensitively
pub const ACADEMIC_KEYWORDS: [&str; 6] = [
    "university",
    "college",
    "institute",
    "school",
    "hospital",
    "center",
];

/// Kind of organization an affiliation names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AffiliationKind {
    Academic,
    Industry,
}

impl AffiliationKind {
    pub fn is_industry(self) -> bool {
        self == AffiliationKind::Industry
    }
}

/// Classify an affiliation.
///
/// Anything without an academic keyword is industry, including the empty string.
pub fn classify(affiliation: &str) -> AffiliationKind {
    let lower = affiliation.to_lowercase();
    if ACADEMIC_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        AffiliationKind::Academic
    } else {
        AffiliationKind::Industry
    }
}
