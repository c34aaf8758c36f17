//! Terminal output for the command-line tool.
//!
//! Colours are only used when stdout is a terminal, so piped output stays plain.

use owo_colors::OwoColorize;
use std::io::IsTerminal;

use crate::models::QualifyingPaper;

/// Check if stdout is a terminal.
pub fn is_terminal() -> bool {
    std::io::stdout().is_terminal()
}

/// Status types for colored output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Warning,
    Info,
}

/// Status icons for different outcomes.
pub fn status_icon(status: Status) -> &'static str {
    match status {
        Status::Success => "✓",
        Status::Warning => "⚠",
        Status::Info => "ℹ",
    }
}

/// Print a status message, styled when attached to a terminal.
pub fn print_status(status: Status, msg: &str) {
    if !is_terminal() {
        println!("{}", msg);
        return;
    }

    let icon = status_icon(status);
    match status {
        Status::Success => println!("{} {}", icon.green().bold(), msg),
        Status::Warning => println!("{} {}", icon.yellow().bold(), msg),
        Status::Info => println!("{} {}", icon.cyan().bold(), msg),
    }
}

/// Render a paper as a block of labelled lines.
pub fn format_paper(paper: &QualifyingPaper) -> String {
    format!(
        "PubmedID: {}\nTitle: {}\nPublication Date: {}\nNon-academic Author(s): {}\nCompany Affiliation(s): {}\nCorresponding Author Email: {}\nURL: {}",
        paper.pmid,
        paper.title,
        paper.publication_date,
        paper.authors_joined(),
        paper.affiliations_joined(),
        paper.corresponding_email,
        paper.url()
    )
}

/// Print every paper to stdout.
pub fn print_papers(papers: &[QualifyingPaper]) {
    let color = is_terminal();
    for (i, paper) in papers.iter().enumerate() {
        if i > 0 {
            println!();
        }
        if color {
            println!("{}", format!("━━━ {} ━━━", paper.pmid).bold().cyan());
        }
        println!("{}", format_paper(paper));
    }
}
