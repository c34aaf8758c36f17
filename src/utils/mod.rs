//! Utility modules supporting the pipeline.
//!
//! - [`HttpClient`]: shared reqwest client used by the sources
//! - [`write_csv`], [`write_csv_to`]: export qualifying papers as CSV

mod export;
mod http;

pub use export::{write_csv, write_csv_to, ExportError, CSV_HEADERS};
pub use http::HttpClient;
