//! Shared error type for fetching and extraction.

use thiserror::Error;

/// Errors from the fetch/extract/assemble pipeline.
///
/// The HTTP boundary collapses all of these to 404; the variants exist for
/// logging and for tests.
#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("Network error: could not reach {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} when fetching: {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Failed to read response body: {source}")]
    BodyRead {
        #[source]
        source: reqwest::Error,
    },

    /// Landing page yielded no usable title.
    #[error("Could not extract details for novel {id}")]
    DetailsNotFound { id: String },

    /// Chapter listing section missing or empty.
    #[error("Could not extract catalog for novel {id}")]
    CatalogNotFound { id: String },
}
