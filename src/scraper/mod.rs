//! Fetching and extraction for linovelib.com: shared client, error type, and
//! the regex-based page extractors.

mod client;
mod error;

pub mod linovelib;

pub use client::{HttpFetcher, HttpFetcherBuilder, PageFetcher};
pub use error::ScraperError;

/// Upstream site base. Catalog-discovered chapter URLs are relative to this.
pub const BASE_URL: &str = "https://www.linovelib.com";

/// URL of a novel's catalog page.
pub fn catalog_url(id: &str) -> String {
    format!("{BASE_URL}/novel/{id}/catalog")
}

/// URL of a novel's landing (details) page.
pub fn details_url(id: &str) -> String {
    format!("{BASE_URL}/novel/{id}.html")
}

/// Absolute URL of a chapter page from its catalog-relative path.
pub fn chapter_url(relative: &str) -> String {
    format!("{BASE_URL}{relative}")
}
