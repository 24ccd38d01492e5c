//! linofeed: RSS feed server for linovelib web novels.
//!
//! Pipeline: fetch catalog and chapter pages, extract content by pattern
//! matching, assemble an RSS feed, serve it over HTTP with a 1-hour cache.

pub mod cache;
pub mod cli;
pub mod config;
pub mod model;
pub mod rss;
pub mod scraper;
pub mod server;

// Re-exports for consumers.
pub use cache::FeedCache;
pub use model::{Catalog, ChapterContent, Feed, FeedItem, NovelDetails};
pub use scraper::{HttpFetcher, HttpFetcherBuilder, PageFetcher, ScraperError};
