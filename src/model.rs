//! Canonical data model for one novel's feed.
//!
//! The extractors produce these shapes; the RSS renderer consumes them.

use indexmap::IndexMap;

/// Chapter listing in document order: display label -> relative chapter URL.
///
/// Labels are `"<volume> <chapter title>"`. Insertion order is feed order.
/// A duplicate label overwrites the earlier entry in place (kept
/// deliberately, see DESIGN.md).
pub type Catalog = IndexMap<String, String>;

/// Body of one chapter page: paragraphs of text, or a list of image URLs
/// for image-only chapters. Text always wins when a page has both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChapterContent {
    /// Non-empty paragraphs, markup stripped.
    Text(Vec<String>),
    /// Absolute image URLs in document order.
    Images(Vec<String>),
}

/// Metadata from a novel's landing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NovelDetails {
    /// Novel title. Falls back to the novel id when no heading matched.
    pub title: String,
    /// Synopsis with `<br />` turned into newlines. Empty if not found.
    pub description: String,
    /// Word count as displayed by the site, e.g. "123万". "0" if not found.
    pub words: String,
}

/// One chapter's entry in the assembled feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItem {
    /// Chapter label from the catalog.
    pub title: String,
    /// Relative chapter URL. Doubles as the RSS guid.
    pub id: String,
    /// Rendered body markup. Empty when the chapter yielded no content.
    pub body: String,
}

/// Assembled feed for one novel. Built once per fetch cycle, then rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feed {
    pub title: String,
    /// Description plus word count, human-readable.
    pub subtitle: String,
    /// Items in catalog order.
    pub items: Vec<FeedItem>,
}
