//! linovelib.com extractors and feed assembly.
//!
//! Extraction is deliberately regex-over-raw-text rather than a DOM parse:
//! the site ships malformed markup, and the pattern boundaries below define
//! exactly what counts as a volume header, a chapter line, or chapter
//! content. A structural parser would draw those boundaries differently.

use std::sync::LazyLock;

use futures::future;
use regex::Regex;

use crate::model::{Catalog, ChapterContent, Feed, FeedItem, NovelDetails};
use crate::rss;
use crate::scraper::{catalog_url, chapter_url, details_url, PageFetcher, ScraperError};

/// The chapter listing block on the catalog page.
static CATALOG_SECTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<ul class="chapter-list clearfix">.*?</ul>"#).unwrap()
});
/// Volume-header line inside the listing. The capture is the volume name.
static VOLUME_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"em>(.*?)</div").unwrap());
/// A line that carries one chapter entry.
static CHAPTER_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<li.*?li>").unwrap());
static CHAPTER_URL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"/novel.*?\.html").unwrap());
static CHAPTER_TITLE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<a.*>(.*?)</a>").unwrap());
/// One paragraph block. Used for chapter bodies and for the description
/// (first block) on the landing page.
static PARAGRAPH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<p>(.*?)</p>").unwrap());
/// Chapter illustration hosted on the site's image CDN.
static IMAGE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https://img\.linovelib\.com.*?\.jpg").unwrap());
static WORD_COUNT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"nums.*?i>(.*?)<").unwrap());
static HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<h1.*?>(.*?)</h1>").unwrap());

/// Extract the chapter listing from a catalog page. `None` when the listing
/// section itself is missing; individual malformed lines are skipped.
pub fn extract_catalog(html: &str) -> Option<Catalog> {
    let section = CATALOG_SECTION.find(html)?;
    Some(parse_catalog(section.as_str()))
}

/// Line-oriented scan of the listing block. The only state is the current
/// volume name, which prefixes every chapter label until the next header.
fn parse_catalog(section: &str) -> Catalog {
    let mut current = String::new();
    let mut result = Catalog::new();
    for line in section.split(['\n', '\r']) {
        if let Some(caps) = VOLUME_LINE.captures(line) {
            current = caps[1].to_string();
        } else if CHAPTER_LINE.is_match(line) {
            let Some(url) = CHAPTER_URL.find(line) else {
                continue;
            };
            let Some(title) = CHAPTER_TITLE.captures(line) else {
                continue;
            };
            result.insert(format!("{} {}", current, &title[1]), url.as_str().to_string());
        }
    }
    result
}

/// Extract a chapter page's body. Text paragraphs win over images; a page
/// with both yields only text. `None` when neither pattern produced
/// anything usable.
pub fn extract_content(html: &str) -> Option<ChapterContent> {
    let lines: Vec<String> = PARAGRAPH
        .captures_iter(html)
        .map(|caps| caps[1].to_string())
        .filter(|line| !line.is_empty())
        .collect();
    if !lines.is_empty() {
        return Some(ChapterContent::Text(lines));
    }

    let imgs: Vec<String> = IMAGE_URL
        .find_iter(html)
        .map(|m| m.as_str().to_string())
        .collect();
    if imgs.is_empty() {
        None
    } else {
        Some(ChapterContent::Images(imgs))
    }
}

/// Extract title, description, and word count from a landing page.
/// Word count and description degrade to `"0"` / empty; the title falls
/// back to the novel id.
pub fn extract_details(html: &str, id: &str) -> Option<NovelDetails> {
    let words = WORD_COUNT
        .captures(html)
        .map(|caps| caps[1].to_string())
        .unwrap_or_else(|| "0".to_string());
    let description = PARAGRAPH
        .captures(html)
        .map(|caps| caps[1].replace("<br />", "\n"))
        .unwrap_or_default();
    let title = HEADING
        .captures(html)
        .map(|caps| caps[1].to_string())
        .unwrap_or_else(|| id.to_string());
    // Only fires for an empty id, since the fallback above is the id itself.
    if title.is_empty() {
        return None;
    }
    Some(NovelDetails {
        title,
        description,
        words,
    })
}

/// Build the complete feed for one novel id.
///
/// Details and catalog are required; either missing aborts the build.
/// Chapter bodies are fetched concurrently (one request per chapter, no
/// cap) and rejoined in catalog order. A chapter whose page yields no
/// content becomes an item with an empty body.
pub async fn fetch_novel(fetcher: &dyn PageFetcher, id: &str) -> Result<Feed, ScraperError> {
    let details_page = fetcher.fetch_page(&details_url(id)).await?;
    let details = extract_details(&details_page, id).ok_or_else(|| {
        ScraperError::DetailsNotFound { id: id.to_string() }
    })?;

    let catalog_page = fetcher.fetch_page(&catalog_url(id)).await?;
    let catalog = extract_catalog(&catalog_page)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| ScraperError::CatalogNotFound { id: id.to_string() })?;

    let pages = future::join_all(catalog.values().map(|relative| {
        let url = chapter_url(relative);
        async move { fetcher.fetch_page(&url).await }
    }))
    .await;
    let mut contents = Vec::with_capacity(pages.len());
    for page in pages {
        contents.push(extract_content(&page?));
    }

    let items = catalog
        .iter()
        .zip(contents)
        .map(|((label, relative), content)| FeedItem {
            title: label.clone(),
            id: relative.clone(),
            body: rss::render_content(content.as_ref()),
        })
        .collect();

    Ok(Feed {
        title: details.title,
        subtitle: format!("{}\n字数：{}", details.description, details.words),
        items,
    })
}
