//! Rendering: chapter content to item body markup, and a [Feed] to the
//! RSS 2.0 document served on the wire.

use std::fmt::Write;

use crate::model::{ChapterContent, Feed};
use crate::scraper::BASE_URL;

/// Fixed generator string embedded in every rendered feed.
const GENERATOR: &str = "linofeed";

/// Render one chapter's content as item body markup.
///
/// Text paragraphs are rejoined with `<p>` tags; images become `<img>` tags
/// concatenated in order; absent content renders as the empty string.
pub fn render_content(content: Option<&ChapterContent>) -> String {
    match content {
        None => String::new(),
        Some(ChapterContent::Text(lines)) => format!("<p>{}</p>", lines.join("</p><p>")),
        Some(ChapterContent::Images(imgs)) => imgs
            .iter()
            .map(|img| format!(r#"<img src="{img}" />"#))
            .collect(),
    }
}

/// Render the complete RSS 2.0 document.
///
/// Subtitle and item bodies are wrapped in CDATA and nothing else — bodies
/// already contain rendered markup and must pass through untouched. Item
/// guid is the relative chapter URL; the link resolves it against the site
/// base.
pub fn render_feed(feed: &Feed) -> String {
    let mut out = String::new();
    out.push_str(r#"<?xml version="1.0"?><rss version="2.0"><channel>"#);
    let _ = write!(out, "<title>{}</title>", feed.title);
    let _ = write!(out, "<link>{BASE_URL}/</link>");
    let _ = write!(out, "<generator>{GENERATOR}</generator>");
    let _ = write!(out, "<description><![CDATA[{}]]></description>", feed.subtitle);
    for item in &feed.items {
        let _ = write!(out, "<item><title>{}</title>", item.title);
        let _ = write!(out, "<description><![CDATA[{}]]></description>", item.body);
        let _ = write!(out, "<guid>{}</guid>", item.id);
        let _ = write!(out, "<link>{BASE_URL}{}</link></item>", item.id);
    }
    out.push_str("</channel></rss>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FeedItem;

    #[test]
    fn render_text_rejoins_paragraphs() {
        let content = ChapterContent::Text(vec!["一".to_string(), "二".to_string()]);
        assert_eq!(render_content(Some(&content)), "<p>一</p><p>二</p>");
    }

    #[test]
    fn render_images_concatenates_tags() {
        let content = ChapterContent::Images(vec![
            "https://img.linovelib.com/a.jpg".to_string(),
            "https://img.linovelib.com/b.jpg".to_string(),
        ]);
        assert_eq!(
            render_content(Some(&content)),
            "<img src=\"https://img.linovelib.com/a.jpg\" />\
             <img src=\"https://img.linovelib.com/b.jpg\" />"
        );
    }

    #[test]
    fn render_absent_is_empty() {
        assert_eq!(render_content(None), "");
    }

    fn sample_feed() -> Feed {
        Feed {
            title: "T".to_string(),
            subtitle: "S\n字数：42".to_string(),
            items: vec![
                FeedItem {
                    title: "t1".to_string(),
                    id: "/novel/1/1.html".to_string(),
                    body: "<p>b1</p>".to_string(),
                },
                FeedItem {
                    title: "t2".to_string(),
                    id: "/novel/1/2.html".to_string(),
                    body: "<img src=\"https://img.linovelib.com/x.jpg\" />".to_string(),
                },
            ],
        }
    }

    #[test]
    fn render_feed_structure_and_guids() {
        let out = render_feed(&sample_feed());
        assert!(out.starts_with(r#"<?xml version="1.0"?><rss version="2.0"><channel>"#));
        assert!(out.ends_with("</channel></rss>"));
        assert!(out.contains("<title>T</title>"));
        assert!(out.contains("<description><![CDATA[S\n字数：42]]></description>"));
        assert!(out.contains("<guid>/novel/1/1.html</guid>"));
        assert!(out.contains("<guid>/novel/1/2.html</guid>"));
        assert!(out.contains("<link>https://www.linovelib.com/novel/1/1.html</link>"));
        // Items appear in input order.
        let first = out.find("<title>t1</title>").unwrap();
        let second = out.find("<title>t2</title>").unwrap();
        assert!(first < second);
    }

    #[test]
    fn render_feed_body_markup_passes_through_cdata() {
        let out = render_feed(&sample_feed());
        assert!(out.contains("<description><![CDATA[<p>b1</p>]]></description>"));
        assert!(out
            .contains("<description><![CDATA[<img src=\"https://img.linovelib.com/x.jpg\" />]]></description>"));
    }
}
