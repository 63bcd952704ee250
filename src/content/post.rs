//! Post model

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::FrontMatter;

/// A blog post assembled from a raw document or a manifest entry
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    /// Unique URL-safe identifier, derived from the source filename
    pub slug: String,

    /// Post title, falling back to the slug
    pub title: String,

    /// Publication date, if the post declared one
    pub date: Option<DateTime<Utc>>,

    /// Tags, trimmed of surrounding whitespace
    pub tags: Vec<String>,

    /// Optional summary shown on list views
    pub excerpt: Option<String>,

    /// Raw Markdown body; `None` until lazily fetched for manifest posts
    pub body: Option<String>,
}

impl Post {
    /// Build a post from a raw Markdown document
    pub fn from_document(slug: &str, text: &str) -> Self {
        let (fm, body) = FrontMatter::parse(text);
        let date = fm.parse_date();

        Self {
            slug: slug.to_string(),
            title: fm.title.unwrap_or_else(|| slug.to_string()),
            date,
            tags: clean_tags(fm.tags),
            excerpt: fm.excerpt,
            body: Some(body.to_string()),
        }
    }
}

/// Trim tags and drop entries that trim to nothing
pub(crate) fn clean_tags(tags: Vec<String>) -> Vec<String> {
    tags.iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_document() {
        let post = Post::from_document(
            "first-post",
            "---\ntitle: First\ndate: 2024-06-01\ntags: [rust, web]\n---\nHello.",
        );
        assert_eq!(post.slug, "first-post");
        assert_eq!(post.title, "First");
        assert_eq!(post.tags, vec!["rust", "web"]);
        assert_eq!(post.body.as_deref(), Some("Hello."));
        assert!(post.date.is_some());
        assert!(post.excerpt.is_none());
    }

    #[test]
    fn test_title_falls_back_to_slug() {
        let post = Post::from_document("untitled-note", "Just a body.");
        assert_eq!(post.title, "untitled-note");
        assert!(post.date.is_none());
        assert!(post.tags.is_empty());
    }

    #[test]
    fn test_tags_are_trimmed() {
        let post = Post::from_document("p", "---\ntags: [' rust ', '  ', web]\n---\nx");
        assert_eq!(post.tags, vec!["rust", "web"]);
    }
}
