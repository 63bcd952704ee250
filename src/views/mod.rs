//! View rendering: markup for the four hash routes
//!
//! Every view is a pure function from index state to markup; the page shell
//! swaps the result into the root container wholesale.

use crate::content::Post;
use crate::helpers::{encode_component, escape_html, format_date};
use crate::index::BlogIndex;

/// How many posts each tag previews on the tag index
const TAG_PREVIEW: usize = 5;

/// Home: every post as a summary card, newest first
pub fn home(index: &BlogIndex, date_format: &str) -> String {
    let cards: String = index
        .posts()
        .iter()
        .map(|post| post_card(post, date_format))
        .collect();
    format!("<section>{cards}</section>")
}

/// Tag index: all tags in lexicographic order, each with a post-count
/// heading, a short preview, and a link to the full tag view
pub fn tag_index(index: &BlogIndex, date_format: &str) -> String {
    let mut entries: Vec<_> = index.tag_entries().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    let mut sections = String::new();
    for (name, posts) in entries {
        let encoded = encode_component(name);
        sections.push_str(&format!(
            r#"<h3 id="tag-{encoded}">{} <small>({})</small></h3>"#,
            escape_html(name),
            posts.len()
        ));
        for post in posts.iter().take(TAG_PREVIEW) {
            sections.push_str(&post_card(post, date_format));
        }
        sections.push_str(&format!(
            r##"<p><a href="#/tag/{encoded}">…more</a></p>"##
        ));
    }

    format!("<section><h1>Tags</h1>{sections}</section>")
}

/// Single tag: every post carrying the tag, or a placeholder
pub fn tag(index: &BlogIndex, name: &str, date_format: &str) -> String {
    let cards: String = index
        .posts_for_tag(name)
        .unwrap_or_default()
        .iter()
        .map(|post| post_card(post, date_format))
        .collect();

    let body = if cards.is_empty() {
        "<p>No posts.</p>".to_string()
    } else {
        cards
    };

    format!(
        "<section><h1>Tag: {}</h1>{body}</section>",
        escape_html(name)
    )
}

/// Single post: title, date, tag links, and the rendered body
pub fn post(post: &Post, body_html: &str, date_format: &str) -> String {
    let date = post
        .date
        .map(|d| format_date(&d, date_format))
        .unwrap_or_default();
    let tags: String = post
        .tags
        .iter()
        .map(|t| {
            format!(
                r##" · <a class="tag" href="#/tag/{}">{}</a>"##,
                encode_component(t),
                escape_html(t)
            )
        })
        .collect();

    format!(
        r#"<article class="post"><h1>{}</h1><div class="meta">{date}{tags}</div><div class="post-content">{body_html}</div></article>"#,
        escape_html(&post.title)
    )
}

/// Inline placeholder when no post matches the requested slug
pub fn not_found(slug: &str) -> String {
    format!("<p>Post not found: {}</p>", escape_html(slug))
}

/// Visible error state shown when the index could not be loaded
pub fn load_error(err: &anyhow::Error) -> String {
    format!(
        r#"<p class="error">Failed to load posts: {}</p>"#,
        escape_html(&err.to_string())
    )
}

/// One summary card shared by the list views
fn post_card(post: &Post, date_format: &str) -> String {
    let date = post
        .date
        .map(|d| format_date(&d, date_format))
        .unwrap_or_default();
    let tags: String = post
        .tags
        .iter()
        .map(|t| {
            format!(
                r##"<a class="tag" href="#/tag/{}">{}</a> "##,
                encode_component(t),
                escape_html(t)
            )
        })
        .collect();
    let excerpt = post
        .excerpt
        .as_deref()
        .map(|e| format!("<p>{}</p>", escape_html(e)))
        .unwrap_or_default();

    format!(
        r##"<article class="post-card"><h2><a href="#/post/{}">{}</a></h2><div class="meta">{date} {tags}</div>{excerpt}</article>"##,
        encode_component(&post.slug),
        escape_html(&post.title)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORMAT: &str = "YYYY.MM.DD";

    fn sample_index() -> BlogIndex {
        BlogIndex::new(vec![
            Post {
                slug: "first".to_string(),
                title: "First post".to_string(),
                date: crate::content::parse_date_string("2024-01-01"),
                tags: vec!["x".to_string()],
                excerpt: Some("An opener".to_string()),
                body: Some("Hello.".to_string()),
            },
            Post {
                slug: "second".to_string(),
                title: "Second post".to_string(),
                date: crate::content::parse_date_string("2024-06-01"),
                tags: vec!["x".to_string(), "y".to_string()],
                excerpt: None,
                body: Some("World.".to_string()),
            },
        ])
    }

    #[test]
    fn test_home_renders_all_posts() {
        let html = home(&sample_index(), FORMAT);
        assert!(html.contains("First post"));
        assert!(html.contains("Second post"));
        assert!(html.contains(r##"href="#/post/first""##));
        assert!(html.contains("2024.01.01"));
        assert!(html.contains("An opener"));
        // Newest first
        assert!(html.find("Second post").unwrap() < html.find("First post").unwrap());
    }

    #[test]
    fn test_tag_index_is_sorted_with_counts() {
        let html = tag_index(&sample_index(), FORMAT);
        assert!(html.contains("<h1>Tags</h1>"));
        assert!(html.contains("x <small>(2)</small>"));
        assert!(html.contains("y <small>(1)</small>"));
        assert!(html.contains(r##"href="#/tag/x""##));
        assert!(html.find("tag-x").unwrap() < html.find("tag-y").unwrap());
    }

    #[test]
    fn test_tag_index_previews_at_most_five() {
        let posts: Vec<Post> = (0..7)
            .map(|i| Post {
                slug: format!("p{i}"),
                title: format!("Post {i}"),
                date: None,
                tags: vec!["big".to_string()],
                excerpt: None,
                body: None,
            })
            .collect();
        let html = tag_index(&BlogIndex::new(posts), FORMAT);

        assert_eq!(html.matches("post-card").count(), 5);
        assert!(html.contains("…more"));
    }

    #[test]
    fn test_tag_view_exact_match() {
        let html = tag(&sample_index(), "y", FORMAT);
        assert!(html.contains("Second post"));
        assert!(!html.contains("First post"));
    }

    #[test]
    fn test_unknown_tag_placeholder() {
        let html = tag(&sample_index(), "nope", FORMAT);
        assert!(html.contains("No posts."));
    }

    #[test]
    fn test_post_view() {
        let index = sample_index();
        let p = index.find("first").unwrap();
        let html = post(p, "<p>Hello.</p>", FORMAT);
        assert!(html.contains("<h1>First post</h1>"));
        assert!(html.contains("2024.01.01"));
        assert!(html.contains(r##"href="#/tag/x""##));
        assert!(html.contains("<p>Hello.</p>"));
    }

    #[test]
    fn test_not_found_embeds_slug() {
        let html = not_found("missing-slug");
        assert!(html.contains("missing-slug"));
    }

    #[test]
    fn test_titles_are_escaped() {
        let index = BlogIndex::new(vec![Post {
            slug: "x".to_string(),
            title: "<script>alert(1)</script>".to_string(),
            date: None,
            tags: Vec::new(),
            excerpt: None,
            body: None,
        }]);
        let html = home(&index, FORMAT);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
