//! In-memory post index and tag aggregation

use chrono::{DateTime, Utc};
use indexmap::IndexMap;

use crate::content::Post;

/// The fully built index: every post sorted newest-first, plus a
/// tag-to-posts mapping derived from that ordering.
///
/// Tags map to positions in the post vector rather than post copies, so each
/// tag's sequence inherits the index ordering for free.
#[derive(Debug, Default)]
pub struct BlogIndex {
    posts: Vec<Post>,
    tags: IndexMap<String, Vec<usize>>,
}

impl BlogIndex {
    /// Sort posts and aggregate tags. Posts without a date sort as the oldest.
    pub fn new(mut posts: Vec<Post>) -> Self {
        posts.sort_by(|a, b| sort_key(b).cmp(&sort_key(a)));

        let mut tags: IndexMap<String, Vec<usize>> = IndexMap::new();
        for (position, post) in posts.iter().enumerate() {
            for tag in &post.tags {
                tags.entry(tag.clone()).or_default().push(position);
            }
        }

        Self { posts, tags }
    }

    /// All posts, newest first
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn tag_count(&self) -> usize {
        self.tags.len()
    }

    /// Look up a post by its unique slug
    pub fn find(&self, slug: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.slug == slug)
    }

    /// Posts carrying the given tag, newest first; `None` for unknown tags
    pub fn posts_for_tag(&self, name: &str) -> Option<Vec<&Post>> {
        self.tags
            .get(name)
            .map(|positions| positions.iter().map(|&p| &self.posts[p]).collect())
    }

    /// Every tag with its posts, in first-seen order
    pub fn tag_entries(&self) -> impl Iterator<Item = (&str, Vec<&Post>)> {
        self.tags.iter().map(|(name, positions)| {
            let posts = positions.iter().map(|&p| &self.posts[p]).collect();
            (name.as_str(), posts)
        })
    }
}

fn sort_key(post: &Post) -> DateTime<Utc> {
    post.date.unwrap_or(DateTime::UNIX_EPOCH)
}
