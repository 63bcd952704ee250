//! mdblog: a tiny hash-routed blog renderer
//!
//! Posts are Markdown files on a remote host: a GitHub repository directory
//! listed through the contents API, or a pre-generated JSON manifest. The
//! index is built in memory exactly once per process and four fragment
//! routes (`#/`, `#/post/<slug>`, `#/tags`, `#/tag/<name>`) render from it.

pub mod config;
pub mod content;
pub mod helpers;
pub mod index;
pub mod router;
pub mod server;
pub mod source;
pub mod views;

use anyhow::Result;
use tokio::sync::OnceCell;

use crate::config::BlogConfig;
use crate::content::MarkdownRenderer;
use crate::index::BlogIndex;
use crate::router::Route;
use crate::source::PostSource;

/// The blog application: configuration, post source, and the lazily built
/// one-shot index cell shared by every render.
pub struct Blog {
    pub config: BlogConfig,
    source: Box<dyn PostSource>,
    renderer: MarkdownRenderer,
    index: OnceCell<BlogIndex>,
}

impl Blog {
    /// Create a blog with the source selected by the configuration
    pub fn new(config: BlogConfig) -> Result<Self> {
        let source = source::from_config(&config)?;
        Ok(Self::with_source(config, source))
    }

    /// Create a blog over an explicit source
    pub fn with_source(config: BlogConfig, source: Box<dyn PostSource>) -> Self {
        let renderer = MarkdownRenderer::new(&config.highlight.theme);
        Self {
            config,
            source,
            renderer,
            index: OnceCell::new(),
        }
    }

    /// The in-memory index, built on first use.
    ///
    /// Concurrent first calls share a single fetch. A failed build commits
    /// nothing, so a later render retries from scratch.
    pub async fn index(&self) -> Result<&BlogIndex> {
        self.index
            .get_or_try_init(|| async {
                let posts = self.source.fetch_index().await?;
                let index = BlogIndex::new(posts);
                tracing::info!(
                    "indexed {} posts across {} tags",
                    index.len(),
                    index.tag_count()
                );
                Ok(index)
            })
            .await
    }

    /// Render the view selected by a location fragment
    pub async fn render_fragment(&self, fragment: &str) -> Result<String> {
        self.render_route(&Route::parse(fragment)).await
    }

    /// Render one route to markup
    pub async fn render_route(&self, route: &Route) -> Result<String> {
        let date_format = &self.config.date_format;
        let index = self.index().await?;

        let markup = match route {
            Route::Home => views::home(index, date_format),
            Route::Tags => views::tag_index(index, date_format),
            Route::Tag(name) => views::tag(index, name, date_format),
            Route::Post(slug) => match index.find(slug) {
                None => views::not_found(slug),
                Some(post) => {
                    // Manifest posts carry no body until first rendered.
                    let fetched;
                    let body = match &post.body {
                        Some(body) => body.as_str(),
                        None => {
                            fetched = self.source.fetch_body(slug).await?;
                            fetched.as_str()
                        }
                    };
                    views::post(post, &self.renderer.render(body), date_format)
                }
            },
        };

        Ok(markup)
    }
}
