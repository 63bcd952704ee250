//! Manifest-backed post source
//!
//! Reads one pre-generated JSON index. Bodies live in per-slug files and are
//! fetched only when a single post is rendered.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CACHE_CONTROL;
use reqwest::Client;
use serde::Deserialize;

use super::{PostSource, SourceError, SourceResult};
use crate::config::{BlogConfig, ManifestConfig};
use crate::content::{clean_tags, parse_date_string, split_raw, Post};

/// One manifest record; the body is never part of the manifest
#[derive(Debug, Clone, Deserialize)]
pub struct ManifestEntry {
    pub slug: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
}

impl From<ManifestEntry> for Post {
    fn from(entry: ManifestEntry) -> Self {
        let date = entry.date.as_deref().and_then(parse_date_string);
        Post {
            title: entry.title.unwrap_or_else(|| entry.slug.clone()),
            slug: entry.slug,
            date,
            tags: clean_tags(entry.tags),
            excerpt: entry.excerpt,
            body: None,
        }
    }
}

pub struct ManifestSource {
    client: Client,
    manifest: ManifestConfig,
}

impl ManifestSource {
    pub fn new(config: &BlogConfig) -> SourceResult<Self> {
        let client = Client::builder()
            .user_agent(&config.fetch.user_agent)
            .timeout(Duration::from_secs(config.fetch.timeout_secs))
            .build()
            .map_err(SourceError::Client)?;

        Ok(Self {
            client,
            manifest: config.manifest.clone(),
        })
    }

    fn url(&self, rel: &str) -> String {
        format!(
            "{}/{}",
            self.manifest.base_url.trim_end_matches('/'),
            rel.trim_start_matches('/')
        )
    }
}

#[async_trait]
impl PostSource for ManifestSource {
    async fn fetch_index(&self) -> SourceResult<Vec<Post>> {
        let entries: Vec<ManifestEntry> = self
            .client
            .get(self.url(&self.manifest.path))
            .header(CACHE_CONTROL, "no-store")
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(SourceError::Manifest)?
            .json()
            .await
            .map_err(SourceError::Manifest)?;

        tracing::debug!("manifest listed {} posts", entries.len());
        Ok(entries.into_iter().map(Post::from).collect())
    }

    async fn fetch_body(&self, slug: &str) -> SourceResult<String> {
        let rel = format!("{}/{}.md", self.manifest.post_dir.trim_matches('/'), slug);
        let text = self
            .client
            .get(self.url(&rel))
            .header(CACHE_CONTROL, "no-store")
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| SourceError::Fetch {
                path: rel.clone(),
                source: e,
            })?
            .text()
            .await
            .map_err(|e| SourceError::Fetch {
                path: rel.clone(),
                source: e,
            })?;

        Ok(split_raw(&text).1.to_string())
    }
}
