//! GitHub-backed post source
//!
//! Lists the `*.md` files of one repository directory through the contents
//! API and downloads each file from the raw host.

use std::time::Duration;

use async_trait::async_trait;
use futures::future;
use reqwest::header::{ACCEPT, CACHE_CONTROL};
use reqwest::Client;
use serde::Deserialize;

use super::{PostSource, SourceError, SourceResult};
use crate::config::{BlogConfig, GithubConfig};
use crate::content::{split_raw, Post};
use crate::helpers::encode_component;

/// One entry of a contents-API listing
#[derive(Debug, Deserialize)]
struct ListingEntry {
    #[serde(rename = "type")]
    kind: String,
    name: String,
    path: String,
}

/// A candidate post file: slug plus repository path
#[derive(Debug, Clone, PartialEq, Eq)]
struct PostFile {
    slug: String,
    path: String,
}

pub struct GithubSource {
    client: Client,
    github: GithubConfig,
    batch: usize,
}

impl GithubSource {
    pub fn new(config: &BlogConfig) -> SourceResult<Self> {
        let client = Client::builder()
            .user_agent(&config.fetch.user_agent)
            .timeout(Duration::from_secs(config.fetch.timeout_secs))
            .build()
            .map_err(SourceError::Client)?;

        Ok(Self {
            client,
            github: config.github.clone(),
            batch: config.fetch.batch.max(1),
        })
    }

    fn listing_url(&self) -> String {
        format!(
            "https://api.github.com/repos/{}/{}/contents/{}?ref={}",
            self.github.owner,
            self.github.repo,
            self.github.dir,
            encode_component(&self.github.branch)
        )
    }

    fn raw_url(&self, path: &str) -> String {
        format!(
            "https://raw.githubusercontent.com/{}/{}/{}/{}",
            self.github.owner, self.github.repo, self.github.branch, path
        )
    }

    /// List the candidate post files in the configured directory
    async fn list_post_files(&self) -> SourceResult<Vec<PostFile>> {
        let mut request = self
            .client
            .get(self.listing_url())
            .header(ACCEPT, "application/vnd.github+json");
        if let Some(token) = &self.github.token {
            request = request.bearer_auth(token);
        }

        let entries: Vec<ListingEntry> = request
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(SourceError::Listing)?
            .json()
            .await
            .map_err(SourceError::Listing)?;

        Ok(filter_listing(entries))
    }

    /// Download one file's raw UTF-8 content, bypassing intermediary caches
    async fn fetch_raw(&self, path: &str) -> SourceResult<String> {
        self.client
            .get(self.raw_url(path))
            .header(CACHE_CONTROL, "no-store")
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| SourceError::Fetch {
                path: path.to_string(),
                source: e,
            })?
            .text()
            .await
            .map_err(|e| SourceError::Fetch {
                path: path.to_string(),
                source: e,
            })
    }
}

#[async_trait]
impl PostSource for GithubSource {
    async fn fetch_index(&self) -> SourceResult<Vec<Post>> {
        let files = self.list_post_files().await?;
        tracing::debug!("listing returned {} post files", files.len());

        // Batches run one after another; fetches within a batch run
        // concurrently, and the first failure aborts the whole build.
        let mut posts = Vec::with_capacity(files.len());
        for batch in files.chunks(self.batch) {
            let documents = future::try_join_all(batch.iter().map(|file| async move {
                let text = self.fetch_raw(&file.path).await?;
                Ok::<_, SourceError>((file, text))
            }))
            .await?;

            for (file, text) in documents {
                posts.push(Post::from_document(&file.slug, &text));
            }
        }

        Ok(posts)
    }

    async fn fetch_body(&self, slug: &str) -> SourceResult<String> {
        let path = format!("{}/{}.md", self.github.dir, slug);
        let text = self.fetch_raw(&path).await?;
        Ok(split_raw(&text).1.to_string())
    }
}

/// Keep plain files with a case-insensitive `.md` suffix; slug = file stem
fn filter_listing(entries: Vec<ListingEntry>) -> Vec<PostFile> {
    entries
        .into_iter()
        .filter(|e| e.kind == "file")
        .filter_map(|e| {
            let slug = strip_md_suffix(&e.name)?.to_string();
            Some(PostFile { slug, path: e.path })
        })
        .collect()
}

fn strip_md_suffix(name: &str) -> Option<&str> {
    let stem = name.len().checked_sub(3)?;
    if !name.is_char_boundary(stem) || !name[stem..].eq_ignore_ascii_case(".md") {
        return None;
    }
    Some(&name[..stem])
}
