//! Post sources: where documents come from
//!
//! Two strategies serve the same contract: listing a GitHub repository
//! directory and downloading every file, or reading one pre-generated
//! manifest with bodies fetched per post on demand.

mod github;
mod manifest;

pub use github::GithubSource;
pub use manifest::{ManifestEntry, ManifestSource};

use async_trait::async_trait;
use thiserror::Error;

use crate::config::{BlogConfig, SourceKind};
use crate::content::Post;

/// Result type for source operations
pub type SourceResult<T> = Result<T, SourceError>;

/// Failures while retrieving remote documents.
///
/// Any of these aborts the index build as a whole; no partial index is ever
/// committed.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The listing endpoint could not be queried or decoded
    #[error("post listing failed")]
    Listing(#[source] reqwest::Error),

    /// The manifest document could not be fetched or decoded
    #[error("manifest load failed")]
    Manifest(#[source] reqwest::Error),

    /// A single document download failed
    #[error("failed to fetch {path}")]
    Fetch {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    /// The HTTP client could not be constructed
    #[error("HTTP client setup failed")]
    Client(#[source] reqwest::Error),
}

/// A provider of post documents
#[async_trait]
pub trait PostSource: Send + Sync {
    /// Fetch every post's metadata and, when cheap, its body
    async fn fetch_index(&self) -> SourceResult<Vec<Post>>;

    /// Fetch the raw Markdown body for one post
    async fn fetch_body(&self, slug: &str) -> SourceResult<String>;
}

/// Build the source selected by `source.kind` in the configuration
pub fn from_config(config: &BlogConfig) -> SourceResult<Box<dyn PostSource>> {
    match config.source.kind {
        SourceKind::Github => Ok(Box::new(GithubSource::new(config)?)),
        SourceKind::Manifest => Ok(Box::new(ManifestSource::new(config)?)),
    }
}
