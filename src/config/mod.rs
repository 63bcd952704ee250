//! Configuration module

mod site;

pub use site::BlogConfig;
pub use site::FetchConfig;
pub use site::GithubConfig;
pub use site::HighlightConfig;
pub use site::ManifestConfig;
pub use site::SourceConfig;
pub use site::SourceKind;
