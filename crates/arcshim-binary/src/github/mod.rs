//! Release host interaction
//!
//! - HTTP client construction with a user-agent and timeout
//! - Streaming download of release archives to disk
//! - Release asset URL construction

pub mod client;
pub mod download;
pub mod url;

// Re-exports for convenient access
pub use client::{USER_AGENT, build_client};
pub use download::{DownloadError, ProgressFn, download_to_file};
pub use url::{UrlError, add_path_segments, release_asset_url};
