//! URL construction helpers for release assets

use arcshim_core::config::ReleaseSource;
use thiserror::Error;
use url::Url;

/// Helper to safely append path segments to a URL
///
/// Any path already on `url` is kept, so mirrors living under a path prefix
/// work the same as the bare GitHub host.
///
/// # Errors
///
/// Returns error if URL cannot be a base
pub fn add_path_segments(url: &mut Url, segments: &[&str]) -> Result<(), UrlError> {
    // Clone URL before mutable borrow to avoid borrow checker error
    let url_for_error = url.clone();
    url.path_segments_mut()
        .map_err(|_| UrlError::CannotBeABase { url: url_for_error })?
        .pop_if_empty()
        .extend(segments);
    Ok(())
}

/// Builds the download URL of a release asset
///
/// URL pattern: `<base>/<owner>/<repo>/releases/download/v<version>/<asset>`
///
/// # Example
///
/// ```
/// # use arcshim_binary::github::release_asset_url;
/// # use arcshim_core::config::ReleaseSource;
/// let source = ReleaseSource::github().unwrap();
/// let url = release_asset_url(&source, "1.2.3", "arcbranch_Linux_x86_64.tar.gz").unwrap();
/// assert_eq!(
///     url.as_str(),
///     "https://github.com/RohanAdwankar/arcbranch/releases/download/v1.2.3/arcbranch_Linux_x86_64.tar.gz"
/// );
/// ```
pub fn release_asset_url(
    source: &ReleaseSource,
    version: &str,
    asset_name: &str,
) -> Result<Url, UrlError> {
    let mut url = source.base_url.clone();
    let tag = format!("v{}", version);

    let mut segments: Vec<&str> = source
        .repository
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect();
    segments.extend(["releases", "download", tag.as_str(), asset_name]);

    add_path_segments(&mut url, &segments)?;
    Ok(url)
}

/// URL construction errors
#[derive(Debug, Error)]
pub enum UrlError {
    /// URL cannot be used as a base
    #[error("URL cannot be a base: {url}")]
    CannotBeABase {
        /// The problematic URL
        url: Url,
    },
}
