//! Streaming download of release archives

use reqwest::blocking::Client;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

/// Optional progress callback (bytes_downloaded, total_bytes)
///
/// `total_bytes` is `None` when the server sent no Content-Length.
pub type ProgressFn = fn(u64, Option<u64>);

/// Downloads `url` into `dest`, streaming through a temporary file
///
/// The body is written to a temporary file next to `dest` and only renamed
/// onto `dest` after the whole body has been received. On any error the
/// temporary file is removed when it drops, so no partial archive is left
/// behind.
///
/// # Arguments
///
/// * `client` - HTTP client to use
/// * `url` - URL to download from
/// * `dest` - Final location of the downloaded file
/// * `progress` - Optional progress callback
///
/// # Returns
///
/// Number of bytes written
///
/// # Errors
///
/// Returns error if:
/// - The request cannot be sent (transport failure)
/// - Response status is not success
/// - Reading the body or writing the file fails
pub fn download_to_file(
    client: &Client,
    url: &Url,
    dest: &Path,
    progress: Option<ProgressFn>,
) -> Result<u64, DownloadError> {
    let dest_dir = dest.parent().unwrap_or_else(|| Path::new("."));

    log::debug!("GET {}", url);
    let mut response = client
        .get(url.as_str())
        .send()
        .map_err(|e| DownloadError::Transport {
            url: url.clone(),
            source: e,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(DownloadError::HttpStatus {
            url: url.clone(),
            status: status.as_u16(),
        });
    }

    let content_length = response.content_length();

    let mut temp_file =
        tempfile::NamedTempFile::new_in(dest_dir).map_err(|e| DownloadError::Io {
            path: dest_dir.to_path_buf(),
            source: e,
        })?;

    let mut downloaded: u64 = 0;
    let mut buffer = [0; 8192];

    loop {
        let bytes_read = response
            .read(&mut buffer)
            .map_err(|e| DownloadError::Interrupted {
                url: url.clone(),
                source: e,
            })?;

        if bytes_read == 0 {
            break;
        }

        temp_file
            .write_all(&buffer[..bytes_read])
            .map_err(|e| DownloadError::Io {
                path: temp_file.path().to_path_buf(),
                source: e,
            })?;

        downloaded += bytes_read as u64;

        if let Some(callback) = progress {
            callback(downloaded, content_length);
        }
    }

    temp_file
        .as_file()
        .sync_all()
        .map_err(|e| DownloadError::Io {
            path: temp_file.path().to_path_buf(),
            source: e,
        })?;

    // Rename replaces a stale archive from an earlier run
    temp_file.persist(dest).map_err(|e| DownloadError::Io {
        path: dest.to_path_buf(),
        source: e.error,
    })?;

    log::debug!("Downloaded {} bytes to {}", downloaded, dest.display());
    Ok(downloaded)
}

/// Download error types
#[derive(Debug, Error)]
pub enum DownloadError {
    /// HTTP client could not be constructed
    #[error("Download failed: could not build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Download failed: {url} returned HTTP {status}")]
    HttpStatus {
        /// URL that failed
        url: Url,
        /// HTTP status code
        status: u16,
    },

    /// Request could not be completed
    #[error("Download failed: {url}: {source}")]
    Transport {
        /// URL that failed
        url: Url,
        /// Underlying reqwest error
        #[source]
        source: reqwest::Error,
    },

    /// Connection dropped while reading the body
    #[error("Download failed: {url}: connection interrupted: {source}")]
    Interrupted {
        /// URL that failed
        url: Url,
        #[source]
        source: std::io::Error,
    },

    /// Local file could not be written
    #[error("Download failed: I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
