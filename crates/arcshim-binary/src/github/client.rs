//! HTTP client construction for release downloads

use reqwest::blocking::Client;
use std::time::Duration;

/// Default user agent for arcshim requests
pub const USER_AGENT: &str = concat!("arcshim/", env!("CARGO_PKG_VERSION"));

/// Builds HTTP client with appropriate settings for GitHub
///
/// # Arguments
///
/// * `timeout` - Request timeout duration
///
/// # Errors
///
/// Returns error if client construction fails
pub fn build_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
}
