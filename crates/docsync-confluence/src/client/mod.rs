//! Confluence REST API client.
//!
//! Provides sync HTTP client for Confluence Cloud REST API
//! with HTTP Basic authentication (account and API token).

mod attachments;
mod pages;

use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::de::DeserializeOwned;
use ureq::Agent;
use ureq::http::Response;

use crate::error::ConfluenceError;

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT: u64 = 30;

/// Confluence REST API client.
pub struct ConfluenceClient {
    agent: Agent,
    base_url: String,
    auth_header: String,
}

impl ConfluenceClient {
    /// Create client for a Confluence Cloud site.
    ///
    /// # Arguments
    /// * `base_url` - Site URL (e.g. `https://acme.atlassian.net`)
    /// * `user` - Account the API token belongs to
    /// * `token` - API token
    #[must_use]
    pub fn new(base_url: &str, user: &str, token: &str) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(DEFAULT_TIMEOUT)))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_owned(),
            auth_header: basic_auth(user, token),
        }
    }

    /// Get the API base URL.
    fn api_url(&self) -> String {
        format!("{}/wiki/rest/api", self.base_url)
    }
}

/// Build the `Authorization` header value for HTTP Basic auth.
fn basic_auth(user: &str, token: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{user}:{token}")))
}

/// Fail on error status, otherwise decode the JSON body.
fn read_json<T: DeserializeOwned>(response: Response<ureq::Body>) -> Result<T, ConfluenceError> {
    let status = response.status().as_u16();
    let mut body_reader = response.into_body();

    if status >= 400 {
        let error_body = body_reader
            .read_to_string()
            .unwrap_or_else(|_| "(unable to read error body)".to_owned());
        return Err(ConfluenceError::HttpResponse {
            status,
            body: error_body,
        });
    }

    Ok(body_reader.read_json()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_basic_auth_header() {
        // base64("bot@acme.com:secret")
        assert_eq!(
            basic_auth("bot@acme.com", "secret"),
            "Basic Ym90QGFjbWUuY29tOnNlY3JldA=="
        );
    }

    #[test]
    fn test_api_url_trims_trailing_slash() {
        let client = ConfluenceClient::new("https://acme.atlassian.net/", "bot", "token");
        assert_eq!(client.base_url, "https://acme.atlassian.net");
        assert_eq!(client.api_url(), "https://acme.atlassian.net/wiki/rest/api");
    }
}
