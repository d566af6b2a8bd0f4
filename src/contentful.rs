//! Contentful content-delivery client.
//!
//! Issues a single read against the `/entries` endpoint for the newest
//! `blogPost` entry and hands back the raw JSON payload. Shape validation is
//! left to [`crate::entry`].

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::{Config, ContentfulConfig};

/// Content type queried for posts.
pub const BLOG_POST_CONTENT_TYPE: &str = "blogPost";

/// Only these fields are requested from the API.
pub const SELECTED_FIELDS: &str = "sys.id,sys.createdAt,fields.title,fields.slug,fields.featuredMedia";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Contentful request failed: {status} {body}")]
    Status { status: u16, body: String },
    #[error("failed to send Contentful request: {0}")]
    Request(#[source] reqwest::Error),
    #[error("failed to parse Contentful response: {0}")]
    Decode(#[source] reqwest::Error),
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Read-only client for one Contentful space/environment.
#[derive(Debug, Clone)]
pub struct ContentfulClient {
    http: reqwest::Client,
    base_url: String,
    delivery_token: String,
}

impl ContentfulClient {
    /// Build a client from application configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(FetchError::Client)?;
        Ok(Self::with_http(http, &config.cdn_url, &config.contentful))
    }

    /// Build a client around an existing `reqwest::Client`.
    #[must_use]
    pub fn with_http(http: reqwest::Client, cdn_url: &str, contentful: &ContentfulConfig) -> Self {
        Self {
            http,
            base_url: environment_base_url(cdn_url, contentful),
            delivery_token: contentful.delivery_token.clone(),
        }
    }

    /// The environment-scoped base URL, e.g.
    /// `https://cdn.contentful.com/spaces/{space}/environments/{env}`.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL selecting the single newest `blogPost` entry.
    #[must_use]
    pub fn latest_blog_post_url(&self) -> String {
        format!(
            "{}/entries?content_type={BLOG_POST_CONTENT_TYPE}&limit=1&order=-sys.createdAt&select={SELECTED_FIELDS}",
            self.base_url
        )
    }

    /// Fetch the newest `blogPost` entry as raw JSON.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Status`] with the status code and body text on a
    /// non-success response, or a transport/decoding error.
    pub async fn fetch_latest_blog_post(&self) -> Result<Value, FetchError> {
        let url = self.latest_blog_post_url();
        debug!(url = %url, "Fetching latest blog post");

        let response = self
            .http
            .get(&url)
            .header(AUTHORIZATION, format!("Bearer {}", self.delivery_token))
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(FetchError::Request)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_else(|e| {
                warn!(status, "Failed to read Contentful error body: {e}");
                "unknown".to_string()
            });
            return Err(FetchError::Status { status, body });
        }

        response.json().await.map_err(FetchError::Decode)
    }
}

fn environment_base_url(cdn_url: &str, contentful: &ContentfulConfig) -> String {
    format!(
        "{}/spaces/{}/environments/{}",
        cdn_url.trim_end_matches('/'),
        contentful.space_id,
        contentful.environment_id
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(cdn_url: &str) -> ContentfulClient {
        let config = Config::for_testing(cdn_url);
        ContentfulClient::with_http(reqwest::Client::new(), &config.cdn_url, &config.contentful)
    }

    #[test]
    fn test_base_url() {
        let client = client("https://cdn.contentful.com");
        assert_eq!(
            client.base_url(),
            "https://cdn.contentful.com/spaces/test-space/environments/master"
        );
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = client("https://cdn.contentful.com/");
        assert_eq!(
            client.base_url(),
            "https://cdn.contentful.com/spaces/test-space/environments/master"
        );
    }

    #[test]
    fn test_latest_blog_post_url() {
        let client = client("https://cdn.contentful.com");
        assert_eq!(
            client.latest_blog_post_url(),
            "https://cdn.contentful.com/spaces/test-space/environments/master/entries\
             ?content_type=blogPost&limit=1&order=-sys.createdAt\
             &select=sys.id,sys.createdAt,fields.title,fields.slug,fields.featuredMedia"
        );
    }

    #[test]
    fn test_status_error_message() {
        let err = FetchError::Status {
            status: 400,
            body: "bad request".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("400"));
        assert!(msg.contains("bad request"));
    }
}
