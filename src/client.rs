use std::time::Duration;

use reqwest::{Client, StatusCode, header::CONTENT_TYPE};

use crate::{
    error::{Error, Result},
    protocol::{IndexRequest, SearchRequest, SearchResponse},
};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// A decoded search response together with the raw body it came from.
#[derive(Debug, Clone)]
pub struct SearchReply {
    pub response: SearchResponse,
    pub body: String,
}

/// HTTP client for the `/index` and `/search` endpoints.
///
/// Nothing is retried: every transport, status or decode problem is
/// returned to the caller as an [`Error`].
#[derive(Debug, Clone)]
pub struct IndexClient {
    http: Client,
    base_url: String,
}

impl IndexClient {
    /// Create a client for `base_url`, optionally bounding every request
    /// by `timeout`.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Submit an index request. Any 2xx status counts as success.
    pub async fn index(&self, request: &IndexRequest) -> Result<StatusCode> {
        let body = serde_json::to_vec(request)?;
        let response = self
            .http
            .post(format!("{}/index", self.base_url))
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        // Drain so the connection can be reused.
        response.bytes().await?;

        if !status.is_success() {
            return Err(Error::BadStatus {
                endpoint: "index",
                status,
            });
        }
        Ok(status)
    }

    /// Run a search. Only `200 OK` is accepted.
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchReply> {
        let body = serde_json::to_vec(request)?;
        let response = self
            .http
            .post(format!("{}/search", self.base_url))
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(Error::BadStatus {
                endpoint: "search",
                status,
            });
        }

        let bytes = response.bytes().await?;
        let body = String::from_utf8_lossy(&bytes).into_owned();
        let response = serde_json::from_slice(&bytes)
            .map_err(|source| Error::Decode {
                source,
                body: body.clone(),
            })?;

        Ok(SearchReply { response, body })
    }
}
