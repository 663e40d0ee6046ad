//! Transport abstraction between the client and the search endpoint.

use std::time::Duration;

use crate::error::SearchError;

/// Fetches the raw response body for a query prefix.
///
/// Implementations map transport failures and non-success statuses to
/// [`SearchError::Network`] / [`SearchError::Status`]; body decoding is the
/// caller's concern.
pub trait Transport: Send {
    fn fetch(&self, query: &str) -> Result<String, SearchError>;
}

/// HTTP transport issuing `GET <base>/prefix_search?query=<prefix>`.
///
/// The query parameter is URL-encoded by the request builder; the prefix is
/// otherwise passed through untouched (it may be empty).
pub struct HttpTransport {
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    /// Build a transport for `http://<host>:<port>`. A `timeout` of `None`
    /// waits indefinitely, matching the original client's behavior.
    pub fn new(host: &str, port: u16, timeout: Option<Duration>) -> Result<Self, SearchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| SearchError::Network(err.to_string()))?;

        Ok(Self {
            endpoint: format!("http://{host}:{port}/prefix_search"),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Transport for HttpTransport {
    fn fetch(&self, query: &str) -> Result<String, SearchError> {
        tracing::debug!(endpoint = %self.endpoint, query, "issuing prefix search");

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("query", query)])
            .send()
            .map_err(|err| SearchError::Network(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "search endpoint refused query");
            return Err(SearchError::Status {
                status: status.as_u16(),
            });
        }

        response
            .text()
            .map_err(|err| SearchError::Network(err.to_string()))
    }
}
