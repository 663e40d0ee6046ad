use thiserror::Error;

/// Errors that can occur while fetching or decoding search results.
///
/// An empty result set is not an error; it renders as an empty view.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The request could not complete at the transport level.
    #[error("search request failed: {0}")]
    Network(String),

    /// The endpoint answered with a non-success HTTP status.
    #[error("search endpoint returned HTTP {status}")]
    Status { status: u16 },

    /// The response body is not well-formed XML.
    #[error("response is not well-formed XML: {0}")]
    Malformed(String),
}

impl SearchError {
    /// Short classifier used by the rendered error marker.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Network(_) | Self::Status { .. } => "network",
            Self::Malformed(_) => "malformed",
        }
    }
}
