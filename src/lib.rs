//! Client library for a remote prefix-search service.
//!
//! The service answers `GET /prefix_search?query=<prefix>` with an XML list
//! of ranked completions; this crate decodes that payload and projects it
//! through one of several presentation policies into an output sink. The
//! search engine itself, and anything that consumes the rendered markup
//! (including the client-side table-sorting widget the sortable policy hooks
//! into), are external collaborators.

pub mod app_dirs;
pub mod client;
pub mod decode;
pub mod error;
pub mod logging;
pub mod render;
pub mod results;
pub mod runtime;
pub mod sink;
pub mod transport;

pub use client::PrefixSearchClient;
pub use decode::decode_results;
pub use error::SearchError;
pub use render::{RenderPolicy, render_error};
pub use results::{CompletionItem, ResultSet};
pub use runtime::{SearchResult, SearchRuntime};
pub use sink::{PageSink, ResultSink, StdoutSink, StringSink};
pub use transport::{HttpTransport, Transport};
