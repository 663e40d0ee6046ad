//! Background runtime for live (per-trigger) searching.
//!
//! Rapid triggers supersede each other: each query carries a monotonically
//! increasing id, the latest id is published through a shared atomic, and the
//! worker abandons any request that is no longer the latest, both before
//! issuing the fetch and again before reporting, so a slow response for a
//! superseded query never reaches the sink. The container itself keeps the
//! original last-write-wins semantics; supersession only prevents stale
//! responses from being that last write.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;

use crate::decode::decode_results;
use crate::error::SearchError;
use crate::render::{RenderPolicy, render_error};
use crate::sink::ResultSink;
use crate::transport::Transport;

#[derive(Debug)]
enum SearchCommand {
    Query { id: u64, query: String },
    Shutdown,
}

/// A rendered outcome for one query id. `markup` is always populated; on
/// failure it holds the rendered error marker.
#[derive(Debug)]
pub struct SearchResult {
    pub id: u64,
    pub markup: String,
    pub error: Option<SearchError>,
}

fn spawn(
    transport: Box<dyn Transport>,
    policy: RenderPolicy,
) -> (
    Sender<SearchCommand>,
    Receiver<SearchResult>,
    Arc<AtomicU64>,
) {
    let (command_tx, command_rx) = mpsc::channel();
    let (result_tx, result_rx) = mpsc::channel::<SearchResult>();
    let latest_query_id = Arc::new(AtomicU64::new(0));
    let thread_latest = Arc::clone(&latest_query_id);

    thread::spawn(move || {
        while let Ok(command) = command_rx.recv() {
            match command {
                SearchCommand::Query { id, query } => {
                    if should_abort(id, &thread_latest) {
                        continue;
                    }
                    let outcome = run_query(transport.as_ref(), policy, &query);
                    if should_abort(id, &thread_latest) {
                        continue;
                    }
                    let (markup, error) = match outcome {
                        Ok(markup) => (markup, None),
                        Err(err) => (render_error(&err), Some(err)),
                    };
                    if result_tx.send(SearchResult { id, markup, error }).is_err() {
                        break;
                    }
                }
                SearchCommand::Shutdown => break,
            }
        }
    });

    (command_tx, result_rx, latest_query_id)
}

fn run_query(
    transport: &dyn Transport,
    policy: RenderPolicy,
    query: &str,
) -> Result<String, SearchError> {
    let body = transport.fetch(query)?;
    let results = decode_results(&body)?;
    Ok(policy.render(&results))
}

fn should_abort(id: u64, latest_query_id: &AtomicU64) -> bool {
    latest_query_id.load(AtomicOrdering::Acquire) != id
}

/// Foreground handle to the background search worker.
pub struct SearchRuntime {
    tx: Sender<SearchCommand>,
    rx: Receiver<SearchResult>,
    latest_query_id: Arc<AtomicU64>,
    next_query_id: u64,
    current_query_id: Option<u64>,
}

impl SearchRuntime {
    pub fn new(transport: Box<dyn Transport>, policy: RenderPolicy) -> Self {
        let (tx, rx, latest_query_id) = spawn(transport, policy);
        Self {
            tx,
            rx,
            latest_query_id,
            next_query_id: 0,
            current_query_id: None,
        }
    }

    /// Issue a search for the current query text, superseding any in-flight
    /// request.
    pub fn issue_search(&mut self, query: &str) {
        self.next_query_id = self.next_query_id.saturating_add(1);
        let id = self.next_query_id;
        self.current_query_id = Some(id);
        self.latest_query_id.store(id, AtomicOrdering::Release);
        let _ = self.tx.send(SearchCommand::Query {
            id,
            query: query.to_string(),
        });
    }

    fn matches_latest(&self, result_id: u64) -> bool {
        Some(result_id) == self.current_query_id
    }

    /// Drain any results waiting on the channel, applying at most the one
    /// matching the latest issued query. Returns the number applied.
    pub fn pump(&mut self, sink: &mut dyn ResultSink) -> usize {
        let mut applied = 0;
        loop {
            match self.rx.try_recv() {
                Ok(result) => {
                    if self.matches_latest(result.id) {
                        sink.replace(&result.markup);
                        applied += 1;
                    }
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        applied
    }

    /// Block until the result for the latest issued query arrives and apply
    /// it. Stale results received in the meantime are discarded. Returns the
    /// applied result, or `None` if the worker is gone.
    pub fn wait_and_apply(&mut self, sink: &mut dyn ResultSink) -> Option<SearchResult> {
        while let Ok(result) = self.rx.recv() {
            if self.matches_latest(result.id) {
                sink.replace(&result.markup);
                return Some(result);
            }
        }
        None
    }

    pub fn shutdown(&self) {
        let _ = self.tx.send(SearchCommand::Shutdown);
    }
}

impl Drop for SearchRuntime {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::StringSink;

    struct EchoTransport;

    impl Transport for EchoTransport {
        fn fetch(&self, query: &str) -> Result<String, SearchError> {
            Ok(format!(
                "<results><item><completion>{query}-match</completion>\
                 <doclength>1</doclength><percentage>1</percentage></item></results>"
            ))
        }
    }

    struct FailingTransport;

    impl Transport for FailingTransport {
        fn fetch(&self, _query: &str) -> Result<String, SearchError> {
            Err(SearchError::Network("connection refused".into()))
        }
    }

    #[test]
    fn latest_result_reaches_the_sink() {
        let mut runtime = SearchRuntime::new(Box::new(EchoTransport), RenderPolicy::InlineList);
        let mut sink = StringSink::new();

        runtime.issue_search("cat");
        let result = runtime.wait_and_apply(&mut sink).expect("worker alive");
        assert!(result.error.is_none());
        assert_eq!(sink.content(), "cat-match11");
    }

    #[test]
    fn superseded_query_never_overwrites_the_newer_render() {
        let mut runtime = SearchRuntime::new(Box::new(EchoTransport), RenderPolicy::InlineList);
        let mut sink = StringSink::new();

        runtime.issue_search("ca");
        runtime.issue_search("cat");

        let result = runtime.wait_and_apply(&mut sink).expect("worker alive");
        assert_eq!(result.id, 2);
        assert_eq!(sink.content(), "cat-match11");

        // any later delivery of the first result must be dropped by pump
        assert_eq!(runtime.pump(&mut sink), 0);
        assert_eq!(sink.content(), "cat-match11");
    }

    #[test]
    fn worker_failures_surface_as_rendered_error_markers() {
        let mut runtime = SearchRuntime::new(Box::new(FailingTransport), RenderPolicy::PlainTable);
        let mut sink = StringSink::new();

        runtime.issue_search("cat");
        let result = runtime.wait_and_apply(&mut sink).expect("worker alive");
        assert!(matches!(result.error, Some(SearchError::Network(_))));
        assert!(sink.content().contains("class='search-error'"));
    }
}
