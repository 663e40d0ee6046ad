//! The fetch-and-render client itself.

use crate::decode::decode_results;
use crate::error::SearchError;
use crate::render::{RenderPolicy, render_error};
use crate::sink::ResultSink;
use crate::transport::Transport;

/// Binds a transport, a presentation policy, and an output sink together.
///
/// Every activation point (button press, keystroke, stdin line) funnels into
/// [`on_trigger`](Self::on_trigger); there is no other entry point and no
/// state carried between triggers. Failures are rendered into the sink as a
/// detectable error marker and also returned to the caller.
pub struct PrefixSearchClient<T, S> {
    transport: T,
    policy: RenderPolicy,
    sink: S,
}

impl<T: Transport, S: ResultSink> PrefixSearchClient<T, S> {
    pub fn new(transport: T, policy: RenderPolicy, sink: S) -> Self {
        Self {
            transport,
            policy,
            sink,
        }
    }

    /// Fetch results for `query`, render them, and replace the sink content.
    pub fn on_trigger(&mut self, query: &str) -> Result<(), SearchError> {
        match self.fetch_and_render(query) {
            Ok(markup) => {
                self.sink.replace(&markup);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(query, %err, "search trigger failed");
                self.sink.replace(&render_error(&err));
                Err(err)
            }
        }
    }

    fn fetch_and_render(&self, query: &str) -> Result<String, SearchError> {
        let body = self.transport.fetch(query)?;
        let results = decode_results(&body)?;
        Ok(self.policy.render(&results))
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}
