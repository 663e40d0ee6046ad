//! Output sinks for rendered markup.
//!
//! A sink models the designated result container: every render fully
//! replaces its previous content, never appends.

use std::path::PathBuf;

/// Receives each rendered fragment, discarding whatever came before.
pub trait ResultSink {
    fn replace(&mut self, markup: &str);
}

/// Holds the most recent fragment in memory. Useful for embedders and tests.
#[derive(Debug, Default)]
pub struct StringSink {
    content: String,
}

impl StringSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// The fragment from the most recent render.
    pub fn content(&self) -> &str {
        &self.content
    }
}

impl ResultSink for StringSink {
    fn replace(&mut self, markup: &str) {
        self.content.clear();
        self.content.push_str(markup);
    }
}

/// Prints each fragment on its own line.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl ResultSink for StdoutSink {
    fn replace(&mut self, markup: &str) {
        println!("{markup}");
    }
}

/// Rewrites a minimal HTML page on disk around the fragment, so the result
/// file always reflects exactly the latest render.
#[derive(Debug)]
pub struct PageSink {
    path: PathBuf,
    title: String,
}

impl PageSink {
    pub fn new(path: impl Into<PathBuf>, title: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            title: title.into(),
        }
    }

    fn page_for(&self, markup: &str) -> String {
        format!(
            "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{}</title></head>\n\
             <body>\n<div id=\"results\">{markup}</div>\n</body>\n</html>\n",
            self.title
        )
    }
}

impl ResultSink for PageSink {
    fn replace(&mut self, markup: &str) {
        if let Err(err) = std::fs::write(&self.path, self.page_for(markup)) {
            tracing::warn!(path = %self.path.display(), %err, "failed to write result page");
        }
    }
}
