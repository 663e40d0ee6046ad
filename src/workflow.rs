use std::io::{self, BufRead};

use anyhow::{Context, Result, bail};
use prefix_search::{
    HttpTransport, PageSink, PrefixSearchClient, ResultSink, SearchRuntime, StdoutSink, Transport,
    decode_results,
};

use crate::cli::{OutputFormat, print_json};
use crate::settings::ResolvedConfig;

/// Coordinates building and running the configured search flow.
#[derive(Debug)]
pub(crate) struct SearchWorkflow {
    config: ResolvedConfig,
}

impl SearchWorkflow {
    pub(crate) fn from_config(config: ResolvedConfig) -> Result<Self> {
        if config.query.is_none() && !config.live {
            bail!("nothing to do: pass --query PREFIX or --live");
        }
        if config.live && config.format == OutputFormat::Json {
            bail!("JSON output is not available in live mode");
        }
        Ok(Self { config })
    }

    pub(crate) fn run(self) -> Result<()> {
        let transport = HttpTransport::new(&self.config.host, self.config.port, self.config.timeout)
            .context("failed to build HTTP transport")?;

        if self.config.live {
            return match self.config.page.clone() {
                Some(path) => self.run_live(transport, PageSink::new(path, "prefix search")),
                None => self.run_live(transport, StdoutSink),
            };
        }

        let Some(query) = self.config.query.clone() else {
            bail!("nothing to do: pass --query PREFIX or --live");
        };

        match self.config.format {
            OutputFormat::Json => self.run_once_json(transport, &query),
            OutputFormat::Html => match self.config.page.clone() {
                Some(path) => {
                    self.run_once_html(transport, PageSink::new(path, "prefix search"), &query)
                }
                None => self.run_once_html(transport, StdoutSink, &query),
            },
        }
    }

    fn run_once_json(&self, transport: HttpTransport, query: &str) -> Result<()> {
        let body = transport.fetch(query).context("search failed")?;
        let results = decode_results(&body).context("search returned an unusable response")?;
        print_json(&results)
    }

    fn run_once_html<S: ResultSink>(
        &self,
        transport: HttpTransport,
        sink: S,
        query: &str,
    ) -> Result<()> {
        let mut client = PrefixSearchClient::new(transport, self.config.policy, sink);
        // Failures land in the sink as an error marker and still fail the run.
        client.on_trigger(query).context("search failed")?;
        Ok(())
    }

    /// Re-run the search for every line read from stdin, each render fully
    /// replacing the previous one. Failures render an error marker and keep
    /// the loop alive; the next line supersedes them.
    fn run_live<S: ResultSink>(&self, transport: HttpTransport, mut sink: S) -> Result<()> {
        let mut runtime = SearchRuntime::new(Box::new(transport), self.config.policy);

        if let Some(query) = &self.config.query {
            runtime.issue_search(query);
            if runtime.wait_and_apply(&mut sink).is_none() {
                bail!("search worker exited unexpectedly");
            }
        }

        for line in io::stdin().lock().lines() {
            let query = line.context("failed to read query from stdin")?;
            runtime.issue_search(&query);
            if runtime.wait_and_apply(&mut sink).is_none() {
                bail!("search worker exited unexpectedly");
            }
        }

        Ok(())
    }
}
