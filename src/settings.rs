use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Result, anyhow, bail, ensure};
use config::{Config, ConfigError, File};
use serde::Deserialize;

use prefix_search::{RenderPolicy, app_dirs};

use crate::cli::{CliArgs, OutputFormat};

const DEFAULT_HOST: &str = "localhost";
const DEFAULT_PORT: u16 = 3366;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    search: SearchSection,
    render: RenderSection,
    output: OutputSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct SearchSection {
    host: Option<String>,
    port: Option<u16>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RenderSection {
    policy: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct OutputSection {
    format: Option<String>,
    page: Option<PathBuf>,
}

#[derive(Debug)]
pub(crate) struct ResolvedConfig {
    pub(crate) host: String,
    pub(crate) port: u16,
    pub(crate) timeout: Option<Duration>,
    pub(crate) policy: RenderPolicy,
    pub(crate) format: OutputFormat,
    pub(crate) page: Option<PathBuf>,
    pub(crate) query: Option<String>,
    pub(crate) live: bool,
}

impl ResolvedConfig {
    pub(crate) fn print_summary(&self) {
        println!("Effective configuration:");
        println!("  Endpoint: http://{}:{}/prefix_search", self.host, self.port);
        match self.timeout {
            Some(timeout) => println!("  Timeout: {}s", timeout.as_secs()),
            None => println!("  Timeout: none"),
        }
        println!("  Render policy: {}", self.policy.name());
        println!("  Output format: {}", self.format.as_str());
        if let Some(page) = &self.page {
            println!("  Result page: {}", page.display());
        }
        if let Some(query) = &self.query {
            println!("  Query: {query}");
        }
        println!("  Live mode: {}", bool_to_word(self.live));
    }
}

pub(crate) fn load(cli: &CliArgs) -> Result<ResolvedConfig> {
    let builder = build_config(cli)?;
    let mut raw: RawConfig = builder
        .try_deserialize()
        .map_err(|err| anyhow!("failed to deserialize configuration: {err}"))?;
    raw.apply_cli_overrides(cli);
    raw.resolve(cli)
}

fn build_config(cli: &CliArgs) -> Result<Config> {
    let mut builder = Config::builder();

    if !cli.no_config {
        for path in default_config_files() {
            builder = builder.add_source(File::from(path).required(false));
        }
    }

    for path in &cli.config {
        builder = builder.add_source(File::from(path.clone()).required(true));
    }

    builder = builder.add_source(
        config::Environment::with_prefix("psq")
            .separator("__")
            .try_parsing(true),
    );

    builder.build().map_err(|err| match err {
        ConfigError::Frozen => anyhow!("configuration builder is frozen"),
        other => other.into(),
    })
}

fn default_config_files() -> Vec<PathBuf> {
    let mut files = Vec::new();

    if let Ok(dir) = app_dirs::get_config_dir() {
        files.push(dir.join("config.toml"));
    }

    if let Ok(current_dir) = env::current_dir() {
        files.push(current_dir.join(".psq.toml"));
        files.push(current_dir.join("psq.toml"));
    }

    files
}

impl RawConfig {
    fn apply_cli_overrides(&mut self, cli: &CliArgs) {
        if let Some(host) = cli.host.clone() {
            self.search.host = Some(host);
        }
        if let Some(port) = cli.port {
            self.search.port = Some(port);
        }
        if let Some(timeout) = cli.timeout {
            self.search.timeout_secs = Some(timeout);
        }
        if let Some(policy) = cli.policy {
            self.render.policy = Some(RenderPolicy::from(policy).name().to_string());
        }
        if let Some(format) = cli.output {
            self.output.format = Some(format.as_str().to_string());
        }
        if let Some(page) = cli.page.clone() {
            self.output.page = Some(page);
        }
    }

    fn resolve(self, cli: &CliArgs) -> Result<ResolvedConfig> {
        let host = self
            .search
            .host
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        ensure!(!host.trim().is_empty(), "search host must not be empty");
        ensure!(
            !host.contains("://") && !host.contains('/'),
            "search host must be a bare hostname, not a URL"
        );

        let port = self.search.port.unwrap_or(DEFAULT_PORT);
        ensure!(port != 0, "search port must be greater than zero");

        // 0 disables the timeout entirely.
        let timeout = match self.search.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS) {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };

        let policy = match self.render.policy.as_deref() {
            Some(name) => parse_policy(name)?,
            None => RenderPolicy::default(),
        };

        let format = match self.output.format.as_deref() {
            Some(name) => parse_format(name)?,
            None => OutputFormat::Html,
        };

        Ok(ResolvedConfig {
            host,
            port,
            timeout,
            policy,
            format,
            page: self.output.page,
            query: cli.query.clone(),
            live: cli.live,
        })
    }
}

fn parse_policy(value: &str) -> Result<RenderPolicy> {
    match value.trim().to_ascii_lowercase().as_str() {
        "sortable-table" | "sortable_table" | "sortable" => Ok(RenderPolicy::SortableTable),
        "plain-table" | "plain_table" | "plain" => Ok(RenderPolicy::PlainTable),
        "bar-chart" | "bar_chart" | "bars" => Ok(RenderPolicy::BarChartTable),
        "inline-list" | "inline_list" | "inline" => Ok(RenderPolicy::InlineList),
        other => bail!("unknown render policy '{other}'"),
    }
}

fn parse_format(value: &str) -> Result<OutputFormat> {
    match value.trim().to_ascii_lowercase().as_str() {
        "html" => Ok(OutputFormat::Html),
        "json" => Ok(OutputFormat::Json),
        other => bail!("unknown output format '{other}'"),
    }
}

fn bool_to_word(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}
