use std::fmt::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::{
    ColorChoice, Parser, ValueEnum,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use prefix_search::{RenderPolicy, ResultSet, app_dirs};

/// Produce the full version banner including the config directory.
fn long_version() -> &'static str {
    let config_dir = match app_dirs::get_config_dir() {
        Ok(path) => path.display().to_string(),
        Err(err) => format!("unavailable ({err})"),
    };

    let mut details = format!("psq {}", env!("CARGO_PKG_VERSION"));
    let _ = writeln!(details);
    let _ = writeln!(details, "config directory: {config_dir}");

    Box::leak(details.into_boxed_str())
}

/// Create the clap styles used for custom colour output.
fn cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Cyan.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
}

/// Parse command line arguments into the strongly typed [`CliArgs`] structure.
pub(crate) fn parse_cli() -> CliArgs {
    CliArgs::parse()
}

#[derive(Parser, Debug, Default)]
#[command(
    name = "psq",
    version,
    long_version = long_version(),
    about = "Query a prefix-search endpoint and render the completions",
    color = ColorChoice::Auto,
    styles = cli_styles()
)]
/// Command-line arguments accepted by the `psq` binary.
pub(crate) struct CliArgs {
    #[arg(
        short,
        long = "config",
        value_name = "FILE",
        env = "PSQ_CONFIG",
        action = clap::ArgAction::Append,
        help = "Additional configuration file to merge (default: none)"
    )]
    pub(crate) config: Vec<PathBuf>,
    #[arg(
        short = 'n',
        long = "no-config",
        help = "Skip loading default configuration files (default: disabled)"
    )]
    pub(crate) no_config: bool,
    #[arg(
        short = 'H',
        long,
        value_name = "HOST",
        env = "PSQ_HOST",
        help = "Search endpoint host (default: localhost)"
    )]
    pub(crate) host: Option<String>,
    #[arg(
        short = 'p',
        long,
        value_name = "NUM",
        env = "PSQ_PORT",
        help = "Search endpoint port (default: 3366)"
    )]
    pub(crate) port: Option<u16>,
    #[arg(
        long,
        value_name = "SECONDS",
        help = "Request timeout in seconds, 0 to wait indefinitely (default: 10)"
    )]
    pub(crate) timeout: Option<u64>,
    #[arg(
        short = 'q',
        long,
        value_name = "PREFIX",
        help = "Prefix to search for once; may be empty (default: none)"
    )]
    pub(crate) query: Option<String>,
    #[arg(
        short = 'l',
        long,
        help = "Live mode: re-run the search for every line read from stdin"
    )]
    pub(crate) live: bool,
    #[arg(
        long,
        value_enum,
        value_name = "POLICY",
        help = "Presentation policy for rendered results (default: sortable-table)"
    )]
    pub(crate) policy: Option<PolicyArg>,
    #[arg(
        short = 'o',
        long,
        value_enum,
        value_name = "FORMAT",
        help = "Output format (default: html)"
    )]
    pub(crate) output: Option<OutputFormat>,
    #[arg(
        long,
        value_name = "FILE",
        help = "Write a full HTML page to FILE instead of printing the fragment"
    )]
    pub(crate) page: Option<PathBuf>,
    #[arg(long, help = "Print the effective configuration before searching")]
    pub(crate) print_config: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum PolicyArg {
    SortableTable,
    PlainTable,
    BarChart,
    InlineList,
}

impl From<PolicyArg> for RenderPolicy {
    fn from(value: PolicyArg) -> Self {
        match value {
            PolicyArg::SortableTable => RenderPolicy::SortableTable,
            PolicyArg::PlainTable => RenderPolicy::PlainTable,
            PolicyArg::BarChart => RenderPolicy::BarChartTable,
            PolicyArg::InlineList => RenderPolicy::InlineList,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Html,
    Json,
}

impl OutputFormat {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Json => "json",
        }
    }
}

/// Format the decoded result set as a JSON string.
pub(crate) fn format_results_json(results: &ResultSet) -> Result<String> {
    Ok(serde_json::to_string_pretty(results)?)
}

/// Print the JSON representation of the decoded result set.
pub(crate) fn print_json(results: &ResultSet) -> Result<()> {
    println!("{}", format_results_json(results)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use prefix_search::CompletionItem;
    use serde_json::Value;

    #[test]
    fn json_format_preserves_fields_and_order() {
        let results = ResultSet::new(vec![
            CompletionItem::new("cats", "10", "50"),
            CompletionItem::new("catapult", "3", "12"),
        ]);

        let json = format_results_json(&results).expect("json");
        let value: Value = serde_json::from_str(&json).expect("parse");
        assert_eq!(value[0]["completion"], "cats");
        assert_eq!(value[1]["doclength"], "3");
        assert_eq!(value[1]["percentage"], "12");
    }

    #[test]
    fn policy_argument_maps_onto_render_policies() {
        let cli = CliArgs::parse_from(["psq", "--policy", "bar-chart", "-q", "cat"]);
        assert_eq!(
            RenderPolicy::from(cli.policy.expect("policy")),
            RenderPolicy::BarChartTable
        );
    }

    #[test]
    fn empty_query_is_accepted() {
        let cli = CliArgs::parse_from(["psq", "--query", ""]);
        assert_eq!(cli.query.as_deref(), Some(""));
    }
}
