mod cli;
mod settings;
mod workflow;

use anyhow::Result;
use cli::parse_cli;
use workflow::SearchWorkflow;

fn main() -> Result<()> {
    let cli = parse_cli();
    prefix_search::logging::initialize();

    let resolved = settings::load(&cli)?;

    if cli.print_config {
        resolved.print_summary();
    }

    SearchWorkflow::from_config(resolved)?.run()
}
