//! `wt parse` command implementation.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;

use super::InputArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the parse command.
#[derive(Args)]
pub(crate) struct ParseArgs {
    #[command(flatten)]
    pub(crate) input: InputArgs,

    /// Write the website JSON to a file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emit compact JSON (overrides config).
    #[arg(long)]
    compact: bool,
}

impl ParseArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let mut settings = self.input.cli_settings();
        settings.pretty = self.compact.then_some(false);
        let (config, parsed) = self.input.load(&settings)?;

        let json = if config.output.pretty {
            serde_json::to_string_pretty(&parsed.website)?
        } else {
            serde_json::to_string(&parsed.website)?
        };

        if let Some(path) = &self.output {
            std::fs::write(path, format!("{json}\n"))?;
            output.success(&format!(
                "Website written to {} ({} warnings)",
                path.display(),
                parsed.warnings.len()
            ));
        } else {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}")?;
        }
        Ok(())
    }
}
