//! `sidenav resolve` command implementation.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use sidenav_tree::ResolvedSidebars;

use super::ProjectArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the resolve command.
#[derive(Args)]
pub(crate) struct ResolveArgs {
    #[command(flatten)]
    pub(crate) project: ProjectArgs,

    /// Only write this sidebar.
    #[arg(long)]
    sidebar: Option<String>,

    /// Output file (default: stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl ResolveArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let resolved = self.project.run(&output)?;
        let json = self.render(&resolved)?;

        if let Some(path) = &self.output {
            std::fs::write(path, json)?;
            output.success(&format!("Resolved sidebars written to {}", path.display()));
        } else {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(json.as_bytes())?;
            stdout.flush()?;
        }
        Ok(())
    }

    /// Serialize every sidebar, or only the selected one.
    fn render(&self, resolved: &ResolvedSidebars) -> Result<String, CliError> {
        let mut json = match &self.sidebar {
            Some(name) => {
                let tree = resolved
                    .get(name)
                    .ok_or_else(|| CliError::Validation(format!("Unknown sidebar: {name}")))?;
                serde_json::to_string_pretty(tree)?
            }
            None => serde_json::to_string_pretty(resolved)?,
        };
        json.push('\n');
        Ok(json)
    }
}
