//! `sidenav check` command implementation.

use clap::Args;

use super::ProjectArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    pub(crate) project: ProjectArgs,
}

impl CheckArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let resolved = self.project.run(&output)?;

        for tree in resolved.iter() {
            output.heading(&tree.name);
            output.info(&format!("  {} document(s)", tree.documents().len()));
        }
        output.success(&format!("{} sidebar(s) OK", resolved.len()));
        Ok(())
    }
}
