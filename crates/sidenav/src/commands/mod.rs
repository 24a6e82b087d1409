//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod resolve;

use std::path::PathBuf;

use clap::Args;
use sidenav_catalog::{CatalogIndex, FsSource};
use sidenav_config::{CliSettings, Config};
use sidenav_tree::{
    ResolvedSidebars, Resolver, ResolverConfig, SidebarErrors, Sidebars, SidebarsError,
};

use crate::error::CliError;
use crate::output::Output;

pub(crate) use check::CheckArgs;
pub(crate) use resolve::ResolveArgs;

/// Options shared by every command that resolves a project.
#[derive(Args, Debug, Default)]
pub(crate) struct ProjectArgs {
    /// Path to configuration file (default: auto-discover sidenav.toml).
    #[arg(short, long)]
    pub(crate) config: Option<PathBuf>,

    /// Document source directory (overrides config).
    #[arg(short, long)]
    pub(crate) source_dir: Option<PathBuf>,

    /// Sidebars file, JSON or YAML (overrides config).
    #[arg(long)]
    pub(crate) sidebars: Option<PathBuf>,

    /// Deepest allowed nesting level (overrides config).
    #[arg(long, env = "SIDENAV_MAX_DEPTH")]
    pub(crate) max_depth: Option<usize>,

    /// Treat documents missing from every sidebar as errors.
    #[arg(long)]
    pub(crate) strict: bool,

    /// Enable verbose output (show INFO logs).
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl ProjectArgs {
    fn load_config(&self) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            source_dir: self.source_dir.clone(),
            sidebars_file: self.sidebars.clone(),
            max_depth: self.max_depth,
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }

    /// Build the catalog, resolve every sidebar and report problems.
    ///
    /// Every validation error is printed before the command fails.
    /// Unreferenced documents are printed as warnings, and fail the
    /// command under `--strict`.
    pub(crate) fn run(&self, output: &Output) -> Result<ResolvedSidebars, CliError> {
        let config = self.load_config()?;
        tracing::debug!(
            config_path = ?config.config_path,
            max_depth = config.resolver.max_depth,
            "Configuration loaded"
        );

        output.info(&format!(
            "Source: {}",
            config.docs_resolved.source_dir.display()
        ));
        output.info(&format!("Sidebars: {}", config.sidebars_file.display()));

        let source = FsSource::with_extensions(
            config.docs_resolved.source_dir.clone(),
            config.docs_resolved.extensions.clone(),
        );
        let catalog = CatalogIndex::build(&source);
        let sidebars = Sidebars::load(&config.sidebars_file)?;
        tracing::info!(
            documents = catalog.len(),
            sidebars = sidebars.len(),
            "Resolving sidebars"
        );

        let max_depth = config.resolver.max_depth;
        let outcome = Resolver::new(ResolverConfig { max_depth }).resolve_all(&sidebars, &catalog);
        let resolved = match outcome {
            Ok(resolved) => resolved,
            Err(SidebarsError::Invalid(failures)) => {
                for line in format_failures(&failures) {
                    output.error(&line);
                }
                return Err(SidebarsError::Invalid(failures).into());
            }
            Err(err) => return Err(err.into()),
        };

        self.report_unreferenced(&resolved, &catalog, output)?;
        Ok(resolved)
    }

    fn report_unreferenced(
        &self,
        resolved: &ResolvedSidebars,
        catalog: &CatalogIndex,
        output: &Output,
    ) -> Result<(), CliError> {
        let unreferenced = resolved.unreferenced(catalog);
        if unreferenced.is_empty() {
            return Ok(());
        }

        tracing::info!(count = unreferenced.len(), "Unreferenced documents found");
        for id in &unreferenced {
            output.warning(&format!("Document \"{id}\" is not listed in any sidebar"));
        }
        if self.strict {
            return Err(CliError::Validation(format!(
                "{} document(s) not listed in any sidebar",
                unreferenced.len()
            )));
        }
        Ok(())
    }
}

/// Render validation failures grouped by sidebar.
fn format_failures(failures: &[SidebarErrors]) -> Vec<String> {
    let mut lines = Vec::new();
    for failure in failures {
        lines.push(format!("Sidebar \"{}\":", failure.sidebar));
        lines.extend(failure.errors.iter().map(|e| format!("  - {e}")));
    }
    lines
}
