//! `navtree check` command implementation.

use std::path::PathBuf;

use clap::Args;
use navtree_config::{CliSettings, Config};
use navtree_renderer::UnknownNodeReferenceError;

use super::{build_renderer, load_forest, require_input};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Hierarchy file to check (overrides config).
    input: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover navtree.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory link targets are relative to (default: input directory).
    #[arg(long)]
    link_root: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// Link checking is always enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is malformed or any link target does
    /// not resolve.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            input: self.input,
            check_links: Some(true),
            ..CliSettings::default()
        };
        let mut config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(root) = self.link_root {
            config.links_resolved.root = Some(root);
        }

        let input = require_input(&config)?;
        let forest = load_forest(&input)?;
        let result = build_renderer(&config, &input).render(&forest);

        output.info(&format!(
            "{}: {} roots, {} nodes, depth {}",
            input.display(),
            forest.len(),
            forest.node_count(),
            forest.max_depth()
        ));
        for warning in &result.warnings {
            output.warning(&format!("  {warning}"));
        }

        summarize(&result.warnings)?;
        output.success("All links resolved");
        Ok(())
    }
}

/// Fail when any link is unresolved.
fn summarize(warnings: &[UnknownNodeReferenceError]) -> Result<(), CliError> {
    match warnings.len() {
        0 => Ok(()),
        1 => Err(CliError::Validation("1 unresolved link".to_owned())),
        n => Err(CliError::Validation(format!("{n} unresolved links"))),
    }
}
