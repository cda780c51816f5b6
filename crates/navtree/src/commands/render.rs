//! `navtree render` command implementation.

use std::io::Write;
use std::path::PathBuf;

use clap::{Args, ValueEnum};
use navtree_config::{CliSettings, Config, OutputFormat};
use navtree_model::write_hierarchy;
use navtree_renderer::{
    HtmlBackend, LinkResolver, RenderResult, Renderer, TextBackend, render_page,
};

use super::{build_renderer, load_forest, require_input};
use crate::error::CliError;
use crate::output::Output;

/// Output format argument.
#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum FormatArg {
    /// Nested list fragment.
    Html,
    /// Standalone HTML document.
    Page,
    /// Indented terminal tree.
    Text,
    /// Rendered tree as JSON.
    Json,
    /// Generator script format.
    Js,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Html => Self::Html,
            FormatArg::Page => Self::Page,
            FormatArg::Text => Self::Text,
            FormatArg::Json => Self::Json,
            FormatArg::Js => Self::Js,
        }
    }
}

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Hierarchy file to render (overrides config).
    input: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover navtree.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output file (default: stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format (overrides config).
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,

    /// Prefix for relative link targets (overrides config).
    #[arg(long, env = "NAVTREE_BASE_URL")]
    base_url: Option<String>,

    /// Number of initially expanded levels (overrides config).
    #[arg(long)]
    expanded_depth: Option<usize>,

    /// Check link targets against files next to the input.
    #[arg(long)]
    check_links: bool,

    /// Do not check link targets.
    #[arg(long, conflicts_with = "check_links")]
    no_check_links: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or the input is invalid, or the
    /// output cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let check_links = self.resolve_check_links();
        let cli_settings = CliSettings {
            input: self.input,
            output: self.output,
            format: self.format.map(Into::into),
            base_url: self.base_url,
            expanded_depth: self.expanded_depth,
            check_links,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let input = require_input(&config)?;
        let forest = load_forest(&input)?;
        let renderer = build_renderer(&config, &input);
        let result = renderer.render(&forest);

        for warning in &result.warnings {
            output.warning(&format!("Warning: {warning}"));
        }

        let rendered = format_output(&config, &renderer, &result)?;
        match &config.output_resolved.path {
            Some(path) => {
                if let Some(parent) = path.parent()
                    && !parent.as_os_str().is_empty()
                {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(path, rendered)?;
                output.success(&format!(
                    "Rendered {} nodes to {}",
                    result.tree.node_count(),
                    path.display()
                ));
            }
            None => std::io::stdout().lock().write_all(rendered.as_bytes())?,
        }

        Ok(())
    }

    fn resolve_check_links(&self) -> Option<bool> {
        if self.check_links {
            Some(true)
        } else if self.no_check_links {
            Some(false)
        } else {
            None
        }
    }
}

/// Serialize a render result in the configured format.
fn format_output<R: LinkResolver>(
    config: &Config,
    renderer: &Renderer<R>,
    result: &RenderResult,
) -> Result<String, CliError> {
    let tree = &result.tree;
    Ok(match config.output_resolved.format {
        OutputFormat::Html => renderer.write::<HtmlBackend>(tree),
        OutputFormat::Page => render_page(&config.render.title, tree, renderer.options()),
        OutputFormat::Text => renderer.write::<TextBackend>(tree),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(tree)?;
            json.push('\n');
            json
        }
        OutputFormat::Js => write_hierarchy(&tree.to_forest()?, &config.render.variable),
    })
}
