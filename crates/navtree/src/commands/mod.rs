//! CLI command implementations.

mod check;
mod render;

use std::path::{Path, PathBuf};

use navtree_config::Config;
use navtree_model::Forest;
use navtree_renderer::{AcceptAllLinks, DirectoryLinks, LinkResolver, RenderOptions, Renderer};
use tracing::info;

use crate::error::CliError;

pub(crate) use check::CheckArgs;
pub(crate) use render::RenderArgs;

/// Input path from CLI or config.
fn require_input(config: &Config) -> Result<PathBuf, CliError> {
    config.input_resolved.path.clone().ok_or_else(|| {
        CliError::Validation(
            "No input file: pass INPUT or set input.path in navtree.toml".to_owned(),
        )
    })
}

/// Read and parse a hierarchy file.
fn load_forest(path: &Path) -> Result<Forest, CliError> {
    let source = std::fs::read_to_string(path)?;
    let forest = navtree_model::parse_hierarchy(&source).map_err(|source| CliError::Input {
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        path = %path.display(),
        roots = forest.len(),
        nodes = forest.node_count(),
        "Loaded hierarchy"
    );
    Ok(forest)
}

/// Build a renderer from config, checking links under the link root when
/// enabled.
fn build_renderer(config: &Config, input: &Path) -> Renderer<Box<dyn LinkResolver>> {
    let resolver: Box<dyn LinkResolver> = if config.links_resolved.check {
        let root = config.links_resolved.root_for(input);
        info!(root = %root.display(), "Checking link targets");
        Box::new(DirectoryLinks::new(root))
    } else {
        Box::new(AcceptAllLinks)
    };

    Renderer::new()
        .with_options(RenderOptions {
            expanded_depth: config.render.expanded_depth,
            base_url: config.render.base_url.clone(),
        })
        .with_resolver(resolver)
}

#[cfg(test)]
mod tests {
    use super::*;
    use navtree_config::CliSettings;

    const GENERATED: &str = include_str!("../../../../testdata/hierarchy.js");

    #[test]
    fn test_load_forest_reports_path_on_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hierarchy.js");
        std::fs::write(&path, r#"var hierarchy = [["A", null, "x.js"]];"#).unwrap();

        let err = load_forest(&path).unwrap_err();

        let message = err.to_string();
        assert!(message.starts_with(&path.display().to_string()));
        assert!(message.contains("Invalid children for 'A'"));
    }

    #[test]
    fn test_missing_input_is_validation_error() {
        let config = Config::default();

        assert!(matches!(require_input(&config), Err(CliError::Validation(_))));
    }

    #[test]
    fn test_build_renderer_checks_links_in_input_dir() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("hierarchy.js");
        std::fs::write(&input, GENERATED).unwrap();
        std::fs::write(dir.path().join("class_data_flash.html"), "").unwrap();
        let settings = CliSettings {
            input: Some(input.clone()),
            check_links: Some(true),
            ..CliSettings::default()
        };
        let config_path = write_empty_config(dir.path());
        let config = Config::load(Some(config_path.as_path()), Some(&settings)).unwrap();

        let forest = load_forest(&input).unwrap();
        let result = build_renderer(&config, &input).render(&forest);

        // Every link except the one page written above is missing
        let links = forest.walk().filter(|(_, node)| node.link().is_some()).count();
        assert_eq!(result.warnings.len(), links - 1);
        assert_eq!(
            result.tree.roots[2].link.as_deref(),
            Some("class_data_flash.html")
        );
    }

    fn write_empty_config(dir: &Path) -> PathBuf {
        let path = dir.join("navtree.toml");
        std::fs::write(&path, "").unwrap();
        path
    }
}
