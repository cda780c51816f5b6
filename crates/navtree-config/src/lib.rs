//! Configuration management for navtree.
//!
//! Parses `navtree.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `render.base_url`
//! - `render.title`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override input hierarchy file.
    pub input: Option<PathBuf>,
    /// Override output file.
    pub output: Option<PathBuf>,
    /// Override output format.
    pub format: Option<OutputFormat>,
    /// Override link base URL.
    pub base_url: Option<String>,
    /// Override number of initially expanded levels.
    pub expanded_depth: Option<usize>,
    /// Override link checking.
    pub check_links: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "navtree.toml";

/// Deepest initial expansion accepted from configuration.
const MAX_EXPANDED_DEPTH: usize = 64;

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Input configuration (paths are relative strings from TOML).
    input: InputConfigRaw,
    /// Rendering configuration.
    pub render: RenderConfig,
    /// Link checking configuration (paths are relative strings from TOML).
    links: LinksConfigRaw,
    /// Output configuration (paths are relative strings from TOML).
    output: OutputConfigRaw,

    /// Resolved input configuration (set after loading).
    #[serde(skip)]
    pub input_resolved: InputConfig,
    /// Resolved link checking configuration (set after loading).
    #[serde(skip)]
    pub links_resolved: LinksConfig,
    /// Resolved output configuration (set after loading).
    #[serde(skip)]
    pub output_resolved: OutputConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Output format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Bare nested list fragment.
    #[default]
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

/// Rendering configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Number of levels initially expanded.
    pub expanded_depth: usize,
    /// Prefix for relative link targets. Empty means none.
    pub base_url: Option<String>,
    /// Page title for standalone output.
    pub title: String,
    /// Script variable name for `js` output.
    pub variable: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            expanded_depth: 1,
            base_url: None,
            title: "Class Hierarchy".to_owned(),
            variable: "hierarchy".to_owned(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct InputConfigRaw {
    path: Option<String>,
}

/// Resolved input configuration with absolute paths.
#[derive(Debug, Default)]
pub struct InputConfig {
    /// Hierarchy file to read.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct LinksConfigRaw {
    check: Option<bool>,
    root: Option<String>,
}

/// Resolved link checking configuration.
#[derive(Debug, Default)]
pub struct LinksConfig {
    /// Whether link targets are checked against files.
    pub check: bool,
    /// Directory link targets are relative to.
    pub root: Option<PathBuf>,
}

impl LinksConfig {
    /// Directory to resolve links in: the configured root, otherwise the
    /// directory containing `input`.
    #[must_use]
    pub fn root_for(&self, input: &Path) -> PathBuf {
        self.root.clone().unwrap_or_else(|| {
            input
                .parent()
                .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
        })
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct OutputConfigRaw {
    path: Option<String>,
    format: Option<OutputFormat>,
}

/// Resolved output configuration.
#[derive(Debug, Default)]
pub struct OutputConfig {
    /// Output file; `None` writes to stdout.
    pub path: Option<PathBuf>,
    /// Output format.
    pub format: OutputFormat,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`render.base_url`").
        field: String,
        /// Error message (e.g., "${`DOCS_URL`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `navtree.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(input) = &settings.input {
            self.input_resolved.path = Some(input.clone());
        }
        if let Some(output) = &settings.output {
            self.output_resolved.path = Some(output.clone());
        }
        if let Some(format) = settings.format {
            self.output_resolved.format = format;
        }
        if let Some(base_url) = &settings.base_url {
            self.render.base_url = Some(base_url.clone()).filter(|url| !url.is_empty());
        }
        if let Some(expanded_depth) = settings.expanded_depth {
            self.render.expanded_depth = expanded_depth;
        }
        if let Some(check_links) = settings.check_links {
            self.links_resolved.check = check_links;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::discover_from(&current)
    }

    /// Search for config file in `start` and its parents.
    fn discover_from(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(CONFIG_FILENAME))
            .find(|candidate| candidate.exists())
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file and after CLI settings
    /// are applied.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.render.title, "render.title")?;
        require_non_empty(&self.render.variable, "render.variable")?;

        if !navtree_model::is_identifier(&self.render.variable) {
            return Err(ConfigError::Validation(format!(
                "render.variable '{}' is not a valid identifier",
                self.render.variable
            )));
        }

        if self.render.expanded_depth > MAX_EXPANDED_DEPTH {
            return Err(ConfigError::Validation(format!(
                "render.expanded_depth cannot exceed {MAX_EXPANDED_DEPTH}"
            )));
        }

        if let Some(ref base_url) = self.render.base_url
            && base_url.chars().any(char::is_whitespace)
        {
            return Err(ConfigError::Validation(
                "render.base_url cannot contain whitespace".to_owned(),
            ));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref url) = self.render.base_url {
            let expanded = expand::expand_env(url, "render.base_url")?;
            self.render.base_url = Some(expanded).filter(|url| !url.is_empty());
        }
        self.render.title = expand::expand_env(&self.render.title, "render.title")?;
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.input_resolved = InputConfig {
            path: self.input.path.as_deref().map(|p| config_dir.join(p)),
        };
        self.links_resolved = LinksConfig {
            check: self.links.check.unwrap_or(false),
            root: self.links.root.as_deref().map(|p| config_dir.join(p)),
        };
        self.output_resolved = OutputConfig {
            path: self.output.path.as_deref().map(|p| config_dir.join(p)),
            format: self.output.format.unwrap_or_default(),
        };
    }
}
