//! Configuration management for docsnap.
//!
//! Parses `docsnap.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! Path values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `docs.source_dir`
//! - `docs.artifact_dir`

mod component;
mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

pub use component::{ComponentType, UnknownComponentType};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override docs source directory.
    pub source_dir: Option<PathBuf>,
    /// Override artifact output directory.
    pub artifact_dir: Option<PathBuf>,
    /// Override the missing-title policy.
    pub require_titles: Option<bool>,
    /// Override the duplicate-route policy.
    pub unique_routes: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "docsnap.toml";

/// Default docs source directory, relative to the project directory.
const DEFAULT_SOURCE_DIR: &str = "docs";

/// Default artifact directory, relative to the project directory.
const DEFAULT_ARTIFACT_DIR: &str = ".docs-artifacts";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Documentation configuration (paths are relative strings from TOML).
    docs: DocsConfigRaw,
    /// Validation policy.
    pub validation: ValidationConfig,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw docs configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
struct DocsConfigRaw {
    source_dir: Option<String>,
    artifact_dir: Option<String>,
    components: Option<Vec<String>>,
}

/// Resolved documentation configuration with absolute paths.
#[derive(Debug)]
pub struct DocsConfig {
    /// Root directory holding one subfolder per component type.
    pub source_dir: PathBuf,
    /// Root directory the snapshot is written to.
    pub artifact_dir: PathBuf,
    /// Component types to process, in order.
    pub components: Vec<ComponentType>,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from(DEFAULT_SOURCE_DIR),
            artifact_dir: PathBuf::from(DEFAULT_ARTIFACT_DIR),
            components: ComponentType::ALL.to_vec(),
        }
    }
}

/// Validation policy for derived navigation trees.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ValidationConfig {
    /// Fail when a content file has no `nav_title` instead of omitting it.
    pub require_titles: bool,
    /// Fail when two pages of one component share a route.
    pub unique_routes: bool,
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
        /// Config field path (e.g., "`docs.source_dir`").
        field: String,
        /// Error message (e.g., "${`DOCS_ROOT`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `docsnap.toml` in current directory and parents.
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
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(artifact_dir) = &settings.artifact_dir {
            self.docs_resolved.artifact_dir.clone_from(artifact_dir);
        }
        if let Some(require_titles) = settings.require_titles {
            self.validation.require_titles = require_titles;
        }
        if let Some(unique_routes) = settings.unique_routes {
            self.validation.unique_routes = unique_routes;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            docs: DocsConfigRaw::default(),
            validation: ValidationConfig::default(),
            docs_resolved: DocsConfig {
                source_dir: base.join(DEFAULT_SOURCE_DIR),
                artifact_dir: base.join(DEFAULT_ARTIFACT_DIR),
                components: ComponentType::ALL.to_vec(),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve(config_dir)?;
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Expand environment variable references in path values.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref dir) = self.docs.source_dir {
            self.docs.source_dir = Some(expand::expand_env(dir, "docs.source_dir")?);
        }
        if let Some(ref dir) = self.docs.artifact_dir {
            self.docs.artifact_dir = Some(expand::expand_env(dir, "docs.artifact_dir")?);
        }
        Ok(())
    }

    /// Resolve relative paths against the config directory and validate the
    /// component list.
    fn resolve(&mut self, config_dir: &Path) -> Result<(), ConfigError> {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        let components = match &self.docs.components {
            Some(names) => parse_components(names)?,
            None => ComponentType::ALL.to_vec(),
        };

        self.docs_resolved = DocsConfig {
            source_dir: resolve(self.docs.source_dir.as_deref(), DEFAULT_SOURCE_DIR),
            artifact_dir: resolve(self.docs.artifact_dir.as_deref(), DEFAULT_ARTIFACT_DIR),
            components,
        };

        Ok(())
    }
}

/// Parse and validate a configured component subset.
fn parse_components(names: &[String]) -> Result<Vec<ComponentType>, ConfigError> {
    if names.is_empty() {
        return Err(ConfigError::Validation(
            "docs.components cannot be empty".to_owned(),
        ));
    }

    let mut components = Vec::with_capacity(names.len());
    for name in names {
        let component: ComponentType = name.parse().map_err(|e: UnknownComponentType| {
            ConfigError::Validation(format!(
                "docs.components: {e}, expected one of {:?}",
                ComponentType::names()
            ))
        })?;
        if components.contains(&component) {
            return Err(ConfigError::Validation(format!(
                "docs.components lists \"{name}\" more than once"
            )));
        }
        components.push(component);
    }
    Ok(components)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/test/docs"));
        assert_eq!(
            config.docs_resolved.artifact_dir,
            PathBuf::from("/test/.docs-artifacts")
        );
        assert_eq!(config.docs_resolved.components, ComponentType::ALL.to_vec());
        assert_eq!(config.validation, ValidationConfig::default());
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert!(!config.validation.require_titles);
        assert!(!config.validation.unique_routes);
    }

    #[test]
    fn test_parse_validation_config() {
        let toml = r"
[validation]
require_titles = true
unique_routes = true
";
        let config: Config = toml::from_str(toml).unwrap();
        assert!(config.validation.require_titles);
        assert!(config.validation.unique_routes);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let toml = r#"
[docs]
source = "content"
"#;
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[docs]
source_dir = "website/content"
artifact_dir = "build/snapshot"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve(Path::new("/project")).unwrap();

        assert_eq!(
            config.docs_resolved.source_dir,
            PathBuf::from("/project/website/content")
        );
        assert_eq!(
            config.docs_resolved.artifact_dir,
            PathBuf::from("/project/build/snapshot")
        );
    }

    #[test]
    fn test_resolve_component_subset_keeps_order() {
        let toml = r#"
[docs]
components = ["provisioners", "builders"]
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve(Path::new("/project")).unwrap();

        assert_eq!(
            config.docs_resolved.components,
            vec![ComponentType::Provisioners, ComponentType::Builders]
        );
    }

    #[test]
    fn test_resolve_unknown_component_fails() {
        let toml = r#"
[docs]
components = ["builders", "widgets"]
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        let err = config.resolve(Path::new("/project")).unwrap_err();

        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        assert!(err.to_string().contains("widgets"));
        assert!(err.to_string().contains("post-processors"));
    }

    #[test]
    fn test_resolve_empty_components_fails() {
        let toml = r"
[docs]
components = []
";
        let mut config: Config = toml::from_str(toml).unwrap();
        let err = config.resolve(Path::new("/project")).unwrap_err();

        assert!(err.to_string().contains("cannot be empty"));
    }

    #[test]
    fn test_resolve_duplicate_component_fails() {
        let toml = r#"
[docs]
components = ["builders", "builders"]
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        let err = config.resolve(Path::new("/project")).unwrap_err();

        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            source_dir: Some(PathBuf::from("/custom/docs")),
            require_titles: Some(true),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(
            config.docs_resolved.source_dir,
            PathBuf::from("/custom/docs")
        );
        assert_eq!(
            config.docs_resolved.artifact_dir,
            PathBuf::from("/test/.docs-artifacts")
        ); // Unchanged
        assert!(config.validation.require_titles);
        assert!(!config.validation.unique_routes); // Unchanged
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let err = Config::load(Some(Path::new("/nonexistent/docsnap.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_from_file_resolves_relative_to_config_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("docsnap.toml");
        std::fs::write(
            &path,
            "[docs]\nsource_dir = \"content\"\n\n[validation]\nunique_routes = true\n",
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(
            config.docs_resolved.source_dir,
            temp_dir.path().join("content")
        );
        assert_eq!(
            config.docs_resolved.artifact_dir,
            temp_dir.path().join(".docs-artifacts")
        );
        assert!(config.validation.unique_routes);
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_from_file_invalid_toml() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("docsnap.toml");
        std::fs::write(&path, "[docs\nsource_dir = 1").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_applies_cli_settings_last() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("docsnap.toml");
        std::fs::write(&path, "[validation]\nrequire_titles = true\n").unwrap();
        let settings = CliSettings {
            require_titles: Some(false),
            artifact_dir: Some(PathBuf::from("/tmp/out")),
            ..Default::default()
        };

        let config = Config::load(Some(&path), Some(&settings)).unwrap();

        assert!(!config.validation.require_titles);
        assert_eq!(config.docs_resolved.artifact_dir, PathBuf::from("/tmp/out"));
    }
}
