//! Configuration management for Webtree.
//!
//! Parses `webtree.toml` configuration files with serde and provides
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
//! - `parse.language`
//! - `documents.dir`
//! - every value of `[labels]`

mod expand;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the display language.
    pub language: Option<String>,
    /// Override the invalid-page policy.
    pub on_invalid_page: Option<InvalidPagePolicy>,
    /// Override the document directory.
    pub documents_dir: Option<PathBuf>,
    /// Override pretty-printed output.
    pub pretty: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "webtree.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Interpretation options.
    pub parse: ParseConfig,
    /// Stable identifiers of reserved labels, keyed by label text.
    pub labels: BTreeMap<String, String>,
    /// Document store configuration (paths are relative strings from TOML).
    documents: DocumentsConfigRaw,
    /// Output formatting.
    pub output: OutputConfig,

    /// Resolved document store configuration (set after loading).
    #[serde(skip)]
    pub documents_resolved: DocumentsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// What to do with a page or segment that lacks its routing field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvalidPagePolicy {
    /// Drop the page with a warning.
    #[default]
    Skip,
    /// Fail the whole parse.
    Abort,
}

/// Interpretation options.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ParseConfig {
    /// Language code picked from multi-language text.
    pub language: String,
    /// Invalid-page policy.
    pub on_invalid_page: InvalidPagePolicy,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            language: "eng".to_owned(),
            on_invalid_page: InvalidPagePolicy::Skip,
        }
    }
}

/// Raw documents configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocumentsConfigRaw {
    dir: Option<String>,
}

/// Resolved document store configuration with absolute paths.
#[derive(Debug, Default)]
pub struct DocumentsConfig {
    /// Directory holding `<uuid>.json` documents, if any.
    pub dir: Option<PathBuf>,
}

/// Output formatting.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
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
        /// Config field path (e.g., "`documents.dir`").
        field: String,
        /// Error message (e.g., "${`DOCS_DIR`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `webtree.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// an environment variable is missing, or validation fails.
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
        if let Some(language) = &settings.language {
            self.parse.language.clone_from(language);
        }
        if let Some(policy) = settings.on_invalid_page {
            self.parse.on_invalid_page = policy;
        }
        if let Some(dir) = &settings.documents_dir {
            self.documents_resolved.dir = Some(dir.clone());
        }
        if let Some(pretty) = settings.pretty {
            self.output.pretty = pretty;
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
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_parse()?;
        self.validate_labels()?;
        Ok(())
    }

    fn validate_parse(&self) -> Result<(), ConfigError> {
        let language = &self.parse.language;
        require_non_empty(language, "parse.language")?;
        if !language.chars().all(|c| c.is_ascii_alphabetic() || c == '-') {
            return Err(ConfigError::Validation(format!(
                "parse.language must be a language code, got \"{language}\""
            )));
        }
        Ok(())
    }

    fn validate_labels(&self) -> Result<(), ConfigError> {
        for (label, uuid) in &self.labels {
            require_non_empty(label, "labels key")?;
            require_non_empty(uuid, &format!("labels.{label}"))?;
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.parse.language = expand::expand_env(&self.parse.language, "parse.language")?;

        if let Some(ref dir) = self.documents.dir {
            self.documents.dir = Some(expand::expand_env(dir, "documents.dir")?);
        }

        for (label, uuid) in &mut self.labels {
            *uuid = expand::expand_env(uuid, &format!("labels.{label}"))?;
        }

        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.documents_resolved = DocumentsConfig {
            dir: self.documents.dir.as_deref().map(|dir| config_dir.join(dir)),
        };
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.parse.language, "eng");
        assert_eq!(config.parse.on_invalid_page, InvalidPagePolicy::Skip);
        assert!(config.labels.is_empty());
        assert!(config.documents_resolved.dir.is_none());
        assert!(config.output.pretty);
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.parse.language, "eng");
        assert!(config.output.pretty);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[parse]
language = "ita"
on_invalid_page = "abort"

[labels]
presentation = "0c7b-presentation"
component = "0c7b-component"

[documents]
dir = "documents"

[output]
pretty = false
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.parse.language, "ita");
        assert_eq!(config.parse.on_invalid_page, InvalidPagePolicy::Abort);
        assert_eq!(
            config.labels.get("presentation").map(String::as_str),
            Some("0c7b-presentation")
        );
        assert_eq!(config.labels.len(), 2);
        assert!(!config.output.pretty);
    }

    #[test]
    fn test_unknown_policy_rejected() {
        let toml = r#"
[parse]
on_invalid_page = "ignore"
"#;
        assert!(toml::from_str::<Config>(toml).is_err());
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[documents]
dir = "store/docs"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));
        assert_eq!(
            config.documents_resolved.dir,
            Some(PathBuf::from("/project/store/docs"))
        );
    }

    #[test]
    fn test_no_documents_section() {
        let mut config: Config = toml::from_str("").unwrap();
        config.resolve_paths(Path::new("/project"));
        assert_eq!(config.documents_resolved.dir, None);
    }

    #[test]
    fn test_apply_cli_settings_multiple() {
        let mut config = Config::default();
        config.apply_cli_settings(&CliSettings {
            language: Some("deu".to_owned()),
            on_invalid_page: Some(InvalidPagePolicy::Abort),
            documents_dir: Some(PathBuf::from("/tmp/docs")),
            pretty: Some(false),
        });
        assert_eq!(config.parse.language, "deu");
        assert_eq!(config.parse.on_invalid_page, InvalidPagePolicy::Abort);
        assert_eq!(
            config.documents_resolved.dir,
            Some(PathBuf::from("/tmp/docs"))
        );
        assert!(!config.output.pretty);
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default();
        config.apply_cli_settings(&CliSettings::default());
        assert_eq!(config.parse.language, "eng");
        assert!(config.output.pretty);
    }

    #[test]
    fn test_expand_env_vars() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("WT_TEST_LANG", "fra");
            std::env::set_var("WT_TEST_PRESENTATION_ID", "u-pres");
        }

        let toml = r#"
[parse]
language = "${WT_TEST_LANG}"

[labels]
presentation = "${WT_TEST_PRESENTATION_ID}"

[documents]
dir = "${WT_TEST_DOCS_DIR:-documents}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        assert_eq!(config.parse.language, "fra");
        assert_eq!(config.labels["presentation"], "u-pres");
        assert_eq!(config.documents.dir.as_deref(), Some("documents"));

        unsafe {
            std::env::remove_var("WT_TEST_LANG");
            std::env::remove_var("WT_TEST_PRESENTATION_ID");
        }
    }

    #[test]
    fn test_expand_env_vars_missing_required_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("WT_MISSING_VAR_CONFIG_TEST");
        }

        let toml = r#"
[labels]
component = "${WT_MISSING_VAR_CONFIG_TEST}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        let err = config.expand_env_vars().unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("WT_MISSING_VAR_CONFIG_TEST"));
        assert!(err.to_string().contains("labels.component"));
    }

    #[test]
    fn test_validate_default_config_passes() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_language_empty() {
        let mut config = Config::default();
        config.parse.language = "  ".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("parse.language cannot be empty"));
    }

    #[test]
    fn test_validate_language_format() {
        let mut config = Config::default();
        config.parse.language = "en_GB".to_owned();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_label_id_empty() {
        let mut config = Config::default();
        config.labels.insert("presentation".to_owned(), String::new());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("labels.presentation"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(
            &path,
            r#"
[parse]
language = "ita"

[documents]
dir = "docs"
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.parse.language, "ita");
        assert_eq!(config.documents_resolved.dir, Some(dir.path().join("docs")));
        assert_eq!(config.config_path.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn test_load_applies_cli_settings_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[output]\npretty = true\n").unwrap();

        let settings = CliSettings {
            pretty: Some(false),
            ..CliSettings::default()
        };
        let config = Config::load(Some(&path), Some(&settings)).unwrap();
        assert!(!config.output.pretty);
    }

    #[test]
    fn test_load_rejects_invalid_cli_language() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "").unwrap();

        let settings = CliSettings {
            language: Some(String::new()),
            ..CliSettings::default()
        };
        assert!(Config::load(Some(&path), Some(&settings)).is_err());
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(ref p) if p == &path));
    }

    #[test]
    fn test_load_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[parse\nlanguage = ").unwrap();
        assert!(matches!(
            Config::load(Some(&path), None),
            Err(ConfigError::Parse(_))
        ));
    }
}
