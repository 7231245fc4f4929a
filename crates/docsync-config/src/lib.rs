//! Configuration management for docsync.
//!
//! Parses `docsync.toml` configuration files with serde and provides
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
//! - `confluence.base_url`
//! - `confluence.user`
//! - `confluence.token`
//! - `confluence.space`
//! - `confluence.root_page_title`
//! - `repository.github_repository`
//! - `repository.default_branch`
//!
//! ## Example
//!
//! ```toml
//! [confluence]
//! base_url = "https://acme.atlassian.net"
//! user = "bot@acme.com"
//! token = "${CONFLUENCE_TOKEN}"
//! space = "DOCS"
//! root_page_title = "Repository docs"
//!
//! [repository]
//! github_repository = "${GITHUB_REPOSITORY}"
//!
//! [sync]
//! ignored_folders = ["vendor", "node_modules"]
//! ```

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override repository root directory.
    pub repo_root: Option<PathBuf>,
    /// Override Confluence space key.
    pub space: Option<String>,
    /// Override title of the page documents are published under.
    pub root_page_title: Option<String>,
    /// Override ignored folders.
    pub ignored_folders: Option<Vec<String>>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "docsync.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Confluence configuration.
    pub confluence: Option<ConfluenceConfig>,
    /// Source repository configuration.
    pub repository: Option<RepositoryConfig>,
    /// File selection and conversion configuration.
    pub sync: SyncConfig,

    /// Resolved repository root (set after loading).
    #[serde(skip)]
    pub repo_root: PathBuf,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Confluence configuration.
#[derive(Debug, Deserialize)]
pub struct ConfluenceConfig {
    /// Confluence site URL (e.g. `https://acme.atlassian.net`).
    pub base_url: String,
    /// Account used for the API (usually an email address).
    pub user: String,
    /// API token of the account.
    pub token: String,
    /// Space key pages are published to.
    pub space: String,
    /// Title of the existing page documents are published under.
    pub root_page_title: String,
}

impl ConfluenceConfig {
    /// Validate that all required fields are properly set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any field is empty or has invalid format.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.base_url, "confluence.base_url")?;
        require_http_url(&self.base_url, "confluence.base_url")?;
        require_non_empty(&self.user, "confluence.user")?;
        require_non_empty(&self.token, "confluence.token")?;
        require_non_empty(&self.space, "confluence.space")?;
        require_non_empty(&self.root_page_title, "confluence.root_page_title")?;
        Ok(())
    }
}

/// Source repository configuration.
#[derive(Debug, Deserialize)]
pub struct RepositoryConfig {
    /// GitHub repository as `owner/name`.
    pub github_repository: String,
    /// Branch source links point at.
    #[serde(default = "default_branch")]
    pub default_branch: String,
    /// Display name used in page titles (defaults to the repository name).
    #[serde(default)]
    pub name: Option<String>,
    /// Repository root, relative to the config file.
    #[serde(default)]
    root: Option<String>,
}

impl RepositoryConfig {
    /// Name used as the first segment of every page title.
    #[must_use]
    pub fn repo_name(&self) -> &str {
        if let Some(name) = &self.name {
            return name;
        }
        self.github_repository
            .split_once('/')
            .map_or(self.github_repository.as_str(), |(_, name)| name)
    }

    /// URL prefix of source files, e.g. `https://github.com/octocat/hello/blob/HEAD/`.
    #[must_use]
    pub fn external_root_url(&self) -> String {
        format!(
            "https://github.com/{}/blob/{}/",
            self.github_repository, self.default_branch
        )
    }

    /// Validate that all required fields are properly set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any field is empty or has invalid format.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.github_repository, "repository.github_repository")?;
        let valid_shape = self
            .github_repository
            .split_once('/')
            .is_some_and(|(owner, name)| {
                !owner.is_empty() && !name.is_empty() && !name.contains('/')
            });
        if !valid_shape {
            return Err(ConfigError::Validation(
                "repository.github_repository must look like owner/name".to_owned(),
            ));
        }
        require_non_empty(&self.default_branch, "repository.default_branch")?;
        if let Some(name) = &self.name {
            require_non_empty(name, "repository.name")?;
        }
        Ok(())
    }
}

fn default_branch() -> String {
    "HEAD".to_owned()
}

/// File selection and conversion configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Extensions of files to publish, without the dot.
    pub extensions: Vec<String>,
    /// Folders whose files are never published, relative to the repository root.
    pub ignored_folders: Vec<String>,
    /// Pandoc Lua filters applied to reStructuredText files.
    pub rst_filters: Vec<PathBuf>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["md".to_owned(), "rst".to_owned()],
            ignored_folders: Vec::new(),
            rst_filters: Vec::new(),
        }
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
        /// Config field path (e.g., "`confluence.token`").
        field: String,
        /// Error message (e.g., "${`CONFLUENCE_TOKEN`} not set").
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

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `docsync.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values. The repository
    /// root is then made absolute against the current directory.
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
        config.repo_root = std::path::absolute(&config.repo_root)?;

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(repo_root) = &settings.repo_root {
            self.repo_root.clone_from(repo_root);
        }
        if let Some(confluence) = &mut self.confluence {
            if let Some(space) = &settings.space {
                confluence.space.clone_from(space);
            }
            if let Some(title) = &settings.root_page_title {
                confluence.root_page_title.clone_from(title);
            }
        }
        if let Some(ignored) = &settings.ignored_folders {
            self.sync.ignored_folders.clone_from(ignored);
        }
    }

    /// Get validated Confluence configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the section is missing or invalid.
    pub fn require_confluence(&self) -> Result<&ConfluenceConfig, ConfigError> {
        let conf = self.confluence.as_ref().ok_or_else(|| {
            ConfigError::Validation("[confluence] section required in config".into())
        })?;
        conf.validate()?;
        Ok(conf)
    }

    /// Get validated repository configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the section is missing or invalid.
    pub fn require_repository(&self) -> Result<&RepositoryConfig, ConfigError> {
        let repo = self.repository.as_ref().ok_or_else(|| {
            ConfigError::Validation("[repository] section required in config".into())
        })?;
        repo.validate()?;
        Ok(repo)
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

    /// Create default config rooted at the current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config rooted at the given directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            confluence: None,
            repository: None,
            sync: SyncConfig::default(),
            repo_root: base.to_path_buf(),
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        config.resolve_paths(config_dir(path));
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Sections are only validated when a command requires them, see
    /// [`Config::require_confluence`] and [`Config::require_repository`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sync.extensions.is_empty() {
            return Err(ConfigError::Validation("sync.extensions cannot be empty".to_owned()));
        }
        if let Some(ext) = self
            .sync
            .extensions
            .iter()
            .find(|ext| ext.is_empty() || ext.starts_with('.'))
        {
            return Err(ConfigError::Validation(format!(
                "sync.extensions entries must be non-empty and without a leading dot, got {ext:?}"
            )));
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref mut confluence) = self.confluence {
            confluence.base_url = expand::expand_env(&confluence.base_url, "confluence.base_url")?;
            confluence.user = expand::expand_env(&confluence.user, "confluence.user")?;
            confluence.token = expand::expand_env(&confluence.token, "confluence.token")?;
            confluence.space = expand::expand_env(&confluence.space, "confluence.space")?;
            confluence.root_page_title =
                expand::expand_env(&confluence.root_page_title, "confluence.root_page_title")?;
        }

        if let Some(ref mut repository) = self.repository {
            repository.github_repository = expand::expand_env(
                &repository.github_repository,
                "repository.github_repository",
            )?;
            repository.default_branch =
                expand::expand_env(&repository.default_branch, "repository.default_branch")?;
        }

        Ok(())
    }

    /// Resolve relative paths against the config file directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.repo_root = match self.repository.as_ref().and_then(|r| r.root.as_deref()) {
            Some(root) => config_dir.join(root),
            None => config_dir.to_path_buf(),
        };
        self.sync.rst_filters = self
            .sync
            .rst_filters
            .iter()
            .map(|filter| config_dir.join(filter))
            .collect();
    }
}

/// Directory holding the config file, `.` for a bare file name.
fn config_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    }
}
