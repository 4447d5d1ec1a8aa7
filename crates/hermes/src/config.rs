//! Configuration for handler resolution.
//!
//! The defaults encode the usual mediator conventions: handlers implement
//! `IRequestHandler<...>` or expose a `Handle(...)` method, commands are
//! handled in a `*Domain` project under a `CommandHandlers` folder, requests
//! and queries in a `*Application` project under `RequestHandlers` or
//! `QueryHandlers`.
//!
//! A workspace may override any of it in `.hermes/config.yaml`:
//!
//! ```yaml
//! interface-marker: IRequestHandler
//! method-marker: Handle
//! command:
//!   module-suffix: domain
//!   name-suffixes: [command]
//!   folders: [commandhandler, commandhandlers]
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Name of the per-workspace configuration directory
pub const CONFIG_DIR_NAME: &str = ".hermes";

/// Name of the configuration file
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Default handler-interface marker
pub const DEFAULT_INTERFACE_MARKER: &str = "IRequestHandler";

/// Default handler method name
pub const DEFAULT_METHOD_MARKER: &str = "Handle";

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct HermesConfig {
    /// Generic interface whose first type argument names the handled type
    pub interface_marker: String,

    /// Method name whose parameters name the handled type
    pub method_marker: String,

    /// Where command handlers live
    pub command: StyleConfig,

    /// Where request and query handlers live
    pub request: StyleConfig,
}

/// Naming conventions for one handler style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct StyleConfig {
    /// The module serving this style is the one whose name ends with this
    pub module_suffix: String,

    /// Requested names ending with any of these select this style
    pub name_suffixes: Vec<String>,

    /// A unit belongs to this style if its path contains any of these
    pub folders: Vec<String>,
}

impl StyleConfig {
    /// Default command-style conventions.
    #[must_use]
    pub fn command() -> Self {
        Self {
            module_suffix: "domain".to_string(),
            name_suffixes: vec!["command".to_string()],
            folders: vec!["commandhandler".to_string(), "commandhandlers".to_string()],
        }
    }

    /// Default request/query-style conventions.
    #[must_use]
    pub fn request() -> Self {
        Self {
            module_suffix: "application".to_string(),
            name_suffixes: vec!["request".to_string(), "query".to_string()],
            folders: vec![
                "requesthandler".to_string(),
                "requesthandlers".to_string(),
                "queryhandler".to_string(),
                "queryhandlers".to_string(),
            ],
        }
    }

    fn normalize(&mut self) {
        self.module_suffix = self.module_suffix.trim().to_lowercase();
        for term in self.name_suffixes.iter_mut().chain(self.folders.iter_mut()) {
            *term = term.trim().to_lowercase();
        }
    }

    fn validate(&self, style: &str) -> Result<()> {
        if self.module_suffix.is_empty() {
            return Err(Error::Config(format!("{style}.module-suffix must not be empty")));
        }
        if self.name_suffixes.is_empty() || self.name_suffixes.iter().any(String::is_empty) {
            return Err(Error::Config(format!(
                "{style}.name-suffixes must list at least one non-empty suffix"
            )));
        }
        if self.folders.is_empty() || self.folders.iter().any(String::is_empty) {
            return Err(Error::Config(format!(
                "{style}.folders must list at least one non-empty folder name"
            )));
        }
        Ok(())
    }
}

impl Default for HermesConfig {
    fn default() -> Self {
        Self {
            interface_marker: DEFAULT_INTERFACE_MARKER.to_string(),
            method_marker: DEFAULT_METHOD_MARKER.to_string(),
            command: StyleConfig::command(),
            request: StyleConfig::request(),
        }
    }
}

impl HermesConfig {
    /// Parse configuration from YAML text.
    ///
    /// Missing keys take their defaults. Vocabulary terms are lower-cased and
    /// the result is validated.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let mut config: Self =
            serde_yaml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content).map_err(|e| match e {
            Error::Config(msg) => Error::Config(format!("{}: {msg}", path.display())),
            other => other,
        })
    }

    /// Load the configuration that applies to a workspace.
    ///
    /// An explicit path wins; otherwise `<root>/.hermes/config.yaml` is used
    /// if present, and the defaults if not.
    pub fn discover(workspace_root: &Path, explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let default_path = Self::default_path(workspace_root);
        if default_path.is_file() {
            tracing::debug!(path = %default_path.display(), "Loading workspace configuration");
            return Self::load(&default_path);
        }
        Ok(Self::default())
    }

    /// Where a workspace's configuration file lives.
    #[must_use]
    pub fn default_path(workspace_root: &Path) -> PathBuf {
        workspace_root.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| Error::Config(format!("YAML error: {e}")))
    }

    /// Check markers and vocabularies are usable.
    pub fn validate(&self) -> Result<()> {
        if self.interface_marker.trim().is_empty() {
            return Err(Error::Config("interface-marker must not be empty".to_string()));
        }
        if self.method_marker.trim().is_empty() {
            return Err(Error::Config("method-marker must not be empty".to_string()));
        }
        self.command.validate("command")?;
        self.request.validate("request")
    }

    fn normalize(&mut self) {
        self.interface_marker = self.interface_marker.trim().to_string();
        self.method_marker = self.method_marker.trim().to_string();
        self.command.normalize();
        self.request.normalize();
    }
}
