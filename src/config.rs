use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::tags::NamespaceRegistry;

/// Top-level configuration for the tagconv tools.
///
/// Declares the custom XMP namespaces to register before any XMP key is
/// resolved, and how results are printed.
///
/// # Loading
///
/// ```rust,no_run
/// use tagconv::config::{Config, NamespaceConfig};
///
/// // From a JSON file
/// let config = Config::load(Some("config.json".as_ref())).unwrap();
///
/// // Or use defaults and customize
/// let mut config = Config::default();
/// config.xmp_namespaces.push(NamespaceConfig {
///     name: "http://example.com/myns/".into(),
///     prefix: "myns".into(),
/// });
/// let registry = config.namespace_registry().unwrap();
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Custom XMP namespaces, registered in order.
    #[serde(default)]
    pub xmp_namespaces: Vec<NamespaceConfig>,
    /// Output behavior.
    #[serde(default)]
    pub output: OutputConfig,
}

/// A custom XMP namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceConfig {
    /// Namespace URI; must end with `/`.
    pub name: String,
    /// Prefix used in keys (`Xmp.<prefix>.<property>`).
    pub prefix: String,
}

/// Output configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Print results as JSON instead of text.
    pub json: bool,
    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl Config {
    /// Resolve the config file path, next to the executable.
    pub fn config_path() -> Result<PathBuf> {
        let exe_path = std::env::current_exe().context("Failed to get executable path")?;
        let exe_dir = exe_path
            .parent()
            .context("Failed to get executable directory")?;
        Ok(exe_dir.join("config.json"))
    }

    /// Load config from the given path, or from the default location.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path()?,
        };

        if !config_path.exists() {
            log::warn!(
                "Config file not found at {}. Using defaults.",
                config_path.display()
            );
            return Ok(Self::default());
        }

        let contents =
            std::fs::read_to_string(&config_path).context("Failed to read config file")?;
        let config: Config =
            serde_json::from_str(&contents).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Save config to the given path, or to the default location.
    pub fn save(&self, path: Option<&Path>) -> Result<()> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path()?,
        };

        let contents = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(&config_path, contents).context("Failed to write config file")?;
        log::info!("Config saved to {}", config_path.display());
        Ok(())
    }

    /// Build a namespace registry with the configured namespaces registered.
    pub fn namespace_registry(&self) -> Result<NamespaceRegistry> {
        let mut registry = NamespaceRegistry::new();
        for ns in &self.xmp_namespaces {
            registry
                .register(&ns.name, &ns.prefix)
                .with_context(|| format!("Failed to register XMP namespace {:?}", ns.prefix))?;
        }
        Ok(registry)
    }
}
