//! Configuration handling for Mason templates.
//! This module provides functionality for loading template configuration
//! files, with built-in defaults matching the stock template layout.

use crate::error::{Error, Result};
use directories::UserDirs;
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Supported configuration file names
pub const CONFIG_FILES: [&str; 3] = ["mason.json", "mason.yml", "mason.yaml"];

/// Directory created under the desktop (or home) when no workspace root is
/// configured
pub const DEFAULT_WORKSPACE_DIR: &str = "mason-apps";

/// The placeholder tokens a template spells its application name with.
///
/// Exactly one token of each form exists per template.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct TemplateTokens {
    /// Identifier form, used in module and file names
    pub snake: String,
    /// Slug form, used in URLs and project names
    pub kebab: String,
    /// Human-readable form, used in prose and titles
    pub display: String,
}

impl Default for TemplateTokens {
    fn default() -> Self {
        Self {
            snake: "demo_app22_67948".to_string(),
            kebab: "demo-app22-67948".to_string(),
            display: "Demo App22".to_string(),
        }
    }
}

/// Template configuration, deserialized from the first config file found in
/// the template root. Every field has a default, so templates without a
/// config file work out of the box.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Placeholder tokens to replace
    pub tokens: TemplateTokens,

    /// Entry names never copied. Literal names match exactly; patterns
    /// starting with `*` match name suffixes. A matched directory is pruned
    /// with its whole subtree.
    pub exclude: Vec<String>,

    /// File extensions (without the dot, case-insensitive) copied
    /// byte-for-byte with no text substitution
    pub binary_extensions: Vec<String>,

    /// Workspace directory generated apps default into; falls back to
    /// the desktop (or home) when unset
    pub output_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tokens: TemplateTokens::default(),
            exclude: [
                ".git",
                "__pycache__",
                "node_modules",
                ".DS_Store",
                ".env",
                "README.md",
                "*.pyc",
            ]
            .map(String::from)
            .to_vec(),
            binary_extensions: [
                "png", "jpg", "jpeg", "gif", "ico", "pdf", "zip", "tar", "gz", "bz2", "xz",
                "7z", "rar", "dmg", "exe", "dll", "so", "dylib", "a", "o", "class", "jar",
                "war", "ear", "dex", "apk", "ipa", "keystore", "p12", "pem", "crt", "key",
            ]
            .map(String::from)
            .to_vec(),
            output_root: None,
        }
    }
}

impl Config {
    /// Resolves the workspace directory new apps are placed under when the
    /// user gives no explicit output directory.
    ///
    /// # Errors
    /// * `Error::ConfigError` if no home directory can be determined
    pub fn workspace_root(&self) -> Result<PathBuf> {
        if let Some(root) = &self.output_root {
            return Ok(root.clone());
        }

        let dirs = UserDirs::new().ok_or_else(|| {
            Error::ConfigError("cannot determine the user's home directory".to_string())
        })?;
        let base = dirs
            .desktop_dir()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| dirs.home_dir().to_path_buf());

        Ok(base.join(DEFAULT_WORKSPACE_DIR))
    }
}

/// Parses configuration content, trying JSON first and falling back to YAML.
///
/// # Arguments
/// * `content` - Raw configuration content as string
///
/// # Returns
/// * `Result<Config>` - Parsed configuration
///
/// # Errors
/// * `Error::ConfigError` if the content is neither valid JSON nor YAML
pub fn parse_config(content: &str) -> Result<Config> {
    match serde_json::from_str(content) {
        Ok(config) => Ok(config),
        Err(_) => serde_yaml::from_str(content)
            .map_err(|e| Error::ConfigError(format!("Invalid configuration format: {}", e))),
    }
}

/// Loads configuration from a template directory, trying multiple file
/// formats. Supports: mason.json, mason.yml, mason.yaml.
///
/// # Arguments
/// * `template_root` - Directory containing the template configuration
///
/// # Returns
/// * `Result<Config>` - Parsed configuration, or the defaults when no config
///   file exists
pub fn get_config<P: AsRef<Path>>(template_root: P) -> Result<Config> {
    for file in CONFIG_FILES {
        let config_path = template_root.as_ref().join(file);
        if config_path.exists() {
            debug!("Loading configuration from {}", config_path.display());
            let content = std::fs::read_to_string(&config_path).map_err(Error::IoError)?;
            return parse_config(&content);
        }
    }

    debug!("No configuration file found, using defaults");
    Ok(Config::default())
}
