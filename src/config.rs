//! Configuration handling for tacklebox.
//! The config lists the known templates, the projects to keep in sync and the
//! settings every project renders its templates with.

use crate::error::{Error, Result};
use crate::template::Template;
use crate::value::Settings;
use indexmap::IndexMap;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Supported configuration file names, in lookup order
pub const CONFIG_FILES: [&str; 3] = ["config.json", "config.yml", "config.yaml"];

/// Name of the config directory created in the home directory
pub const CONFIG_DIR_NAME: &str = ".tacklebox";

/// Contents written when no configuration file exists yet
pub const DEFAULT_CONFIG: &str = "{\n    \"Templates\": []\n}";

/// Top-level configuration.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ConfigData {
    /// Template settings shared between projects, keyed by global name
    pub global_templates: IndexMap<String, TemplateSetting>,
    /// Projects to keep in sync
    pub projects: Vec<ProjectConfig>,
    /// Templates available to projects
    pub templates: Vec<Template>,
}

/// A project directory and the files rendered into it.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ProjectConfig {
    /// Names of global template settings applied to this project
    pub globals: Vec<String>,
    /// Unique project name
    pub name: String,
    /// Root directory of the project
    pub location: PathBuf,
    /// Templates to render for this project
    pub template_settings: Vec<TemplateSetting>,
}

/// One template rendered to one destination with one set of settings.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TemplateSetting {
    /// Name of the template to render
    pub name: String,
    /// Destination, relative to the project root
    pub location: PathBuf,
    /// Settings to render the template with
    pub settings: Settings,
}

/// Returns the default configuration directory, `~/.tacklebox`.
///
/// # Errors
/// * `Error::ConfigError` if the home directory cannot be determined
pub fn default_config_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(CONFIG_DIR_NAME))
        .ok_or_else(|| Error::ConfigError("could not determine the home directory".to_string()))
}

/// Loads the configuration from `config_dir`, creating the directory and a
/// default `config.json` when there is none yet.
///
/// # Arguments
/// * `config_dir` - Directory holding the configuration file
///
/// # Returns
/// * `Result<ConfigData>` - Parsed configuration
///
/// # Errors
/// * `Error::IoError` if the directory or file cannot be created or read
/// * `Error::ConfigError` if the content is neither valid JSON nor YAML
pub fn load_config<P: AsRef<Path>>(config_dir: P) -> Result<ConfigData> {
    let config_dir = config_dir.as_ref();
    fs::create_dir_all(config_dir)?;

    let content = match read_config_file(config_dir, &CONFIG_FILES)? {
        Some(content) => content,
        None => initialize_config_file(config_dir)?,
    };

    parse_config(&content)
}

/// Reads the first configuration file found in `config_dir`.
fn read_config_file(config_dir: &Path, config_files: &[&str]) -> Result<Option<String>> {
    for file in config_files {
        let config_path = config_dir.join(file);
        if config_path.exists() {
            debug!("Loading configuration from {}", config_path.display());
            return Ok(Some(fs::read_to_string(&config_path)?));
        }
    }
    Ok(None)
}

/// Writes the default configuration file and returns its content.
pub fn initialize_config_file<P: AsRef<Path>>(config_dir: P) -> Result<String> {
    let config_path = config_dir.as_ref().join(CONFIG_FILES[0]);
    fs::write(&config_path, DEFAULT_CONFIG)?;
    info!("Created configuration file {}", config_path.display());
    Ok(DEFAULT_CONFIG.to_string())
}

/// Parses configuration content, trying JSON first and YAML second.
///
/// # Errors
/// * `Error::ConfigError` if parsing fails
pub fn parse_config(content: &str) -> Result<ConfigData> {
    match serde_json::from_str(content) {
        Ok(config) => Ok(config),
        Err(_) => serde_yaml::from_str(content)
            .map_err(|e| Error::ConfigError(format!("Invalid configuration format: {e}"))),
    }
}

impl ConfigData {
    /// Writes the configuration as indented JSON to `config_dir/config.json`.
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<PathBuf> {
        let config_path = config_dir.as_ref().join(CONFIG_FILES[0]);

        let mut buffer = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        self.serialize(&mut serializer)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize configuration: {e}")))?;

        fs::write(&config_path, buffer)?;
        info!("Wrote config to file {}", config_path.display());
        Ok(config_path)
    }

    /// Adds a project for every immediate subdirectory of `dir`.
    ///
    /// `dir` is canonicalized first, so `.` and `..` never end up in a stored
    /// location. Directories already registered as a project location are
    /// skipped.
    ///
    /// # Returns
    /// * `Result<usize>` - Number of projects added
    pub fn config_dirs<P: AsRef<Path>>(&mut self, dir: P) -> Result<usize> {
        let dir = fs::canonicalize(dir.as_ref())?;
        let mut added = 0;

        for entry in WalkDir::new(&dir).min_depth(1).max_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| Error::IoError(e.into()))?;
            if !entry.file_type().is_dir() {
                continue;
            }

            let location = entry.path().to_path_buf();
            if self.projects.iter().any(|project| project.location == location) {
                debug!("Skipping {}, already configured", location.display());
                continue;
            }

            let name = entry.file_name().to_string_lossy().into_owned();
            debug!("Adding project '{}' at {}", name, location.display());
            self.projects.push(ProjectConfig { name, location, ..Default::default() });
            added += 1;
        }

        Ok(added)
    }
}
