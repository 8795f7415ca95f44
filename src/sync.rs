//! Sync orchestration: renders every template configured for every project
//! and writes the results into the project directories.

use crate::config::{ConfigData, ProjectConfig, TemplateSetting};
use crate::error::{Error, Result};
use crate::renderer::TemplateRenderer;
use crate::template::find_by_name;
use indexmap::IndexMap;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// A rendered file waiting to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncedFile {
    /// Destination path of the file
    pub target: PathBuf,
    /// Rendered content
    pub content: String,
}

/// Renders everything `config` asks for without touching the projects.
///
/// Project templates are rendered before globals. If two settings render to
/// the same destination the later one wins.
///
/// # Errors
/// Stops at the first failure:
/// * `Error::TemplateNotFound` if a setting names an unknown template
/// * `Error::GlobalNotFound` if a project names an unknown global
/// * any template read or render error
pub fn plan_sync(config: &ConfigData, engine: &dyn TemplateRenderer) -> Result<Vec<SyncedFile>> {
    let mut files: IndexMap<PathBuf, String> = IndexMap::new();

    for project in &config.projects {
        debug!("Rendering templates for project '{}'", project.name);

        for setting in &project.template_settings {
            let (target, content) = render_setting(config, engine, project, setting)?;
            files.insert(target, content);
        }

        for global in &project.globals {
            let setting = config.global_templates.get(global).ok_or_else(|| {
                Error::GlobalNotFound { project: project.name.clone(), global: global.clone() }
            })?;
            let (target, content) = render_setting(config, engine, project, setting)?;
            files.insert(target, content);
        }
    }

    Ok(files.into_iter().map(|(target, content)| SyncedFile { target, content }).collect())
}

fn render_setting(
    config: &ConfigData,
    engine: &dyn TemplateRenderer,
    project: &ProjectConfig,
    setting: &TemplateSetting,
) -> Result<(PathBuf, String)> {
    let template = find_by_name(&config.templates, &setting.name)?;
    let content = template.render(engine, &setting.settings)?;
    let target = project.location.join(&setting.location);
    debug!("Rendered '{}' for {}", template.name, target.display());
    Ok((target, content))
}

/// Renders and writes every configured file.
///
/// Nothing is written unless every template rendered successfully. Writes are
/// not rolled back: if one fails, files written before it stay on disk.
///
/// # Returns
/// * `Result<Vec<PathBuf>>` - Paths of the written files
pub fn sync(config: &ConfigData, engine: &dyn TemplateRenderer) -> Result<Vec<PathBuf>> {
    let files = plan_sync(config, engine)?;

    let mut written = Vec::with_capacity(files.len());
    for file in files {
        write_file(&file.target, &file.content)?;
        println!("Synced file at {}", file.target.display());
        written.push(file.target);
    }
    Ok(written)
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    let write_error = |source| Error::WriteError { path: path.to_path_buf(), source };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_error)?;
    }
    fs::write(path, content).map_err(write_error)
}
