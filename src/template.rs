//! Named templates and the registry they are looked up in.

use crate::error::{Error, Result};
use crate::renderer::TemplateRenderer;
use crate::value::Settings;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// A template file registered under a name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Template {
    /// Name the template is referenced by
    pub name: String,
    /// Path of the template source
    pub location: PathBuf,
}

impl Template {
    pub fn new<N: Into<String>, P: Into<PathBuf>>(name: N, location: P) -> Self {
        Self { name: name.into(), location: location.into() }
    }

    /// Reads the template source and renders it with `settings`.
    ///
    /// The source is read again on every call.
    ///
    /// # Errors
    /// * `Error::TemplateReadError` if the source cannot be read
    /// * any rendering error from `engine`
    pub fn render(&self, engine: &dyn TemplateRenderer, settings: &Settings) -> Result<String> {
        debug!("Reading template '{}' from {}", self.name, self.location.display());
        let source =
            fs::read_to_string(&self.location).map_err(|source| Error::TemplateReadError {
                name: self.name.clone(),
                location: self.location.clone(),
                source,
            })?;

        engine.render(&source, settings)
    }
}

/// Finds the first template called `name`.
///
/// # Errors
/// * `Error::TemplateNotFound` if no template has that name
pub fn find_by_name<'a>(templates: &'a [Template], name: &str) -> Result<&'a Template> {
    templates
        .iter()
        .find(|template| template.name == name)
        .ok_or_else(|| Error::TemplateNotFound { name: name.to_string() })
}
