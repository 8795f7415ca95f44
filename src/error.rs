//! Error handling for the tacklebox application.
//! Defines the error type and result alias used by the rendering engine
//! and by the sync workflow around it.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Custom error types for tacklebox operations.
///
/// Engine errors (`MalformedDirective`, `TypeMismatch`, `UnsupportedRenderType`)
/// are deterministic content errors: they abort the current render and are
/// never retried.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// The source text of a template could not be loaded
    #[error("Failed to read template '{name}' at '{}': {source}.", .location.display())]
    TemplateReadError {
        name: String,
        location: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A directive span does not match the directive grammar
    #[error("Malformed directive '{directive}': {reason}.")]
    MalformedDirective { directive: String, reason: String },

    /// The value bound to a variable has the wrong type for the directive
    #[error("Type mismatch for '{variable}': expected {expected}, found {found}.")]
    TypeMismatch { variable: String, expected: &'static str, found: &'static str },

    /// The value bound to a variable cannot be rendered as text
    #[error("Cannot render '{variable}': unsupported value type {found}.")]
    UnsupportedRenderType { variable: String, found: &'static str },

    /// No template with the given name is registered
    #[error("Template '{name}' not found.")]
    TemplateNotFound { name: String },

    /// A project references a global template setting that does not exist
    #[error("Project '{project}' configured with global '{global}', but no such global exists.")]
    GlobalNotFound { project: String, global: String },

    /// Represents errors that occur during configuration parsing or processing
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// A rendered file could not be written to its destination
    #[error("Failed to write '{}': {source}.", .path.display())]
    WriteError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A directive pattern failed to compile
    #[error("Pattern error: {0}.")]
    PatternError(#[from] regex::Error),
}

/// Convenience type alias for Results with tacklebox's Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
