//! tacklebox keeps shared files (licenses, CI configs, editor settings) in
//! sync across many projects. Each file is rendered from a template written
//! in a small directive language:
//!
//! - `{% render(name) %}` substitutes the value of `name`
//! - `{% if(flag) "yes" ? "no" %}` picks one of two quoted texts
//! - `{% switch(name) %}` currently substitutes like `render`
//!
//! Everything outside a directive is copied to the output unchanged.

/// Span assembly for rendered output
pub mod assembler;

/// Command-line interface module for the tacklebox application
pub mod cli;

/// Configuration handling
/// Supports JSON and YAML formats (config.json, config.yml, config.yaml)
pub mod config;

/// Directive grammar: locating and parsing `{% ... %}` spans
pub mod directive;

/// Error types and handling for the tacklebox application
pub mod error;

/// Per-directive evaluation
pub mod evaluator;

/// The rendering engine
pub mod renderer;

/// Rendering every configured template into its project
pub mod sync;

/// Named templates and registry lookup
pub mod template;

/// Settings values and variable resolution
pub mod value;
