//! tacklebox's main application entry point.
//! Handles command-line argument parsing and dispatches to the sync,
//! readdir and render commands.

use std::path::PathBuf;

use tacklebox::{
    cli::{get_args, Args, Command},
    config::{default_config_dir, load_config},
    error::{default_error_handler, Error, Result},
    renderer::DirectiveRenderer,
    sync::sync,
    template::Template,
    value::Settings,
};

/// Main application entry point.
fn main() {
    let args = get_args();

    // Logger configuration
    env_logger::Builder::new()
        .filter_level(if args.verbose {
            log::LevelFilter::Trace
        } else {
            log::LevelFilter::Warn
        })
        .init();

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

fn run(args: Args) -> Result<()> {
    let engine = DirectiveRenderer::new()?;

    match args.command {
        Command::Sync => {
            let config = load_config(config_dir(args.config)?)?;
            sync(&config, &engine)?;
            println!("Synced up for great good!");
        }
        Command::Readdir { dir } => {
            let config_dir = config_dir(args.config)?;
            let mut config = load_config(&config_dir)?;
            let dir = std::env::current_dir()?.join(dir);
            let added = config.config_dirs(&dir)?;
            log::info!("Added {} project(s) from {}", added, dir.display());
            let config_path = config.save(&config_dir)?;
            println!("Wrote config to file {}", config_path.display());
        }
        Command::Render { template, settings } => {
            let settings: Settings = serde_json::from_str(&settings)
                .map_err(|e| Error::ConfigError(format!("Invalid settings: {e}")))?;
            let name = template.display().to_string();
            let rendered = Template::new(name, template).render(&engine, &settings)?;
            print!("{rendered}");
        }
    }
    Ok(())
}

fn config_dir(config: Option<PathBuf>) -> Result<PathBuf> {
    match config {
        Some(dir) => Ok(dir),
        None => default_config_dir(),
    }
}
