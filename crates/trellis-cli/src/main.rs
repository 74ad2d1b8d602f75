//! Trellis build settings resolver CLI.
//!
//! Runs the settings configuration pass from the command line: validation,
//! module and repository listings, and project scaffolding.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod output;

#[derive(Parser)]
#[command(name = "trellis")]
#[command(about = "Multi-module build settings resolver", long_about = None)]
#[command(version)]
struct Cli {
    /// Color output: auto, always, never
    #[arg(long, global = true)]
    color: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a settings file
    Check {
        /// Settings file or project directory
        #[arg(default_value = ".")]
        path: PathBuf,
        /// Also verify each declared module has a directory on disk
        #[arg(long)]
        layout: bool,
    },

    /// List declared modules in declaration order
    Modules {
        /// Settings file or project directory
        #[arg(default_value = ".")]
        path: PathBuf,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// List repository endpoints per resolution scope
    Repositories {
        /// Settings file or project directory
        #[arg(default_value = ".")]
        path: PathBuf,
        /// Restrict to one scope: plugin-resolution or dependency-resolution
        #[arg(long)]
        scope: Option<String>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a settings file for a new project
    Init {
        /// Project directory
        #[arg(default_value = ".")]
        dir: PathBuf,
        /// Root project name (defaults to the directory name)
        #[arg(long)]
        name: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let choice = output::resolve_color_choice(cli.color.as_deref());

    let passed = match cli.command {
        Commands::Check { path, layout } => commands::check::run(&path, layout, choice)?,
        Commands::Modules { path, json } => commands::modules::run(&path, json, choice)?,
        Commands::Repositories { path, scope, json } => {
            commands::repositories::run(&path, scope.as_deref(), json, choice)?
        }
        Commands::Init { dir, name } => commands::init::run(&dir, name.as_deref(), choice)?,
    };

    // Configuration errors fail the invocation, matching build-tool behavior
    if !passed {
        std::process::exit(1);
    }

    Ok(())
}
