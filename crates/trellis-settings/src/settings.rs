//! Settings-file configuration pass.
//!
//! Reads a settings file, parses it, and folds the declarations in order
//! into a fresh [`ModuleRegistry`]. The pass is all-or-nothing: any error
//! aborts it and no registry is produced.

use crate::lexer::LexError;
use crate::parser::{Declaration, EndpointDecl, ParseError, Parser};
use crate::registry::{ModuleRegistry, RegistryError, RepositoryEndpoint};
use crate::token::Span;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name looked up when a project directory is given instead of a file.
pub const DEFAULT_FILE_NAME: &str = "settings.gradle.kts";

/// Errors that can occur during the configuration pass
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Failed to read the settings file
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Lexical errors in the settings source
    #[error("{} lexical error(s) in settings file", .0.len())]
    Lex(Vec<LexError>),

    /// Syntax errors in the settings source
    #[error("{} syntax error(s) in settings file", .0.len())]
    Parse(Vec<ParseError>),

    /// A declaration was rejected by the registry
    #[error("{source}")]
    Registry {
        #[source]
        source: RegistryError,
        span: Span,
    },

    /// The file never declares `rootProject.name`
    #[error("settings declare no root project name")]
    MissingRootName,
}

/// The resolved outcome of one configuration pass.
#[derive(Debug, Clone)]
pub struct Settings {
    registry: ModuleRegistry,
}

impl Settings {
    /// Run the configuration pass over a settings file.
    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let source = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_str(&source)
    }

    /// Run the configuration pass over settings source text.
    pub fn from_str(source: &str) -> Result<Self, SettingsError> {
        let parser = Parser::new(source).map_err(SettingsError::Lex)?;
        let declarations = parser.parse().map_err(SettingsError::Parse)?;
        let registry = evaluate(declarations)?;

        Ok(Self { registry })
    }

    /// The populated registry.
    pub fn registry(&self) -> &ModuleRegistry {
        &self.registry
    }

    /// Consume the settings, yielding the registry.
    pub fn into_registry(self) -> ModuleRegistry {
        self.registry
    }
}

/// Fold declarations in file order into a fresh registry.
///
/// Fails fast on the first rejected declaration, so a partially populated
/// registry is never observable.
fn evaluate(declarations: Vec<Declaration>) -> Result<ModuleRegistry, SettingsError> {
    let mut registry = ModuleRegistry::new();

    for declaration in declarations {
        match declaration {
            Declaration::RootProjectName { name, span } => {
                registry
                    .declare_root(&name)
                    .map_err(|source| SettingsError::Registry { source, span })?;
            }
            Declaration::Include { paths } => {
                for (path, span) in paths {
                    registry
                        .declare_module(&path)
                        .map_err(|source| SettingsError::Registry { source, span })?;
                }
            }
            Declaration::Repositories { scope, endpoints } => {
                for endpoint in endpoints {
                    registry.declare_repository(scope, resolve_endpoint(endpoint));
                }
            }
        }
    }

    if !registry.is_configured() {
        return Err(SettingsError::MissingRootName);
    }

    Ok(registry)
}

fn resolve_endpoint(decl: EndpointDecl) -> RepositoryEndpoint {
    match decl.url {
        Some(url) => RepositoryEndpoint::with_url(decl.name, url),
        None => RepositoryEndpoint::named(decl.name),
    }
}
