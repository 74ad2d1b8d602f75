//! Build-graph membership registry.
//!
//! The registry holds the outcome of one configuration pass: the root
//! project name, the ordered set of declared modules, and the repository
//! endpoints per resolution scope. It is an explicit value owned by the
//! pass, never a global.

use crate::module::{ModulePath, ModulePathError};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// Errors that can occur while populating the registry
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Malformed module path
    #[error("invalid module path: {0}")]
    InvalidPath(#[from] ModulePathError),

    /// Conflicting root project declaration
    #[error("root project is already named '{current}', cannot rename to '{requested}'")]
    DuplicateRoot { current: String, requested: String },

    /// Empty root project name
    #[error("root project name cannot be empty")]
    EmptyRootName,
}

/// Repository lookup bucket.
///
/// Build-plugin resolution and dependency resolution keep independent
/// endpoint lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResolutionScope {
    PluginResolution,
    DependencyResolution,
}

impl ResolutionScope {
    /// All scopes, in a stable order.
    pub fn all() -> [ResolutionScope; 2] {
        [
            ResolutionScope::PluginResolution,
            ResolutionScope::DependencyResolution,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionScope::PluginResolution => "plugin-resolution",
            ResolutionScope::DependencyResolution => "dependency-resolution",
        }
    }
}

impl fmt::Display for ResolutionScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A named source of external build artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryEndpoint {
    /// Endpoint name, e.g. `mavenCentral`
    pub name: String,

    /// Index URL. Well-known endpoints resolve to their public URLs;
    /// the local cache has none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl RepositoryEndpoint {
    /// Create an endpoint from a bare name, resolving well-known URLs.
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        let url = well_known_url(&name).map(|u| u.to_string());
        Self { name, url }
    }

    /// Create an endpoint with an explicit URL (custom `maven` blocks).
    pub fn with_url(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: Some(url.into()),
        }
    }
}

impl fmt::Display for RepositoryEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.url {
            Some(url) => write!(f, "{} ({})", self.name, url),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Index URLs for the endpoints a settings file can name without a URL.
fn well_known_url(name: &str) -> Option<&'static str> {
    match name {
        "mavenCentral" => Some("https://repo.maven.apache.org/maven2/"),
        "gradlePluginPortal" => Some("https://plugins.gradle.org/m2/"),
        "google" => Some("https://dl.google.com/dl/android/maven2/"),
        // mavenLocal is the local artifact cache, it has no index URL
        _ => None,
    }
}

/// Ordered registry of modules and repositories for one configuration pass.
#[derive(Debug, Clone, Default)]
pub struct ModuleRegistry {
    root: Option<String>,
    modules: Vec<ModulePath>,
    seen: HashSet<ModulePath>,
    plugin_repositories: Vec<RepositoryEndpoint>,
    dependency_repositories: Vec<RepositoryEndpoint>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the root project name.
    ///
    /// Idempotent for the same name; a differing name is a fatal conflict.
    pub fn declare_root(&mut self, name: &str) -> Result<(), RegistryError> {
        if name.is_empty() {
            return Err(RegistryError::EmptyRootName);
        }

        match &self.root {
            Some(current) if current != name => Err(RegistryError::DuplicateRoot {
                current: current.clone(),
                requested: name.to_string(),
            }),
            Some(_) => Ok(()),
            None => {
                self.root = Some(name.to_string());
                Ok(())
            }
        }
    }

    /// Declare a module present in the build graph.
    ///
    /// Re-declaring an already-present path is a no-op, not an error.
    pub fn declare_module(&mut self, path: &str) -> Result<(), RegistryError> {
        let module = ModulePath::parse(path)?;

        if self.seen.contains(&module) {
            return Ok(());
        }

        self.seen.insert(module.clone());
        self.modules.push(module);
        Ok(())
    }

    /// Append a repository endpoint to a resolution scope.
    ///
    /// Duplicates within a scope are permitted (redundant but harmless).
    pub fn declare_repository(&mut self, scope: ResolutionScope, endpoint: RepositoryEndpoint) {
        match scope {
            ResolutionScope::PluginResolution => self.plugin_repositories.push(endpoint),
            ResolutionScope::DependencyResolution => self.dependency_repositories.push(endpoint),
        }
    }

    /// The root project name, if declared.
    pub fn root(&self) -> Option<&str> {
        self.root.as_deref()
    }

    /// Declared modules in first-insertion order.
    pub fn modules(&self) -> &[ModulePath] {
        &self.modules
    }

    /// Repository endpoints for a scope, in declaration order.
    pub fn repositories(&self, scope: ResolutionScope) -> &[RepositoryEndpoint] {
        match scope {
            ResolutionScope::PluginResolution => &self.plugin_repositories,
            ResolutionScope::DependencyResolution => &self.dependency_repositories,
        }
    }

    /// Whether a module path is already declared.
    pub fn contains(&self, module: &ModulePath) -> bool {
        self.seen.contains(module)
    }

    /// A registry is configured once the root project name is set.
    pub fn is_configured(&self) -> bool {
        self.root.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declare_module_deduplicates() {
        let mut registry = ModuleRegistry::new();
        registry.declare_module("a:b").unwrap();
        registry.declare_module("a:c").unwrap();
        registry.declare_module("a:b").unwrap();

        let names: Vec<&str> = registry.modules().iter().map(|m| m.as_str()).collect();
        assert_eq!(names, vec!["a:b", "a:c"]);
    }

    #[test]
    fn test_declare_module_preserves_insertion_order() {
        let mut registry = ModuleRegistry::new();
        for path in ["z", "a", "m:n", "b"] {
            registry.declare_module(path).unwrap();
        }

        let names: Vec<&str> = registry.modules().iter().map(|m| m.as_str()).collect();
        assert_eq!(names, vec!["z", "a", "m:n", "b"]);
    }

    #[test]
    fn test_declare_module_leading_colon_is_same_module() {
        let mut registry = ModuleRegistry::new();
        registry.declare_module("other:custom-runtime").unwrap();
        registry.declare_module(":other:custom-runtime").unwrap();

        assert_eq!(registry.modules().len(), 1);
    }

    #[test]
    fn test_declare_module_invalid_path() {
        let mut registry = ModuleRegistry::new();
        assert!(matches!(
            registry.declare_module(""),
            Err(RegistryError::InvalidPath(_))
        ));
        assert!(matches!(
            registry.declare_module("a::b"),
            Err(RegistryError::InvalidPath(_))
        ));
        assert!(registry.modules().is_empty());
    }

    #[test]
    fn test_declare_root_idempotent() {
        let mut registry = ModuleRegistry::new();
        registry.declare_root("samples").unwrap();
        registry.declare_root("samples").unwrap();
        assert_eq!(registry.root(), Some("samples"));
        assert!(registry.is_configured());
    }

    #[test]
    fn test_declare_root_conflict() {
        let mut registry = ModuleRegistry::new();
        registry.declare_root("samples").unwrap();

        let err = registry.declare_root("other").unwrap_err();
        assert_eq!(
            err,
            RegistryError::DuplicateRoot {
                current: "samples".to_string(),
                requested: "other".to_string(),
            }
        );
        // Original root survives the failed redeclaration
        assert_eq!(registry.root(), Some("samples"));
    }

    #[test]
    fn test_declare_root_empty() {
        let mut registry = ModuleRegistry::new();
        assert_eq!(
            registry.declare_root(""),
            Err(RegistryError::EmptyRootName)
        );
        assert!(!registry.is_configured());
    }

    #[test]
    fn test_repository_scopes_are_independent() {
        let mut registry = ModuleRegistry::new();
        registry.declare_repository(
            ResolutionScope::PluginResolution,
            RepositoryEndpoint::named("gradlePluginPortal"),
        );
        registry.declare_repository(
            ResolutionScope::DependencyResolution,
            RepositoryEndpoint::named("mavenCentral"),
        );
        registry.declare_repository(
            ResolutionScope::DependencyResolution,
            RepositoryEndpoint::named("mavenLocal"),
        );

        let plugin: Vec<&str> = registry
            .repositories(ResolutionScope::PluginResolution)
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        let dependency: Vec<&str> = registry
            .repositories(ResolutionScope::DependencyResolution)
            .iter()
            .map(|e| e.name.as_str())
            .collect();

        assert_eq!(plugin, vec!["gradlePluginPortal"]);
        assert_eq!(dependency, vec!["mavenCentral", "mavenLocal"]);
    }

    #[test]
    fn test_repository_duplicates_permitted() {
        let mut registry = ModuleRegistry::new();
        registry.declare_repository(
            ResolutionScope::DependencyResolution,
            RepositoryEndpoint::named("mavenCentral"),
        );
        registry.declare_repository(
            ResolutionScope::DependencyResolution,
            RepositoryEndpoint::named("mavenCentral"),
        );

        assert_eq!(
            registry
                .repositories(ResolutionScope::DependencyResolution)
                .len(),
            2
        );
    }

    #[test]
    fn test_well_known_endpoint_urls() {
        assert!(RepositoryEndpoint::named("mavenCentral").url.is_some());
        assert!(RepositoryEndpoint::named("gradlePluginPortal").url.is_some());
        assert!(RepositoryEndpoint::named("mavenLocal").url.is_none());
    }

    #[test]
    fn test_contains() {
        let mut registry = ModuleRegistry::new();
        registry.declare_module("a:b").unwrap();

        let module = ModulePath::parse(":a:b").unwrap();
        assert!(registry.contains(&module));
    }
}
