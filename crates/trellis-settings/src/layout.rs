//! On-disk layout verification for declared modules.
//!
//! Maps each declared module path to its directory under the project root
//! and verifies the directory exists.

use crate::module::ModulePath;
use crate::registry::ModuleRegistry;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during layout verification
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// No directory for a declared module
    #[error("module '{module}' has no directory at {}", path.display())]
    MissingModuleDir { module: ModulePath, path: PathBuf },

    /// The module path exists but is not a directory
    #[error("module '{module}' path {} is not a directory", path.display())]
    NotADirectory { module: ModulePath, path: PathBuf },
}

/// Checks declared modules against the project directory tree.
pub struct LayoutChecker {
    /// Project root directory
    project_root: PathBuf,
}

impl LayoutChecker {
    /// Create a new checker rooted at the project directory.
    pub fn new(project_root: PathBuf) -> Self {
        // Canonicalize the project root to handle symlinks consistently
        let project_root = project_root.canonicalize().unwrap_or(project_root);
        Self { project_root }
    }

    /// The directory a module maps to (`a:b` -> `<root>/a/b`).
    pub fn module_dir(&self, module: &ModulePath) -> PathBuf {
        self.project_root.join(module.to_fs_path())
    }

    /// Verify a single module's directory.
    pub fn check_module(&self, module: &ModulePath) -> Result<PathBuf, LayoutError> {
        let dir = self.module_dir(module);

        if !dir.exists() {
            return Err(LayoutError::MissingModuleDir {
                module: module.clone(),
                path: dir,
            });
        }

        if !dir.is_dir() {
            return Err(LayoutError::NotADirectory {
                module: module.clone(),
                path: dir,
            });
        }

        Ok(dir)
    }

    /// Verify every declared module, reporting all failures rather than
    /// stopping at the first.
    pub fn verify(&self, registry: &ModuleRegistry) -> Result<(), Vec<LayoutError>> {
        let errors: Vec<LayoutError> = registry
            .modules()
            .iter()
            .filter_map(|module| self.check_module(module).err())
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Whether a module's directory contains a build script.
    pub fn has_build_file(&self, module: &ModulePath) -> bool {
        let dir = self.module_dir(module);
        ["build.gradle.kts", "build.gradle"]
            .iter()
            .any(|name| dir.join(name).exists())
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn registry_with(paths: &[&str]) -> ModuleRegistry {
        let mut registry = ModuleRegistry::new();
        registry.declare_root("samples").unwrap();
        for path in paths {
            registry.declare_module(path).unwrap();
        }
        registry
    }

    #[test]
    fn test_module_dir_mapping() {
        let checker = LayoutChecker::new(PathBuf::from("/project"));
        let module = ModulePath::parse("transfer:http-pull:connector").unwrap();
        assert_eq!(
            checker.module_dir(&module),
            PathBuf::from("/project/transfer/http-pull/connector")
        );
    }

    #[test]
    fn test_verify_all_present() {
        let temp = tempfile::tempdir().unwrap();
        fs::create_dir_all(temp.path().join("transfer/http-pull-connector")).unwrap();
        fs::create_dir_all(temp.path().join("other/custom-runtime")).unwrap();

        let registry = registry_with(&["transfer:http-pull-connector", "other:custom-runtime"]);
        let checker = LayoutChecker::new(temp.path().to_path_buf());

        assert!(checker.verify(&registry).is_ok());
    }

    #[test]
    fn test_verify_reports_every_missing_module() {
        let temp = tempfile::tempdir().unwrap();
        fs::create_dir_all(temp.path().join("present")).unwrap();

        let registry = registry_with(&["present", "missing:one", "missing:two"]);
        let checker = LayoutChecker::new(temp.path().to_path_buf());

        let errors = checker.verify(&registry).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors
            .iter()
            .all(|e| matches!(e, LayoutError::MissingModuleDir { .. })));
    }

    #[test]
    fn test_check_module_not_a_directory() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("flat"), "not a dir").unwrap();

        let checker = LayoutChecker::new(temp.path().to_path_buf());
        let module = ModulePath::parse("flat").unwrap();

        assert!(matches!(
            checker.check_module(&module),
            Err(LayoutError::NotADirectory { .. })
        ));
    }

    #[test]
    fn test_has_build_file() {
        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path().join("mod-a");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("build.gradle.kts"), "").unwrap();

        let checker = LayoutChecker::new(temp.path().to_path_buf());
        let with_build = ModulePath::parse("mod-a").unwrap();
        assert!(checker.has_build_file(&with_build));

        fs::create_dir_all(temp.path().join("mod-b")).unwrap();
        let without_build = ModulePath::parse("mod-b").unwrap();
        assert!(!checker.has_build_file(&without_build));
    }
}
