//! Module path identifiers.
//!
//! A module path names one buildable unit inside the multi-module build,
//! e.g. `transfer:transfer-06-consumer-pull-http:http-pull-connector`.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur when parsing a module path
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModulePathError {
    /// Path is empty (or just the leading separator)
    #[error("module path cannot be empty")]
    Empty,

    /// A segment between separators is empty, e.g. `a::b` or `a:`
    #[error("module path '{path}' has an empty segment")]
    EmptySegment { path: String },

    /// A segment contains a character outside the allowed set
    #[error("module path '{path}' contains invalid character '{ch}'")]
    InvalidCharacter { path: String, ch: char },
}

/// Hierarchical, colon-delimited identifier of one buildable unit.
///
/// Stored in normalized form without the optional leading separator, so
/// `:a:b` and `a:b` identify the same module.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ModulePath(String);

impl ModulePath {
    /// Parse and validate a module path.
    ///
    /// A valid path is a non-empty sequence of non-empty `:`-separated
    /// segments. Segments may contain alphanumerics, `-`, `_` and `.`.
    /// One leading `:` is accepted and normalized away.
    pub fn parse(path: &str) -> Result<Self, ModulePathError> {
        let normalized = path.strip_prefix(':').unwrap_or(path);

        if normalized.is_empty() {
            return Err(ModulePathError::Empty);
        }

        for segment in normalized.split(':') {
            if segment.is_empty() {
                return Err(ModulePathError::EmptySegment {
                    path: path.to_string(),
                });
            }

            if let Some(ch) = segment
                .chars()
                .find(|c| !c.is_alphanumeric() && *c != '-' && *c != '_' && *c != '.')
            {
                return Err(ModulePathError::InvalidCharacter {
                    path: path.to_string(),
                    ch,
                });
            }
        }

        Ok(Self(normalized.to_string()))
    }

    /// The normalized path string, without a leading separator.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterate over the path segments from root to leaf.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(':')
    }

    /// The leaf segment, i.e. the module's own name.
    pub fn leaf(&self) -> &str {
        self.0.rsplit(':').next().unwrap_or(&self.0)
    }

    /// Map the path to a relative filesystem directory (`a:b` -> `a/b`).
    pub fn to_fs_path(&self) -> PathBuf {
        self.segments().collect()
    }
}

impl fmt::Display for ModulePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ModulePath {
    type Err = ModulePathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_segment() {
        let path = ModulePath::parse("samples").unwrap();
        assert_eq!(path.as_str(), "samples");
        assert_eq!(path.leaf(), "samples");
    }

    #[test]
    fn test_parse_hierarchical_path() {
        let path =
            ModulePath::parse("transfer:transfer-06-consumer-pull-http:http-pull-connector")
                .unwrap();
        assert_eq!(
            path.segments().collect::<Vec<_>>(),
            vec![
                "transfer",
                "transfer-06-consumer-pull-http",
                "http-pull-connector"
            ]
        );
        assert_eq!(path.leaf(), "http-pull-connector");
    }

    #[test]
    fn test_leading_separator_normalized() {
        let with = ModulePath::parse(":other:custom-runtime").unwrap();
        let without = ModulePath::parse("other:custom-runtime").unwrap();
        assert_eq!(with, without);
        assert_eq!(with.as_str(), "other:custom-runtime");
    }

    #[test]
    fn test_parse_empty_path() {
        assert_eq!(ModulePath::parse(""), Err(ModulePathError::Empty));
        assert_eq!(ModulePath::parse(":"), Err(ModulePathError::Empty));
    }

    #[test]
    fn test_parse_empty_segment() {
        assert!(matches!(
            ModulePath::parse("a::b"),
            Err(ModulePathError::EmptySegment { .. })
        ));
        assert!(matches!(
            ModulePath::parse("a:"),
            Err(ModulePathError::EmptySegment { .. })
        ));
        assert!(matches!(
            ModulePath::parse("::"),
            Err(ModulePathError::EmptySegment { .. })
        ));
    }

    #[test]
    fn test_parse_invalid_character() {
        assert_eq!(
            ModulePath::parse("a b"),
            Err(ModulePathError::InvalidCharacter {
                path: "a b".to_string(),
                ch: ' ',
            })
        );
        assert!(matches!(
            ModulePath::parse("a/b"),
            Err(ModulePathError::InvalidCharacter { ch: '/', .. })
        ));
    }

    #[test]
    fn test_segment_charset() {
        assert!(ModulePath::parse("data-plane_v2.api:s3").is_ok());
    }

    #[test]
    fn test_to_fs_path() {
        let path = ModulePath::parse("transfer:http-pull:connector").unwrap();
        assert_eq!(
            path.to_fs_path(),
            PathBuf::from("transfer/http-pull/connector")
        );
    }

    #[test]
    fn test_display_round_trip() {
        let path = ModulePath::parse(":a:b").unwrap();
        assert_eq!(path.to_string(), "a:b");
        assert_eq!(path.to_string().parse::<ModulePath>().unwrap(), path);
    }
}
