//! Repository endpoint listing command.

use serde::Serialize;
use std::path::Path;
use termcolor::ColorChoice;
use trellis_settings::{RepositoryEndpoint, ResolutionScope};

#[derive(Serialize)]
struct ScopeOutput<'a> {
    scope: ResolutionScope,
    endpoints: &'a [RepositoryEndpoint],
}

pub fn run(
    path: &Path,
    scope: Option<&str>,
    json: bool,
    choice: ColorChoice,
) -> anyhow::Result<bool> {
    let scopes = match scope {
        Some(name) => vec![parse_scope(name)?],
        None => ResolutionScope::all().to_vec(),
    };

    let (_, settings) = match super::load(path, choice)? {
        Some(loaded) => loaded,
        None => return Ok(false),
    };
    let registry = settings.registry();

    if json {
        let output: Vec<ScopeOutput> = scopes
            .iter()
            .map(|&scope| ScopeOutput {
                scope,
                endpoints: registry.repositories(scope),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        for scope in scopes {
            println!("{}:", scope);
            for endpoint in registry.repositories(scope) {
                println!("  {}", endpoint);
            }
        }
    }

    Ok(true)
}

fn parse_scope(name: &str) -> anyhow::Result<ResolutionScope> {
    match name {
        "plugin-resolution" | "plugin" => Ok(ResolutionScope::PluginResolution),
        "dependency-resolution" | "dependency" => Ok(ResolutionScope::DependencyResolution),
        other => anyhow::bail!(
            "unknown resolution scope '{}', expected plugin-resolution or dependency-resolution",
            other
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use trellis_settings::DEFAULT_FILE_NAME;

    #[test]
    fn test_parse_scope_names() {
        assert_eq!(
            parse_scope("plugin-resolution").unwrap(),
            ResolutionScope::PluginResolution
        );
        assert_eq!(
            parse_scope("dependency").unwrap(),
            ResolutionScope::DependencyResolution
        );
        assert!(parse_scope("runtime").is_err());
    }

    #[test]
    fn test_repositories_listing_runs() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(
            temp.path().join(DEFAULT_FILE_NAME),
            "rootProject.name = \"demo\"\ndependencyResolutionManagement { repositories { mavenCentral() } }\n",
        )
        .unwrap();

        assert!(run(temp.path(), None, false, ColorChoice::Never).unwrap());
        assert!(run(temp.path(), Some("dependency"), true, ColorChoice::Never).unwrap());
    }
}
