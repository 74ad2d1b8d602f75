//! Project scaffolding command.
//!
//! Creates a settings file with the default repository blocks.

use std::fs;
use std::path::Path;
use termcolor::ColorChoice;
use trellis_settings::DEFAULT_FILE_NAME;

pub fn run(dir: &Path, name: Option<&str>, _choice: ColorChoice) -> anyhow::Result<bool> {
    let settings_path = dir.join(DEFAULT_FILE_NAME);

    // Check if settings already exist
    if settings_path.exists() {
        anyhow::bail!(
            "settings file already exists: {}",
            settings_path.display()
        );
    }

    // Derive project name from directory name if not provided
    let project_name = match name {
        Some(name) => name.to_string(),
        None => {
            let dir = dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf());
            dir.file_name()
                .and_then(|s| s.to_str())
                .unwrap_or("my-project")
                .to_string()
        }
    };

    fs::create_dir_all(dir)?;
    fs::write(&settings_path, template(&project_name))?;

    println!("Created settings for project: {}", project_name);
    println!("  - {}", DEFAULT_FILE_NAME);

    Ok(true)
}

fn template(project_name: &str) -> String {
    format!(
        r#"rootProject.name = "{}"

pluginManagement {{
    repositories {{
        mavenCentral()
        gradlePluginPortal()
    }}
}}

dependencyResolutionManagement {{
    repositories {{
        mavenCentral()
        mavenLocal()
    }}
}}
"#,
        project_name
    )
}
