//! Settings validation command.
//!
//! Runs the full configuration pass and reports the outcome; with
//! `--layout` it additionally verifies that every declared module has a
//! directory under the project root.

use crate::output::StyledOutput;
use std::path::Path;
use termcolor::ColorChoice;
use trellis_settings::{LayoutChecker, ResolutionScope};

pub fn run(path: &Path, layout: bool, choice: ColorChoice) -> anyhow::Result<bool> {
    let (file, settings) = match super::load(path, choice)? {
        Some(loaded) => loaded,
        None => return Ok(false),
    };
    let registry = settings.registry();
    let mut out = StyledOutput::new(choice);

    if registry
        .repositories(ResolutionScope::DependencyResolution)
        .is_empty()
    {
        out.warning("warning");
        out.plain(
            ": no dependency-resolution repositories declared; the default public index is unreachable\n",
        );
    }

    if layout {
        let project_root = file.parent().unwrap_or_else(|| Path::new("."));
        let checker = LayoutChecker::new(project_root.to_path_buf());

        if let Err(errors) = checker.verify(registry) {
            for error in &errors {
                out.stderr_error("error");
                eprintln!(": {}", error);
            }
            return Ok(false);
        }
    }

    out.success("ok");
    out.plain(&format!(
        ": root project '{}', {} module(s)\n",
        registry.root().unwrap_or(""),
        registry.modules().len()
    ));

    Ok(true)
}
