//! CLI subcommands.

pub mod check;
pub mod init;
pub mod modules;
pub mod repositories;

use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};
use termcolor::ColorChoice;
use trellis_settings::{diagnostic, Settings, DEFAULT_FILE_NAME};

/// Resolve a file-or-directory argument to the settings file path.
pub(crate) fn settings_path(path: &Path) -> PathBuf {
    if path.is_dir() {
        path.join(DEFAULT_FILE_NAME)
    } else {
        path.to_path_buf()
    }
}

/// Run the configuration pass over the given path.
///
/// On configuration errors the diagnostics are emitted to stderr and `None`
/// is returned so the caller can fail the invocation.
pub(crate) fn load(
    path: &Path,
    choice: ColorChoice,
) -> anyhow::Result<Option<(PathBuf, Settings)>> {
    let file = settings_path(path);
    let source = fs::read_to_string(&file)
        .with_context(|| format!("failed to read {}", file.display()))?;

    match Settings::from_str(&source) {
        Ok(settings) => Ok(Some((file, settings))),
        Err(error) => {
            diagnostic::emit(&error, &file.display().to_string(), &source, choice)?;
            Ok(None)
        }
    }
}
