//! Module listing command.

use serde::Serialize;
use std::path::Path;
use termcolor::ColorChoice;
use trellis_settings::ModulePath;

#[derive(Serialize)]
struct ModulesOutput<'a> {
    root: &'a str,
    modules: &'a [ModulePath],
}

pub fn run(path: &Path, json: bool, choice: ColorChoice) -> anyhow::Result<bool> {
    let (_, settings) = match super::load(path, choice)? {
        Some(loaded) => loaded,
        None => return Ok(false),
    };
    let registry = settings.registry();

    if json {
        let output = ModulesOutput {
            root: registry.root().unwrap_or(""),
            modules: registry.modules(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        for module in registry.modules() {
            println!("{}", module);
        }
    }

    Ok(true)
}
