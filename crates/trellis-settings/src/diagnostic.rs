//! Diagnostic rendering for configuration errors.
//!
//! Converts [`SettingsError`] values into codespan diagnostics so the CLI
//! can echo the offending input with source context.

use crate::lexer::LexError;
use crate::parser::ParseError;
use crate::settings::SettingsError;
use crate::token::Span;
use codespan_reporting::diagnostic::{Diagnostic, Label};
use codespan_reporting::files::SimpleFile;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream, WriteColor};

/// Stable error code for a diagnostic kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorCode(pub &'static str);

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

/// Convert a configuration error into renderable diagnostics.
///
/// Lexical and syntax errors expand into one diagnostic each; the other
/// kinds yield a single diagnostic.
pub fn diagnostics(error: &SettingsError) -> Vec<Diagnostic<()>> {
    match error {
        SettingsError::Io { .. } => vec![Diagnostic::error().with_message(error.to_string())],
        SettingsError::Lex(errors) => errors.iter().map(from_lex_error).collect(),
        SettingsError::Parse(errors) => errors.iter().map(from_parse_error).collect(),
        SettingsError::Registry { source, span } => {
            vec![Diagnostic::error()
                .with_message(source.to_string())
                .with_code(registry_code(source).as_str())
                .with_labels(vec![primary(*span).with_message("declared here")])]
        }
        SettingsError::MissingRootName => {
            vec![Diagnostic::error()
                .with_message(error.to_string())
                .with_code("S0304")
                .with_notes(vec![
                    "add a `rootProject.name = \"...\"` declaration".to_string()
                ])]
        }
    }
}

/// Emit every diagnostic for an error to the given stream.
pub fn emit_to(
    writer: &mut dyn WriteColor,
    error: &SettingsError,
    file_name: &str,
    source: &str,
) -> Result<(), codespan_reporting::files::Error> {
    let file = SimpleFile::new(file_name, source);
    let config = term::Config::default();

    for diagnostic in diagnostics(error) {
        term::emit(writer, &config, &file, &diagnostic)?;
    }

    Ok(())
}

/// Emit every diagnostic for an error to stderr.
pub fn emit(
    error: &SettingsError,
    file_name: &str,
    source: &str,
    choice: ColorChoice,
) -> Result<(), codespan_reporting::files::Error> {
    let mut writer = StandardStream::stderr(choice);
    emit_to(&mut writer, error, file_name, source)
}

fn from_lex_error(error: &LexError) -> Diagnostic<()> {
    let code = match error {
        LexError::UnexpectedCharacter { .. } => ErrorCode("S0101"),
        LexError::UnterminatedString { .. } => ErrorCode("S0102"),
    };

    Diagnostic::error()
        .with_message(error.to_string())
        .with_code(code.as_str())
        .with_labels(vec![primary(error.span())])
}

fn from_parse_error(error: &ParseError) -> Diagnostic<()> {
    let code = match error {
        ParseError::UnexpectedToken { .. } => ErrorCode("S0201"),
        ParseError::MavenMissingUrl { .. } => ErrorCode("S0202"),
    };

    Diagnostic::error()
        .with_message(error.to_string())
        .with_code(code.as_str())
        .with_labels(vec![primary(error.span())])
}

fn registry_code(error: &crate::registry::RegistryError) -> ErrorCode {
    use crate::registry::RegistryError::*;

    match error {
        InvalidPath(_) => ErrorCode("S0301"),
        DuplicateRoot { .. } => ErrorCode("S0302"),
        EmptyRootName => ErrorCode("S0303"),
    }
}

fn primary(span: Span) -> Label<()> {
    Label::primary((), span.start..span.end)
}
