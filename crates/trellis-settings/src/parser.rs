//! Parser for settings files.
//!
//! Implements a recursive descent parser that transforms the token stream
//! from the lexer into a flat list of declarations, ready to be folded into
//! a module registry.

use crate::lexer::{LexError, Lexer};
use crate::registry::ResolutionScope;
use crate::token::{Span, Token};
use thiserror::Error;

/// A top-level settings declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    /// `rootProject.name = "<name>"`
    RootProjectName { name: String, span: Span },

    /// `include("<path>", ...)`, one entry per string argument
    Include { paths: Vec<(String, Span)> },

    /// One `repositories { ... }` block under a management block
    Repositories {
        scope: ResolutionScope,
        endpoints: Vec<EndpointDecl>,
    },
}

/// A repository endpoint as written in the settings file.
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointDecl {
    /// Endpoint name (`mavenCentral()` style calls, or a `maven` block's name)
    pub name: String,

    /// Explicit URL from a `maven { url = ... }` block
    pub url: Option<String>,

    pub span: Span,
}

/// Errors that can occur during parsing
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    #[error("expected {expected}, found {found}")]
    UnexpectedToken {
        expected: String,
        found: String,
        span: Span,
    },

    #[error("maven repository block requires a url")]
    MavenMissingUrl { span: Span },
}

impl ParseError {
    /// Source location of the error.
    pub fn span(&self) -> Span {
        match self {
            ParseError::UnexpectedToken { span, .. } => *span,
            ParseError::MavenMissingUrl { span } => *span,
        }
    }
}

/// Parser state for the settings language.
///
/// Works over pre-tokenized input and accumulates errors so a single pass
/// can report every syntax problem in the file.
pub struct Parser {
    /// Pre-tokenized input
    tokens: Vec<(Token, Span)>,

    /// Current position in token stream
    pos: usize,

    /// Accumulated parse errors (allows continuing after errors)
    errors: Vec<ParseError>,
}

impl Parser {
    /// Create a new parser from source text.
    pub fn new(source: &str) -> Result<Self, Vec<LexError>> {
        let lexer = Lexer::new(source);
        let mut tokens = lexer.tokenize()?;

        // Add EOF token
        let eof_span = if let Some((_, last_span)) = tokens.last() {
            Span::new(last_span.end, last_span.end, last_span.line, last_span.column)
        } else {
            Span::zero()
        };
        tokens.push((Token::Eof, eof_span));

        Ok(Self {
            tokens,
            pos: 0,
            errors: Vec::new(),
        })
    }

    /// Parse the entire file into declarations.
    ///
    /// Returns the declarations on success, or all accumulated errors.
    pub fn parse(mut self) -> Result<Vec<Declaration>, Vec<ParseError>> {
        let mut declarations = Vec::new();

        while !self.at_eof() {
            match self.parse_declaration(&mut declarations) {
                Ok(()) => {}
                Err(err) => {
                    self.errors.push(err);
                    // Attempt recovery by synchronizing to the next declaration
                    self.sync_to_declaration();
                }
            }
        }

        if !self.errors.is_empty() {
            return Err(self.errors);
        }

        Ok(declarations)
    }

    // ── Token management ─────────────────────────────────────────────

    #[inline]
    fn current(&self) -> &Token {
        &self.tokens[self.pos].0
    }

    #[inline]
    fn current_span(&self) -> Span {
        self.tokens[self.pos].1
    }

    fn advance(&mut self) -> Token {
        let tok = self.tokens[self.pos].0.clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        tok
    }

    #[inline]
    fn check(&self, expected: &Token) -> bool {
        std::mem::discriminant(self.current()) == std::mem::discriminant(expected)
    }

    #[inline]
    fn at_eof(&self) -> bool {
        matches!(self.current(), Token::Eof)
    }

    fn expect(&mut self, expected: Token) -> Result<Token, ParseError> {
        if self.check(&expected) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(&expected.to_string()))
        }
    }

    fn expect_string(&mut self) -> Result<(String, Span), ParseError> {
        let span = self.current_span();
        match self.expect(Token::StringLiteral(String::new()))? {
            Token::StringLiteral(value) => Ok((value, span)),
            _ => unreachable!("expect returned a non-matching token"),
        }
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        ParseError::UnexpectedToken {
            expected: expected.to_string(),
            found: self.current().to_string(),
            span: self.current_span(),
        }
    }

    /// Skip ahead to the next token that can start a declaration.
    fn sync_to_declaration(&mut self) {
        // Always make progress, even if we're already at a starter token
        if !self.at_eof() {
            self.advance();
        }

        while !self.at_eof() {
            match self.current() {
                Token::Include
                | Token::RootProject
                | Token::PluginManagement
                | Token::DependencyResolutionManagement => return,
                _ => {
                    self.advance();
                }
            }
        }
    }

    // ── Grammar ──────────────────────────────────────────────────────

    fn parse_declaration(&mut self, out: &mut Vec<Declaration>) -> Result<(), ParseError> {
        match self.current() {
            Token::RootProject => {
                out.push(self.parse_root_project()?);
                Ok(())
            }
            Token::Include => {
                out.push(self.parse_include()?);
                Ok(())
            }
            Token::PluginManagement => {
                self.parse_management_block(ResolutionScope::PluginResolution, out)
            }
            Token::DependencyResolutionManagement => {
                self.parse_management_block(ResolutionScope::DependencyResolution, out)
            }
            _ => Err(self.unexpected("a declaration")),
        }
    }

    /// `rootProject.name = "<name>"`
    fn parse_root_project(&mut self) -> Result<Declaration, ParseError> {
        self.advance(); // rootProject
        self.expect(Token::Dot)?;
        self.expect(Token::Name)?;
        self.expect(Token::Equal)?;
        let (name, span) = self.expect_string()?;

        Ok(Declaration::RootProjectName { name, span })
    }

    /// `include("<path>" {, "<path>"})`
    fn parse_include(&mut self) -> Result<Declaration, ParseError> {
        self.advance(); // include
        self.expect(Token::LeftParen)?;

        let mut paths = Vec::new();
        loop {
            paths.push(self.expect_string()?);
            if self.check(&Token::Comma) {
                self.advance();
            } else {
                break;
            }
        }

        self.expect(Token::RightParen)?;

        Ok(Declaration::Include { paths })
    }

    /// `pluginManagement { repositories { ... } }` and the dependency
    /// resolution equivalent. Each nested repositories block becomes one
    /// declaration.
    fn parse_management_block(
        &mut self,
        scope: ResolutionScope,
        out: &mut Vec<Declaration>,
    ) -> Result<(), ParseError> {
        self.advance(); // block keyword
        self.expect(Token::LeftBrace)?;

        while !self.check(&Token::RightBrace) && !self.at_eof() {
            if self.check(&Token::Repositories) {
                out.push(self.parse_repositories(scope)?);
            } else {
                return Err(self.unexpected("'repositories'"));
            }
        }

        self.expect(Token::RightBrace)?;
        Ok(())
    }

    /// `repositories { mavenCentral() maven { url = "..." } ... }`
    fn parse_repositories(&mut self, scope: ResolutionScope) -> Result<Declaration, ParseError> {
        self.advance(); // repositories
        self.expect(Token::LeftBrace)?;

        let mut endpoints = Vec::new();
        while !self.check(&Token::RightBrace) && !self.at_eof() {
            match self.current() {
                Token::Identifier(_) => {
                    let span = self.current_span();
                    let name = match self.advance() {
                        Token::Identifier(name) => name,
                        _ => unreachable!(),
                    };
                    self.expect(Token::LeftParen)?;
                    self.expect(Token::RightParen)?;
                    endpoints.push(EndpointDecl {
                        name,
                        url: None,
                        span,
                    });
                }
                Token::Maven => {
                    endpoints.push(self.parse_maven_endpoint()?);
                }
                _ => return Err(self.unexpected("a repository endpoint")),
            }
        }

        self.expect(Token::RightBrace)?;

        Ok(Declaration::Repositories { scope, endpoints })
    }

    /// `maven { url = "<url>" [name = "<name>"] }`
    fn parse_maven_endpoint(&mut self) -> Result<EndpointDecl, ParseError> {
        let span = self.current_span();
        self.advance(); // maven
        self.expect(Token::LeftBrace)?;

        let mut url = None;
        let mut name = None;
        while !self.check(&Token::RightBrace) && !self.at_eof() {
            match self.current() {
                Token::Url => {
                    self.advance();
                    self.expect(Token::Equal)?;
                    url = Some(self.expect_string()?.0);
                }
                Token::Name => {
                    self.advance();
                    self.expect(Token::Equal)?;
                    name = Some(self.expect_string()?.0);
                }
                _ => return Err(self.unexpected("'url' or 'name'")),
            }
        }

        self.expect(Token::RightBrace)?;

        let url = url.ok_or(ParseError::MavenMissingUrl { span })?;

        Ok(EndpointDecl {
            name: name.unwrap_or_else(|| "maven".to_string()),
            url: Some(url),
            span,
        })
    }
}
