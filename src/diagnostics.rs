//! Diagnostics: the syntax-error taxonomy and the reporting seam
//!
//! Parsing routines return [`SyntaxError`] through `Result`; the recovery
//! subsystem turns each one into a [`Diagnostic`] that is collected on the
//! parser and forwarded to an optional [`DiagnosticSink`]. Only the
//! consecutive-error limit turns into the fatal [`ParseFailure`].

use crate::token::{Token, TokenKind};
use std::fmt;

/// Classification of a syntax error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A token that cannot continue the current production.
    UnexpectedToken,
    /// Missing closing brace before end of input.
    UnterminatedBlock,
    /// Malformed integer, hex, or bit literal in a declaration.
    InvalidLiteral,
    /// Second `default:` label within one `switch`.
    DuplicateDefaultCase,
    /// Cursor exhausted in the middle of a production.
    EndOfStream,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ErrorKind::UnexpectedToken => "unexpected token",
            ErrorKind::UnterminatedBlock => "unterminated block",
            ErrorKind::InvalidLiteral => "invalid literal",
            ErrorKind::DuplicateDefaultCase => "duplicate default case",
            ErrorKind::EndOfStream => "unexpected end of input",
        };
        write!(f, "{text}")
    }
}

/// A recoverable syntax error produced by a parsing routine.
#[derive(Debug, Clone)]
pub struct SyntaxError {
    pub kind: ErrorKind,
    pub message: String,
    pub line: usize,
}

impl SyntaxError {
    pub fn new(kind: ErrorKind, message: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            message: message.into(),
            line,
        }
    }

    /// Error for a token that cannot continue the current production.
    /// An exhausted cursor is classified as [`ErrorKind::EndOfStream`].
    pub fn unexpected(found: &Token) -> Self {
        let kind = if found.kind == TokenKind::Eof {
            ErrorKind::EndOfStream
        } else {
            ErrorKind::UnexpectedToken
        };
        Self::new(kind, format!("Unexpected token: {found}"), found.line)
    }

    /// Like [`SyntaxError::unexpected`], with a note about what the grammar
    /// required at this point.
    pub fn expected(what: &str, found: &Token) -> Self {
        let kind = if found.kind == TokenKind::Eof {
            ErrorKind::EndOfStream
        } else {
            ErrorKind::UnexpectedToken
        };
        Self::new(
            kind,
            format!("Unexpected token: {found} (expected {what})"),
            found.line,
        )
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

impl std::error::Error for SyntaxError {}

/// One reported error: what recovery handed to the diagnostic sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: ErrorKind,
    pub message: String,
    pub line: usize,
}

impl Diagnostic {
    pub fn from_error(error: &SyntaxError) -> Self {
        Self {
            kind: error.kind,
            message: error.message.clone(),
            line: error.line,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

/// External receiver for `{message, line}` error reports. The parser always
/// keeps its own collected list; a sink only adds a second destination.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: &Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: &Diagnostic) {
        self.push(diagnostic.clone());
    }
}

/// Fatal outcome: the consecutive-error limit was exceeded and the pass was
/// aborted. Carries every diagnostic collected up to that point.
#[derive(Debug)]
pub struct ParseFailure {
    pub limit: usize,
    pub errors: Vec<Diagnostic>,
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "parse aborted after {} consecutive errors ({} reported in total)",
            self.limit,
            self.errors.len()
        )
    }
}

impl std::error::Error for ParseFailure {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unexpected_message_format() {
        let token = Token::symbol(TokenKind::Semicolon, 7);
        let error = SyntaxError::unexpected(&token);
        assert_eq!(error.kind, ErrorKind::UnexpectedToken);
        assert_eq!(error.message, "Unexpected token: ';'");
        assert_eq!(error.line, 7);
    }

    #[test]
    fn test_eof_classified_as_end_of_stream() {
        let error = SyntaxError::expected("';' after expression", &Token::eof(4));
        assert_eq!(error.kind, ErrorKind::EndOfStream);
    }

    #[test]
    fn test_vec_sink_collects() {
        let mut sink: Vec<Diagnostic> = Vec::new();
        let error = SyntaxError::new(ErrorKind::InvalidLiteral, "Invalid bit position: x", 2);
        sink.report(&Diagnostic::from_error(&error));
        assert_eq!(sink.len(), 1);
        assert_eq!(sink[0].line, 2);
    }
}
