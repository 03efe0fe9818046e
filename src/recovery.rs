//! Panic-mode error recovery
//!
//! When a parsing routine returns a [`SyntaxError`], the caller hands it to
//! [`Parser::recover`]: the error is reported, the cursor skips forward to
//! the next synchronization point (`;`, `{`, `}`, or end of input), and an
//! [`AstNode::Error`] placeholder is returned so the surrounding block can
//! keep parsing. The cursor never rewinds.

use crate::ast::AstNode;
use crate::diagnostics::{Diagnostic, SyntaxError};
use crate::parse::Parser;
use crate::token::TokenKind;
use log::warn;

impl Parser {
    /// Report `error`, resynchronize the cursor, and produce the
    /// placeholder node embedded at the point of failure.
    pub(crate) fn recover(&mut self, error: SyntaxError) -> AstNode {
        self.report(&error);
        self.synchronize();

        AstNode::Error {
            message: error.message,
            line: error.line,
        }
    }

    /// Report an error without moving the cursor. Used when the surrounding
    /// production is still well-formed (e.g. a duplicate `default:` whose
    /// body parsed fine).
    pub(crate) fn report(&mut self, error: &SyntaxError) {
        warn!(target: "parser", "line {}: {}", error.line, error.message);

        let diagnostic = Diagnostic::from_error(error);
        if let Some(sink) = self.sink.as_mut() {
            sink.report(&diagnostic);
        }
        self.diagnostics.push(diagnostic);
        self.consecutive_errors += 1;
    }

    /// Skip tokens until the next statement terminator or block boundary.
    /// A `;` is consumed (the statement it ended is already lost); braces
    /// are left for the enclosing block parser.
    fn synchronize(&mut self) {
        while !self.cursor.at_end() {
            match self.cursor.peek().kind {
                TokenKind::Semicolon => {
                    self.cursor.advance();
                    return;
                }
                TokenKind::LBrace | TokenKind::RBrace => return,
                _ => {
                    self.cursor.advance();
                }
            }
        }
    }

    /// Parse one statement, recovering locally on failure. Used by every
    /// statement-list loop (blocks, switch arms) so a bad statement never
    /// aborts its container. Guarantees cursor progress even when the
    /// offending token is itself a sync point.
    pub(crate) fn parse_statement_recovering(&mut self) -> AstNode {
        let start = self.cursor.position();
        match self.parse_statement() {
            Ok(node) => {
                self.consecutive_errors = 0;
                node
            }
            Err(error) => {
                let node = self.recover(error);
                if self.cursor.position() == start {
                    self.cursor.advance();
                }
                node
            }
        }
    }
}
