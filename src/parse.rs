//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing
//! infrastructure: the token cursor, `expect` helpers, collaborator hooks,
//! and the `parse_program` entry point.
//!
//! # Parser architecture
//!
//! Parsing is recursive descent with an iterative precedence-climbing loop
//! for binary operators. Parser methods are split across multiple files
//! using `impl Parser` blocks:
//! - `expressions`: unary, binary, assignment, and primary expressions
//! - `statements`: control flow, blocks, and simple statements
//! - `declarations`: `const`, `sbit`, `sfr`, typed and function declarations
//! - `recovery`: panic-mode synchronization after syntax errors
//!
//! Every parsing routine returns `Result<AstNode, SyntaxError>`; syntax
//! errors are an expected outcome, recovered at statement boundaries into
//! [`AstNode::Error`] nodes rather than unwound through the whole pass.

use crate::ast::{AstNode, Program};
use crate::cursor::TokenCursor;
use crate::diagnostics::{Diagnostic, DiagnosticSink, ParseFailure, SyntaxError};
use crate::lexer::{LexError, Lexer};
use crate::symbols::SymbolLookup;
use crate::token::{Token, TokenKind};
use log::debug;

/// Default cap on consecutive recoveries before the pass is abandoned.
pub const DEFAULT_ERROR_LIMIT: usize = 25;

/// Recursive descent parser for the C51 dialect.
pub struct Parser {
    pub(crate) cursor: TokenCursor,
    pub(crate) diagnostics: Vec<Diagnostic>,
    pub(crate) sink: Option<Box<dyn DiagnosticSink>>,
    pub(crate) symbols: Option<Box<dyn SymbolLookup>>,
    pub(crate) error_limit: usize,
    pub(crate) consecutive_errors: usize,
}

impl Parser {
    /// Parse a token stream produced by an external lexer.
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            cursor: TokenCursor::new(tokens),
            diagnostics: Vec::new(),
            sink: None,
            symbols: None,
            error_limit: DEFAULT_ERROR_LIMIT,
            consecutive_errors: 0,
        }
    }

    /// Tokenize `source` with the bundled lexer and parse the result.
    pub fn from_source(source: &str) -> Result<Self, LexError> {
        let tokens = Lexer::new(source).tokenize()?;
        Ok(Self::new(tokens))
    }

    /// Cap on consecutive unrecovered-progress errors before the whole pass
    /// aborts with [`ParseFailure`].
    pub fn with_error_limit(mut self, limit: usize) -> Self {
        self.error_limit = limit.max(1);
        self
    }

    /// Forward every diagnostic to an external sink in addition to the
    /// parser's own collected list.
    pub fn with_sink(mut self, sink: Box<dyn DiagnosticSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Consult a symbol table for identifier validity while parsing.
    pub fn with_symbols(mut self, symbols: Box<dyn SymbolLookup>) -> Self {
        self.symbols = Some(symbols);
        self
    }

    /// Parse the entire token stream into a [`Program`].
    ///
    /// Syntax errors are recovered in place and appear as
    /// [`AstNode::Error`] nodes; the only fatal outcome is exceeding the
    /// consecutive-error limit, which returns every diagnostic collected so
    /// far.
    pub fn parse_program(&mut self) -> Result<Program, ParseFailure> {
        let mut program = Program::new();

        while !self.cursor.at_end() {
            let start = self.cursor.position();
            let node = match self.parse_top_level() {
                Ok(node) => {
                    // A container that bailed out at the error limit still
                    // returns Ok; the limit state must survive it.
                    if !self.over_limit() {
                        self.consecutive_errors = 0;
                    }
                    node
                }
                Err(error) => {
                    let node = self.recover(error);
                    // A stray sync-point token (e.g. an unmatched `}`)
                    // would otherwise stall the cursor.
                    if self.cursor.position() == start {
                        self.cursor.advance();
                    }
                    node
                }
            };
            program.nodes.push(node);

            if self.over_limit() {
                return Err(ParseFailure {
                    limit: self.error_limit,
                    errors: self.diagnostics.clone(),
                });
            }
        }

        debug!(
            target: "parser",
            "parsed {} top-level nodes, {} diagnostics",
            program.nodes.len(),
            self.diagnostics.len()
        );
        Ok(program)
    }

    /// All diagnostics reported during the pass, in source order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Top-level dispatch: declarations when the leading token starts one,
    /// plain statements otherwise.
    fn parse_top_level(&mut self) -> Result<AstNode, SyntaxError> {
        if self.at_declaration_start() {
            self.parse_declaration()
        } else {
            self.parse_statement()
        }
    }

    // ===== Helper methods =====

    pub(crate) fn at_declaration_start(&self) -> bool {
        let kind = self.cursor.peek().kind;
        kind.is_type_keyword()
            || matches!(kind, TokenKind::Const | TokenKind::Sbit | TokenKind::Sfr)
    }

    /// Consume the current token if it matches `kind`.
    pub(crate) fn match_kind(&mut self, kind: TokenKind) -> bool {
        if self.cursor.check(kind) {
            self.cursor.advance();
            true
        } else {
            false
        }
    }

    /// Consume and return the current token if it matches `kind`; otherwise
    /// report what the grammar required.
    pub(crate) fn expect(&mut self, kind: TokenKind, what: &str) -> Result<Token, SyntaxError> {
        if self.cursor.check(kind) {
            Ok(self.cursor.advance())
        } else {
            Err(SyntaxError::expected(what, self.cursor.peek()))
        }
    }

    pub(crate) fn expect_semicolon(&mut self, ctx: &str) -> Result<Token, SyntaxError> {
        self.expect(TokenKind::Semicolon, &format!("';' {ctx}"))
    }

    pub(crate) fn expect_lparen(&mut self, ctx: &str) -> Result<Token, SyntaxError> {
        self.expect(TokenKind::LParen, &format!("'(' {ctx}"))
    }

    pub(crate) fn expect_rparen(&mut self, ctx: &str) -> Result<Token, SyntaxError> {
        self.expect(TokenKind::RParen, &format!("')' {ctx}"))
    }

    pub(crate) fn expect_identifier(&mut self, ctx: &str) -> Result<Token, SyntaxError> {
        self.expect(TokenKind::Ident, &format!("identifier {ctx}"))
    }

    /// Consume a literal token (number, hex number, or char literal).
    pub(crate) fn expect_literal(&mut self, ctx: &str) -> Result<Token, SyntaxError> {
        if self.cursor.peek().kind.is_literal() {
            Ok(self.cursor.advance())
        } else {
            Err(SyntaxError::expected(
                &format!("literal {ctx}"),
                self.cursor.peek(),
            ))
        }
    }

    pub(crate) fn over_limit(&self) -> bool {
        self.consecutive_errors >= self.error_limit
    }
}
