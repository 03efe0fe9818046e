//! Token cursor: a movable read position over the token stream
//!
//! The cursor is the only mutable state threaded through parsing. It never
//! rewinds; recovery advances it forward to a synchronization point. An
//! `Eof` sentinel is guaranteed so `peek` is total; productions that run
//! into it surface an end-of-stream error at their `expect` call.

use crate::token::{Token, TokenKind};

#[derive(Debug)]
pub struct TokenCursor {
    tokens: Vec<Token>,
    position: usize,
}

impl TokenCursor {
    /// Wrap a token sequence, appending an `Eof` sentinel if the producer
    /// did not include one.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        let needs_eof = tokens.last().map(|t| t.kind != TokenKind::Eof).unwrap_or(true);
        if needs_eof {
            let line = tokens.last().map(|t| t.line).unwrap_or(1);
            tokens.push(Token::eof(line));
        }
        Self { tokens, position: 0 }
    }

    /// Current token without consuming it.
    pub fn peek(&self) -> &Token {
        &self.tokens[self.position]
    }

    /// Token `n` positions past the current one, if any.
    pub fn peek_ahead(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.position + n)
    }

    /// Consume and return the current token. At end of input the sentinel
    /// is returned and the position stays put.
    pub fn advance(&mut self) -> Token {
        let token = self.tokens[self.position].clone();
        if !self.at_end() {
            self.position += 1;
        }
        token
    }

    /// True when the current token has the given kind.
    pub fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    /// True once the sentinel is reached.
    pub fn at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    /// Source line of the current token.
    pub fn line(&self) -> usize {
        self.peek().line
    }

    /// Current index into the token sequence. Used by callers to verify
    /// that recovery made progress.
    pub fn position(&self) -> usize {
        self.position
    }
}
