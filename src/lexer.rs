//! Lexer (tokenizer) for C51 source text
//!
//! Converts raw source into the flat [`Token`] stream the parser consumes.
//! The parser itself only depends on the [`Token`] shape, so any external
//! tokenizer producing the same stream works too; this one exists so the
//! crate can parse straight from source and so a printed AST can be read
//! back for round-trip checks.
//!
//! Literal lexemes are kept verbatim: `0x20` stays `"0x20"`, `'\n'` stays
//! `"'\n'"` with its quotes. Numeric interpretation happens downstream.

use crate::token::{Token, TokenKind};
use std::fmt;

/// Lexical error: the input contains a character sequence that is not part
/// of the C51 dialect.
#[derive(Debug, Clone)]
pub struct LexError {
    pub message: String,
    pub line: usize,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Lex error at line {}: {}", self.line, self.message)
    }
}

impl std::error::Error for LexError {}

/// Hand-written single-pass lexer.
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
        }
    }

    /// Tokenize the entire input, ending with an `Eof` sentinel.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace_and_comments()?;

            if self.is_at_end() {
                tokens.push(Token::eof(self.line));
                break;
            }

            tokens.push(self.next_token()?);
        }

        Ok(tokens)
    }

    fn next_token(&mut self) -> Result<Token, LexError> {
        let line = self.line;
        let ch = self.advance().ok_or_else(|| LexError {
            message: "Unexpected end of input".to_string(),
            line,
        })?;

        match ch {
            '\'' => self.char_literal(line),

            '0'..='9' => Ok(self.number_literal(ch, line)),

            'a'..='z' | 'A'..='Z' | '_' => Ok(self.identifier_or_keyword(ch, line)),

            '+' => {
                if self.eat('+') {
                    Ok(Token::symbol(TokenKind::PlusPlus, line))
                } else if self.eat('=') {
                    Ok(Token::symbol(TokenKind::PlusEq, line))
                } else {
                    Ok(Token::symbol(TokenKind::Plus, line))
                }
            }
            '-' => {
                if self.eat('-') {
                    Ok(Token::symbol(TokenKind::MinusMinus, line))
                } else if self.eat('=') {
                    Ok(Token::symbol(TokenKind::MinusEq, line))
                } else {
                    Ok(Token::symbol(TokenKind::Minus, line))
                }
            }
            '*' => {
                if self.eat('=') {
                    Ok(Token::symbol(TokenKind::StarEq, line))
                } else {
                    Ok(Token::symbol(TokenKind::Star, line))
                }
            }
            '/' => {
                if self.eat('=') {
                    Ok(Token::symbol(TokenKind::SlashEq, line))
                } else {
                    Ok(Token::symbol(TokenKind::Slash, line))
                }
            }
            '%' => {
                if self.eat('=') {
                    Ok(Token::symbol(TokenKind::PercentEq, line))
                } else {
                    Ok(Token::symbol(TokenKind::Percent, line))
                }
            }
            '=' => {
                if self.eat('=') {
                    Ok(Token::symbol(TokenKind::EqEq, line))
                } else {
                    Ok(Token::symbol(TokenKind::Eq, line))
                }
            }
            '!' => {
                if self.eat('=') {
                    Ok(Token::symbol(TokenKind::NotEq, line))
                } else {
                    Ok(Token::symbol(TokenKind::Bang, line))
                }
            }
            '<' => {
                if self.eat('=') {
                    Ok(Token::symbol(TokenKind::Le, line))
                } else {
                    Ok(Token::symbol(TokenKind::Lt, line))
                }
            }
            '>' => {
                if self.eat('=') {
                    Ok(Token::symbol(TokenKind::Ge, line))
                } else {
                    Ok(Token::symbol(TokenKind::Gt, line))
                }
            }
            '&' => {
                if self.eat('&') {
                    Ok(Token::symbol(TokenKind::AndAnd, line))
                } else if self.eat('=') {
                    Ok(Token::symbol(TokenKind::AmpEq, line))
                } else {
                    Ok(Token::symbol(TokenKind::Amp, line))
                }
            }
            '|' => {
                if self.eat('|') {
                    Ok(Token::symbol(TokenKind::OrOr, line))
                } else if self.eat('=') {
                    Ok(Token::symbol(TokenKind::PipeEq, line))
                } else {
                    Ok(Token::symbol(TokenKind::Pipe, line))
                }
            }
            '^' => {
                if self.eat('=') {
                    Ok(Token::symbol(TokenKind::CaretEq, line))
                } else {
                    Ok(Token::symbol(TokenKind::Caret, line))
                }
            }
            '~' => Ok(Token::symbol(TokenKind::Tilde, line)),
            ':' => Ok(Token::symbol(TokenKind::Colon, line)),
            '(' => Ok(Token::symbol(TokenKind::LParen, line)),
            ')' => Ok(Token::symbol(TokenKind::RParen, line)),
            '{' => Ok(Token::symbol(TokenKind::LBrace, line)),
            '}' => Ok(Token::symbol(TokenKind::RBrace, line)),
            ';' => Ok(Token::symbol(TokenKind::Semicolon, line)),
            ',' => Ok(Token::symbol(TokenKind::Comma, line)),

            _ => Err(LexError {
                message: format!("Unexpected character: '{ch}'"),
                line,
            }),
        }
    }

    /// Decimal or hexadecimal number; the lexeme is kept as written.
    fn number_literal(&mut self, first: char, line: usize) -> Token {
        let mut text = String::from(first);

        if first == '0' && matches!(self.peek(), Some('x') | Some('X')) {
            text.push(self.advance().unwrap_or('x'));
            while let Some(ch) = self.peek() {
                if ch.is_ascii_hexdigit() {
                    text.push(ch);
                    self.advance();
                } else {
                    break;
                }
            }
            return Token::hex_number(text, line);
        }

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                text.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        Token::number(text, line)
    }

    /// Character literal, quotes and any escape kept verbatim.
    fn char_literal(&mut self, line: usize) -> Result<Token, LexError> {
        let mut text = String::from('\'');

        let ch = self.advance().ok_or_else(|| LexError {
            message: "Unterminated character literal".to_string(),
            line,
        })?;
        text.push(ch);

        if ch == '\\' {
            let escaped = self.advance().ok_or_else(|| LexError {
                message: "Unterminated character literal".to_string(),
                line,
            })?;
            text.push(escaped);
        }

        match self.advance() {
            Some('\'') => {
                text.push('\'');
                Ok(Token::new(TokenKind::CharLiteral, text, line))
            }
            _ => Err(LexError {
                message: "Unterminated character literal".to_string(),
                line,
            }),
        }
    }

    fn identifier_or_keyword(&mut self, first: char, line: usize) -> Token {
        let mut text = String::from(first);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                text.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        match TokenKind::keyword(&text) {
            Some(kind) => Token::new(kind, text, line),
            None => Token::ident(text, line),
        }
    }

    fn skip_whitespace_and_comments(&mut self) -> Result<(), LexError> {
        loop {
            match self.peek() {
                Some(ch) if ch.is_whitespace() => {
                    self.advance();
                }
                Some('/') if self.peek_ahead(1) == Some('/') => {
                    while let Some(ch) = self.peek() {
                        if ch == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                Some('/') if self.peek_ahead(1) == Some('*') => {
                    let start_line = self.line;
                    self.advance();
                    self.advance();
                    loop {
                        match self.peek() {
                            Some('*') if self.peek_ahead(1) == Some('/') => {
                                self.advance();
                                self.advance();
                                break;
                            }
                            Some(_) => {
                                self.advance();
                            }
                            None => {
                                return Err(LexError {
                                    message: "Unterminated block comment".to_string(),
                                    line: start_line,
                                });
                            }
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;
        if ch == '\n' {
            self.line += 1;
        }
        Some(ch)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }
}
