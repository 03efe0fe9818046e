//! Statement parsing implementation
//!
//! Dispatches on the leading token of each statement:
//!
//! ```text
//! statement ::= block | if_stmt | while_stmt | do_while_stmt | for_stmt
//!             | switch_stmt | break_stmt | continue_stmt | return_stmt
//!             | goto_stmt | label | declaration | expr_stmt
//! ```
//!
//! A label needs one token of lookahead after the identifier (`name :`
//! versus `name = ...`). Statement lists recover locally: a bad statement
//! becomes an [`AstNode::Error`] and its container keeps going.

use crate::ast::{AstNode, CaseLabel, SwitchCase};
use crate::diagnostics::{ErrorKind, SyntaxError};
use crate::parse::Parser;
use crate::token::TokenKind;

impl Parser {
    /// Parse a statement.
    pub(crate) fn parse_statement(&mut self) -> Result<AstNode, SyntaxError> {
        let line = self.cursor.line();

        match self.cursor.peek().kind {
            TokenKind::LBrace => self.parse_block(),
            TokenKind::If => self.parse_if(),
            TokenKind::While => self.parse_while(),
            TokenKind::Do => self.parse_do_while(),
            TokenKind::For => self.parse_for(),
            TokenKind::Switch => self.parse_switch(),
            TokenKind::Break => {
                self.cursor.advance();
                self.expect_semicolon("after 'break'")?;
                Ok(AstNode::Break { line })
            }
            TokenKind::Continue => {
                self.cursor.advance();
                self.expect_semicolon("after 'continue'")?;
                Ok(AstNode::Continue { line })
            }
            TokenKind::Return => self.parse_return(),
            TokenKind::Goto => {
                self.cursor.advance();
                let label = self.expect_identifier("after 'goto'")?;
                self.expect_semicolon("after goto label")?;
                Ok(AstNode::Goto {
                    label: label.text,
                    line,
                })
            }
            TokenKind::Ident
                if self
                    .cursor
                    .peek_ahead(1)
                    .map(|t| t.kind == TokenKind::Colon)
                    .unwrap_or(false) =>
            {
                let name = self.cursor.advance().text;
                self.cursor.advance(); // ':'
                Ok(AstNode::Label { name, line })
            }
            _ if self.at_declaration_start() => self.parse_declaration(),
            _ => {
                // Expression statement.
                let expr = self.parse_expression()?;
                self.expect_semicolon("after expression")?;
                Ok(expr)
            }
        }
    }

    /// Block: `{ statement* }`. A missing closing brace before end of input
    /// is an unterminated-block error.
    pub(crate) fn parse_block(&mut self) -> Result<AstNode, SyntaxError> {
        let line = self.cursor.line();
        self.expect(TokenKind::LBrace, "'{' to open block")?;

        let mut statements = Vec::new();
        while !self.cursor.check(TokenKind::RBrace) && !self.cursor.at_end() {
            if self.over_limit() {
                break;
            }
            statements.push(self.parse_statement_recovering());
        }

        if self.cursor.at_end() {
            return Err(SyntaxError::new(
                ErrorKind::UnterminatedBlock,
                "Unterminated block: missing '}'",
                line,
            ));
        }
        if !self.over_limit() {
            self.cursor.advance(); // '}'
        }

        Ok(AstNode::Block { statements, line })
    }

    /// Body of `if`/`while`/`for`: a single statement or a braced block.
    fn parse_body(&mut self) -> Result<AstNode, SyntaxError> {
        self.parse_statement()
    }

    fn parse_if(&mut self) -> Result<AstNode, SyntaxError> {
        let line = self.cursor.line();
        self.cursor.advance(); // 'if'

        self.expect_lparen("after 'if'")?;
        let condition = self.parse_expression()?;
        self.expect_rparen("after if condition")?;

        let body = self.parse_body()?;
        let else_body = if self.match_kind(TokenKind::Else) {
            Some(Box::new(self.parse_body()?))
        } else {
            None
        };

        Ok(AstNode::If {
            condition: Box::new(condition),
            body: Box::new(body),
            else_body,
            line,
        })
    }

    fn parse_while(&mut self) -> Result<AstNode, SyntaxError> {
        let line = self.cursor.line();
        self.cursor.advance(); // 'while'

        self.expect_lparen("after 'while'")?;
        let condition = self.parse_expression()?;
        self.expect_rparen("after while condition")?;

        let body = self.parse_body()?;

        Ok(AstNode::While {
            condition: Box::new(condition),
            body: Box::new(body),
            line,
        })
    }

    /// `do body while (condition);` — the body runs before the first
    /// condition check, so `min_iterations` is 1 unconditionally.
    fn parse_do_while(&mut self) -> Result<AstNode, SyntaxError> {
        let line = self.cursor.line();
        self.cursor.advance(); // 'do'

        let body = self.parse_body()?;

        self.expect(TokenKind::While, "'while' after do body")?;
        self.expect_lparen("after 'while'")?;
        let condition = self.parse_expression()?;
        self.expect_rparen("after do-while condition")?;
        self.expect_semicolon("after do-while")?;

        Ok(AstNode::DoWhile {
            body: Box::new(body),
            condition: Box::new(condition),
            min_iterations: 1,
            line,
        })
    }

    /// `for (init; condition; increment) body` — each clause may be empty.
    fn parse_for(&mut self) -> Result<AstNode, SyntaxError> {
        let line = self.cursor.line();
        self.cursor.advance(); // 'for'

        self.expect_lparen("after 'for'")?;

        let init = if self.match_kind(TokenKind::Semicolon) {
            None
        } else if self.cursor.peek().kind.is_type_keyword() {
            // Initialized declaration; consumes its own ';'.
            Some(Box::new(self.parse_typed_declaration()?))
        } else {
            let expr = self.parse_expression()?;
            self.expect_semicolon("after for init")?;
            Some(Box::new(expr))
        };

        let condition = if self.cursor.check(TokenKind::Semicolon) {
            None
        } else {
            Some(Box::new(self.parse_expression()?))
        };
        self.expect_semicolon("after for condition")?;

        let increment = if self.cursor.check(TokenKind::RParen) {
            None
        } else {
            Some(Box::new(self.parse_expression()?))
        };
        self.expect_rparen("after for clauses")?;

        let body = self.parse_body()?;

        Ok(AstNode::For {
            init,
            condition,
            increment,
            body: Box::new(body),
            line,
        })
    }

    fn parse_return(&mut self) -> Result<AstNode, SyntaxError> {
        let line = self.cursor.line();
        self.cursor.advance(); // 'return'

        let expression = if self.cursor.check(TokenKind::Semicolon) {
            None
        } else {
            Some(Box::new(self.parse_expression()?))
        };
        self.expect_semicolon("after return")?;

        Ok(AstNode::Return { expression, line })
    }

    /// `switch (expr) { case lit: ... default: ... }`.
    ///
    /// At most one `default` arm is kept; a second one is reported as a
    /// duplicate and surfaces as an error node in the preceding arm's body,
    /// never overwriting the first.
    fn parse_switch(&mut self) -> Result<AstNode, SyntaxError> {
        let line = self.cursor.line();
        self.cursor.advance(); // 'switch'

        self.expect_lparen("after 'switch'")?;
        let condition = self.parse_expression()?;
        self.expect_rparen("after switch expression")?;
        self.expect(TokenKind::LBrace, "'{' before switch body")?;

        let mut cases: Vec<SwitchCase> = Vec::new();
        let mut default_seen = false;

        while !self.cursor.check(TokenKind::RBrace) && !self.cursor.at_end() {
            if self.over_limit() {
                break;
            }

            let arm_line = self.cursor.line();
            if self.match_kind(TokenKind::Case) {
                let value = self.expect_literal("after 'case'")?;
                self.expect(TokenKind::Colon, "':' after case value")?;
                let body = self.parse_case_body();
                cases.push(SwitchCase {
                    label: CaseLabel::Literal(value.text),
                    body,
                    line: arm_line,
                });
            } else if self.cursor.check(TokenKind::Default) {
                self.cursor.advance();
                self.expect(TokenKind::Colon, "':' after 'default'")?;
                let mut body = self.parse_case_body();

                if default_seen {
                    let error = SyntaxError::new(
                        ErrorKind::DuplicateDefaultCase,
                        "Duplicate default case in switch",
                        arm_line,
                    );
                    self.report(&error);
                    let mut stitched = vec![AstNode::Error {
                        message: error.message,
                        line: error.line,
                    }];
                    stitched.append(&mut body);
                    if let Some(last) = cases.last_mut() {
                        last.body.append(&mut stitched);
                    }
                } else {
                    default_seen = true;
                    cases.push(SwitchCase {
                        label: CaseLabel::Default,
                        body,
                        line: arm_line,
                    });
                }
            } else {
                return Err(SyntaxError::expected(
                    "'case' or 'default' in switch body",
                    self.cursor.peek(),
                ));
            }
        }

        if self.cursor.at_end() {
            return Err(SyntaxError::new(
                ErrorKind::UnterminatedBlock,
                "Unterminated switch: missing '}'",
                line,
            ));
        }
        if !self.over_limit() {
            self.cursor.advance(); // '}'
        }

        Ok(AstNode::Switch {
            condition: Box::new(condition),
            cases,
            line,
        })
    }

    /// Statements of one switch arm, up to the next label or the closing
    /// brace.
    fn parse_case_body(&mut self) -> Vec<AstNode> {
        let mut statements = Vec::new();
        while !self.cursor.check(TokenKind::Case)
            && !self.cursor.check(TokenKind::Default)
            && !self.cursor.check(TokenKind::RBrace)
            && !self.cursor.at_end()
        {
            if self.over_limit() {
                break;
            }
            statements.push(self.parse_statement_recovering());
        }
        statements
    }
}
