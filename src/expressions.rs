//! Expression parsing implementation
//!
//! Binary operators are parsed by a single iterative precedence-climbing
//! loop over the table in [`BinOp::precedence`], so recursion depth is
//! bounded by parenthesis nesting rather than expression length. All levels
//! are left-associative except assignment, which recurses on its right-hand
//! side.
//!
//! Compound assignment desugars at parse time: `f += 5` becomes
//! `Assignment { left: f, right: BinaryOp { op: AddAssign, left: f,
//! right: 5 } }` — the operator keeps its compound spelling while the
//! operand structure mirrors the expansion.

use crate::ast::{AstNode, BinOp, UnOp};
use crate::diagnostics::SyntaxError;
use crate::parse::Parser;
use crate::token::TokenKind;
use log::debug;

impl Parser {
    /// Parse expression (top-level entry point).
    pub(crate) fn parse_expression(&mut self) -> Result<AstNode, SyntaxError> {
        self.parse_assignment()
    }

    /// Assignment and compound assignment (right-associative). The left
    /// side must be an identifier in this grammar.
    fn parse_assignment(&mut self) -> Result<AstNode, SyntaxError> {
        let left = self.parse_binary(1)?;

        let kind = self.cursor.peek().kind;
        let compound = BinOp::compound_from_kind(kind);
        if kind != TokenKind::Eq && compound.is_none() {
            return Ok(left);
        }

        if !matches!(left, AstNode::Identifier { .. }) {
            return Err(SyntaxError::unexpected(self.cursor.peek()));
        }

        let op_line = self.cursor.line();
        self.cursor.advance();
        let rhs = self.parse_assignment()?;

        let right = match compound {
            Some(op) => AstNode::BinaryOp {
                op,
                left: Box::new(left.clone()),
                right: Box::new(rhs),
                line: op_line,
            },
            None => rhs,
        };

        Ok(AstNode::Assignment {
            line: left.line(),
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    /// Iterative precedence climbing over all binary levels at or above
    /// `min_prec`. Left-associativity falls out of climbing the right
    /// operand at `prec + 1`.
    fn parse_binary(&mut self, min_prec: u8) -> Result<AstNode, SyntaxError> {
        let mut left = self.parse_unary()?;

        while let Some(op) = BinOp::from_kind(self.cursor.peek().kind) {
            let prec = op.precedence();
            if prec < min_prec {
                break;
            }
            let line = self.cursor.line();
            self.cursor.advance();
            let right = self.parse_binary(prec + 1)?;
            left = AstNode::BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
                line,
            };
        }

        Ok(left)
    }

    /// Prefix unary operators (right-associative), then postfix.
    fn parse_unary(&mut self) -> Result<AstNode, SyntaxError> {
        let line = self.cursor.line();
        let op = match self.cursor.peek().kind {
            TokenKind::PlusPlus => Some(UnOp::Inc),
            TokenKind::MinusMinus => Some(UnOp::Dec),
            TokenKind::Bang => Some(UnOp::Not),
            TokenKind::Tilde => Some(UnOp::BitNot),
            TokenKind::Minus => Some(UnOp::Neg),
            TokenKind::Amp => Some(UnOp::AddrOf),
            TokenKind::Star => Some(UnOp::Deref),
            _ => None,
        };

        if let Some(op) = op {
            self.cursor.advance();
            let operand = self.parse_unary()?;
            return Ok(AstNode::UnaryOp {
                op,
                operand: Box::new(operand),
                prefix: true,
                line,
            });
        }

        self.parse_postfix()
    }

    /// Postfix `++` / `--`, binding tightest.
    fn parse_postfix(&mut self) -> Result<AstNode, SyntaxError> {
        let mut expr = self.parse_primary()?;

        loop {
            let op = match self.cursor.peek().kind {
                TokenKind::PlusPlus => UnOp::Inc,
                TokenKind::MinusMinus => UnOp::Dec,
                _ => break,
            };
            let line = self.cursor.line();
            self.cursor.advance();
            expr = AstNode::UnaryOp {
                op,
                operand: Box::new(expr),
                prefix: false,
                line,
            };
        }

        Ok(expr)
    }

    /// Primary expressions: literals, identifiers, and parenthesized
    /// sub-expressions (which recurse to the lowest precedence level).
    fn parse_primary(&mut self) -> Result<AstNode, SyntaxError> {
        let token = self.cursor.peek().clone();

        match token.kind {
            TokenKind::Number | TokenKind::HexNumber | TokenKind::CharLiteral => {
                self.cursor.advance();
                Ok(AstNode::Literal {
                    value: token.text,
                    line: token.line,
                })
            }
            TokenKind::Ident => {
                self.cursor.advance();
                self.note_identifier(&token.text, token.line);
                Ok(AstNode::Identifier {
                    name: token.text,
                    line: token.line,
                })
            }
            TokenKind::LParen => {
                self.cursor.advance();
                let expr = self.parse_expression()?;
                self.expect_rparen("after parenthesized expression")?;
                Ok(expr)
            }
            _ => Err(SyntaxError::unexpected(&token)),
        }
    }

    /// Consult the symbol table collaborator, when installed. Identifier
    /// validity is a semantic question, so an unknown name is only logged.
    fn note_identifier(&self, name: &str, line: usize) {
        if let Some(symbols) = self.symbols.as_ref() {
            if !symbols.is_declared(name) {
                debug!(target: "parser", "line {line}: identifier '{name}' not in symbol table");
            }
        }
    }
}
