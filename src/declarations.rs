//! Declaration parsing implementation
//!
//! ```text
//! declaration ::= const_decl | sbit_decl | sfr_decl | typed_decl
//! const_decl  ::= "const" type identifier "=" literal ";"
//! sbit_decl   ::= "sbit" identifier "=" bit_literal ";"
//! sfr_decl    ::= "sfr" identifier "=" hex_literal ";"
//! typed_decl  ::= type identifier ( function_tail | [ "=" expr ] ";" )
//! function_tail ::= "(" params ")" [ "interrupt" number ] ( block | ";" )
//! ```
//!
//! Declaration literals are validated here: bit positions and interrupt
//! vectors as non-negative integers, SFR addresses as hexadecimal (kept
//! verbatim as written).

use crate::ast::{AstNode, Param};
use crate::diagnostics::{ErrorKind, SyntaxError};
use crate::parse::Parser;
use crate::token::{Token, TokenKind};

impl Parser {
    /// Dispatch on the leading declaration keyword.
    pub(crate) fn parse_declaration(&mut self) -> Result<AstNode, SyntaxError> {
        match self.cursor.peek().kind {
            TokenKind::Const => self.parse_const_declaration(),
            TokenKind::Sbit => self.parse_sbit_declaration(),
            TokenKind::Sfr => self.parse_sfr_declaration(),
            _ => self.parse_typed_declaration(),
        }
    }

    /// `const type name = literal;`
    fn parse_const_declaration(&mut self) -> Result<AstNode, SyntaxError> {
        let line = self.cursor.line();
        self.cursor.advance(); // 'const'

        let data_type = self.expect_type_keyword("after 'const'")?;
        let name = self.expect_identifier("after constant type")?;
        self.expect(TokenKind::Eq, "'=' after constant name")?;
        let value = self.expect_literal("as constant value")?;
        self.expect_semicolon("after constant declaration")?;

        Ok(AstNode::ConstDecl {
            data_type: data_type.text,
            name: name.text,
            value: value.text,
            line,
        })
    }

    /// `sbit name = bit;` — the bit position must be a non-negative integer.
    fn parse_sbit_declaration(&mut self) -> Result<AstNode, SyntaxError> {
        let line = self.cursor.line();
        self.cursor.advance(); // 'sbit'

        let name = self.expect_identifier("after 'sbit'")?;
        self.expect(TokenKind::Eq, "'=' after sbit name")?;
        let value = self.expect_literal("as bit position")?;
        let bit = parse_bit_position(&value)?;
        self.expect_semicolon("after sbit declaration")?;

        Ok(AstNode::SbitDecl {
            name: name.text,
            bit,
            line,
        })
    }

    /// `sfr name = 0xNN;` — the address must be hexadecimal and is kept
    /// verbatim.
    fn parse_sfr_declaration(&mut self) -> Result<AstNode, SyntaxError> {
        let line = self.cursor.line();
        self.cursor.advance(); // 'sfr'

        let name = self.expect_identifier("after 'sfr'")?;
        self.expect(TokenKind::Eq, "'=' after sfr name")?;
        let value = self.expect_literal("as sfr address")?;
        if !is_hex_literal(&value.text) {
            return Err(SyntaxError::new(
                ErrorKind::InvalidLiteral,
                format!("Invalid SFR address: {} (expected hexadecimal)", value.text),
                value.line,
            ));
        }
        self.expect_semicolon("after sfr declaration")?;

        Ok(AstNode::SfrDecl {
            name: name.text,
            address: value.text,
            line,
        })
    }

    /// `type name ...` — a function declaration when `(` follows the name,
    /// otherwise a variable declaration with optional initializer.
    pub(crate) fn parse_typed_declaration(&mut self) -> Result<AstNode, SyntaxError> {
        let line = self.cursor.line();
        let data_type = self.expect_type_keyword("to begin declaration")?;
        let name = self.expect_identifier("after type")?;

        match self.cursor.peek().kind {
            TokenKind::LParen => self.parse_function_tail(data_type.text, name.text, line),
            TokenKind::Eq => {
                self.cursor.advance();
                let init = self.parse_expression()?;
                self.expect_semicolon("after variable declaration")?;
                Ok(AstNode::TypeDecl {
                    data_type: data_type.text,
                    name: name.text,
                    init: Some(Box::new(init)),
                    line,
                })
            }
            TokenKind::Semicolon => {
                self.cursor.advance();
                Ok(AstNode::TypeDecl {
                    data_type: data_type.text,
                    name: name.text,
                    init: None,
                    line,
                })
            }
            _ => Err(SyntaxError::expected(
                "'(', '=' or ';' after declaration name",
                self.cursor.peek(),
            )),
        }
    }

    /// Parameter list, optional `interrupt N` attribute, then a body block
    /// or a prototype `;`.
    fn parse_function_tail(
        &mut self,
        return_type: String,
        name: String,
        line: usize,
    ) -> Result<AstNode, SyntaxError> {
        self.expect_lparen("after function name")?;
        let parameters = self.parse_parameter_list()?;
        self.expect_rparen("after parameters")?;

        let interrupt = if self.match_kind(TokenKind::Interrupt) {
            let value = self.expect(TokenKind::Number, "interrupt number after 'interrupt'")?;
            Some(parse_interrupt_number(&value)?)
        } else {
            None
        };

        let body = if self.cursor.check(TokenKind::LBrace) {
            Some(Box::new(self.parse_block()?))
        } else {
            self.expect_semicolon("after function prototype")?;
            None
        };

        Ok(AstNode::FunctionDecl {
            return_type,
            name,
            parameters,
            interrupt,
            body,
            line,
        })
    }

    /// `(type name, type name, ...)` — `(void)` and `()` both mean no
    /// parameters.
    fn parse_parameter_list(&mut self) -> Result<Vec<Param>, SyntaxError> {
        let mut parameters = Vec::new();

        if self.cursor.check(TokenKind::RParen) {
            return Ok(parameters);
        }
        if self.cursor.check(TokenKind::Void)
            && self
                .cursor
                .peek_ahead(1)
                .map(|t| t.kind == TokenKind::RParen)
                .unwrap_or(false)
        {
            self.cursor.advance(); // 'void'
            return Ok(parameters);
        }

        loop {
            let data_type = self.expect_type_keyword("as parameter type")?;
            let name = self.expect_identifier("after parameter type")?;
            parameters.push(Param {
                data_type: data_type.text,
                name: name.text,
            });

            if !self.match_kind(TokenKind::Comma) {
                break;
            }
        }

        Ok(parameters)
    }

    fn expect_type_keyword(&mut self, ctx: &str) -> Result<Token, SyntaxError> {
        if self.cursor.peek().kind.is_type_keyword() {
            Ok(self.cursor.advance())
        } else {
            Err(SyntaxError::expected(
                &format!("type keyword {ctx}"),
                self.cursor.peek(),
            ))
        }
    }
}

/// Non-negative integer from a decimal or hex lexeme.
fn parse_bit_position(token: &Token) -> Result<u32, SyntaxError> {
    let parsed = match token.kind {
        TokenKind::Number => token.text.parse::<u32>().ok(),
        TokenKind::HexNumber => {
            let digits = token
                .text
                .trim_start_matches("0x")
                .trim_start_matches("0X");
            u32::from_str_radix(digits, 16).ok()
        }
        _ => None,
    };
    parsed.ok_or_else(|| {
        SyntaxError::new(
            ErrorKind::InvalidLiteral,
            format!("Invalid bit position: {}", token.text),
            token.line,
        )
    })
}

fn parse_interrupt_number(token: &Token) -> Result<u32, SyntaxError> {
    token.text.parse::<u32>().map_err(|_| {
        SyntaxError::new(
            ErrorKind::InvalidLiteral,
            format!("Invalid interrupt number: {}", token.text),
            token.line,
        )
    })
}

/// `0x` (or `0X`) followed by at least one hex digit.
fn is_hex_literal(text: &str) -> bool {
    let digits = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(rest) => rest,
        None => return false,
    };
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::ErrorKind;

    fn parse_decl(source: &str) -> AstNode {
        let mut parser = Parser::from_source(source).expect("lexing failed");
        let decl = parser.parse_declaration().expect("parsing failed");
        assert!(parser.diagnostics().is_empty());
        decl
    }

    #[test]
    fn test_constant_declaration() {
        assert_eq!(
            parse_decl("const int MAX_VALUE = 100;"),
            AstNode::ConstDecl {
                data_type: "int".into(),
                name: "MAX_VALUE".into(),
                value: "100".into(),
                line: 1,
            }
        );
    }

    #[test]
    fn test_sbit_declaration() {
        assert_eq!(
            parse_decl("sbit myBit = 0;"),
            AstNode::SbitDecl {
                name: "myBit".into(),
                bit: 0,
                line: 1,
            }
        );
    }

    #[test]
    fn test_sfr_address_preserved_verbatim() {
        assert_eq!(
            parse_decl("sfr mySFR = 0x20;"),
            AstNode::SfrDecl {
                name: "mySFR".into(),
                address: "0x20".into(),
                line: 1,
            }
        );
    }

    #[test]
    fn test_sfr_rejects_decimal_address() {
        let mut parser = Parser::from_source("sfr P0 = 128;").unwrap();
        let error = parser.parse_declaration().expect_err("should reject");
        assert_eq!(error.kind, ErrorKind::InvalidLiteral);
    }

    #[test]
    fn test_sbit_rejects_char_literal() {
        let mut parser = Parser::from_source("sbit b = 'x';").unwrap();
        let error = parser.parse_declaration().expect_err("should reject");
        assert_eq!(error.kind, ErrorKind::InvalidLiteral);
    }

    #[test]
    fn test_bare_type_declaration() {
        assert_eq!(
            parse_decl("int myVariable;"),
            AstNode::TypeDecl {
                data_type: "int".into(),
                name: "myVariable".into(),
                init: None,
                line: 1,
            }
        );
    }

    #[test]
    fn test_initialized_declaration() {
        let decl = parse_decl("char c = 'a';");
        assert!(matches!(
            decl,
            AstNode::TypeDecl {
                init: Some(_),
                ..
            }
        ));
    }

    #[test]
    fn test_function_without_interrupt() {
        let decl = parse_decl("void main(void) { }");
        let AstNode::FunctionDecl {
            interrupt,
            parameters,
            ..
        } = decl
        else {
            panic!("Expected function");
        };
        assert_eq!(interrupt, None);
        assert!(parameters.is_empty());
    }

    #[test]
    fn test_function_with_interrupt_vector() {
        let decl = parse_decl("void isr(void) interrupt 2 { }");
        let AstNode::FunctionDecl { interrupt, name, .. } = decl else {
            panic!("Expected function");
        };
        assert_eq!(name, "isr");
        assert_eq!(interrupt, Some(2));
    }

    #[test]
    fn test_function_parameters() {
        let decl = parse_decl("int add(int a, char b);");
        let AstNode::FunctionDecl {
            parameters, body, ..
        } = decl
        else {
            panic!("Expected function");
        };
        assert_eq!(
            parameters,
            vec![
                Param {
                    data_type: "int".into(),
                    name: "a".into()
                },
                Param {
                    data_type: "char".into(),
                    name: "b".into()
                },
            ]
        );
        assert!(body.is_none());
    }

    #[test]
    fn test_hex_literal_validation() {
        assert!(is_hex_literal("0x80"));
        assert!(is_hex_literal("0XFF"));
        assert!(!is_hex_literal("128"));
        assert!(!is_hex_literal("0x"));
        assert!(!is_hex_literal("0xZZ"));
    }
}
