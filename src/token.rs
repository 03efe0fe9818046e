//! Token model shared by the lexer and the parser
//!
//! A [`Token`] is the unit of input the parser consumes: a closed
//! [`TokenKind`], the raw lexeme text, and a 1-based source line. Tokens may
//! come from the bundled [`crate::lexer`] or from any external tokenizer that
//! produces the same shape.

use std::fmt;

/// All token kinds recognized by the C51 grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // Literals
    Number,
    HexNumber,
    CharLiteral,

    // Identifiers
    Ident,

    // Type keywords
    Void,
    Bit,
    Char,
    Int,
    Float,
    Long,

    // Storage and C51-specific keywords
    Const,
    Sbit,
    Sfr,
    Interrupt,

    // Control-flow keywords
    If,
    Else,
    While,
    Do,
    For,
    Switch,
    Case,
    Default,
    Break,
    Continue,
    Return,
    Goto,

    // Arithmetic operators
    Plus,    // +
    Minus,   // -
    Star,    // *
    Slash,   // /
    Percent, // %

    // Comparison operators
    EqEq,  // ==
    NotEq, // !=
    Lt,    // <
    Le,    // <=
    Gt,    // >
    Ge,    // >=

    // Logical operators
    AndAnd, // &&
    OrOr,   // ||
    Bang,   // !

    // Bitwise operators
    Amp,   // &
    Pipe,  // |
    Caret, // ^
    Tilde, // ~

    // Assignment operators
    Eq,        // =
    PlusEq,    // +=
    MinusEq,   // -=
    StarEq,    // *=
    SlashEq,   // /=
    PercentEq, // %=
    AmpEq,     // &=
    PipeEq,    // |=
    CaretEq,   // ^=

    // Increment/decrement
    PlusPlus,   // ++
    MinusMinus, // --

    // Punctuation
    LParen,    // (
    RParen,    // )
    LBrace,    // {
    RBrace,    // }
    Semicolon, // ;
    Comma,     // ,
    Colon,     // :

    // End of input
    Eof,
}

impl TokenKind {
    /// Fixed lexeme for keyword, operator, and punctuation kinds.
    ///
    /// Returns `None` for kinds whose text varies per token (literals,
    /// identifiers) and for `Eof`.
    pub fn lexeme(&self) -> Option<&'static str> {
        let text = match self {
            TokenKind::Void => "void",
            TokenKind::Bit => "bit",
            TokenKind::Char => "char",
            TokenKind::Int => "int",
            TokenKind::Float => "float",
            TokenKind::Long => "long",
            TokenKind::Const => "const",
            TokenKind::Sbit => "sbit",
            TokenKind::Sfr => "sfr",
            TokenKind::Interrupt => "interrupt",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::While => "while",
            TokenKind::Do => "do",
            TokenKind::For => "for",
            TokenKind::Switch => "switch",
            TokenKind::Case => "case",
            TokenKind::Default => "default",
            TokenKind::Break => "break",
            TokenKind::Continue => "continue",
            TokenKind::Return => "return",
            TokenKind::Goto => "goto",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::EqEq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::Lt => "<",
            TokenKind::Le => "<=",
            TokenKind::Gt => ">",
            TokenKind::Ge => ">=",
            TokenKind::AndAnd => "&&",
            TokenKind::OrOr => "||",
            TokenKind::Bang => "!",
            TokenKind::Amp => "&",
            TokenKind::Pipe => "|",
            TokenKind::Caret => "^",
            TokenKind::Tilde => "~",
            TokenKind::Eq => "=",
            TokenKind::PlusEq => "+=",
            TokenKind::MinusEq => "-=",
            TokenKind::StarEq => "*=",
            TokenKind::SlashEq => "/=",
            TokenKind::PercentEq => "%=",
            TokenKind::AmpEq => "&=",
            TokenKind::PipeEq => "|=",
            TokenKind::CaretEq => "^=",
            TokenKind::PlusPlus => "++",
            TokenKind::MinusMinus => "--",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::Semicolon => ";",
            TokenKind::Comma => ",",
            TokenKind::Colon => ":",
            _ => return None,
        };
        Some(text)
    }

    /// Look up the keyword kind for an identifier-shaped lexeme.
    pub fn keyword(text: &str) -> Option<TokenKind> {
        let kind = match text {
            "void" => TokenKind::Void,
            "bit" => TokenKind::Bit,
            "char" => TokenKind::Char,
            "int" => TokenKind::Int,
            "float" => TokenKind::Float,
            "long" => TokenKind::Long,
            "const" => TokenKind::Const,
            "sbit" => TokenKind::Sbit,
            "sfr" => TokenKind::Sfr,
            "interrupt" => TokenKind::Interrupt,
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            "while" => TokenKind::While,
            "do" => TokenKind::Do,
            "for" => TokenKind::For,
            "switch" => TokenKind::Switch,
            "case" => TokenKind::Case,
            "default" => TokenKind::Default,
            "break" => TokenKind::Break,
            "continue" => TokenKind::Continue,
            "return" => TokenKind::Return,
            "goto" => TokenKind::Goto,
            _ => return None,
        };
        Some(kind)
    }

    /// True for kinds that name a data type (`void`, `bit`, `char`, ...).
    pub fn is_type_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::Void
                | TokenKind::Bit
                | TokenKind::Char
                | TokenKind::Int
                | TokenKind::Float
                | TokenKind::Long
        )
    }

    /// True for literal kinds (numbers, hex numbers, character literals).
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            TokenKind::Number | TokenKind::HexNumber | TokenKind::CharLiteral
        )
    }
}

/// A single lexical unit: kind, raw lexeme, and 1-based source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
        }
    }

    /// Identifier token.
    pub fn ident(name: impl Into<String>, line: usize) -> Self {
        Self::new(TokenKind::Ident, name, line)
    }

    /// Decimal number token; the lexeme is kept verbatim.
    pub fn number(text: impl Into<String>, line: usize) -> Self {
        Self::new(TokenKind::Number, text, line)
    }

    /// Hexadecimal number token (`0x..`); the lexeme is kept verbatim.
    pub fn hex_number(text: impl Into<String>, line: usize) -> Self {
        Self::new(TokenKind::HexNumber, text, line)
    }

    /// Keyword, operator, or punctuation token with its fixed lexeme.
    ///
    /// Falls back to an empty lexeme for variable-text kinds; callers should
    /// use [`Token::new`] for those.
    pub fn symbol(kind: TokenKind, line: usize) -> Self {
        Self::new(kind, kind.lexeme().unwrap_or_default(), line)
    }

    /// End-of-input sentinel.
    pub fn eof(line: usize) -> Self {
        Self::new(TokenKind::Eof, "", line)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind == TokenKind::Eof {
            write!(f, "end of input")
        } else {
            write!(f, "'{}'", self.text)
        }
    }
}
