//! AST node definitions for the C51 parser
//!
//! Every node carries the 1-based source line it started on, for diagnostics.
//! Nodes are immutable once built and form a tree: each child is owned by
//! exactly one parent.

use crate::token::TokenKind;
use std::fmt;

/// Binary operators, including the compound-assignment forms that the
/// expression parser folds into the right-hand side of an [`AstNode::Assignment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    // Comparison
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    // Logical
    And,
    Or,
    // Bitwise
    BitAnd,
    BitOr,
    BitXor,
    // Compound assignment (kept verbatim when `f += 5` desugars)
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    ModAssign,
    AndAssign,
    OrAssign,
    XorAssign,
}

impl BinOp {
    /// Binding strength for the precedence-climbing loop; higher binds
    /// tighter. Compound-assignment forms never appear here because
    /// assignment is parsed separately (right-associative).
    pub fn precedence(&self) -> u8 {
        match self {
            BinOp::Or => 1,
            BinOp::And => 2,
            BinOp::BitOr => 3,
            BinOp::BitXor => 4,
            BinOp::BitAnd => 5,
            BinOp::Eq | BinOp::Ne => 6,
            BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge => 7,
            BinOp::Add | BinOp::Sub => 8,
            BinOp::Mul | BinOp::Div | BinOp::Mod => 9,
            BinOp::AddAssign
            | BinOp::SubAssign
            | BinOp::MulAssign
            | BinOp::DivAssign
            | BinOp::ModAssign
            | BinOp::AndAssign
            | BinOp::OrAssign
            | BinOp::XorAssign => 0,
        }
    }

    /// Map a token kind to the plain binary operator it begins, if any.
    pub fn from_kind(kind: TokenKind) -> Option<BinOp> {
        let op = match kind {
            TokenKind::Plus => BinOp::Add,
            TokenKind::Minus => BinOp::Sub,
            TokenKind::Star => BinOp::Mul,
            TokenKind::Slash => BinOp::Div,
            TokenKind::Percent => BinOp::Mod,
            TokenKind::EqEq => BinOp::Eq,
            TokenKind::NotEq => BinOp::Ne,
            TokenKind::Lt => BinOp::Lt,
            TokenKind::Le => BinOp::Le,
            TokenKind::Gt => BinOp::Gt,
            TokenKind::Ge => BinOp::Ge,
            TokenKind::AndAnd => BinOp::And,
            TokenKind::OrOr => BinOp::Or,
            TokenKind::Amp => BinOp::BitAnd,
            TokenKind::Pipe => BinOp::BitOr,
            TokenKind::Caret => BinOp::BitXor,
            _ => return None,
        };
        Some(op)
    }

    /// Map a token kind to the compound-assignment operator it names, if any.
    pub fn compound_from_kind(kind: TokenKind) -> Option<BinOp> {
        let op = match kind {
            TokenKind::PlusEq => BinOp::AddAssign,
            TokenKind::MinusEq => BinOp::SubAssign,
            TokenKind::StarEq => BinOp::MulAssign,
            TokenKind::SlashEq => BinOp::DivAssign,
            TokenKind::PercentEq => BinOp::ModAssign,
            TokenKind::AmpEq => BinOp::AndAssign,
            TokenKind::PipeEq => BinOp::OrAssign,
            TokenKind::CaretEq => BinOp::XorAssign,
            _ => return None,
        };
        Some(op)
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
            BinOp::And => "&&",
            BinOp::Or => "||",
            BinOp::BitAnd => "&",
            BinOp::BitOr => "|",
            BinOp::BitXor => "^",
            BinOp::AddAssign => "+=",
            BinOp::SubAssign => "-=",
            BinOp::MulAssign => "*=",
            BinOp::DivAssign => "/=",
            BinOp::ModAssign => "%=",
            BinOp::AndAssign => "&=",
            BinOp::OrAssign => "|=",
            BinOp::XorAssign => "^=",
        };
        write!(f, "{text}")
    }
}

/// Unary operators. Whether the operator appeared before or after its
/// operand lives on the [`AstNode::UnaryOp`] node (`prefix` flag), so `++x`
/// and `x++` share [`UnOp::Inc`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Inc,    // ++
    Dec,    // --
    Not,    // !
    BitNot, // ~
    Neg,    // -
    AddrOf, // &
    Deref,  // *
}

impl fmt::Display for UnOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            UnOp::Inc => "++",
            UnOp::Dec => "--",
            UnOp::Not => "!",
            UnOp::BitNot => "~",
            UnOp::Neg => "-",
            UnOp::AddrOf => "&",
            UnOp::Deref => "*",
        };
        write!(f, "{text}")
    }
}

/// Function parameter: a type keyword and a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub data_type: String,
    pub name: String,
}

/// Label of one `switch` arm: a literal lexeme or the `default` fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseLabel {
    Literal(String),
    Default,
}

/// One arm of a `switch` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchCase {
    pub label: CaseLabel,
    pub body: Vec<AstNode>,
    pub line: usize,
}

/// AST nodes for the C51 dialect: statements, expressions, and declarations.
///
/// Erroneous regions of the input appear as [`AstNode::Error`] nodes so a
/// single pass can report every syntax error without aborting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AstNode {
    // Expressions
    Identifier {
        name: String,
        line: usize,
    },
    /// Literal lexeme kept verbatim; numeric interpretation is deferred to
    /// later phases.
    Literal {
        value: String,
        line: usize,
    },
    BinaryOp {
        op: BinOp,
        left: Box<AstNode>,
        right: Box<AstNode>,
        line: usize,
    },
    UnaryOp {
        op: UnOp,
        operand: Box<AstNode>,
        prefix: bool,
        line: usize,
    },
    /// `left` is always an identifier in this grammar. A compound form such
    /// as `f += 5` keeps `right` as `BinaryOp { op: AddAssign, left: f,
    /// right: 5 }`, mirroring its expansion.
    Assignment {
        left: Box<AstNode>,
        right: Box<AstNode>,
        line: usize,
    },

    // Statements
    Block {
        statements: Vec<AstNode>,
        line: usize,
    },
    If {
        condition: Box<AstNode>,
        body: Box<AstNode>,
        else_body: Option<Box<AstNode>>,
        line: usize,
    },
    While {
        condition: Box<AstNode>,
        body: Box<AstNode>,
        line: usize,
    },
    /// `min_iterations` is always 1: the body runs before the first
    /// condition check.
    DoWhile {
        body: Box<AstNode>,
        condition: Box<AstNode>,
        min_iterations: u32,
        line: usize,
    },
    For {
        init: Option<Box<AstNode>>,
        condition: Option<Box<AstNode>>,
        increment: Option<Box<AstNode>>,
        body: Box<AstNode>,
        line: usize,
    },
    /// At most one [`CaseLabel::Default`] arm; it need not be last but is
    /// the fallback match.
    Switch {
        condition: Box<AstNode>,
        cases: Vec<SwitchCase>,
        line: usize,
    },
    Break {
        line: usize,
    },
    Continue {
        line: usize,
    },
    Goto {
        label: String,
        line: usize,
    },
    Label {
        name: String,
        line: usize,
    },
    Return {
        expression: Option<Box<AstNode>>,
        line: usize,
    },

    // Declarations
    TypeDecl {
        data_type: String,
        name: String,
        init: Option<Box<AstNode>>,
        line: usize,
    },
    ConstDecl {
        data_type: String,
        name: String,
        value: String,
        line: usize,
    },
    SbitDecl {
        name: String,
        bit: u32,
        line: usize,
    },
    /// The SFR address keeps its hex lexeme verbatim (`"0x80"`).
    SfrDecl {
        name: String,
        address: String,
        line: usize,
    },
    FunctionDecl {
        return_type: String,
        name: String,
        parameters: Vec<Param>,
        interrupt: Option<u32>,
        body: Option<Box<AstNode>>,
        line: usize,
    },

    /// Placeholder produced by panic-mode recovery.
    Error {
        message: String,
        line: usize,
    },
}

impl AstNode {
    /// Source line this node started on.
    pub fn line(&self) -> usize {
        match self {
            AstNode::Identifier { line, .. }
            | AstNode::Literal { line, .. }
            | AstNode::BinaryOp { line, .. }
            | AstNode::UnaryOp { line, .. }
            | AstNode::Assignment { line, .. }
            | AstNode::Block { line, .. }
            | AstNode::If { line, .. }
            | AstNode::While { line, .. }
            | AstNode::DoWhile { line, .. }
            | AstNode::For { line, .. }
            | AstNode::Switch { line, .. }
            | AstNode::Break { line }
            | AstNode::Continue { line }
            | AstNode::Goto { line, .. }
            | AstNode::Label { line, .. }
            | AstNode::Return { line, .. }
            | AstNode::TypeDecl { line, .. }
            | AstNode::ConstDecl { line, .. }
            | AstNode::SbitDecl { line, .. }
            | AstNode::SfrDecl { line, .. }
            | AstNode::FunctionDecl { line, .. }
            | AstNode::Error { line, .. } => *line,
        }
    }

    /// True for recovery placeholders.
    pub fn is_error(&self) -> bool {
        matches!(self, AstNode::Error { .. })
    }
}

/// Root of a parse: the ordered top-level declarations and statements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    pub nodes: Vec<AstNode>,
}

impl Program {
    pub fn new() -> Self {
        Program::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_ordering() {
        // `&` binds tighter than `|`, `*` tighter than `+`.
        assert!(BinOp::BitAnd.precedence() > BinOp::BitOr.precedence());
        assert!(BinOp::Mul.precedence() > BinOp::Add.precedence());
        assert!(BinOp::Add.precedence() > BinOp::Lt.precedence());
        assert!(BinOp::Eq.precedence() > BinOp::BitAnd.precedence());
        assert!(BinOp::And.precedence() > BinOp::Or.precedence());
    }

    #[test]
    fn test_compound_operator_display() {
        assert_eq!(BinOp::AddAssign.to_string(), "+=");
        assert_eq!(BinOp::XorAssign.to_string(), "^=");
    }

    #[test]
    fn test_node_line() {
        let node = AstNode::Goto {
            label: "done".into(),
            line: 12,
        };
        assert_eq!(node.line(), 12);
    }
}
