//! Canonical textual form of the AST
//!
//! Re-serializes nodes to C51 source that reads back to a structurally
//! equal tree: printing a parse result and parsing the output again is a
//! fixpoint (up to source lines and the messages carried by error nodes).
//! Binary expressions are printed fully parenthesized so the result never
//! depends on the precedence table.

use crate::ast::{AstNode, CaseLabel, Program};
use std::fmt::Write;

/// Print every top-level node of a program.
pub fn print_program(program: &Program) -> String {
    let mut printer = Printer::new();
    for node in &program.nodes {
        printer.stmt(node);
    }
    printer.out
}

/// Print a single node as a statement.
pub fn print_node(node: &AstNode) -> String {
    let mut printer = Printer::new();
    printer.stmt(node);
    printer.out
}

struct Printer {
    out: String,
    indent: usize,
}

impl Printer {
    fn new() -> Self {
        Self {
            out: String::new(),
            indent: 0,
        }
    }

    fn push_line(&mut self, text: &str) {
        for _ in 0..self.indent {
            self.out.push_str("    ");
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    /// Statement bodies of `if`/`while`/`for`/`do`: blocks stay at the
    /// current indent, single statements are indented one level.
    fn nested(&mut self, node: &AstNode) {
        if matches!(node, AstNode::Block { .. }) {
            self.stmt(node);
        } else {
            self.indent += 1;
            self.stmt(node);
            self.indent -= 1;
        }
    }

    fn stmt(&mut self, node: &AstNode) {
        match node {
            AstNode::Block { statements, .. } => {
                self.push_line("{");
                self.indent += 1;
                for statement in statements {
                    self.stmt(statement);
                }
                self.indent -= 1;
                self.push_line("}");
            }
            AstNode::If {
                condition,
                body,
                else_body,
                ..
            } => {
                self.push_line(&format!("if ({})", expr(condition)));
                self.nested(body);
                if let Some(else_body) = else_body {
                    self.push_line("else");
                    self.nested(else_body);
                }
            }
            AstNode::While {
                condition, body, ..
            } => {
                self.push_line(&format!("while ({})", expr(condition)));
                self.nested(body);
            }
            AstNode::DoWhile {
                body, condition, ..
            } => {
                self.push_line("do");
                self.nested(body);
                self.push_line(&format!("while ({});", expr(condition)));
            }
            AstNode::For {
                init,
                condition,
                increment,
                body,
                ..
            } => {
                let init_text = match init {
                    Some(node) => inline_stmt(node),
                    None => ";".to_string(),
                };
                let condition_text = condition.as_deref().map(expr).unwrap_or_default();
                let increment_text = increment.as_deref().map(expr).unwrap_or_default();
                self.push_line(&format!(
                    "for ({init_text} {condition_text}; {increment_text})"
                ));
                self.nested(body);
            }
            AstNode::Switch {
                condition, cases, ..
            } => {
                self.push_line(&format!("switch ({}) {{", expr(condition)));
                for case in cases {
                    match &case.label {
                        CaseLabel::Literal(value) => self.push_line(&format!("case {value}:")),
                        CaseLabel::Default => self.push_line("default:"),
                    }
                    self.indent += 1;
                    for statement in &case.body {
                        self.stmt(statement);
                    }
                    self.indent -= 1;
                }
                self.push_line("}");
            }
            AstNode::Break { .. } => self.push_line("break;"),
            AstNode::Continue { .. } => self.push_line("continue;"),
            AstNode::Goto { label, .. } => self.push_line(&format!("goto {label};")),
            AstNode::Label { name, .. } => self.push_line(&format!("{name}:")),
            AstNode::Return { expression, .. } => match expression {
                Some(expression) => self.push_line(&format!("return {};", expr(expression))),
                None => self.push_line("return;"),
            },
            AstNode::FunctionDecl {
                return_type,
                name,
                parameters,
                interrupt,
                body,
                ..
            } => {
                let params = if parameters.is_empty() {
                    "void".to_string()
                } else {
                    parameters
                        .iter()
                        .map(|p| format!("{} {}", p.data_type, p.name))
                        .collect::<Vec<_>>()
                        .join(", ")
                };
                let mut header = format!("{return_type} {name}({params})");
                if let Some(vector) = interrupt {
                    let _ = write!(header, " interrupt {vector}");
                }
                match body {
                    Some(body) => {
                        self.push_line(&header);
                        self.stmt(body);
                    }
                    None => self.push_line(&format!("{header};")),
                }
            }
            // Declarations, expression statements, and error placeholders
            // all print as a single terminated line.
            other => {
                let text = inline_stmt(other);
                self.push_line(&text);
            }
        }
    }
}

/// One-line statement text (used directly inside `for (...)` headers).
fn inline_stmt(node: &AstNode) -> String {
    match node {
        AstNode::TypeDecl {
            data_type,
            name,
            init,
            ..
        } => match init {
            Some(init) => format!("{data_type} {name} = {};", expr(init)),
            None => format!("{data_type} {name};"),
        },
        AstNode::ConstDecl {
            data_type,
            name,
            value,
            ..
        } => format!("const {data_type} {name} = {value};"),
        AstNode::SbitDecl { name, bit, .. } => format!("sbit {name} = {bit};"),
        AstNode::SfrDecl { name, address, .. } => format!("sfr {name} = {address};"),
        // An error placeholder holds no source; an empty statement keeps
        // the slot without inventing tokens.
        AstNode::Error { .. } => ";".to_string(),
        other => format!("{};", expr(other)),
    }
}

/// Expression text. Binary expressions carry their own parentheses, so
/// precedence never needs reconstructing.
fn expr(node: &AstNode) -> String {
    match node {
        AstNode::Identifier { name, .. } => name.clone(),
        AstNode::Literal { value, .. } => value.clone(),
        AstNode::BinaryOp {
            op, left, right, ..
        } => format!("({} {} {})", expr(left), op, expr(right)),
        AstNode::UnaryOp {
            op,
            operand,
            prefix,
            ..
        } => {
            if *prefix {
                format!("{}{}", op, operand_text(operand))
            } else {
                format!("{}{}", operand_text(operand), op)
            }
        }
        AstNode::Assignment { left, right, .. } => {
            // Re-sugar the compound fold: `f += 5` was stored with its
            // expansion structure on the right.
            if let (
                AstNode::Identifier { name, .. },
                AstNode::BinaryOp {
                    op,
                    left: folded,
                    right: rhs,
                    ..
                },
            ) = (left.as_ref(), right.as_ref())
            {
                let folded_matches = matches!(
                    folded.as_ref(),
                    AstNode::Identifier { name: folded_name, .. } if folded_name == name
                );
                if op.precedence() == 0 && folded_matches {
                    return format!("{name} {op} {}", expr(rhs));
                }
            }
            format!("{} = {}", expr(left), expr(right))
        }
        _ => String::new(),
    }
}

/// Operand of a unary operator. Adjacent unary operators are
/// parenthesized so `-(-x)` never prints as `--x`.
fn operand_text(operand: &AstNode) -> String {
    match operand {
        AstNode::UnaryOp { .. } => format!("({})", expr(operand)),
        _ => expr(operand),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::Parser;

    fn parse(source: &str) -> Program {
        let mut parser = Parser::from_source(source).expect("lexing failed");
        let program = parser.parse_program().expect("parsing failed");
        assert!(parser.diagnostics().is_empty(), "{:?}", parser.diagnostics());
        program
    }

    /// Printing is a fixpoint: print . parse . print == print.
    fn assert_round_trip(source: &str) {
        let first = print_program(&parse(source));
        let second = print_program(&parse(&first));
        assert_eq!(first, second, "printer not a fixpoint for: {source}");
    }

    #[test]
    fn test_round_trip_expressions() {
        assert_round_trip("a = b + c * d - g;");
        assert_round_trip("f += 5;");
        assert_round_trip("x = a & b | c;");
        assert_round_trip("y = -(-x) + !done;");
        assert_round_trip("count++;");
    }

    #[test]
    fn test_round_trip_statements() {
        assert_round_trip("if (x > 0) { y = 1; } else { y = 2; }");
        assert_round_trip("do { x++; } while (x < 10);");
        assert_round_trip("for (int i = 0; i < 10; i++) { total += i; }");
        assert_round_trip("for (;;) { break; }");
        assert_round_trip("switch (m) { case 1: x = 1; break; default: x = 0; }");
        assert_round_trip("again: x--; if (x) goto again;");
    }

    #[test]
    fn test_round_trip_declarations() {
        assert_round_trip("const int MAX = 100;");
        assert_round_trip("sbit led = 3;");
        assert_round_trip("sfr P0 = 0x80;");
        assert_round_trip("void isr(void) interrupt 2 { count++; }");
        assert_round_trip("int add(int a, char b);");
    }

    #[test]
    fn test_compound_assignment_resugars() {
        let program = parse("f += 5;");
        assert_eq!(print_program(&program), "f += 5;\n");
    }

    #[test]
    fn test_structural_equality_after_round_trip() {
        // Same shape both times, not just the same text.
        let first = parse("if (a + b * c) { f += 5; }");
        let printed = print_program(&first);
        let second = parse(&printed);
        assert_eq!(print_program(&second), printed);
    }
}
