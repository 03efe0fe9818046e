// Integration tests for error recovery and diagnostics

use c51front::ast::AstNode;
use c51front::{ErrorKind, Parser};

fn parse_with_errors(source: &str) -> (c51front::Program, Vec<c51front::Diagnostic>) {
    let mut parser = Parser::from_source(source).expect("lexing failed");
    let program = parser.parse_program().expect("parsing failed");
    (program, parser.diagnostics().to_vec())
}

#[test]
fn test_recovers_after_bad_statement() {
    let source = "x = ;\ny = 2;\n";
    let (program, diagnostics) = parse_with_errors(source);

    assert_eq!(program.nodes.len(), 2);
    assert!(program.nodes[0].is_error());
    assert!(matches!(&program.nodes[1], AstNode::Assignment { .. }));

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind, ErrorKind::UnexpectedToken);
    assert_eq!(diagnostics[0].line, 1);
    assert!(diagnostics[0].message.starts_with("Unexpected token:"));
}

#[test]
fn test_error_node_keeps_line() {
    let source = "int a;\nint b = = 1;\nint c;\n";
    let (program, diagnostics) = parse_with_errors(source);

    assert_eq!(program.nodes.len(), 3);
    let AstNode::Error { line, .. } = &program.nodes[1] else {
        panic!("Expected error node for the malformed declaration");
    };
    assert_eq!(*line, 2);
    assert_eq!(diagnostics.len(), 1);

    // Surrounding declarations are untouched.
    assert!(matches!(&program.nodes[0], AstNode::TypeDecl { .. }));
    assert!(matches!(&program.nodes[2], AstNode::TypeDecl { .. }));
}

#[test]
fn test_recovery_inside_block() {
    let source = r#"
        void main(void) {
            a = 1;
            b = ;
            c = 3;
        }
    "#;
    let (program, diagnostics) = parse_with_errors(source);

    assert_eq!(diagnostics.len(), 1);
    let AstNode::FunctionDecl { body: Some(body), .. } = &program.nodes[0] else {
        panic!("Expected function");
    };
    let AstNode::Block { statements, .. } = body.as_ref() else {
        panic!("Expected block");
    };
    assert_eq!(statements.len(), 3);
    assert!(statements[1].is_error());
    assert!(matches!(&statements[2], AstNode::Assignment { .. }));
}

#[test]
fn test_sync_stops_before_closing_brace() {
    // The error swallows the rest of the statement but not the brace,
    // so the enclosing block still closes cleanly.
    let source = "void main(void) { x = + }\nint after;\n";
    let (program, diagnostics) = parse_with_errors(source);

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(program.nodes.len(), 2);
    assert!(matches!(&program.nodes[1], AstNode::TypeDecl { .. }));
}

#[test]
fn test_unterminated_block_diagnostic() {
    let source = "void main(void) {\n    x = 1;\n";
    let (program, diagnostics) = parse_with_errors(source);

    assert!(program.nodes[0].is_error());
    assert!(diagnostics
        .iter()
        .any(|d| d.kind == ErrorKind::UnterminatedBlock));
}

#[test]
fn test_invalid_sfr_address() {
    let source = "sfr P1 = 90;\nsfr P2 = 0xA0;\n";
    let (program, diagnostics) = parse_with_errors(source);

    assert!(program.nodes[0].is_error());
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind, ErrorKind::InvalidLiteral);

    let AstNode::SfrDecl { address, .. } = &program.nodes[1] else {
        panic!("Expected valid sfr declaration");
    };
    assert_eq!(address, "0xA0");
}

#[test]
fn test_duplicate_default_case() {
    let source = r#"
        void main(void) {
            switch (x) {
            case 1:
                a = 1;
                break;
            default:
                a = 2;
                break;
            default:
                a = 3;
            }
        }
    "#;
    let (program, diagnostics) = parse_with_errors(source);

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind, ErrorKind::DuplicateDefaultCase);

    let AstNode::FunctionDecl { body: Some(body), .. } = &program.nodes[0] else {
        panic!("Expected function");
    };
    let AstNode::Block { statements, .. } = body.as_ref() else {
        panic!("Expected block");
    };
    let AstNode::Switch { cases, .. } = &statements[0] else {
        panic!("Expected switch");
    };
    // The first default survives; the duplicate is folded into its body
    // behind an error node.
    let defaults: Vec<_> = cases
        .iter()
        .filter(|c| c.label == c51front::ast::CaseLabel::Default)
        .collect();
    assert_eq!(defaults.len(), 1);
    assert!(defaults[0].body.iter().any(AstNode::is_error));
}

#[test]
fn test_unexpected_end_of_input() {
    let source = "x = 1 +";
    let (program, diagnostics) = parse_with_errors(source);

    assert!(program.nodes[0].is_error());
    assert_eq!(diagnostics[0].kind, ErrorKind::EndOfStream);
    assert_eq!(diagnostics[0].message, "Unexpected token: end of input");
}

#[test]
fn test_error_limit_aborts() {
    // One malformed statement per line, more than the configured limit.
    let mut source = String::new();
    for _ in 0..6 {
        source.push_str("= ;\n");
    }
    let mut parser = Parser::from_source(&source).expect("lexing failed");
    parser = parser.with_error_limit(5);

    let failure = parser
        .parse_program()
        .expect_err("expected the parser to give up");
    assert_eq!(failure.limit, 5);
    assert!(failure.errors.len() >= 5);
}

#[test]
fn test_successful_parse_resets_error_streak() {
    // Errors interleaved with good statements never reach the limit.
    let mut source = String::new();
    for _ in 0..10 {
        source.push_str("= ;\n");
        source.push_str("ok = 1;\n");
    }
    let mut parser = Parser::from_source(&source).expect("lexing failed");
    parser = parser.with_error_limit(3);

    let program = parser.parse_program().expect("interleaved errors recovered");
    assert_eq!(program.nodes.len(), 20);
    assert_eq!(parser.diagnostics().len(), 10);
}
