// Integration tests for parsing complete C51 programs

use c51front::ast::{AstNode, BinOp, CaseLabel};
use c51front::Parser;

fn parse(source: &str) -> c51front::Program {
    let mut parser = Parser::from_source(source).expect("lexing failed");
    let program = parser.parse_program().expect("parsing failed");
    assert!(
        parser.diagnostics().is_empty(),
        "unexpected diagnostics: {:?}",
        parser.diagnostics()
    );
    program
}

#[test]
fn test_blink_program() {
    let source = r#"
        sfr P1 = 0x90;
        sbit led = 0;
        const int DELAY = 50000;

        void wait(int ticks) {
            while (ticks > 0) {
                ticks--;
            }
        }

        void main(void) {
            while (1) {
                led = !led;
                ticks = DELAY;
            }
        }
    "#;
    let program = parse(source);

    assert_eq!(program.nodes.len(), 5);
    assert!(matches!(program.nodes[0], AstNode::SfrDecl { .. }));
    assert!(matches!(program.nodes[1], AstNode::SbitDecl { .. }));
    assert!(matches!(program.nodes[2], AstNode::ConstDecl { .. }));
    assert!(matches!(program.nodes[3], AstNode::FunctionDecl { .. }));
    assert!(matches!(program.nodes[4], AstNode::FunctionDecl { .. }));
}

#[test]
fn test_interrupt_service_routine() {
    let source = r#"
        int count;

        void timer0(void) interrupt 1 {
            count++;
        }

        void external0(void) interrupt 0;
    "#;
    let program = parse(source);

    let AstNode::FunctionDecl {
        name,
        interrupt,
        body,
        ..
    } = &program.nodes[1]
    else {
        panic!("Expected ISR function");
    };
    assert_eq!(name, "timer0");
    assert_eq!(*interrupt, Some(1));
    assert!(body.is_some());

    let AstNode::FunctionDecl {
        interrupt, body, ..
    } = &program.nodes[2]
    else {
        panic!("Expected ISR prototype");
    };
    assert_eq!(*interrupt, Some(0));
    assert!(body.is_none());
}

#[test]
fn test_no_interrupt_is_none() {
    let program = parse("void main(void) { }");
    let AstNode::FunctionDecl { interrupt, .. } = &program.nodes[0] else {
        panic!("Expected function");
    };
    assert_eq!(*interrupt, None);
}

#[test]
fn test_precedence_across_statement() {
    // a = b + c * d - g  =>  root '=', right side -{ +{b, *{c, d}}, g }
    let program = parse("a = b + c * d - g;");
    let AstNode::Assignment { right, .. } = &program.nodes[0] else {
        panic!("Expected assignment");
    };
    let AstNode::BinaryOp {
        op: BinOp::Sub,
        left,
        right: sub_rhs,
        ..
    } = right.as_ref()
    else {
        panic!("Expected subtraction at the root of the right side");
    };
    assert!(matches!(
        sub_rhs.as_ref(),
        AstNode::Identifier { name, .. } if name == "g"
    ));
    let AstNode::BinaryOp {
        op: BinOp::Add,
        right: add_rhs,
        ..
    } = left.as_ref()
    else {
        panic!("Expected addition under subtraction");
    };
    assert!(matches!(
        add_rhs.as_ref(),
        AstNode::BinaryOp { op: BinOp::Mul, .. }
    ));
}

#[test]
fn test_state_machine_switch() {
    let source = r#"
        void step(int event) {
            switch (event) {
            case 0:
                state = 1;
                break;
            case 1:
            case 2:
                state = 2;
                break;
            default:
                state = 0;
            }
        }
    "#;
    let program = parse(source);

    let AstNode::FunctionDecl { body: Some(body), .. } = &program.nodes[0] else {
        panic!("Expected function");
    };
    let AstNode::Block { statements, .. } = body.as_ref() else {
        panic!("Expected body block");
    };
    let AstNode::Switch { cases, .. } = &statements[0] else {
        panic!("Expected switch");
    };
    assert_eq!(cases.len(), 4);
    assert_eq!(cases[1].label, CaseLabel::Literal("1".into()));
    assert!(cases[1].body.is_empty()); // fallthrough label
    assert_eq!(cases[3].label, CaseLabel::Default);
}

#[test]
fn test_source_lines_recorded() {
    let source = "int a;\nint b;\n\nvoid main(void) {\n    a = 1;\n}\n";
    let program = parse(source);

    assert_eq!(program.nodes[0].line(), 1);
    assert_eq!(program.nodes[1].line(), 2);
    assert_eq!(program.nodes[2].line(), 4);

    let AstNode::FunctionDecl { body: Some(body), .. } = &program.nodes[2] else {
        panic!("Expected function");
    };
    let AstNode::Block { statements, .. } = body.as_ref() else {
        panic!("Expected block");
    };
    assert_eq!(statements[0].line(), 5);
}

#[test]
fn test_goto_label_flow() {
    let source = r#"
        void main(void) {
        top:
            x = x + 1;
            if (x < 10) goto top;
        }
    "#;
    let program = parse(source);

    let AstNode::FunctionDecl { body: Some(body), .. } = &program.nodes[0] else {
        panic!("Expected function");
    };
    let AstNode::Block { statements, .. } = body.as_ref() else {
        panic!("Expected block");
    };
    assert!(matches!(&statements[0], AstNode::Label { name, .. } if name == "top"));
    let AstNode::If { body: if_body, .. } = &statements[2] else {
        panic!("Expected if");
    };
    assert!(matches!(if_body.as_ref(), AstNode::Goto { label, .. } if label == "top"));
}

#[test]
fn test_do_while_structure() {
    let program = parse("void main(void) { do x++; while (x < 3); }");
    let AstNode::FunctionDecl { body: Some(body), .. } = &program.nodes[0] else {
        panic!("Expected function");
    };
    let AstNode::Block { statements, .. } = body.as_ref() else {
        panic!("Expected block");
    };
    let AstNode::DoWhile {
        min_iterations,
        body: loop_body,
        ..
    } = &statements[0]
    else {
        panic!("Expected do-while");
    };
    assert_eq!(*min_iterations, 1);
    assert!(matches!(loop_body.as_ref(), AstNode::UnaryOp { .. }));
}
