//! # Introduction
//!
//! `c51front` is the front end of a compiler for an 8051-microcontroller C
//! dialect (C51). It consumes a token stream and builds an abstract syntax
//! tree, recognizing the standard C constructs plus the microcontroller
//! extensions: `sbit` and `sfr` register declarations and the
//! `interrupt N` function attribute.
//!
//! ## Parsing pipeline
//!
//! ```text
//! Source → Lexer → Tokens → Parser → AST (+ Diagnostics)
//! ```
//!
//! 1. [`lexer`] — tokenises C51 source; optional, since [`Parser`] accepts
//!    any token stream with the [`token::Token`] shape.
//! 2. [`parse`] — recursive descent with iterative precedence climbing for
//!    binary operators; declarations, statements, and expressions each live
//!    in their own `impl Parser` module.
//! 3. [`ast`] — the tagged node variants the parsers produce.
//! 4. [`diagnostics`] — the error taxonomy and reporting seam. Syntax
//!    errors are recovered panic-mode style: the offending region becomes
//!    an [`ast::AstNode::Error`] node and parsing resumes at the next
//!    statement boundary, so one pass reports every error.
//! 5. [`printer`] — canonical re-serialization of an AST back to source.
//!
//! Scope resolution, semantic analysis, and code generation are downstream
//! concerns; the parser only consults an optional [`symbols::SymbolLookup`]
//! collaborator to note undeclared identifiers.

pub mod ast;
pub mod cursor;
pub mod diagnostics;
pub mod lexer;
pub mod parse;
pub mod printer;
pub mod symbols;
pub mod token;

mod declarations;
mod expressions;
mod recovery;
mod statements;

pub use ast::{AstNode, Program};
pub use diagnostics::{Diagnostic, ErrorKind, ParseFailure};
pub use parse::Parser;
pub use token::{Token, TokenKind};
