//! # scriptlet
//!
//! scriptlet is an embeddable expression-language evaluator written in Rust.
//! A host application supplies variables, callable members, indexers and an
//! output buffer; scriptlet parses macro-style expressions at runtime and
//! evaluates them with support for lambdas, collections, temporal values,
//! control flow, and more.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use logos::Logos;

use crate::{
    ast::Program,
    error::ParseError,
    host::Host,
    interpreter::{
        evaluator::core::Walker,
        lexer::{LexerExtras, Token},
        parser::core::parse_program,
        value::core::Value,
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` enum and related types that represent the
/// syntactic structure of source code as a tree. The AST is built by the
/// parser and traversed by the evaluator.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Attaches metadata (such as source locations) to AST nodes for error
///   reporting.
/// - Enables extensible and robust handling of parsed code.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised during lexing, parsing,
/// or evaluating code. It standardizes error reporting and carries detailed
/// information about failures, including error kinds, descriptions, and
/// source locations for debugging and user feedback.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Attaches line numbers and detailed messages for context.
/// - Supports integration with standard error handling traits and reporting
///   utilities.
pub mod error;
/// The host capability layer.
///
/// Everything the language cannot answer by itself is reached through the
/// `Host` trait: fallback variables, callable members and methods, indexers,
/// the parameter sink, the buffered output, cancellation and the comparer
/// registry. An in-memory implementation backs the tests and simple
/// embeddings.
///
/// # Responsibilities
/// - Declares the capability trait shared by a walker and its lambdas.
/// - Provides cooperative cancellation tokens.
/// - Ships `BasicHost`, a batteries-included host for tests and embedders.
pub mod host;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, value
/// representations, error handling, and all supporting infrastructure to
/// provide a complete runtime for source code evaluation. It exposes the
/// public API for interpreting and executing expressions or programs.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, and value
///   types.
/// - Provides entry points for parsing and evaluating user code.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// General utilities for safe numeric conversion and helpers.
///
/// This module provides reusable helpers and conversion routines that are
/// used throughout the parser and evaluator.
///
/// # Responsibilities
/// - Safely convert between `Decimal`, `i32` and `usize` without silent data
///   loss.
/// - Provide general utility functions used in multiple modules.
pub mod util;

/// Tokenizes and parses a source string into a [`Program`].
///
/// # Errors
/// Returns a [`ParseError`] when the source contains unrecognized characters
/// or does not follow the grammar.
///
/// # Examples
/// ```
/// use scriptlet::parse_source;
///
/// let program = parse_source("a = 3; a + 1").unwrap();
/// assert_eq!(program.statements.len(), 2);
///
/// assert!(parse_source("a = ;").is_err());
/// ```
pub fn parse_source(source: &str) -> Result<Program, ParseError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer_with_extras(source, LexerExtras { line: 1 });

    while let Some(token) = lexer.next() {
        if let Ok(tok) = token {
            tokens.push((tok, lexer.extras.line));
        } else {
            let slice = lexer.slice();
            let line = lexer.extras.line;
            let literal_like =
                slice.starts_with(|c: char| c.is_ascii_digit() || "\"'#@".contains(c));
            return Err(if literal_like {
                ParseError::InvalidLiteral { details: slice.to_string(),
                                             line }
            } else {
                ParseError::UnexpectedToken { token: slice.to_string(),
                                              line }
            });
        }
    }

    let mut iter = tokens.iter().peekable();
    parse_program(&mut iter)
}

/// Parses and evaluates a source string against a host.
///
/// This is the main entry point: the source is tokenized, parsed into a
/// program and walked. The result is the list of values produced by the
/// top-level statements (plus any flushed host output), or `Value::Null`
/// when nothing was produced.
///
/// # Errors
/// Returns an error if parsing fails, or if any runtime error occurs during
/// evaluation.
///
/// # Examples
/// ```
/// use scriptlet::{evaluate, host::BasicHost, interpreter::value::core::Value};
///
/// let host = BasicHost::new();
/// let result = evaluate("1 + 1", &host).unwrap();
///
/// assert_eq!(result, Value::Collection(vec![Value::Integer(2)].into()));
/// ```
pub fn evaluate(source: &str, host: &dyn Host) -> Result<Value, Box<dyn std::error::Error>> {
    let program = parse_source(source)?;

    let mut walker = Walker::new(host);
    walker.eval_program(&program).map_err(Into::into)
}
