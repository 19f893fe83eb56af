use std::iter::Peekable;

use crate::{
    ast::{Expr, ParameterDecl, Program},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            binary::parse_ternary,
            statement::parse_statements_until,
            utils::parse_identifier,
        },
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a full expression.
///
/// This is the entry point for expression parsing.
/// It begins at the lowest-precedence level, the conditional operator, and
/// recursively descends through the precedence hierarchy.
///
/// Grammar: `expression := ternary`
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, line)` pairs.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_ternary(tokens)
}

/// Parses a full program: parameter declarations followed by the top-level
/// statement list.
///
/// Grammar:
/// ```text
///     program   := parameter* statement*
///     parameter := "param" identifier ("=" expression)? ";"
/// ```
///
/// Parameter declarations are only legal before the first ordinary
/// statement; a `param` appearing later is rejected during statement
/// parsing.
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, line)` pairs.
///
/// # Returns
/// The parsed [`Program`].
pub fn parse_program<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Program>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut parameters = Vec::new();

    while let Some((Token::Param, line)) = tokens.peek() {
        let line = *line;
        tokens.next();

        let name = parse_identifier(tokens)?;
        let value = if let Some((Token::Equals, _)) = tokens.peek() {
            tokens.next();
            Some(parse_expression(tokens)?)
        } else {
            None
        };

        match tokens.next() {
            Some((Token::Semicolon, _)) => {},
            Some((tok, l)) => {
                return Err(ParseError::UnexpectedToken { token: format!("Expected ';' after parameter, found {tok:?}"),
                                                         line:  *l, });
            },
            None => return Err(ParseError::UnexpectedEndOfInput { line }),
        }

        parameters.push(ParameterDecl { name, value, line });
    }

    let statements = parse_statements_until(tokens, None)?;

    Ok(Program { parameters, statements })
}
