use std::iter::Peekable;

use crate::{
    ast::{AssignOperator, Assignment, Block, JumpKind, Statement},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, parse_expression},
            utils::{current_line, expect_token, parse_identifier},
        },
    },
};

/// Parses a single statement.
///
/// A statement may be one of:
/// - a control-flow statement (`if`, `for`, `while`, `foreach`),
/// - a jump (`break`, `continue`, `return`),
/// - an assignment (plain, compound, or increment/decrement),
/// - an expression used as a statement.
///
/// Parsing is attempted in that order; the first matching construct is
/// returned.
///
/// # Parameters
/// - `tokens`: Token iterator containing `(Token, line)` pairs.
///
/// # Returns
/// A parsed [`Statement`] node.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.peek() {
        Some((Token::If, _)) => parse_if(tokens),
        Some((Token::For, _)) => parse_for(tokens),
        Some((Token::While, _)) => parse_while(tokens),
        Some((Token::Foreach, _)) => parse_foreach(tokens),
        Some((Token::Break | Token::Continue | Token::Return, _)) => parse_jump(tokens),
        Some((Token::Param, line)) => {
            let line = *line;
            tokens.next();
            let name = parse_identifier(tokens).unwrap_or_default();
            Err(ParseError::MisplacedParameter { name, line })
        },
        _ => parse_simple_statement(tokens),
    }
}

/// Parses an assignment or expression statement.
///
/// This subset is also what the `for` header accepts for its initialiser
/// and iterator slots.
pub(in crate::interpreter::parser) fn parse_simple_statement<'a, I>(
    tokens: &mut Peekable<I>)
    -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some(statement) = parse_assignment(tokens)? {
        return Ok(statement);
    }

    let line = current_line(tokens);
    let expr = parse_expression(tokens)?;
    Ok(Statement::Expression { expr, line })
}

/// Parses an assignment statement, if one begins at the current position.
///
/// Supported forms:
///
/// - `<identifier> = <expression>` and the compound family (`+=`, `-=`,
///   `*=`, `/=`, `%=`, `&=`, `|=`, `^=`, `<<=`, `>>=`),
/// - postfix `<identifier>++` / `<identifier>--`,
/// - prefix `++<identifier>` / `--<identifier>`.
///
/// The function performs a limited lookahead and consumes nothing when no
/// assignment pattern matches.
///
/// # Returns
/// - `Ok(Some(statement))` if an assignment is parsed,
/// - `Ok(None)` if no assignment is present.
fn parse_assignment<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Option<Statement>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    // Prefix increment/decrement.
    if let Some((step @ (Token::PlusPlus | Token::MinusMinus), line)) = tokens.peek() {
        let line = *line;
        let op = step_operator(step);
        tokens.next();
        let target = parse_identifier(tokens)?;
        return Ok(Some(Statement::Assignment(Assignment { target,
                                                          op,
                                                          value: None,
                                                          line })));
    }

    if let Some((Token::Identifier(_), _)) = tokens.peek() {
        let mut lookahead = tokens.clone();
        lookahead.next();

        match lookahead.peek() {
            Some((step @ (Token::PlusPlus | Token::MinusMinus), line)) => {
                let line = *line;
                let op = step_operator(step);
                let target = parse_identifier(tokens)?;
                tokens.next();
                return Ok(Some(Statement::Assignment(Assignment { target,
                                                                  op,
                                                                  value: None,
                                                                  line })));
            },
            Some((token, line)) => {
                if let Some(op) = assign_operator(token) {
                    let line = *line;
                    let target = parse_identifier(tokens)?;
                    tokens.next();
                    let value = parse_expression(tokens)?;
                    return Ok(Some(Statement::Assignment(Assignment { target,
                                                                      op,
                                                                      value: Some(value),
                                                                      line })));
                }
            },
            None => {},
        }
    }

    Ok(None)
}

/// Maps an assignment token to its operator, if it is one.
const fn assign_operator(token: &Token) -> Option<AssignOperator> {
    match token {
        Token::Equals => Some(AssignOperator::Assign),
        Token::PlusAssign => Some(AssignOperator::Add),
        Token::MinusAssign => Some(AssignOperator::Sub),
        Token::StarAssign => Some(AssignOperator::Mul),
        Token::SlashAssign => Some(AssignOperator::Div),
        Token::ModAssign => Some(AssignOperator::Mod),
        Token::AmpAssign => Some(AssignOperator::And),
        Token::PipeAssign => Some(AssignOperator::Or),
        Token::CaretAssign => Some(AssignOperator::Xor),
        Token::ShiftLeftAssign => Some(AssignOperator::ShiftLeft),
        Token::ShiftRightAssign => Some(AssignOperator::ShiftRight),
        _ => None,
    }
}

/// Maps `++`/`--` to the corresponding step operator.
fn step_operator(token: &Token) -> AssignOperator {
    if *token == Token::PlusPlus {
        AssignOperator::Increment
    } else {
        AssignOperator::Decrement
    }
}

/// Parses a jump statement.
///
/// `return` optionally carries an expression; a following `;`, `}` or end
/// of input means a bare return.
fn parse_jump<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let Some((token, line)) = tokens.next() else {
        return Err(ParseError::UnexpectedEndOfInput { line: 0 });
    };
    let line = *line;

    let kind = match token {
        Token::Break => JumpKind::Break,
        Token::Continue => JumpKind::Continue,
        Token::Return => JumpKind::Return,
        _ => unreachable!("parse_jump called on a non jump token"),
    };

    let value = if kind == JumpKind::Return
                   && !matches!(tokens.peek(), None | Some((Token::Semicolon | Token::RBrace, _)))
    {
        Some(parse_expression(tokens)?)
    } else {
        None
    };

    Ok(Statement::Jump { kind, value, line })
}

/// Parses an `if` statement with an optional `else` branch.
///
/// Syntax:
/// ```text
///     if (<condition>) { ... }
///     else if (<condition>) { ... }
///     else { ... }
/// ```
/// A chained `else if` is parsed as an `else` block containing a nested
/// `if` statement.
fn parse_if<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect_token(tokens, &Token::If)?;
    expect_token(tokens, &Token::LParen)?;
    let condition = parse_expression(tokens)?;
    expect_token(tokens, &Token::RParen)?;

    let then_block = parse_block(tokens)?;

    let else_block = if let Some((Token::Else, _)) = tokens.peek() {
        tokens.next();
        match tokens.peek() {
            Some((Token::If, line2)) => {
                let line2 = *line2;
                let nested = parse_if(tokens)?;
                Some(Block { statements: vec![nested],
                             line:       line2, })
            },
            _ => Some(parse_block(tokens)?),
        }
    } else {
        None
    };

    Ok(Statement::If { condition,
                       then_block,
                       else_block,
                       line })
}

/// Parses a C-style `for` statement.
///
/// Syntax: `for (<init>?; <condition>?; <iterator>?) { ... }`
///
/// All three header slots are optional; the initialiser and iterator are
/// simple statements (assignment or expression).
fn parse_for<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect_token(tokens, &Token::For)?;
    expect_token(tokens, &Token::LParen)?;

    let init = match tokens.peek() {
        Some((Token::Semicolon, _)) => None,
        _ => Some(Box::new(parse_simple_statement(tokens)?)),
    };
    expect_token(tokens, &Token::Semicolon)?;

    let condition = match tokens.peek() {
        Some((Token::Semicolon, _)) => None,
        _ => Some(parse_expression(tokens)?),
    };
    expect_token(tokens, &Token::Semicolon)?;

    let iterator = match tokens.peek() {
        Some((Token::RParen, _)) => None,
        _ => Some(Box::new(parse_simple_statement(tokens)?)),
    };
    expect_token(tokens, &Token::RParen)?;

    let body = parse_block(tokens)?;

    Ok(Statement::For { init,
                        condition,
                        iterator,
                        body,
                        line })
}

/// Parses a `while` statement: `while (<condition>) { ... }`.
fn parse_while<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect_token(tokens, &Token::While)?;
    expect_token(tokens, &Token::LParen)?;
    let condition = parse_expression(tokens)?;
    expect_token(tokens, &Token::RParen)?;
    let body = parse_block(tokens)?;

    Ok(Statement::While { condition, body, line })
}

/// Parses a `foreach` statement: `foreach (<name> in <iterable>) { ... }`.
fn parse_foreach<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect_token(tokens, &Token::Foreach)?;
    expect_token(tokens, &Token::LParen)?;
    let variable = parse_identifier(tokens)?;
    expect_token(tokens, &Token::In)?;
    let iterable = parse_expression(tokens)?;
    expect_token(tokens, &Token::RParen)?;
    let body = parse_block(tokens)?;

    Ok(Statement::Foreach { variable,
                            iterable,
                            body,
                            line })
}

/// Parses a braced block.
pub fn parse_block<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Block>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect_token(tokens, &Token::LBrace)?;
    let statements = parse_statements_until(tokens, Some(&Token::RBrace))?;
    expect_token(tokens, &Token::RBrace)?;

    Ok(Block { statements, line })
}

/// Parses statements until the closing token (left unconsumed), or until
/// the end of input when no closing token is given.
///
/// Statements are separated by semicolons. Control-flow statements carry
/// their own braces and need no separator; other statements require one
/// unless the list ends right after them.
pub(in crate::interpreter::parser) fn parse_statements_until<'a, I>(
    tokens: &mut Peekable<I>,
    closing: Option<&Token>)
    -> ParseResult<Vec<Statement>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut statements = Vec::new();

    loop {
        while let Some((Token::Semicolon, _)) = tokens.peek() {
            tokens.next();
        }

        match (tokens.peek(), closing) {
            (None, None) => break,
            (None, Some(_)) => return Err(ParseError::UnexpectedEndOfInput { line: 0 }),
            (Some((tok, _)), Some(close)) if *tok == *close => break,
            _ => {},
        }

        let statement = parse_statement(tokens)?;
        let self_delimited = matches!(statement,
                                      Statement::If { .. }
                                      | Statement::For { .. }
                                      | Statement::While { .. }
                                      | Statement::Foreach { .. });
        statements.push(statement);

        if self_delimited {
            continue;
        }

        match (tokens.peek(), closing) {
            (Some((Token::Semicolon, _)), _) => {
                tokens.next();
            },
            (Some((tok, _)), Some(close)) if *tok == *close => {},
            (None, None) => {},
            (Some((tok, line)), _) => {
                return Err(ParseError::UnexpectedToken { token: format!("Expected ';', found {tok:?}"),
                                                         line:  *line, });
            },
            (None, Some(_)) => return Err(ParseError::UnexpectedEndOfInput { line: 0 }),
        }
    }

    Ok(statements)
}
