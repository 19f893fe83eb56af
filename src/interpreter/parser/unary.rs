use std::{iter::Peekable, rc::Rc};

use crate::{
    ast::{ChainLink, Expr, LambdaBody, Literal, PrimaryStart, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::parse_expression,
            core::ParseResult,
            statement::parse_block,
            utils::{current_line, expect_token, parse_comma_separated, parse_identifier},
        },
    },
};

/// Parses a unary expression.
///
/// The rule is: `unary := ("-" | "!" | "+") unary | primary`
///
/// # Parameters
/// - `tokens`: Token stream with line information.
///
/// # Returns
/// The parsed expression.
pub fn parse_unary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let op = match tokens.peek() {
        Some((Token::Minus, _)) => Some(UnaryOperator::Negate),
        Some((Token::Bang, _)) => Some(UnaryOperator::Not),
        Some((Token::Plus, _)) => Some(UnaryOperator::Plus),
        _ => None,
    };

    if let Some(op) = op {
        let line = current_line(tokens);
        tokens.next();
        let expr = parse_unary(tokens)?;
        return Ok(Expr::Unary { op,
                                expr: Box::new(expr),
                                line });
    }

    parse_primary(tokens)
}

/// Parses a primary expression: a start (literal, identifier, parenthesised
/// expression or lambda) followed by a chain of indexers, member accesses
/// and calls.
///
/// Grammar:
/// ```text
///     primary := start chain*
///     start   := literal | identifier | "(" expression ")" | lambda
///     chain   := "[" keys "]" | "." identifier ("(" args ")")? | "(" args ")"
/// ```
///
/// Lambdas are detected by lookahead: a single identifier or a
/// parenthesised parameter list directly followed by `=>`.
pub fn parse_primary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if is_lambda_ahead(tokens) {
        return parse_lambda(tokens);
    }

    let line = current_line(tokens);
    let start = parse_primary_start(tokens)?;
    let chain = parse_chain(tokens)?;

    Ok(Expr::Primary { start, chain, line })
}

/// Parses the opening of a primary expression.
fn parse_primary_start<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<PrimaryStart>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let Some((token, line)) = tokens.next() else {
        return Err(ParseError::UnexpectedEndOfInput { line: 0 });
    };

    let start = match token {
        Token::LParen => {
            let inner = parse_expression(tokens)?;
            expect_token(tokens, &Token::RParen)?;
            PrimaryStart::Grouped(Box::new(inner))
        },
        Token::Integer(n) => PrimaryStart::Literal(Literal::Integer(*n)),
        Token::Decimal(d) | Token::Percent(d) => PrimaryStart::Literal(Literal::Decimal(*d)),
        Token::Boolean(b) => PrimaryStart::Literal(Literal::Boolean(*b)),
        Token::Text(s) | Token::VerbatimText(s) => PrimaryStart::Literal(Literal::Text(s.clone())),
        Token::Character(c) => PrimaryStart::Literal(Literal::Character(*c)),
        Token::Date(dt) => PrimaryStart::Literal(Literal::DateTime(*dt)),
        Token::Guid(g) => PrimaryStart::Literal(Literal::Guid(*g)),
        Token::Null => PrimaryStart::Literal(Literal::Null),
        Token::Identifier(name) => PrimaryStart::Identifier(name.clone()),
        other => {
            return Err(ParseError::UnexpectedToken { token: format!("{other:?}"),
                                                     line:  *line, });
        },
    };

    Ok(start)
}

/// Parses the chain applied to a primary start.
fn parse_chain<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Vec<ChainLink>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut chain = Vec::new();

    loop {
        match tokens.peek() {
            Some((Token::LBracket, line)) => {
                let line = *line;

                // Consecutive bracket groups form one bracket expression:
                // the first key addresses the indexer, the rest are
                // member-by-name lookups on the previous result.
                let mut keys = Vec::new();
                while let Some((Token::LBracket, _)) = tokens.peek() {
                    tokens.next();
                    keys.push(parse_expression(tokens)?);
                    expect_token(tokens, &Token::RBracket)?;
                }

                chain.push(ChainLink::Index { keys, line });
            },
            Some((Token::Dot, line)) => {
                let line = *line;
                tokens.next();
                let name = parse_identifier(tokens)?;
                let args = if let Some((Token::LParen, _)) = tokens.peek() {
                    tokens.next();
                    Some(parse_comma_separated(tokens, parse_expression, &Token::RParen)?)
                } else {
                    None
                };
                chain.push(ChainLink::Member { name, args, line });
            },
            Some((Token::LParen, line)) => {
                let line = *line;
                tokens.next();
                let args = parse_comma_separated(tokens, parse_expression, &Token::RParen)?;
                chain.push(ChainLink::Call { args, line });
            },
            _ => break,
        }
    }

    Ok(chain)
}

/// Tests whether a lambda expression starts at the current position.
///
/// Two shapes are recognized without consuming input:
/// - `identifier =>`
/// - `( ... ) =>` with balanced parentheses.
fn is_lambda_ahead<'a, I>(tokens: &Peekable<I>) -> bool
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut lookahead = tokens.clone();

    match lookahead.next() {
        Some((Token::Identifier(_), _)) => {
            matches!(lookahead.next(), Some((Token::FatArrow, _)))
        },
        Some((Token::LParen, _)) => {
            let mut depth = 1usize;
            while depth > 0 {
                match lookahead.next() {
                    Some((Token::LParen, _)) => depth += 1,
                    Some((Token::RParen, _)) => depth -= 1,
                    Some(_) => {},
                    None => return false,
                }
            }
            matches!(lookahead.next(), Some((Token::FatArrow, _)))
        },
        _ => false,
    }
}

/// Parses a lambda expression.
///
/// Grammar:
/// ```text
///     lambda    := signature "=>" body
///     signature := identifier | "(" (identifier ("," identifier)*)? ")"
///     body      := expression | block
/// ```
///
/// Parameter names must be unique within the signature.
fn parse_lambda<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = current_line(tokens);

    let params = match tokens.peek() {
        Some((Token::Identifier(_), _)) => vec![parse_identifier(tokens)?],
        _ => {
            expect_token(tokens, &Token::LParen)?;
            parse_comma_separated(tokens, parse_identifier, &Token::RParen)?
        },
    };

    for (index, name) in params.iter().enumerate() {
        if params[..index].contains(name) {
            return Err(ParseError::DuplicateParameter { name: name.clone(),
                                                        line });
        }
    }

    expect_token(tokens, &Token::FatArrow)?;

    let body = if let Some((Token::LBrace, _)) = tokens.peek() {
        LambdaBody::Block(parse_block(tokens)?)
    } else {
        LambdaBody::Expression(parse_expression(tokens)?)
    };

    Ok(Expr::Lambda { params,
                      body: Rc::new(body),
                      line })
}
