use chrono::{NaiveDate, NaiveDateTime};
use logos::Logos;
use rust_decimal::Decimal;
use uuid::Uuid;

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
pub enum Token {
    /// Percent literal tokens, such as `12.5%`. The value arrives already
    /// divided by 100.
    #[regex(r"[0-9]+(\.[0-9]+)?%", parse_percent)]
    Percent(Decimal),
    /// Decimal literal tokens, such as `3.14` or `.5`.
    #[regex(r"[0-9]+\.[0-9]+", parse_decimal)]
    #[regex(r"\.[0-9]+", parse_decimal)]
    Decimal(Decimal),
    /// Integer literal tokens, such as `42`.
    #[regex(r"[0-9]+", parse_integer)]
    Integer(i32),
    /// Date literal tokens, such as `#2024-01-15#` or
    /// `#2024-01-15 10:30:00#`.
    #[regex(r"#[0-9]{4}-[0-9]{2}-[0-9]{2}( [0-9]{2}:[0-9]{2}:[0-9]{2})?#", parse_date)]
    Date(NaiveDateTime),
    /// Guid literal tokens in `8-4-4-4-12` hex form.
    #[regex(r"[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}",
            parse_guid)]
    Guid(Uuid),
    /// String literal tokens with escape processing, such as `"a\nb"`.
    #[regex(r#""([^"\\\n]|\\.)*""#, parse_text)]
    Text(String),
    /// Verbatim string literal tokens, such as `@"C:\temp"`. The leading `@`
    /// is stripped and `""` stands for a literal quote.
    #[regex(r#"@"([^"]|"")*""#, parse_verbatim_text)]
    VerbatimText(String),
    /// Character literal tokens, such as `'a'` or `'\n'`.
    #[regex(r"'([^'\\\n]|\\.)'", parse_character)]
    Character(char),
    /// Boolean literal tokens, such as `true`.
    #[token("true", parse_boolean)]
    #[token("false", parse_boolean)]
    Boolean(bool),
    /// `null`
    #[token("null")]
    Null,
    /// `if`
    #[token("if")]
    If,
    /// `else`
    #[token("else")]
    Else,
    /// `for`
    #[token("for")]
    For,
    /// `while`
    #[token("while")]
    While,
    /// `foreach`
    #[token("foreach")]
    Foreach,
    /// `in`
    #[token("in")]
    In,
    /// `break`
    #[token("break")]
    Break,
    /// `continue`
    #[token("continue")]
    Continue,
    /// `return`
    #[token("return")]
    Return,
    /// `param`
    #[token("param")]
    Param,
    /// `and`
    #[token("and")]
    And,
    /// `or`
    #[token("or")]
    Or,
    /// `xor`
    #[token("xor")]
    Xor,
    /// Identifier tokens; variable or member names such as `x` or `total`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `// Comments.`
    #[regex(r"//[^\n\r]*", logos::skip)]
    Comment,
    /// ```
    /// // Multi line comments.
    /// ```
    #[regex(r"/\*([^*]|\*[^/])*\*/", |lex| {
        let comment      = lex.slice();
        let newlines     = comment.chars().filter(|&c| c == '\n').count();
        lex.extras.line += newlines;
        logos::Skip
    })]
    MultiLineComment,
    /// `??`
    #[token("??")]
    QuestionQuestion,
    /// `?`
    #[token("?")]
    Question,
    /// `:`
    #[token(":")]
    Colon,
    /// `=>`
    #[token("=>")]
    FatArrow,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `<<=`
    #[token("<<=")]
    ShiftLeftAssign,
    /// `>>=`
    #[token(">>=")]
    ShiftRightAssign,
    /// `<<`
    #[token("<<")]
    ShiftLeft,
    /// `>>`
    #[token(">>")]
    ShiftRight,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `&&`
    #[token("&&")]
    AmpAmp,
    /// `&=`
    #[token("&=")]
    AmpAssign,
    /// `&`
    #[token("&")]
    Amp,
    /// `||`
    #[token("||")]
    PipePipe,
    /// `|=`
    #[token("|=")]
    PipeAssign,
    /// `|`
    #[token("|")]
    Pipe,
    /// `^=`
    #[token("^=")]
    CaretAssign,
    /// `^`
    #[token("^")]
    Caret,
    /// `!`
    #[token("!")]
    Bang,
    /// `++`
    #[token("++")]
    PlusPlus,
    /// `+=`
    #[token("+=")]
    PlusAssign,
    /// `+`
    #[token("+")]
    Plus,
    /// `--`
    #[token("--")]
    MinusMinus,
    /// `-=`
    #[token("-=")]
    MinusAssign,
    /// `-`
    #[token("-")]
    Minus,
    /// `*=`
    #[token("*=")]
    StarAssign,
    /// `*`
    #[token("*")]
    Star,
    /// `/=`
    #[token("/=")]
    SlashAssign,
    /// `/`
    #[token("/")]
    Slash,
    /// `%=`
    #[token("%=")]
    ModAssign,
    /// `%`
    #[token("%")]
    Modulo,
    /// `=`
    #[token("=")]
    Equals,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `,`
    #[token(",")]
    Comma,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `.`
    #[token(".")]
    Dot,
    /// Line breaks. Tracked for error reporting and otherwise skipped.
    #[regex(r"\n", |lex| {
        lex.extras.line += 1;
        logos::Skip
    })]
    NewLine,
    /// Tabs and feeds.
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Ignored,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for error reporting and diagnostics.
#[derive(Default)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

/// Parses a percent literal from the current token slice.
///
/// The trailing `%` is stripped and the parsed decimal is divided by 100.
fn parse_percent(lex: &logos::Lexer<Token>) -> Option<Decimal> {
    let digits = lex.slice().strip_suffix('%')?;
    let value: Decimal = digits.parse().ok()?;
    value.checked_div(Decimal::ONE_HUNDRED)
}

/// Parses a decimal literal from the current token slice.
fn parse_decimal(lex: &logos::Lexer<Token>) -> Option<Decimal> {
    lex.slice().parse().ok()
}

/// Parses an integer literal from the current token slice.
fn parse_integer(lex: &logos::Lexer<Token>) -> Option<i32> {
    lex.slice().parse().ok()
}

/// Parses a boolean literal from the current token slice (`true` or
/// `false`).
fn parse_boolean(lex: &logos::Lexer<Token>) -> Option<bool> {
    match lex.slice() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Parses a date literal from the current token slice.
///
/// Accepts `#yyyy-mm-dd#` (midnight) and `#yyyy-mm-dd hh:mm:ss#`.
fn parse_date(lex: &logos::Lexer<Token>) -> Option<NaiveDateTime> {
    let inner = lex.slice().trim_matches('#');
    if inner.contains(' ') {
        NaiveDateTime::parse_from_str(inner, "%Y-%m-%d %H:%M:%S").ok()
    } else {
        NaiveDate::parse_from_str(inner, "%Y-%m-%d").ok()?
                                                    .and_hms_opt(0, 0, 0)
    }
}

/// Parses a guid literal from the current token slice.
fn parse_guid(lex: &logos::Lexer<Token>) -> Option<Uuid> {
    Uuid::parse_str(lex.slice()).ok()
}

/// Parses a string literal, stripping the quotes and processing `\"`, `\\`,
/// `\n`, `\t` and `\r` escapes. An unrecognized escape keeps the escaped
/// character.
fn parse_text(lex: &logos::Lexer<Token>) -> Option<String> {
    let inner = lex.slice();
    Some(unescape(&inner[1..inner.len() - 1]))
}

/// Parses a verbatim string literal: the `@` and quotes are stripped and a
/// doubled quote stands for a single one. No other escapes apply.
fn parse_verbatim_text(lex: &logos::Lexer<Token>) -> Option<String> {
    let inner = lex.slice();
    Some(inner[2..inner.len() - 1].replace("\"\"", "\""))
}

/// Parses a character literal; the unescaped content must be exactly one
/// character.
fn parse_character(lex: &logos::Lexer<Token>) -> Option<char> {
    let inner = lex.slice();
    let unescaped = unescape(&inner[1..inner.len() - 1]);
    let mut chars = unescaped.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// Replaces backslash escapes in string and character literal bodies.
fn unescape(body: &str) -> String {
    let mut result = String::with_capacity(body.len());
    let mut chars = body.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some('r') => result.push('\r'),
            Some(other) => result.push(other),
            None => result.push('\\'),
        }
    }

    result
}
