//! Command-line tokenizer with POSIX-flavored quoting.
//!
//! Three spellings contribute to a word: bare runs where backslash
//! escapes the next character, single-quoted runs taken literally, and
//! double-quoted runs where only `\"` and `\\` collapse. Adjacent
//! pieces with no whitespace between them join into one word, so
//! `a"b c"d` is the single word `ab cd`.

use logos::Logos;
use thiserror::Error;

/// Errors encountered while splitting a line.
#[derive(Debug, Clone, PartialEq, Eq, Default, Error)]
pub enum LexError {
    #[default]
    #[error("unexpected character")]
    Unexpected,
    #[error("unterminated single quote")]
    UnterminatedSingle,
    #[error("unterminated double quote")]
    UnterminatedDouble,
    #[error("trailing escape character")]
    TrailingEscape,
}

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(error = LexError)]
#[logos(skip r"[ \t\r\n]+")]
enum Piece {
    #[regex(r#"([^ \t\r\n'"\\]|\\.)+"#, lex_bare)]
    Bare(String),

    #[regex(r"'[^']*'", lex_single)]
    Single(String),

    #[regex(r#""([^"\\]|\\.)*""#, lex_double)]
    Double(String),

    // Invalid patterns. Longest-match keeps these from shadowing the
    // closed forms above.
    #[regex(r"'[^']*", lex_unterminated_single)]
    #[regex(r#""([^"\\]|\\.)*"#, lex_unterminated_double)]
    #[token("\\", lex_trailing_escape)]
    Invalid,
}

/// Backslash makes the next character literal.
fn lex_bare(lex: &mut logos::Lexer<Piece>) -> String {
    let s = lex.slice();
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Everything between the quotes, untouched.
fn lex_single(lex: &mut logos::Lexer<Piece>) -> String {
    let s = lex.slice();
    s[1..s.len() - 1].to_string()
}

/// Strips the quotes; `\"` and `\\` collapse, any other backslash stays.
fn lex_double(lex: &mut logos::Lexer<Piece>) -> String {
    let s = &lex.slice()[1..lex.slice().len() - 1];
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' && matches!(chars.peek(), Some('"' | '\\')) {
            out.push(chars.next().unwrap_or(c));
        } else {
            out.push(c);
        }
    }
    out
}

fn lex_unterminated_single(_lex: &mut logos::Lexer<Piece>) -> Result<(), LexError> {
    Err(LexError::UnterminatedSingle)
}

fn lex_unterminated_double(_lex: &mut logos::Lexer<Piece>) -> Result<(), LexError> {
    Err(LexError::UnterminatedDouble)
}

fn lex_trailing_escape(_lex: &mut logos::Lexer<Piece>) -> Result<(), LexError> {
    Err(LexError::TrailingEscape)
}

/// Splits a command line into words.
///
/// Returns an empty vector for blank input. Quoting errors surface as
/// [`LexError`] so the caller can report them without running anything.
pub fn split(line: &str) -> Result<Vec<String>, LexError> {
    let mut lexer = Piece::lexer(line);
    let mut words: Vec<String> = Vec::new();
    let mut last_end: Option<usize> = None;

    while let Some(piece) = lexer.next() {
        let span = lexer.span();
        match piece {
            Ok(Piece::Bare(text) | Piece::Single(text) | Piece::Double(text)) => {
                let joins = last_end == Some(span.start);
                match words.last_mut() {
                    Some(word) if joins => word.push_str(&text),
                    _ => words.push(text),
                }
                last_end = Some(span.end);
            }
            Ok(Piece::Invalid) => return Err(LexError::Unexpected),
            Err(err) => return Err(err),
        }
    }
    Ok(words)
}
