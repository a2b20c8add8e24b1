//! PHP tokenizer.
//!
//! Converts the full text of one source file into a flat `Vec<Token>` that
//! covers every byte of the input. The extractor never needs a syntax tree:
//! it only looks at identifiers, parentheses, commas, string literals and
//! comments, so everything else is folded into coarse kinds.
//!
//! Tokenization never fails. Unterminated strings, comments and heredocs run
//! to end of input, and bytes that match no rule become single-character
//! [`TokenKind::Other`] tokens.

mod raw_token;

use logos::Logos;

use raw_token::{RawToken, open_tag_end};

/// Quoting style of a string literal. The two styles decode differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quote {
    Single,
    Double,
}

/// Punctuation the call-site scanner and argument splitter care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,
    OpenBrace,
    CloseBrace,
    Comma,
    /// String concatenation (`.`).
    Concat,
    /// `->` and `?->`.
    MemberAccess,
    /// `::`.
    StaticAccess,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Identifier,
    StringLiteral(Quote),
    Comment,
    Operator(Operator),
    Whitespace,
    /// Variables, numbers, heredocs, inline HTML and unrecognized bytes.
    Other,
}

impl TokenKind {
    /// Whitespace and comments are skipped when looking for neighbours.
    pub fn is_trivia(self) -> bool {
        matches!(self, TokenKind::Whitespace | TokenKind::Comment)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    /// Raw lexeme, delimiters included.
    pub text: &'src str,
    /// 1-based line the token starts on.
    pub line: usize,
}

/// Tokenize one PHP source file.
///
/// Text before the first open tag is emitted as a single inline HTML token
/// of kind [`TokenKind::Other`].
pub fn tokenize(source: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut line = 1;

    let code_start = open_tag_end(source).unwrap_or(source.len());
    if code_start > 0 {
        push_token(&mut tokens, TokenKind::Other, &source[..code_start], &mut line);
    }

    let mut lexer = RawToken::lexer(&source[code_start..]);
    while let Some(raw) = lexer.next() {
        let kind = raw.map_or(TokenKind::Other, RawToken::kind);
        push_token(&mut tokens, kind, lexer.slice(), &mut line);
    }

    tokens
}

fn push_token<'src>(
    tokens: &mut Vec<Token<'src>>,
    kind: TokenKind,
    text: &'src str,
    line: &mut usize,
) {
    tokens.push(Token {
        kind,
        text,
        line: *line,
    });
    *line += text.bytes().filter(|&b| b == b'\n').count();
}

/// Index of the first non-trivia token at or after `from`.
pub fn next_significant(tokens: &[Token<'_>], from: usize) -> Option<usize> {
    (from..tokens.len()).find(|&i| !tokens[i].kind.is_trivia())
}

/// Index of the last non-trivia token before `before`.
pub fn previous_significant(tokens: &[Token<'_>], before: usize) -> Option<usize> {
    (0..before).rev().find(|&i| !tokens[i].kind.is_trivia())
}
