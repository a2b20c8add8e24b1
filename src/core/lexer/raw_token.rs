//! Raw token definition.
//!
//! The `RawToken` enum is the logos-derived tokenizer output before it is
//! mapped onto the coarser [`TokenKind`](super::TokenKind) the extractor works with.
//!
//! Constructs whose extent can't be expressed as a regular expression
//! (comments, quoted strings, heredocs, inline HTML) are matched by their
//! opening delimiter and finished by a callback that bumps the lexer to the
//! closing delimiter, or to end of input when there is none.

use logos::{Lexer, Logos};

use super::{Operator, Quote, TokenKind};

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RawToken {
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    #[token("//", line_comment)]
    #[token("#", line_comment)]
    LineComment,

    #[token("/*", block_comment)]
    BlockComment,

    #[token("'", |lex| quoted(lex, b'\''))]
    SingleQuoted,

    #[token("\"", |lex| quoted(lex, b'"'))]
    DoubleQuoted,

    #[regex(r"<<<[ \t]*[A-Za-z_][A-Za-z0-9_]*\r?\n", heredoc)]
    #[regex(r#"<<<[ \t]*"[A-Za-z_][A-Za-z0-9_]*"\r?\n"#, heredoc)]
    #[regex(r"<<<[ \t]*'[A-Za-z_][A-Za-z0-9_]*'\r?\n", heredoc)]
    Heredoc,

    /// `?>` plus everything up to and including the next open tag.
    #[token("?>", inline_html)]
    InlineHtml,

    #[regex(
        r"\\?[A-Za-z_\x{80}-\x{10FFFF}][A-Za-z0-9_\x{80}-\x{10FFFF}]*(\\[A-Za-z_\x{80}-\x{10FFFF}][A-Za-z0-9_\x{80}-\x{10FFFF}]*)*"
    )]
    Identifier,

    #[regex(r"\$[A-Za-z_\x{80}-\x{10FFFF}][A-Za-z0-9_\x{80}-\x{10FFFF}]*")]
    Variable,

    #[regex(r"[0-9][0-9_]*(\.[0-9][0-9_]*)?([eE][+-]?[0-9]+)?")]
    #[regex(r"\.[0-9][0-9_]*([eE][+-]?[0-9]+)?")]
    #[regex(r"0[xXbBoO][0-9a-fA-F_]+")]
    Number,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("->")]
    Arrow,
    #[token("?->")]
    NullsafeArrow,
    #[token("::")]
    DoubleColon,

    #[token("...")]
    #[token(".=")]
    #[token("#[")]
    #[regex(r"[-+*/%=!<>&|^~?:;@`\\]")]
    Punct,
}

impl RawToken {
    pub(crate) fn kind(self) -> TokenKind {
        match self {
            RawToken::Whitespace => TokenKind::Whitespace,
            RawToken::LineComment | RawToken::BlockComment => TokenKind::Comment,
            RawToken::SingleQuoted => TokenKind::StringLiteral(Quote::Single),
            RawToken::DoubleQuoted => TokenKind::StringLiteral(Quote::Double),
            RawToken::Identifier => TokenKind::Identifier,
            RawToken::LParen => TokenKind::Operator(Operator::OpenParen),
            RawToken::RParen => TokenKind::Operator(Operator::CloseParen),
            RawToken::LBracket => TokenKind::Operator(Operator::OpenBracket),
            RawToken::RBracket => TokenKind::Operator(Operator::CloseBracket),
            RawToken::LBrace => TokenKind::Operator(Operator::OpenBrace),
            RawToken::RBrace => TokenKind::Operator(Operator::CloseBrace),
            RawToken::Comma => TokenKind::Operator(Operator::Comma),
            RawToken::Dot => TokenKind::Operator(Operator::Concat),
            RawToken::Arrow | RawToken::NullsafeArrow => {
                TokenKind::Operator(Operator::MemberAccess)
            }
            RawToken::DoubleColon => TokenKind::Operator(Operator::StaticAccess),
            RawToken::Punct => TokenKind::Operator(Operator::Other),
            RawToken::Heredoc | RawToken::InlineHtml | RawToken::Variable | RawToken::Number => {
                TokenKind::Other
            }
        }
    }
}

/// Line comments run until the newline or a closing `?>`, whichever comes first.
fn line_comment(lex: &mut Lexer<RawToken>) -> bool {
    let rest = lex.remainder();
    let newline = rest.find('\n').unwrap_or(rest.len());
    let end = rest[..newline].find("?>").unwrap_or(newline);
    lex.bump(end);
    true
}

fn block_comment(lex: &mut Lexer<RawToken>) -> bool {
    let rest = lex.remainder();
    let end = rest.find("*/").map_or(rest.len(), |pos| pos + 2);
    lex.bump(end);
    true
}

fn quoted(lex: &mut Lexer<RawToken>, quote: u8) -> bool {
    let bytes = lex.remainder().as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == quote => {
                lex.bump(i + 1);
                return true;
            }
            _ => i += 1,
        }
    }
    lex.bump(bytes.len());
    true
}

/// Consumes a heredoc/nowdoc body through its closing label.
///
/// The closing label may be indented and must not be followed by an
/// identifier character.
fn heredoc(lex: &mut Lexer<RawToken>) -> bool {
    let label = lex
        .slice()
        .trim_start_matches('<')
        .trim()
        .trim_matches(['"', '\''])
        .to_string();

    let rest = lex.remainder();
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        let body = line.trim_start_matches([' ', '\t']);
        if let Some(after) = body.strip_prefix(label.as_str())
            && !after.starts_with(|c: char| c.is_alphanumeric() || c == '_')
        {
            lex.bump(offset + (line.len() - body.len()) + label.len());
            return true;
        }
        offset += line.len();
    }
    lex.bump(rest.len());
    true
}

fn inline_html(lex: &mut Lexer<RawToken>) -> bool {
    let rest = lex.remainder();
    lex.bump(open_tag_end(rest).unwrap_or(rest.len()));
    true
}

/// Byte offset just past the first PHP open tag (`<?php` or `<?=`) in `text`.
pub(crate) fn open_tag_end(text: &str) -> Option<usize> {
    let mut from = 0;
    while let Some(pos) = text[from..].find("<?") {
        let at = from + pos;
        let after = &text.as_bytes()[at + 2..];
        if after.first() == Some(&b'=') {
            return Some(at + 3);
        }
        if after.get(..3).is_some_and(|tag| tag.eq_ignore_ascii_case(b"php")) {
            return Some(at + 5);
        }
        from = at + 2;
    }
    None
}
