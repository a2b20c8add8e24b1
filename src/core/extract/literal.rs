//! Compile-time string resolution for argument groups.
//!
//! An argument resolves when it is one or more string literals joined by
//! the concatenation operator, with whitespace and comments anywhere in
//! between. Anything else (variables, constants, calls, interpolating
//! double-quoted strings) makes the value unknown at scan time.

use crate::core::lexer::{Operator, Quote, Token, TokenKind};

/// Resolve an argument group to its constant string value.
///
/// Returns `None` when the group contains no literal, when any token is not
/// a literal, a concatenation operator or trivia, when the literals and
/// operators don't alternate, or when a double-quoted literal interpolates.
pub fn resolve_literal(tokens: &[Token<'_>]) -> Option<String> {
    let mut value = String::new();
    let mut expect_literal = true;
    let mut literals = 0;

    for token in tokens {
        match token.kind {
            TokenKind::Whitespace | TokenKind::Comment => {}
            TokenKind::StringLiteral(quote) if expect_literal => {
                value.push_str(&decode_literal(token.text, quote)?);
                literals += 1;
                expect_literal = false;
            }
            TokenKind::Operator(Operator::Concat) if !expect_literal => expect_literal = true,
            _ => return None,
        }
    }

    (literals > 0 && !expect_literal).then_some(value)
}

/// Decode one quoted lexeme, delimiters included.
///
/// Unterminated literals don't decode.
pub fn decode_literal(text: &str, quote: Quote) -> Option<String> {
    let delimiter = match quote {
        Quote::Single => '\'',
        Quote::Double => '"',
    };
    let body = text.strip_prefix(delimiter)?.strip_suffix(delimiter)?;
    if ends_with_open_escape(body) {
        return None;
    }
    match quote {
        Quote::Single => Some(unescape_single(body)),
        Quote::Double => unescape_double(body),
    }
}

/// A body ending in an odd run of backslashes means the closing quote was escaped.
fn ends_with_open_escape(body: &str) -> bool {
    body.bytes().rev().take_while(|&b| b == b'\\').count() % 2 == 1
}

fn unescape_single(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\'
            && let Some(&next) = chars.peek()
            && (next == '\'' || next == '\\')
        {
            out.push(next);
            chars.next();
        } else {
            out.push(c);
        }
    }
    out
}

/// Decode a double-quoted body, or `None` if it interpolates a variable.
///
/// Octal and hex escapes produce raw bytes, so the decoded body is
/// assembled as bytes and converted once at the end.
fn unescape_double(body: &str) -> Option<String> {
    let chars: Vec<char> = body.chars().collect();
    let mut out = Vec::with_capacity(body.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '$' if chars
                .get(i + 1)
                .is_some_and(|&n| n == '{' || is_identifier_start(n)) =>
            {
                return None;
            }
            '{' if chars.get(i + 1) == Some(&'$') => return None,
            '\\' if i + 1 < chars.len() => {
                let (decoded, consumed) = decode_escape(&chars[i + 1..]);
                match decoded {
                    Escape::Char(ch) => push_char(&mut out, ch),
                    Escape::Byte(byte) => out.push(byte),
                    Escape::Verbatim => {
                        push_char(&mut out, '\\');
                        for &ch in &chars[i + 1..i + 1 + consumed] {
                            push_char(&mut out, ch);
                        }
                    }
                }
                i += 1 + consumed;
                continue;
            }
            _ => push_char(&mut out, c),
        }
        i += 1;
    }

    Some(String::from_utf8_lossy(&out).into_owned())
}

fn push_char(out: &mut Vec<u8>, c: char) {
    out.extend_from_slice(c.encode_utf8(&mut [0; 4]).as_bytes());
}

/// Result of decoding one escape sequence.
enum Escape {
    Char(char),
    /// Octal and hex escapes name a byte, not a code point.
    Byte(u8),
    /// Not an escape PHP recognizes; the backslash is kept.
    Verbatim,
}

/// Decode the escape sequence whose first character (after the backslash)
/// is `rest[0]`, returning it with the number of characters consumed after
/// the backslash.
fn decode_escape(rest: &[char]) -> (Escape, usize) {
    let simple = match rest[0] {
        'n' => Some('\n'),
        't' => Some('\t'),
        'r' => Some('\r'),
        'v' => Some('\u{0B}'),
        'e' => Some('\u{1B}'),
        'f' => Some('\u{0C}'),
        '\\' => Some('\\'),
        '$' => Some('$'),
        '"' => Some('"'),
        _ => None,
    };
    if let Some(c) = simple {
        return (Escape::Char(c), 1);
    }

    match rest[0] {
        '0'..='7' => {
            let digits = count_matching(rest, 0, 3, |c| c.is_digit(8));
            match parse_radix(&rest[..digits], 8) {
                Some(code) => (Escape::Byte((code & 0xFF) as u8), digits),
                None => (Escape::Verbatim, 1),
            }
        }
        'x' => {
            let digits = count_matching(rest, 1, 2, |c| c.is_ascii_hexdigit());
            match parse_radix(&rest[1..1 + digits], 16) {
                Some(code) if digits > 0 => (Escape::Byte(code as u8), 1 + digits),
                _ => (Escape::Verbatim, 1),
            }
        }
        'u' if rest.get(1) == Some(&'{') => {
            let digits = count_matching(rest, 2, 6, |c| c.is_ascii_hexdigit());
            if digits == 0 || rest.get(2 + digits) != Some(&'}') {
                return (Escape::Verbatim, 1);
            }
            match parse_radix(&rest[2..2 + digits], 16).and_then(char::from_u32) {
                Some(c) => (Escape::Char(c), 3 + digits),
                None => (Escape::Verbatim, 1),
            }
        }
        _ => (Escape::Verbatim, 1),
    }
}

fn count_matching(rest: &[char], from: usize, max: usize, pred: impl Fn(&char) -> bool) -> usize {
    rest.iter().skip(from).take(max).take_while(|&&c| pred(&c)).count()
}

fn parse_radix(digits: &[char], radix: u32) -> Option<u32> {
    u32::from_str_radix(&digits.iter().collect::<String>(), radix).ok()
}

fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()
}
